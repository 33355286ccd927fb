use std::f64::consts::PI;
use thiserror::Error;

/// Largest kernel accepted; keeps the weight vector a bounded allocation.
pub const MAX_WINDOW_SIZE: i64 = 10_001;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("filter size must be a positive and odd value no larger than {MAX_WINDOW_SIZE}, got {0}")]
    InvalidSize(i64),
}

/// Builds a normalized, symmetric Gaussian kernel of `size` taps.
///
/// Sigma scales with the window so the kernel's effective support spans
/// its full width. Index 0 is applied to the oldest sample.
pub fn build_weights(size: i64) -> Result<Vec<f64>, WindowError> {
    if !(1..=MAX_WINDOW_SIZE).contains(&size) || size % 2 != 1 {
        return Err(WindowError::InvalidSize(size));
    }

    let sigma = ((size as f64 / 2.0 - 1.0) / 3.0) + (1.0 / 3.0);
    let scale = 1.0 / (sigma * (2.0 * PI).sqrt());
    let two_var = 2.0 * sigma.powi(2);
    let center = size / 2;

    let mut weights: Vec<f64> = (0..size)
        .map(|i| {
            let x = (i - center) as f64;
            scale * (-(x * x) / two_var).exp()
        })
        .collect();

    let total: f64 = weights.iter().sum();
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_sizes_sum_to_one() {
        for n in (1..=51).step_by(2) {
            let w = build_weights(n).unwrap();
            assert_eq!(w.len(), n as usize);
            assert!(w.iter().all(|&x| x >= 0.0));
            let sum: f64 = w.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "n={n} sum={sum}");
        }
    }

    #[test]
    fn rejects_even_and_non_positive() {
        for n in [0, -1, -3, 2, 10, 12] {
            assert_eq!(build_weights(n), Err(WindowError::InvalidSize(n)));
        }
    }

    #[test]
    fn oversized_kernels_are_rejected() {
        for n in [MAX_WINDOW_SIZE + 2, 100_000_000_001, i64::MAX] {
            assert_eq!(build_weights(n), Err(WindowError::InvalidSize(n)));
        }
        assert_eq!(build_weights(MAX_WINDOW_SIZE).unwrap().len(), MAX_WINDOW_SIZE as usize);
    }

    #[test]
    fn kernel_is_symmetric() {
        let w = build_weights(11).unwrap();
        for i in 0..w.len() {
            assert_eq!(w[i], w[w.len() - 1 - i]);
        }
    }

    #[test]
    fn peak_sits_at_center() {
        let w = build_weights(11).unwrap();
        let (argmax, _) = w
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &x)| if x > acc.1 { (i, x) } else { acc });
        assert_eq!(argmax, 5);
        assert!(w[0] < w[1]);
    }

    #[test]
    fn single_tap_is_identity() {
        assert_eq!(build_weights(1).unwrap(), vec![1.0]);
    }
}
