use super::{
    kernel::{build_weights, WindowError},
    window::SampleWindow,
};
use crate::util::ticks_to_ms;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("window holds {len} samples but the kernel needs {expected}")]
    WindowNotFull { len: usize, expected: usize },
}

/// Gaussian-weighted moving average over a [`SampleWindow`].
#[derive(Clone, Debug)]
pub struct GaussianFilter {
    weights: Vec<f64>,
}

impl GaussianFilter {
    pub fn new(size: i64) -> Result<Self, WindowError> {
        Ok(Self {
            weights: build_weights(size)?,
        })
    }

    /// A window sized to match this filter's kernel.
    pub fn window(&self) -> SampleWindow {
        SampleWindow::new(self.weights.len())
    }

    /// Weighted average of a full window, in milliseconds.
    pub fn compute(&self, window: &SampleWindow, frequency: i64) -> Result<f64, FilterError> {
        if window.len() != self.weights.len() {
            return Err(FilterError::WindowNotFull {
                len: window.len(),
                expected: self.weights.len(),
            });
        }
        let total: f64 = window
            .iter()
            .zip(&self.weights)
            .map(|(&delay, &w)| delay as f64 * w)
            .sum();
        Ok(ticks_to_ms(total, frequency))
    }
}
