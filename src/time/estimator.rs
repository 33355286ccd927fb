use crate::clock::{Clock, ClockError};
use std::time::Duration;

pub const DEFAULT_TRIALS: usize = 5;

/// Yields the calling thread for the smallest sleep the scheduler honors.
pub trait Sleeper {
    fn sleep_min_quantum(&self);
}

#[derive(Clone, Copy, Debug)]
pub struct ThreadSleeper {
    quantum: Duration,
}

impl ThreadSleeper {
    pub fn new(quantum: Duration) -> Self {
        Self { quantum }
    }
}

impl Sleeper for ThreadSleeper {
    fn sleep_min_quantum(&self) {
        std::thread::sleep(self.quantum);
    }
}

/// Reduces several sleep timings to a single delay.
#[derive(Clone, Debug)]
pub struct Estimator {
    deltas: Vec<i64>,
}

impl Estimator {
    /// `trials` must be odd so the median is a real sample; the config layer
    /// rejects anything else.
    pub fn new(trials: usize) -> Self {
        Self {
            deltas: vec![0; trials.max(1)],
        }
    }

    /// Times `trials` minimal sleeps and returns the median delay in ticks.
    pub fn measure<C, S>(&mut self, clock: &C, sleeper: &S) -> Result<i64, ClockError>
    where
        C: Clock + ?Sized,
        S: Sleeper + ?Sized,
    {
        for slot in self.deltas.iter_mut() {
            let begin = clock.now()?;
            sleeper.sleep_min_quantum();
            let end = clock.now()?;
            *slot = end - begin;
        }
        Ok(median_of(&mut self.deltas))
    }
}

/// Sorts `values` in place and returns the middle element.
pub fn median_of(values: &mut [i64]) -> i64 {
    debug_assert!(!values.is_empty());
    values.sort_unstable();
    values[values.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Clock that advances by a scripted amount on every sleep.
    struct ScriptedClock {
        now: Cell<i64>,
        steps: RefCell<Vec<i64>>,
    }

    impl ScriptedClock {
        fn new(mut steps: Vec<i64>) -> Self {
            steps.reverse();
            Self {
                now: Cell::new(1_000),
                steps: RefCell::new(steps),
            }
        }
    }

    impl Clock for ScriptedClock {
        fn frequency(&self) -> Result<i64, ClockError> {
            Ok(1_000_000_000)
        }

        fn now(&self) -> Result<i64, ClockError> {
            Ok(self.now.get())
        }
    }

    impl Sleeper for ScriptedClock {
        fn sleep_min_quantum(&self) {
            let step = self.steps.borrow_mut().pop().unwrap_or(0);
            self.now.set(self.now.get() + step);
        }
    }

    struct BrokenClock;

    impl Clock for BrokenClock {
        fn frequency(&self) -> Result<i64, ClockError> {
            Err(ClockError::Unsupported(nix::errno::Errno::EINVAL))
        }

        fn now(&self) -> Result<i64, ClockError> {
            Err(ClockError::Unsupported(nix::errno::Errno::EINVAL))
        }
    }

    #[test]
    fn median_of_five() {
        let mut v = [5, 1, 9, 3, 7];
        assert_eq!(median_of(&mut v), 5);
    }

    #[test]
    fn median_ignores_single_outliers() {
        let mut v = [1_000_000, 1_000_100, 15_600_000, 2, 999_900];
        assert_eq!(median_of(&mut v), 1_000_000);
    }

    #[test]
    fn measure_returns_median_of_sleep_deltas() {
        let clock = ScriptedClock::new(vec![5, 1, 9, 3, 7]);
        let mut est = Estimator::new(DEFAULT_TRIALS);
        assert_eq!(est.measure(&clock, &clock).unwrap(), 5);
    }

    #[test]
    fn measure_consumes_one_sleep_per_trial() {
        let clock = ScriptedClock::new(vec![10; 7]);
        let mut est = Estimator::new(DEFAULT_TRIALS);
        est.measure(&clock, &clock).unwrap();
        assert_eq!(clock.steps.borrow().len(), 2);
    }

    #[test]
    fn clock_failure_propagates() {
        let mut est = Estimator::new(DEFAULT_TRIALS);
        let sleeper = ThreadSleeper::new(Duration::ZERO);
        assert!(matches!(
            est.measure(&BrokenClock, &sleeper),
            Err(ClockError::Unsupported(_))
        ));
    }
}
