use super::{Clock, ClockError};
use crate::util::{timespec_to_ns, NANOS_PER_SEC};
use nix::time::{clock_getres, clock_gettime, ClockId};

/// `CLOCK_MONOTONIC` read through `clock_gettime`, one tick per nanosecond.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    id: ClockId,
}

impl MonotonicClock {
    /// Opens the monotonic clock, failing if the host cannot read it.
    pub fn probe() -> Result<Self, ClockError> {
        let clock = MonotonicClock {
            id: ClockId::CLOCK_MONOTONIC,
        };
        let res = clock_getres(clock.id).map_err(ClockError::Unsupported)?;
        tracing::debug!(
            "monotonic clock resolution {} ns",
            timespec_to_ns(&res)
        );
        clock.now()?;
        Ok(clock)
    }
}

impl Clock for MonotonicClock {
    fn frequency(&self) -> Result<i64, ClockError> {
        Ok(NANOS_PER_SEC)
    }

    fn now(&self) -> Result<i64, ClockError> {
        let ts = clock_gettime(self.id).map_err(ClockError::Unsupported)?;
        Ok(timespec_to_ns(&ts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_clock_never_goes_backwards() {
        let clock = MonotonicClock::probe().unwrap();
        let a = clock.now().unwrap();
        let b = clock.now().unwrap();
        assert!(b >= a);
    }

    #[test]
    fn frequency_is_nanoseconds() {
        let clock = MonotonicClock::probe().unwrap();
        assert_eq!(clock.frequency().unwrap(), 1_000_000_000);
    }
}
