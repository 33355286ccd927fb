pub mod monotonic;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("high-resolution clock is not supported on this host: {0}")]
    Unsupported(#[source] nix::errno::Errno),
    #[error("clock reported an unusable frequency of {0} ticks/s")]
    BadFrequency(i64),
}

/// Source of monotonic ticks.
///
/// Tick values are only meaningful as differences between two readings of
/// the same clock; `frequency` is fixed for the lifetime of the clock.
pub trait Clock {
    fn frequency(&self) -> Result<i64, ClockError>;
    fn now(&self) -> Result<i64, ClockError>;
}
