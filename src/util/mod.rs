use nix::sys::time::TimeSpec;
use std::time::Duration;

pub const NANOS_PER_SEC: i64 = 1_000_000_000;
pub const MILLIS_PER_SEC: f64 = 1_000.0;

/// Converts a timespec into a nanosecond tick count.
pub fn timespec_to_ns(ts: &TimeSpec) -> i64 {
    (ts.tv_sec() as i64) * NANOS_PER_SEC + ts.tv_nsec() as i64
}

/// Scales a (possibly fractional) tick count to milliseconds.
pub fn ticks_to_ms(ticks: f64, frequency: i64) -> f64 {
    (ticks / frequency as f64) * MILLIS_PER_SEC
}

pub fn duration_to_ns(d: Duration) -> i64 {
    d.as_secs() as i64 * NANOS_PER_SEC + d.subsec_nanos() as i64
}
