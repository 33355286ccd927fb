use crate::time::estimator::DEFAULT_TRIALS;
use std::{str::FromStr, time::Duration};
use thiserror::Error;

pub const ENV_WINDOW_SIZE: &str = "TIIMT_WINDOW_SIZE";
pub const ENV_TRIALS: &str = "TIIMT_TRIALS";
pub const ENV_SLEEP_US: &str = "TIIMT_SLEEP_US";

pub const DEFAULT_WINDOW_SIZE: i64 = 11;
pub const DEFAULT_SLEEP: Duration = Duration::from_millis(1);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key}={value:?} is not a valid number")]
    Parse { key: &'static str, value: String },
    #[error("{key}={value} {reason}")]
    OutOfRange {
        key: &'static str,
        value: i64,
        reason: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Smoothing window length; validated by the kernel builder.
    pub window_size: i64,
    /// Sleeps timed per sample, reduced by median.
    pub trials: usize,
    /// Requested duration of each minimal sleep.
    pub sleep_quantum: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            trials: DEFAULT_TRIALS,
            sleep_quantum: DEFAULT_SLEEP,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Applies overrides found through `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Config::default();

        if let Some(size) = parse::<i64>(&lookup, ENV_WINDOW_SIZE)? {
            cfg.window_size = size;
        }
        if let Some(trials) = parse::<i64>(&lookup, ENV_TRIALS)? {
            if trials < 1 || trials % 2 != 1 {
                return Err(ConfigError::OutOfRange {
                    key: ENV_TRIALS,
                    value: trials,
                    reason: "must be positive and odd",
                });
            }
            cfg.trials = trials as usize;
        }
        if let Some(us) = parse::<i64>(&lookup, ENV_SLEEP_US)? {
            if us < 1 {
                return Err(ConfigError::OutOfRange {
                    key: ENV_SLEEP_US,
                    value: us,
                    reason: "must be positive",
                });
            }
            cfg.sleep_quantum = Duration::from_micros(us as u64);
        }
        Ok(cfg)
    }
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<T>()
        .map(Some)
        .map_err(|_| ConfigError::Parse {
            key,
            value: raw.clone(),
        })
}
