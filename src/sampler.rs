use crate::{
    clock::{Clock, ClockError},
    config::Config,
    display::Display,
    sched::priority::PriorityHint,
    shutdown::ShutdownFlag,
    time::{estimator::Estimator, estimator::Sleeper, filter::GaussianFilter, window::SampleWindow},
};
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
    Stopped,
}

/// Owns the clock, window and kernel for the lifetime of the loop.
pub struct Sampler<C, S, P, W: Write> {
    clock: C,
    sleeper: S,
    priority: P,
    estimator: Estimator,
    filter: GaussianFilter,
    window: SampleWindow,
    frequency: i64,
    display: Display<W>,
    state: LoopState,
}

impl<C, S, P, W> Sampler<C, S, P, W>
where
    C: Clock,
    S: Sleeper,
    P: PriorityHint,
    W: Write,
{
    pub fn new(clock: C, sleeper: S, priority: P, cfg: &Config, display: Display<W>) -> Result<Self> {
        let frequency = clock.frequency().context("querying clock frequency")?;
        if frequency <= 0 {
            return Err(ClockError::BadFrequency(frequency).into());
        }
        let filter = GaussianFilter::new(cfg.window_size).context("building smoothing kernel")?;
        let window = filter.window();
        debug!(
            "sampler ready: {} Hz clock, window {}, {} trials per sample",
            frequency,
            window.capacity(),
            cfg.trials
        );
        Ok(Self {
            clock,
            sleeper,
            priority,
            estimator: Estimator::new(cfg.trials),
            filter,
            window,
            frequency,
            display,
            state: LoopState::Running,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// One full sampling pass. Returns the smoothed reading once the window
    /// is full, `None` while it is still filling.
    pub fn step(&mut self) -> Result<Option<f64>> {
        self.priority.elevate();
        let delay = self.estimator.measure(&self.clock, &self.sleeper)?;
        self.window.push(delay);
        if !self.window.is_full() {
            return Ok(None);
        }
        let ms = self.filter.compute(&self.window, self.frequency)?;
        self.display.reading(ms)?;
        Ok(Some(ms))
    }

    /// Samples until `shutdown` is requested, returning the number of
    /// completed passes.
    pub fn run(&mut self, shutdown: &ShutdownFlag) -> Result<u64> {
        let mut passes = 0u64;
        loop {
            match self.state {
                LoopState::Running => {
                    if shutdown.is_requested() {
                        self.state = LoopState::Stopping;
                        continue;
                    }
                    self.step()?;
                    passes += 1;
                }
                LoopState::Stopping => {
                    self.display.farewell()?;
                    self.state = LoopState::Stopped;
                }
                LoopState::Stopped => break,
            }
        }
        info!("sampling stopped after {passes} passes");
        Ok(passes)
    }

    #[cfg(test)]
    pub fn into_display(self) -> Display<W> {
        self.display
    }
}
