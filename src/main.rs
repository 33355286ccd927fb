mod clock;
mod config;
mod display;
mod guard;
mod sampler;
mod sched;
mod shutdown;
mod time;
mod util;

use anyhow::Context;
use clock::monotonic::MonotonicClock;
use config::Config;
use display::Display;
use sampler::Sampler;
use sched::priority::ProcessPriority;
use shutdown::ShutdownFlag;
use time::estimator::ThreadSleeper;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cfg = Config::from_env().context("reading environment overrides")?;
    tracing::info!(
        "window {} samples, {} trials of {} ns sleeps",
        cfg.window_size,
        cfg.trials,
        util::duration_to_ns(cfg.sleep_quantum)
    );

    let shutdown = ShutdownFlag::new();
    shutdown::install(shutdown.clone()).await;

    let mut display = Display::new(std::io::stdout());
    display.banner()?;

    let clock = MonotonicClock::probe().context("opening high-resolution clock")?;
    let mut sampler = Sampler::new(
        clock,
        ThreadSleeper::new(cfg.sleep_quantum),
        ProcessPriority::default(),
        &cfg,
        display,
    )?;

    let task = tokio::task::spawn_blocking(move || sampler.run(&shutdown));
    match guard::settle(task.await) {
        Ok(passes) => {
            tracing::debug!("exiting cleanly after {passes} passes");
            Ok(())
        }
        Err(fault) => guard::terminate(fault),
    }
}
