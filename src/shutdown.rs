use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Cancellation flag shared between the signal handler and the sampling
/// loop. The loop only observes it between full sampling passes.
#[derive(Clone, Debug, Default)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

/// Registers the Ctrl+C listener. The handler only flips `flag`.
pub async fn install(flag: ShutdownFlag) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::debug!("interrupt received; stopping after current sample");
                flag.request();
            }
            Err(err) => tracing::warn!("unable to listen for Ctrl+C: {err}"),
        }
    });
    // let the listener register before any sampling starts
    tokio::task::yield_now().await;
}
