use std::any::Any;
use thiserror::Error;
use tokio::task::JoinError;

/// `EX_SOFTWARE` from sysexits.h.
pub const FATAL_EXIT_CODE: i32 = 70;
pub const DIAGNOSTIC: &str = "GURU MEDITATION: Unhandled Exception Error!";

#[derive(Debug, Error)]
pub enum Fault {
    #[error("sampling loop failed: {0:#}")]
    Failed(anyhow::Error),
    #[error("sampling loop panicked: {message}")]
    Panicked {
        message: String,
        payload: Box<dyn Any + Send + 'static>,
    },
    #[error("sampling loop was cancelled")]
    Cancelled,
}

/// Collapses the outcome of the sampling task into its value or a fault.
pub fn settle<T>(outcome: Result<anyhow::Result<T>, JoinError>) -> Result<T, Fault> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(Fault::Failed(err)),
        Err(join) => match join.try_into_panic() {
            Ok(payload) => Err(Fault::Panicked {
                message: panic_message(&*payload).to_owned(),
                payload,
            }),
            Err(_) => Err(Fault::Cancelled),
        },
    }
}

/// Terminates the process immediately without unwinding the caller.
///
/// Debug builds re-raise panics so the panic backtrace is kept.
pub fn terminate(fault: Fault) -> ! {
    let fault = match fault {
        Fault::Panicked { payload, .. } if cfg!(debug_assertions) => {
            std::panic::resume_unwind(payload)
        }
        other => other,
    };
    tracing::error!("{fault}");
    eprintln!("\n{DIAGNOSTIC}");
    std::process::exit(FATAL_EXIT_CODE)
}

pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
