use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum PriorityTier {
    Normal = 0,
    High = 1,
    Realtime = 2,
}

impl PriorityTier {
    fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Normal),
            1 => Some(Self::High),
            2 => Some(Self::Realtime),
            _ => None,
        }
    }
}

/// Best-effort scheduling elevation; never fails the caller.
pub trait PriorityHint {
    fn elevate(&self) -> PriorityTier;
}

const UNSET: u8 = u8::MAX;

/// Elevates the calling process, remembering the last tier reached so that
/// changes are logged once instead of every iteration.
#[derive(Debug)]
pub struct ProcessPriority {
    last: AtomicU8,
}

impl Default for ProcessPriority {
    fn default() -> Self {
        Self {
            last: AtomicU8::new(UNSET),
        }
    }
}

impl PriorityHint for ProcessPriority {
    fn elevate(&self) -> PriorityTier {
        let tier = request_highest();
        let prev = self.last.swap(tier as u8, Ordering::Relaxed);
        if prev != tier as u8 {
            match PriorityTier::from_u8(prev) {
                None => tracing::info!("scheduling priority: {:?}", tier),
                Some(prev) => tracing::info!("scheduling priority changed {:?} -> {:?}", prev, tier),
            }
        }
        tier
    }
}

#[cfg(target_os = "linux")]
fn request_highest() -> PriorityTier {
    // SAFETY: plain syscalls on the calling process with a fully initialized param.
    unsafe {
        let max = libc::sched_get_priority_max(libc::SCHED_FIFO);
        if max >= 0 {
            let param = libc::sched_param {
                sched_priority: max,
            };
            if libc::sched_setscheduler(0, libc::SCHED_FIFO, &param) == 0 {
                return PriorityTier::Realtime;
            }
        }
        if libc::setpriority(libc::PRIO_PROCESS, 0, -20) == 0 {
            return PriorityTier::High;
        }
    }
    static DENIED: once_cell::sync::OnceCell<()> = once_cell::sync::OnceCell::new();
    DENIED.get_or_init(|| {
        tracing::debug!(
            "priority elevation denied: {}; sampling at normal priority",
            std::io::Error::last_os_error()
        );
    });
    PriorityTier::Normal
}

#[cfg(not(target_os = "linux"))]
fn request_highest() -> PriorityTier {
    tracing::debug!("priority elevation not supported on this platform; skipping");
    PriorityTier::Normal
}
