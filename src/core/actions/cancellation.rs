use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Escape-time iterations between two cancellation polls inside one sample.
pub const ITERATION_BATCH: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "operation cancelled")
    }
}

impl std::error::Error for Cancelled {}

pub trait CancelToken: Send + Sync {
    fn is_cancelled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelToken for NeverCancel {
    #[inline]
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl<F> CancelToken for F
where
    F: Fn() -> bool + Send + Sync,
{
    #[inline]
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// Stale as soon as the coordinator's live generation moves past the job's,
/// or the pool is shutting down.
#[derive(Debug, Clone, Copy)]
pub struct GenerationToken<'a> {
    job_generation: u64,
    live_generation: &'a AtomicU64,
    shutdown: &'a AtomicBool,
}

impl<'a> GenerationToken<'a> {
    #[must_use]
    pub fn new(job_generation: u64, live_generation: &'a AtomicU64, shutdown: &'a AtomicBool) -> Self {
        Self {
            job_generation,
            live_generation,
            shutdown,
        }
    }
}

impl CancelToken for GenerationToken<'_> {
    #[inline]
    fn is_cancelled(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
            || self.live_generation.load(Ordering::Acquire) != self.job_generation
    }
}
