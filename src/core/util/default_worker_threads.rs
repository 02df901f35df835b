use std::num::NonZeroUsize;
use std::thread;

const FALLBACK_WORKER_THREADS: usize = 4;

#[must_use]
pub fn default_worker_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_WORKER_THREADS)
}
