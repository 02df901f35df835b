use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use log::{debug, trace, warn};

use crate::core::actions::cancellation::{CancelToken, GenerationToken};
use crate::core::actions::render_tile::render_tile::{render_tile, RenderTileError};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_job::RenderJob;
use crate::core::fractals::mandelbrot::errors::ConfigError;

/// What a worker did with one tile.
#[derive(Debug, Clone, PartialEq)]
pub enum TileOutcome {
    Started,
    Done(PixelBuffer),
    Cancelled,
    /// Invariant violation inside the worker; the message describes it.
    Fault(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TileReport {
    pub generation: u64,
    pub tile_index: usize,
    pub outcome: TileOutcome,
}

#[derive(Debug)]
pub enum TileSchedulerError {
    Config(ConfigError),
    Spawn(io::Error),
}

impl fmt::Display for TileSchedulerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{}", e),
            Self::Spawn(e) => write!(f, "failed to spawn tile worker: {}", e),
        }
    }
}

impl Error for TileSchedulerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Spawn(e) => Some(e),
        }
    }
}

struct TileTask {
    job: Arc<RenderJob>,
    tile_index: usize,
}

struct SharedQueue {
    tasks: Mutex<VecDeque<TileTask>>,
    wake: Condvar,
    shutdown: AtomicBool,
    live_generation: Arc<AtomicU64>,
}

impl SharedQueue {
    fn lock_tasks(&self) -> MutexGuard<'_, VecDeque<TileTask>> {
        // A panicking worker must not wedge the queue for everyone else.
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fixed pool of tile workers fed from one shared FIFO.
///
/// Workers park on the condvar only while the queue is empty. Each tile is
/// rendered under a [`GenerationToken`], so bumping the live generation
/// stops in-flight work at the next row or iteration batch.
pub struct TileScheduler {
    shared: Arc<SharedQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl TileScheduler {
    pub fn new(
        worker_threads: usize,
        live_generation: Arc<AtomicU64>,
        reports: Sender<TileReport>,
    ) -> Result<Self, TileSchedulerError> {
        if worker_threads == 0 {
            return Err(TileSchedulerError::Config(ConfigError::ZeroWorkerThreads));
        }

        let shared = Arc::new(SharedQueue {
            tasks: Mutex::new(VecDeque::new()),
            wake: Condvar::new(),
            shutdown: AtomicBool::new(false),
            live_generation,
        });

        let mut scheduler = Self {
            shared,
            workers: Vec::with_capacity(worker_threads),
        };

        for id in 0..worker_threads {
            let worker_shared = Arc::clone(&scheduler.shared);
            let worker_reports = reports.clone();

            // Workers already running are joined by Drop if a later spawn fails.
            let handle = thread::Builder::new()
                .name(format!("tile-worker-{id}"))
                .spawn(move || worker_loop(&worker_shared, &worker_reports))
                .map_err(TileSchedulerError::Spawn)?;
            scheduler.workers.push(handle);
        }

        debug!("tile scheduler started with {} workers", worker_threads);
        Ok(scheduler)
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Queues every tile of `job`, dropping queued tiles of older
    /// generations first. Returns how many stale tiles were purged.
    pub fn enqueue_job(&self, job: Arc<RenderJob>) -> usize {
        let generation = job.generation();
        let purged = {
            let mut tasks = self.shared.lock_tasks();
            let before = tasks.len();
            tasks.retain(|task| task.job.generation() >= generation);
            let purged = before - tasks.len();

            tasks.extend((0..job.tile_count()).map(|tile_index| TileTask {
                job: Arc::clone(&job),
                tile_index,
            }));
            purged
        };

        self.shared.wake.notify_all();
        trace!(
            "generation {}: queued {} tiles, purged {} stale",
            generation,
            job.tile_count(),
            purged
        );
        purged
    }

    /// Drops queued tiles whose generation is no longer live.
    pub fn purge_stale(&self) -> usize {
        let live = self.shared.live_generation.load(Ordering::Acquire);
        let mut tasks = self.shared.lock_tasks();
        let before = tasks.len();
        tasks.retain(|task| task.job.generation() == live);
        before - tasks.len()
    }

    #[must_use]
    pub fn queued_tiles(&self) -> usize {
        self.shared.lock_tasks().len()
    }

    /// Stops every worker and waits for them to exit. Idempotent.
    pub fn shutdown(&mut self) {
        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.lock_tasks().clear();
        self.shared.wake.notify_all();

        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("tile worker panicked before shutdown");
            }
        }
    }
}

impl Drop for TileScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn next_task(shared: &SharedQueue) -> Option<TileTask> {
    let mut tasks = shared.lock_tasks();
    loop {
        if shared.shutdown.load(Ordering::Acquire) {
            return None;
        }

        if let Some(task) = tasks.pop_front() {
            return Some(task);
        }

        tasks = shared.wake.wait(tasks).unwrap_or_else(PoisonError::into_inner);
    }
}

fn worker_loop(shared: &SharedQueue, reports: &Sender<TileReport>) {
    while let Some(TileTask { job, tile_index }) = next_task(shared) {
        let generation = job.generation();
        let token = GenerationToken::new(generation, &shared.live_generation, &shared.shutdown);
        let report = |outcome| TileReport {
            generation,
            tile_index,
            outcome,
        };

        if token.is_cancelled() {
            if reports.send(report(TileOutcome::Cancelled)).is_err() {
                return;
            }
            continue;
        }

        if reports.send(report(TileOutcome::Started)).is_err() {
            return;
        }

        let outcome = match render_tile(&job, tile_index, &token) {
            Ok(pixels) => TileOutcome::Done(pixels),
            Err(RenderTileError::Cancelled(_)) => TileOutcome::Cancelled,
            Err(e) => TileOutcome::Fault(e.to_string()),
        };
        trace!("generation {} tile {}: {}", generation, tile_index, outcome_name(&outcome));

        // Receiver gone means the coordinator was dropped; nothing left to do.
        if reports.send(report(outcome)).is_err() {
            return;
        }
    }
}

fn outcome_name(outcome: &TileOutcome) -> &'static str {
    match outcome {
        TileOutcome::Started => "started",
        TileOutcome::Done(_) => "done",
        TileOutcome::Cancelled => "cancelled",
        TileOutcome::Fault(_) => "fault",
    }
}
