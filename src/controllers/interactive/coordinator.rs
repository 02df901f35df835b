use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError};
use log::{debug, error, info, trace, warn};

use crate::controllers::interactive::commands::ViewCommand;
use crate::controllers::interactive::dispatch::{DispatchAction, DispatchState};
use crate::controllers::interactive::errors::coordinator_error::CoordinatorError;
use crate::controllers::interactive::events::render_event::RenderEvent;
use crate::controllers::interactive::ports::presenter_port::PresenterPort;
use crate::core::actions::render_job::render_job_parallel_rayon::render_job_parallel_rayon;
use crate::core::actions::schedule_tiles::worker_pool::{TileOutcome, TileReport, TileScheduler};
use crate::core::arithmetic::PrecisionTier;
use crate::core::data::frame_buffer::{FrameBuffer, FrameSnapshot};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::render_job::RenderJob;
use crate::core::data::tile::TileStatus;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::errors::ConfigError;
use crate::core::fractals::mandelbrot::explorer_config::{ExplorerConfig, DEFAULT_CENTER};

/// State of the newest generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Idle,
    /// Requested or queued, no tile started yet.
    Scheduled,
    InProgress,
    Completed,
    /// Stopped without a successor, e.g. after a fault.
    Cancelled,
}

struct ActiveJob {
    job: Arc<RenderJob>,
    tiles: Vec<TileStatus>,
    started: Instant,
}

/// Owns the viewport, the generation counter and the frame buffer.
///
/// Everything here runs on the host's thread: commands mutate state and
/// cancel the running generation at once, [`dispatch`](Self::dispatch)
/// schedules one job for the newest state, and [`pump`](Self::pump) folds
/// finished tiles into the frame without blocking. Workers only ever read
/// the live generation.
pub struct RenderCoordinator {
    config: ExplorerConfig,
    viewport: Viewport,
    max_iterations: u32,
    live_generation: Arc<AtomicU64>,
    dispatch: DispatchState,
    active: Option<ActiveJob>,
    status: JobStatus,
    frame: FrameBuffer,
    scheduler: TileScheduler,
    reports: Receiver<TileReport>,
    presenter: Arc<dyn PresenterPort>,
}

impl RenderCoordinator {
    /// Validates `config`, starts the worker pool and requests the first frame.
    pub fn new(config: ExplorerConfig, presenter: Arc<dyn PresenterPort>) -> Result<Self, CoordinatorError> {
        config.validate()?;

        let viewport = config.initial_viewport()?;
        let frame = FrameBuffer::new(config.width, config.height)?;
        let live_generation = Arc::new(AtomicU64::new(0));
        let (report_tx, reports) = unbounded();
        let scheduler = TileScheduler::new(config.worker_threads, Arc::clone(&live_generation), report_tx)?;

        info!(
            "coordinator ready: {}x{} canvas, {} workers, {} samples per pixel",
            config.width,
            config.height,
            config.worker_threads,
            config.samples_per_axis * config.samples_per_axis
        );

        let mut coordinator = Self {
            max_iterations: config.max_iterations,
            config,
            viewport,
            live_generation,
            dispatch: DispatchState::new(),
            active: None,
            status: JobStatus::Idle,
            frame,
            scheduler,
            reports,
            presenter,
        };
        coordinator.invalidate();

        Ok(coordinator)
    }

    /// Applies one command. Rejected commands leave all state untouched.
    pub fn apply(&mut self, command: ViewCommand) -> Result<(), CoordinatorError> {
        match self.apply_to_state(command) {
            Ok(true) => {
                self.invalidate();
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(e) => {
                warn!("rejected {:?}: {}", command, e);
                Err(e.into())
            }
        }
    }

    /// Stops the current generation without requesting a new one.
    pub fn cancel(&mut self) {
        self.advance_generation();
        self.cancel_active();
        self.dispatch.reset();
        self.scheduler.purge_stale();
        self.status = JobStatus::Cancelled;
    }

    /// Schedules a job for the newest requested state, if any.
    pub fn dispatch(&mut self) -> Result<DispatchAction, CoordinatorError> {
        let Self {
            dispatch,
            config,
            viewport,
            max_iterations,
            scheduler,
            active,
            ..
        } = self;

        let action = dispatch.submit_pending(|generation| -> Result<(), CoordinatorError> {
            let job = Arc::new(RenderJob::new(generation, viewport.clone(), *max_iterations, config)?);
            debug!("dispatching {:?}", job);

            *active = Some(ActiveJob {
                tiles: vec![TileStatus::Pending; job.tile_count()],
                started: Instant::now(),
                job: Arc::clone(&job),
            });
            scheduler.enqueue_job(job);
            Ok(())
        })?;

        if let DispatchAction::Submitted { generation, requests } = action {
            if requests > 1 {
                trace!("generation {} coalesced {} requests", generation, requests);
            }
        }

        Ok(action)
    }

    /// Folds every report already waiting into the frame. Never blocks.
    /// Returns how many reports were handled.
    pub fn pump(&mut self) -> Result<usize, CoordinatorError> {
        let mut handled = 0;
        while let Ok(report) = self.reports.try_recv() {
            self.handle_report(report)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Dispatches anything pending, then pumps until the newest generation
    /// settles or `timeout` runs out. Returns whether it settled.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> Result<bool, CoordinatorError> {
        let deadline = Instant::now() + timeout;
        self.dispatch()?;

        loop {
            self.pump()?;
            if self.is_idle() {
                return Ok(true);
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Ok(false);
            }

            match self.reports.recv_timeout(remaining) {
                Ok(report) => self.handle_report(report)?,
                Err(RecvTimeoutError::Timeout) => return Ok(self.is_idle()),
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(CoordinatorError::InvariantViolation {
                        generation: self.generation(),
                        message: "tile workers exited".to_string(),
                    });
                }
            }
        }
    }

    /// Renders the current state on rayon's pool and returns the frame
    /// without touching the progressive frame buffer.
    pub fn render_blocking(&self) -> Result<FrameSnapshot, CoordinatorError> {
        let job = RenderJob::new(self.generation(), self.viewport.clone(), self.max_iterations, &self.config)?;
        Ok(render_job_parallel_rayon(&job)?)
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        self.frame.snapshot()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self.dispatch.has_pending()
            && matches!(self.status, JobStatus::Idle | JobStatus::Completed | JobStatus::Cancelled)
    }

    #[must_use]
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// The live generation. Work stamped with anything else is stale.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.live_generation.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn frame_generation(&self) -> u64 {
        self.frame.generation()
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn tier(&self) -> PrecisionTier {
        self.viewport.tier()
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Per-tile progress of the dispatched job, if one is running.
    #[must_use]
    pub fn tile_statuses(&self) -> Option<&[TileStatus]> {
        self.active.as_ref().map(|active| active.tiles.as_slice())
    }

    /// Orders of magnitude zoomed in from the reset view of this canvas.
    #[must_use]
    pub fn zoom_depth_decades(&self) -> f64 {
        let reset = ExplorerConfig::reset_scale(self.viewport.width(), self.viewport.height());
        self.viewport.zoom_depth_decades(reset)
    }

    /// One-line summary suitable for a window title.
    #[must_use]
    pub fn status_line(&self) -> String {
        format!(
            "Mandelbrot - 10^{:.0} - {} - {} iterations",
            self.zoom_depth_decades(),
            self.tier(),
            self.max_iterations
        )
    }

    pub fn shutdown(&mut self) {
        self.cancel();
        self.scheduler.shutdown();
    }

    /// Returns whether the command changed anything worth re-rendering.
    fn apply_to_state(&mut self, command: ViewCommand) -> Result<bool, ConfigError> {
        match command {
            ViewCommand::Pan { dx, dy } => {
                if !dx.is_finite() || !dy.is_finite() {
                    return Err(ConfigError::InvalidPanDelta { dx, dy });
                }
                if dx == 0.0 && dy == 0.0 {
                    return Ok(false);
                }
                self.viewport.pan(dx, dy);
                self.frame.shift(dx.round() as i64, dy.round() as i64);
            }
            ViewCommand::ZoomAt { pivot, factor } => {
                let before = self.viewport.tier();
                self.viewport.zoom_at(pivot, factor)?;
                self.after_zoom(before, pivot, factor);
            }
            ViewCommand::ZoomInAt { pivot } => {
                let before = self.viewport.tier();
                self.viewport.zoom_at(pivot, self.config.zoom_step)?;
                self.after_zoom(before, pivot, self.config.zoom_step);
            }
            ViewCommand::ZoomOutAt { pivot } => {
                let before = self.viewport.tier();
                self.viewport.zoom_out_at(pivot, self.config.zoom_step)?;
                self.after_zoom(before, pivot, self.config.zoom_step.recip());
            }
            ViewCommand::SetMaxIterations { delta } => {
                let next = i64::from(self.max_iterations)
                    .saturating_add(delta)
                    .clamp(1, i64::from(u32::MAX)) as u32;
                if next == self.max_iterations {
                    return Ok(false);
                }
                debug!("max iterations {} -> {}", self.max_iterations, next);
                self.max_iterations = next;
            }
            ViewCommand::ResetView => {
                let (width, height) = (self.viewport.width(), self.viewport.height());
                self.viewport = Viewport::new(
                    DEFAULT_CENTER,
                    ExplorerConfig::reset_scale(width, height),
                    width,
                    height,
                    self.config.guard_bits,
                )?;
                self.max_iterations = self.config.max_iterations;
            }
            ViewCommand::Resize { width, height } => {
                if (width, height) == (self.viewport.width(), self.viewport.height()) {
                    return Ok(false);
                }
                // Frame first: it validates before mutating, so a rejected
                // size leaves both untouched.
                self.frame.resize(width, height)?;
                self.viewport.resize(width, height)?;
                debug!("canvas resized to {}x{}", width, height);
            }
        }

        Ok(true)
    }

    /// `factor` is the ratio of the new scale to the old one.
    fn after_zoom(&mut self, before: PrecisionTier, pivot: (f64, f64), factor: f64) {
        self.frame.rescale_about(pivot, factor);

        let after = self.viewport.tier();
        if after != before {
            debug!("precision tier {} -> {} at scale {}", before, after, self.viewport.scale());
        }
    }

    /// Coordinator is the only writer of the live generation.
    fn advance_generation(&mut self) -> u64 {
        let generation = self.live_generation.load(Ordering::Acquire) + 1;
        self.live_generation.store(generation, Ordering::Release);
        generation
    }

    fn cancel_active(&mut self) {
        self.dispatch.abandon_in_flight();

        let Some(mut active) = self.active.take() else {
            return;
        };
        if self.status == JobStatus::Completed {
            return;
        }

        for status in &mut active.tiles {
            if *status != TileStatus::Done {
                *status = TileStatus::Cancelled;
            }
        }
        let generation = active.job.generation();
        debug!("generation {} cancelled", generation);
        self.presenter.present(RenderEvent::Cancelled { generation });
    }

    fn invalidate(&mut self) {
        let generation = self.advance_generation();
        self.cancel_active();

        let purged = self.scheduler.purge_stale();
        if purged > 0 {
            trace!("purged {} queued tiles", purged);
        }

        self.dispatch.request(generation);
        self.status = JobStatus::Scheduled;
    }

    fn handle_report(&mut self, report: TileReport) -> Result<(), CoordinatorError> {
        let TileReport {
            generation,
            tile_index,
            outcome,
        } = report;

        let live = self.active.as_ref().map(|active| active.job.generation());
        if live != Some(generation) || generation != self.generation() {
            trace!("dropping stale report: generation {} tile {}", generation, tile_index);
            return Ok(());
        }

        match outcome {
            TileOutcome::Started => {
                self.mark_tile(tile_index, TileStatus::InProgress);
                if self.status == JobStatus::Scheduled {
                    self.status = JobStatus::InProgress;
                }
                Ok(())
            }
            TileOutcome::Cancelled => {
                self.mark_tile(tile_index, TileStatus::Cancelled);
                Ok(())
            }
            TileOutcome::Fault(message) => Err(self.discard(generation, message)),
            TileOutcome::Done(pixels) => self.land_tile(generation, tile_index, &pixels),
        }
    }

    fn land_tile(&mut self, generation: u64, tile_index: usize, pixels: &PixelBuffer) -> Result<(), CoordinatorError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(());
        };
        let expected = active.job.tile(tile_index).map(|tile| tile.rect);
        let tile_count = active.job.tile_count();
        let tier = active.job.tier();
        let started = active.started;

        if expected != Some(pixels.pixel_rect()) {
            let message = format!(
                "tile {} returned pixels for {:?}, expected {:?}",
                tile_index,
                pixels.pixel_rect(),
                expected
            );
            return Err(self.discard(generation, message));
        }

        if self.frame.generation() != generation {
            if let Err(e) = self.frame.begin_generation(generation, tile_count) {
                return Err(self.discard(generation, e.to_string()));
            }
        }
        if let Err(e) = self.frame.blit_tile(generation, tile_index, pixels) {
            return Err(self.discard(generation, e.to_string()));
        }

        self.mark_tile(tile_index, TileStatus::Done);
        if self.status == JobStatus::Scheduled {
            self.status = JobStatus::InProgress;
        }

        self.presenter.present(RenderEvent::TileCompleted {
            generation,
            tile_index,
            completed: self.frame.completed_tiles(),
            total: tile_count,
        });

        if self.frame.is_complete() {
            let duration = started.elapsed();
            self.status = JobStatus::Completed;
            self.dispatch.observe_completion(generation);
            info!("generation {} complete in {:?} ({})", generation, duration, tier);
            self.presenter.present(RenderEvent::FrameCompleted {
                generation,
                tier,
                duration,
            });
        }

        Ok(())
    }

    fn mark_tile(&mut self, tile_index: usize, status: TileStatus) {
        if let Some(slot) = self.active.as_mut().and_then(|active| active.tiles.get_mut(tile_index)) {
            *slot = status;
        }
    }

    /// Throws away `generation` after an invariant violation.
    fn discard(&mut self, generation: u64, message: String) -> CoordinatorError {
        error!("generation {} discarded: {}", generation, message);

        self.advance_generation();
        self.active = None;
        self.dispatch.reset();
        self.scheduler.purge_stale();
        self.status = JobStatus::Cancelled;
        self.presenter.present(RenderEvent::Fault {
            generation,
            message: message.clone(),
        });

        CoordinatorError::InvariantViolation { generation, message }
    }
}
