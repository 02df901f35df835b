use rayon::prelude::*;

use crate::core::actions::cancellation::{CancelToken, NeverCancel};
use crate::core::actions::render_tile::render_tile::{render_tile, RenderTileError};
use crate::core::data::frame_buffer::{FrameBuffer, FrameBufferError, FrameSnapshot};
use crate::core::data::render_job::RenderJob;
use crate::core::fractals::mandelbrot::errors::ConfigError;

/// Failure of a blocking whole-frame render.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderJobError {
    Tile(RenderTileError),
    Frame(FrameBufferError),
    Config(ConfigError),
}

impl std::fmt::Display for RenderJobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderJobError::Tile(e) => write!(f, "tile failed: {}", e),
            RenderJobError::Frame(e) => write!(f, "frame assembly failed: {}", e),
            RenderJobError::Config(e) => write!(f, "invalid job: {}", e),
        }
    }
}

impl std::error::Error for RenderJobError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderJobError::Tile(e) => Some(e),
            RenderJobError::Frame(e) => Some(e),
            RenderJobError::Config(e) => Some(e),
        }
    }
}

impl From<RenderTileError> for RenderJobError {
    fn from(e: RenderTileError) -> Self {
        RenderJobError::Tile(e)
    }
}

impl From<FrameBufferError> for RenderJobError {
    fn from(e: FrameBufferError) -> Self {
        RenderJobError::Frame(e)
    }
}

impl From<ConfigError> for RenderJobError {
    fn from(e: ConfigError) -> Self {
        RenderJobError::Config(e)
    }
}

/// Renders every tile of `job` on rayon's pool and assembles the frame.
///
/// Blocks until done. Used for headless snapshots and as a reference for
/// the interactive pipeline.
pub fn render_job_parallel_rayon(job: &RenderJob) -> Result<FrameSnapshot, RenderJobError> {
    render_job_parallel_rayon_cancelable(job, &NeverCancel)
}

/// Like [`render_job_parallel_rayon`], abandoning the frame as soon as any
/// tile observes cancellation.
pub fn render_job_parallel_rayon_cancelable<C: CancelToken>(
    job: &RenderJob,
    cancel: &C,
) -> Result<FrameSnapshot, RenderJobError> {
    let tiles = (0..job.tile_count())
        .into_par_iter()
        .map(|index| render_tile(job, index, cancel))
        .collect::<Result<Vec<_>, _>>()?;

    let viewport = job.viewport();
    let mut frame = FrameBuffer::new(viewport.width(), viewport.height())?;
    frame.begin_generation(job.generation(), tiles.len())?;

    for (index, tile) in tiles.iter().enumerate() {
        frame.blit_tile(job.generation(), index, tile)?;
    }

    Ok(frame.snapshot())
}
