use std::error::Error;
use std::fmt;

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::sample_pixel::sample_pixel::PixelSampler;
use crate::core::arithmetic::TierArithmetic;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::render_job::RenderJob;
use crate::core::data::viewport::{PlanePoint, ScreenMapping};

/// Why a tile produced no pixels.
///
/// `Cancelled` is expected control flow; the other variants are invariant
/// violations that invalidate the whole generation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTileError {
    Cancelled(Cancelled),
    UnknownTile { index: usize, tile_count: usize },
    TileOutsideCanvas { tile: PixelRect, canvas_width: u32, canvas_height: u32 },
    PixelOutsideTile(PixelBufferError),
}

impl fmt::Display for RenderTileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::UnknownTile { index, tile_count } => {
                write!(f, "job has {} tiles, no tile {}", tile_count, index)
            }
            Self::TileOutsideCanvas {
                tile,
                canvas_width,
                canvas_height,
            } => write!(
                f,
                "tile {}x{} at x:{}, y:{} exceeds the {}x{} canvas",
                tile.width(),
                tile.height(),
                tile.top_left().x,
                tile.top_left().y,
                canvas_width,
                canvas_height
            ),
            Self::PixelOutsideTile(e) => write!(f, "pixel written outside its tile: {}", e),
        }
    }
}

impl Error for RenderTileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::PixelOutsideTile(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Cancelled> for RenderTileError {
    fn from(c: Cancelled) -> Self {
        Self::Cancelled(c)
    }
}

/// Renders tile `tile_index` of `job` into a fresh buffer covering exactly
/// that tile. The token is polled before every row and, through the
/// evaluator, every iteration batch of each sample.
pub fn render_tile<C: CancelToken>(
    job: &RenderJob,
    tile_index: usize,
    cancel: &C,
) -> Result<PixelBuffer, RenderTileError> {
    let tile = job.tile(tile_index).ok_or(RenderTileError::UnknownTile {
        index: tile_index,
        tile_count: job.tile_count(),
    })?;

    let viewport = job.viewport();
    let canvas = PixelRect::from_origin_and_size(Point { x: 0, y: 0 }, viewport.width(), viewport.height());
    if !canvas.is_ok_and(|canvas| canvas.contains_rect(tile.rect)) {
        return Err(RenderTileError::TileOutsideCanvas {
            tile: tile.rect,
            canvas_width: viewport.width(),
            canvas_height: viewport.height(),
        });
    }

    match viewport.center() {
        PlanePoint::Native(center) => render_tile_in_tier(job, center, tile.rect, cancel),
        PlanePoint::Arbitrary(center) => render_tile_in_tier(job, center, tile.rect, cancel),
    }
}

fn render_tile_in_tier<T, C>(
    job: &RenderJob,
    center: &T,
    rect: PixelRect,
    cancel: &C,
) -> Result<PixelBuffer, RenderTileError>
where
    T: TierArithmetic,
    C: CancelToken,
{
    let viewport = job.viewport();
    let sampler = PixelSampler::new(
        ScreenMapping::new(center, viewport.scale(), viewport.width(), viewport.height()),
        job.sample_grid(),
        job.algorithm(),
        job.colour_map(),
    );
    let mut buffer = PixelBuffer::new(rect);

    for y in rect.top_left().y..=rect.bottom_right().y {
        if cancel.is_cancelled() {
            return Err(RenderTileError::Cancelled(Cancelled));
        }

        for x in rect.top_left().x..=rect.bottom_right().x {
            let colour = sampler.sample_pixel(x, y, cancel)?;
            buffer
                .set_pixel(Point { x, y }, colour)
                .map_err(RenderTileError::PixelOutsideTile)?;
        }
    }

    Ok(buffer)
}
