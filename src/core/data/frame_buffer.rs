use std::error::Error;
use std::fmt;

use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferError};
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::viewport::validate_canvas;
use crate::core::fractals::mandelbrot::errors::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub enum FrameBufferError {
    StaleGeneration { stamp: u64, generation: u64 },
    UnknownTile { index: usize, tile_count: usize },
    Pixels(PixelBufferError),
}

impl fmt::Display for FrameBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleGeneration { stamp, generation } => write!(
                f,
                "tile from generation {} cannot land on a frame stamped {}",
                generation, stamp
            ),
            Self::UnknownTile { index, tile_count } => {
                write!(f, "tile index {} out of range for {} tiles", index, tile_count)
            }
            Self::Pixels(e) => write!(f, "tile does not fit the canvas: {}", e),
        }
    }
}

impl Error for FrameBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Pixels(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PixelBufferError> for FrameBufferError {
    fn from(e: PixelBufferError) -> Self {
        Self::Pixels(e)
    }
}

/// Copy of the canvas handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    pub width: u32,
    pub height: u32,
    pub generation: u64,
    /// Row-major RGB, three bytes per pixel.
    pub pixels: Vec<u8>,
}

/// The canvas the coordinator assembles tiles into.
///
/// The generation stamp only ever moves forward. Pixels from the previous
/// stamp stay visible until the tiles of the new one overwrite them.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pixels: PixelBuffer,
    generation: u64,
    completed: Vec<bool>,
    completed_count: usize,
}

fn canvas_rect(width: u32, height: u32) -> Result<PixelRect, ConfigError> {
    validate_canvas(width, height)?;
    PixelRect::from_origin_and_size(Point { x: 0, y: 0 }, width, height)
        .map_err(|_| ConfigError::EmptyCanvas { width, height })
}

/// Source coordinate for a target pixel after content moved by `delta`.
fn shifted(coordinate: i32, delta: i64) -> i32 {
    i32::try_from(i64::from(coordinate).saturating_sub(delta)).unwrap_or(i32::MIN)
}

/// Source coordinate whose pixel center lands on the target after zooming.
fn zoom_source(coordinate: i32, pivot: f64, factor: f64) -> i32 {
    (pivot + (f64::from(coordinate) + 0.5 - pivot) / factor).floor() as i32
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        Ok(Self {
            pixels: PixelBuffer::new(canvas_rect(width, height)?),
            generation: 0,
            completed: Vec::new(),
            completed_count: 0,
        })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.pixel_rect().width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.pixel_rect().height()
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    /// Changes the canvas size around its center. Content in the overlap is
    /// kept, new area is black. The stamp is kept; the bitmap is cleared.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        let rect = canvas_rect(width, height)?;
        let old = self.pixels.pixel_rect();
        let offset_x = (f64::from(width) - f64::from(old.width())) / 2.0;
        let offset_y = (f64::from(height) - f64::from(old.height())) / 2.0;

        self.pixels = self.pixels.remapped(rect, |p| Point {
            x: (f64::from(p.x) + 0.5 - offset_x).floor() as i32,
            y: (f64::from(p.y) + 0.5 - offset_y).floor() as i32,
        });
        self.completed.clear();
        self.completed_count = 0;
        Ok(())
    }

    /// Moves the content by `(dx, dy)` pixels as a preview of a pan. Uncovered
    /// pixels turn black.
    pub fn shift(&mut self, dx: i64, dy: i64) {
        let rect = self.pixels.pixel_rect();
        self.pixels = self.pixels.remapped(rect, |p| Point {
            x: shifted(p.x, dx),
            y: shifted(p.y, dy),
        });
        self.clear_completion();
    }

    /// Nearest-neighbour preview of a zoom by `factor` about `pivot`.
    /// `factor` must be finite and positive.
    pub fn rescale_about(&mut self, pivot: (f64, f64), factor: f64) {
        let rect = self.pixels.pixel_rect();
        self.pixels = self.pixels.remapped(rect, |p| Point {
            x: zoom_source(p.x, pivot.0, factor),
            y: zoom_source(p.y, pivot.1, factor),
        });
        self.clear_completion();
    }

    fn clear_completion(&mut self) {
        self.completed.fill(false);
        self.completed_count = 0;
    }

    /// Stamps the frame with a newer generation and resets the completion
    /// bitmap for its `tile_count` tiles.
    pub fn begin_generation(&mut self, generation: u64, tile_count: usize) -> Result<(), FrameBufferError> {
        if generation <= self.generation {
            return Err(FrameBufferError::StaleGeneration {
                stamp: self.generation,
                generation,
            });
        }

        self.generation = generation;
        self.completed.clear();
        self.completed.resize(tile_count, false);
        self.completed_count = 0;
        Ok(())
    }

    /// Copies a finished tile of the stamped generation into the canvas.
    pub fn blit_tile(
        &mut self,
        generation: u64,
        tile_index: usize,
        tile: &PixelBuffer,
    ) -> Result<(), FrameBufferError> {
        if generation != self.generation {
            return Err(FrameBufferError::StaleGeneration {
                stamp: self.generation,
                generation,
            });
        }

        let tile_count = self.completed.len();
        let slot = self
            .completed
            .get_mut(tile_index)
            .ok_or(FrameBufferError::UnknownTile {
                index: tile_index,
                tile_count,
            })?;

        self.pixels.blit(tile)?;

        if !*slot {
            *slot = true;
            self.completed_count += 1;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_tile_complete(&self, tile_index: usize) -> bool {
        self.completed.get(tile_index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn completed_tiles(&self) -> usize {
        self.completed_count
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.completed.len()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.completed.is_empty() && self.completed_count == self.completed.len()
    }

    #[must_use]
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            width: self.width(),
            height: self.height(),
            generation: self.generation,
            pixels: self.pixels.buffer().to_vec(),
        }
    }
}
