use crate::core::data::colour::Colour;
use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

pub const BYTES_PER_PIXEL: usize = 3;

fn pixel_rect_to_buffer_size(pixel_rect: PixelRect) -> usize {
    pixel_rect.size() as usize * BYTES_PER_PIXEL
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        pixel: Point,
        pixel_rect: PixelRect,
    },
    BoundsMismatch {
        pixel_rect_size: usize,
        buffer_size: usize,
    },
    RectOutsideBounds {
        source: PixelRect,
        pixel_rect: PixelRect,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                pixel_rect_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "pixel rect size {} does not match buffer size {}",
                    pixel_rect_size, buffer_size
                )
            }
            Self::RectOutsideBounds { source, pixel_rect } => {
                write!(
                    f,
                    "rect {}x{} at x:{}, y:{} does not fit inside {}x{} at x:{}, y:{}",
                    source.width(),
                    source.height(),
                    source.top_left().x,
                    source.top_left().y,
                    pixel_rect.width(),
                    pixel_rect.height(),
                    pixel_rect.top_left().x,
                    pixel_rect.top_left().y
                )
            }
            Self::PixelOutsideBounds { pixel, pixel_rect } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of PixelRect bounds top:{}, left:{}, bottom:{}, right:{}",
                    pixel.x,
                    pixel.y,
                    pixel_rect.top_left().y,
                    pixel_rect.top_left().x,
                    pixel_rect.bottom_right().y,
                    pixel_rect.bottom_right().x
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

/// Private RGB output of one tile, addressed in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixel_rect: PixelRect,
    buffer: Vec<u8>,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(pixel_rect: PixelRect) -> Self {
        Self {
            pixel_rect,
            buffer: vec![0; pixel_rect_to_buffer_size(pixel_rect)],
        }
    }

    pub fn from_data(pixel_rect: PixelRect, buffer: Vec<u8>) -> Result<Self, PixelBufferError> {
        let pixel_rect_size = pixel_rect_to_buffer_size(pixel_rect);

        if pixel_rect_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                pixel_rect_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { pixel_rect, buffer })
    }

    #[must_use]
    pub fn pixel_rect(&self) -> PixelRect {
        self.pixel_rect
    }

    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Bytes of one row, `y` in canvas coordinates.
    #[must_use]
    pub fn row(&self, y: i32) -> Option<&[u8]> {
        if y < self.pixel_rect.top_left().y || y > self.pixel_rect.bottom_right().y {
            return None;
        }

        let stride = self.pixel_rect.width() as usize * BYTES_PER_PIXEL;
        let start = (y - self.pixel_rect.top_left().y) as usize * stride;
        Some(&self.buffer[start..start + stride])
    }

    fn index_of(&self, pixel: Point) -> Result<usize, PixelBufferError> {
        if !self.pixel_rect.contains_point(pixel) {
            return Err(PixelBufferError::PixelOutsideBounds {
                pixel,
                pixel_rect: self.pixel_rect,
            });
        }

        let relative_x = (pixel.x - self.pixel_rect.top_left().x) as usize;
        let relative_y = (pixel.y - self.pixel_rect.top_left().y) as usize;
        Ok((relative_y * self.pixel_rect.width() as usize + relative_x) * BYTES_PER_PIXEL)
    }

    pub fn set_pixel(&mut self, pixel: Point, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(pixel)?;

        self.buffer[index] = colour.r;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.b;

        Ok(())
    }

    /// Copies `source` into the matching region of this buffer, row by row.
    pub fn blit(&mut self, source: &PixelBuffer) -> Result<(), PixelBufferError> {
        let source_rect = source.pixel_rect;
        if !self.pixel_rect.contains_rect(source_rect) {
            return Err(PixelBufferError::RectOutsideBounds {
                source: source_rect,
                pixel_rect: self.pixel_rect,
            });
        }

        let stride = source_rect.width() as usize * BYTES_PER_PIXEL;
        for (row, src) in source.buffer.chunks_exact(stride).enumerate() {
            let start = self.index_of(Point {
                x: source_rect.top_left().x,
                y: source_rect.top_left().y + row as i32,
            })?;
            self.buffer[start..start + stride].copy_from_slice(src);
        }

        Ok(())
    }

    /// Builds a buffer over `pixel_rect` where each pixel `p` copies
    /// `source_of(p)` from this buffer, or stays black when that lies outside.
    #[must_use]
    pub fn remapped(&self, pixel_rect: PixelRect, source_of: impl Fn(Point) -> Point) -> Self {
        let mut remapped = Self::new(pixel_rect);
        let stride = pixel_rect.width() as usize * BYTES_PER_PIXEL;
        let top_left = pixel_rect.top_left();

        for (row, bytes) in remapped.buffer.chunks_exact_mut(stride).enumerate() {
            for (column, target) in bytes.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let point = Point {
                    x: top_left.x + column as i32,
                    y: top_left.y + row as i32,
                };
                if let Ok(index) = self.index_of(source_of(point)) {
                    target.copy_from_slice(&self.buffer[index..index + BYTES_PER_PIXEL]);
                }
            }
        }

        remapped
    }

    pub fn pixel(&self, pixel: Point) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(pixel)?;

        Ok(Colour {
            r: self.buffer[index],
            g: self.buffer[index + 1],
            b: self.buffer[index + 2],
        })
    }
}
