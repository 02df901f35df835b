use crate::core::data::pixel_rect::PixelRect;
use crate::core::data::point::Point;
use crate::core::data::tile::Tile;
use crate::core::fractals::mandelbrot::errors::ConfigError;

/// Splits a `width × height` canvas into row-major `tile_size` squares.
/// Tiles on the right and bottom edges are clipped to the canvas.
pub fn partition_tiles(width: u32, height: u32, tile_size: u32) -> Result<Vec<Tile>, ConfigError> {
    if tile_size == 0 {
        return Err(ConfigError::ZeroTileSize);
    }
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyCanvas { width, height });
    }

    let columns = width.div_ceil(tile_size);
    let rows = height.div_ceil(tile_size);
    let mut tiles = Vec::with_capacity((columns * rows) as usize);

    for row in 0..rows {
        let y = row * tile_size;
        let tile_height = tile_size.min(height - y);

        for column in 0..columns {
            let x = column * tile_size;
            let tile_width = tile_size.min(width - x);
            let origin = Point {
                x: x as i32,
                y: y as i32,
            };

            // Sizes are non-zero by construction.
            if let Ok(rect) = PixelRect::from_origin_and_size(origin, tile_width, tile_height) {
                tiles.push(Tile {
                    index: tiles.len(),
                    rect,
                });
            }
        }
    }

    Ok(tiles)
}
