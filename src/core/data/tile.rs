use crate::core::data::pixel_rect::PixelRect;

/// Lifecycle of one tile inside one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Cancelled,
}

/// A rectangular region of the canvas rendered as a unit. Tiles of one job
/// never overlap and together cover the canvas exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub index: usize,
    pub rect: PixelRect,
}
