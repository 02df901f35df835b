use crate::core::data::colour::Colour;
use crate::core::data::pixel_sample::PixelSample;
use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use std::fmt::Debug;

/// Transfer function from an evaluated sample to a display colour.
///
/// Implementations are total: every sample maps to some colour, and points
/// that never escaped map to black.
pub trait ColourMap: Debug + Send + Sync {
    fn map(&self, sample: &PixelSample) -> Colour;

    fn kind(&self) -> ColourMapKind;

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

/// Parameters shared by all colour maps, taken from the explorer config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourMapSettings {
    pub max_iterations: u32,
    pub colour_cycle: u32,
    pub saturation: f64,
}
