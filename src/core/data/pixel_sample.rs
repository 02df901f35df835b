use crate::core::data::complex::Complex;

/// Escape-time result for one plane coordinate.
///
/// `smooth` is the fractional iteration count; for points that never escape it
/// equals the iteration limit.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PixelSample {
    pub c: Complex,
    pub escaped: bool,
    pub iterations: u32,
    pub smooth: f64,
}

impl PixelSample {
    #[must_use]
    pub fn interior(c: Complex, max_iterations: u32) -> Self {
        Self {
            c,
            escaped: false,
            iterations: max_iterations,
            smooth: f64::from(max_iterations),
        }
    }
}
