use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::arithmetic::TierArithmetic;
use crate::core::data::colour::Colour;
use crate::core::data::viewport::ScreenMapping;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_mapping::map::ColourMap;
use crate::core::fractals::mandelbrot::errors::ConfigError;

/// Regular `n × n` grid of sub-pixel offsets, centred on the pixel coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    offsets: Vec<f64>,
}

impl SampleGrid {
    pub fn new(samples_per_axis: u32) -> Result<Self, ConfigError> {
        if samples_per_axis == 0 {
            return Err(ConfigError::ZeroSamplesPerAxis);
        }

        let n = f64::from(samples_per_axis);
        let offsets = (0..samples_per_axis)
            .map(|i| (f64::from(i) + 0.5) / n - 0.5)
            .collect();

        Ok(Self { offsets })
    }

    #[must_use]
    pub fn samples_per_axis(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn sample_count(&self) -> u32 {
        let n = self.offsets.len() as u32;
        n * n
    }

    #[must_use]
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }
}

/// Everything needed to turn one pixel position into one colour, fixed for
/// the duration of a job and a single tier.
pub struct PixelSampler<'a, T> {
    mapping: ScreenMapping<'a, T>,
    grid: &'a SampleGrid,
    algorithm: &'a MandelbrotAlgorithm,
    colour_map: &'a dyn ColourMap,
}

impl<'a, T: TierArithmetic> PixelSampler<'a, T> {
    #[must_use]
    pub fn new(
        mapping: ScreenMapping<'a, T>,
        grid: &'a SampleGrid,
        algorithm: &'a MandelbrotAlgorithm,
        colour_map: &'a dyn ColourMap,
    ) -> Self {
        Self {
            mapping,
            grid,
            algorithm,
            colour_map,
        }
    }

    /// Averages the colours of every grid sample around pixel `(x, y)`.
    /// Channel sums are integers; the mean is rounded half up.
    pub fn sample_pixel<C: CancelToken>(&self, x: i32, y: i32, cancel: &C) -> Result<Colour, Cancelled> {
        let (px, py) = (f64::from(x), f64::from(y));
        let (mut r, mut g, mut b) = (0u32, 0u32, 0u32);

        for &dy in self.grid.offsets() {
            for &dx in self.grid.offsets() {
                let c = self.mapping.plane_at(px + dx, py + dy);
                let sample = self.algorithm.evaluate_cancelable(&c, cancel)?;
                let colour = self.colour_map.map(&sample);

                r += u32::from(colour.r);
                g += u32::from(colour.g);
                b += u32::from(colour.b);
            }
        }

        let k = self.grid.sample_count();
        let mean = |sum: u32| ((sum + k / 2) / k) as u8;

        Ok(Colour {
            r: mean(r),
            g: mean(g),
            b: mean(b),
        })
    }
}
