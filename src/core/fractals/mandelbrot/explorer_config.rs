use crate::core::{
    data::{
        complex::Complex,
        viewport::{validate_canvas, Viewport},
    },
    fractals::mandelbrot::{
        algorithm::{MandelbrotAlgorithm, DEFAULT_ESCAPE_RADIUS},
        colour_mapping::{
            factory::colour_map_factory,
            kinds::ColourMapKind,
            map::{ColourMap, ColourMapSettings},
        },
        errors::ConfigError,
    },
    util::default_worker_threads::default_worker_threads,
};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_CENTER: Complex = Complex::new(-0.5, 0.0);
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;
pub const DEFAULT_ITERATION_STEP: u32 = 1000;
pub const DEFAULT_SAMPLES_PER_AXIS: u32 = 2;
pub const DEFAULT_GUARD_BITS: u32 = 8;
pub const DEFAULT_TILE_SIZE: u32 = 32;
pub const DEFAULT_ZOOM_STEP: f64 = 2.0;
pub const DEFAULT_COLOUR_CYCLE: u32 = 10;
pub const DEFAULT_SATURATION: f64 = 0.8;

/// Plane units visible along the shorter canvas edge in the reset view.
const RESET_VIEW_SPAN: f64 = 3.0;

/// Everything the explorer needs to start rendering. Hosts load this however
/// they like; the engine only validates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerConfig {
    pub width: u32,
    pub height: u32,
    pub worker_threads: usize,
    pub max_iterations: u32,
    /// Step applied per `SetMaxIterations` notch by hosts that map keys to it.
    pub iteration_step: u32,
    pub escape_radius: f64,
    /// Anti-aliasing grid is `samples_per_axis²` samples per pixel.
    pub samples_per_axis: u32,
    pub guard_bits: u32,
    pub tile_size: u32,
    pub zoom_step: f64,
    pub colour_map_kind: ColourMapKind,
    pub colour_cycle: u32,
    pub saturation: f64,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            worker_threads: default_worker_threads(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            iteration_step: DEFAULT_ITERATION_STEP,
            escape_radius: DEFAULT_ESCAPE_RADIUS,
            samples_per_axis: DEFAULT_SAMPLES_PER_AXIS,
            guard_bits: DEFAULT_GUARD_BITS,
            tile_size: DEFAULT_TILE_SIZE,
            zoom_step: DEFAULT_ZOOM_STEP,
            colour_map_kind: ColourMapKind::default(),
            colour_cycle: DEFAULT_COLOUR_CYCLE,
            saturation: DEFAULT_SATURATION,
        }
    }
}

impl ExplorerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_canvas(self.width, self.height)?;
        if self.worker_threads == 0 {
            return Err(ConfigError::ZeroWorkerThreads);
        }
        if self.tile_size == 0 {
            return Err(ConfigError::ZeroTileSize);
        }
        if self.samples_per_axis == 0 {
            return Err(ConfigError::ZeroSamplesPerAxis);
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 0.0 {
            return Err(ConfigError::InvalidZoomFactor {
                factor: self.zoom_step,
            });
        }

        MandelbrotAlgorithm::new(self.max_iterations, self.escape_radius)?;
        Ok(())
    }

    /// Scale that fits the classic view of the set into the canvas.
    #[must_use]
    pub fn reset_scale(width: u32, height: u32) -> f64 {
        f64::from(width.min(height).max(1)) / RESET_VIEW_SPAN
    }

    pub fn initial_viewport(&self) -> Result<Viewport, ConfigError> {
        Viewport::new(
            DEFAULT_CENTER,
            Self::reset_scale(self.width, self.height),
            self.width,
            self.height,
            self.guard_bits,
        )
    }

    pub fn algorithm(&self, max_iterations: u32) -> Result<MandelbrotAlgorithm, ConfigError> {
        MandelbrotAlgorithm::new(max_iterations, self.escape_radius)
    }

    #[must_use]
    pub fn colour_map(&self, max_iterations: u32) -> Box<dyn ColourMap> {
        colour_map_factory(
            self.colour_map_kind,
            ColourMapSettings {
                max_iterations,
                colour_cycle: self.colour_cycle,
                saturation: self.saturation,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::arithmetic::PrecisionTier;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(ExplorerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn default_viewport_matches_reset_view() {
        let viewport = ExplorerConfig::default().initial_viewport().unwrap();

        assert_eq!(viewport.scale().as_f64(), 200.0);
        assert_eq!(viewport.center().to_native(), DEFAULT_CENTER);
        assert_eq!(viewport.tier(), PrecisionTier::Native);
    }

    #[test]
    fn rejects_each_zero_setting() {
        let cases: [(fn(&mut ExplorerConfig), ConfigError); 5] = [
            (|c| c.worker_threads = 0, ConfigError::ZeroWorkerThreads),
            (|c| c.tile_size = 0, ConfigError::ZeroTileSize),
            (|c| c.samples_per_axis = 0, ConfigError::ZeroSamplesPerAxis),
            (|c| c.max_iterations = 0, ConfigError::ZeroMaxIterations),
            (
                |c| c.height = 0,
                ConfigError::EmptyCanvas {
                    width: DEFAULT_WIDTH,
                    height: 0,
                },
            ),
        ];

        for (mutate, expected) in cases {
            let mut config = ExplorerConfig::default();
            mutate(&mut config);
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn rejects_canvas_edges_beyond_signed_pixel_range() {
        let config = ExplorerConfig {
            width: 3_000_000_000,
            height: 20,
            ..ExplorerConfig::default()
        };

        assert_eq!(
            config.validate(),
            Err(ConfigError::CanvasTooLarge {
                width: 3_000_000_000,
                height: 20
            })
        );
    }

    #[test]
    fn rejects_bad_escape_radius_and_zoom_step() {
        let config = ExplorerConfig {
            escape_radius: 0.0,
            ..ExplorerConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidEscapeRadius { radius: 0.0 })
        );

        let config = ExplorerConfig {
            zoom_step: f64::INFINITY,
            ..ExplorerConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidZoomFactor { .. })));
    }

    #[test]
    fn colour_map_follows_configured_kind() {
        let config = ExplorerConfig {
            colour_map_kind: ColourMapKind::FireGradient,
            ..ExplorerConfig::default()
        };

        assert_eq!(config.colour_map(100).kind(), ColourMapKind::FireGradient);
    }
}
