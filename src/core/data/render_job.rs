use std::fmt;

use crate::core::actions::sample_pixel::sample_pixel::SampleGrid;
use crate::core::arithmetic::PrecisionTier;
use crate::core::data::tile::Tile;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::colour_mapping::map::ColourMap;
use crate::core::fractals::mandelbrot::errors::ConfigError;
use crate::core::fractals::mandelbrot::explorer_config::ExplorerConfig;
use crate::core::util::partition_tiles::partition_tiles;

/// Immutable snapshot of everything one generation renders. Shared between
/// workers behind an `Arc`; nothing in it changes after construction.
pub struct RenderJob {
    generation: u64,
    viewport: Viewport,
    tier: PrecisionTier,
    algorithm: MandelbrotAlgorithm,
    sample_grid: SampleGrid,
    colour_map: Box<dyn ColourMap>,
    tiles: Vec<Tile>,
}

impl RenderJob {
    pub fn new(
        generation: u64,
        viewport: Viewport,
        max_iterations: u32,
        config: &ExplorerConfig,
    ) -> Result<Self, ConfigError> {
        let algorithm = config.algorithm(max_iterations)?;
        let sample_grid = SampleGrid::new(config.samples_per_axis)?;
        let tiles = partition_tiles(viewport.width(), viewport.height(), config.tile_size)?;

        Ok(Self {
            generation,
            tier: viewport.tier(),
            viewport,
            algorithm,
            sample_grid,
            colour_map: config.colour_map(max_iterations),
            tiles,
        })
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn tier(&self) -> PrecisionTier {
        self.tier
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.algorithm.max_iterations()
    }

    #[must_use]
    pub fn algorithm(&self) -> &MandelbrotAlgorithm {
        &self.algorithm
    }

    #[must_use]
    pub fn sample_grid(&self) -> &SampleGrid {
        &self.sample_grid
    }

    #[must_use]
    pub fn colour_map(&self) -> &dyn ColourMap {
        self.colour_map.as_ref()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[must_use]
    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }
}

impl fmt::Debug for RenderJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderJob")
            .field("generation", &self.generation)
            .field("tier", &self.tier)
            .field("scale", &self.viewport.scale())
            .field("max_iterations", &self.max_iterations())
            .field("colour_map", &self.colour_map.display_name())
            .field("tiles", &self.tiles.len())
            .finish()
    }
}
