pub mod controllers;
pub mod core;

pub use controllers::interactive::{
    ChannelPresenter, CoordinatorError, JobStatus, PresenterPort, RenderCoordinator, RenderEvent, ViewCommand,
};
pub use crate::core::arithmetic::{PrecisionTier, ViewScale};
pub use crate::core::data::frame_buffer::FrameSnapshot;
pub use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
pub use crate::core::fractals::mandelbrot::explorer_config::ExplorerConfig;
