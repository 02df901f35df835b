//! Interactive controller for progressive, cancellable rendering.
//!
//! The host feeds [`ViewCommand`]s into the [`RenderCoordinator`] and drives
//! it with `dispatch`/`pump` from its own loop. Finished tiles land in the
//! coordinator's frame buffer and every step is announced to the
//! [`PresenterPort`] as a [`RenderEvent`].
//!
//! # Architecture
//!
//! - **Input**: `ViewCommand` values describing one user intent each
//! - **Output**: `PresenterPort` receiving progress events
//! - **Core**: tile rendering and the worker pool from `core/`

pub mod commands;
pub mod coordinator;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod ports;

pub use commands::ViewCommand;
pub use coordinator::{JobStatus, RenderCoordinator};
pub use errors::coordinator_error::CoordinatorError;
pub use events::render_event::RenderEvent;
pub use ports::presenter_port::{ChannelPresenter, PresenterPort};
