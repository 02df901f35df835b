use std::error::Error;
use std::fmt;

use crate::core::actions::render_job::render_job_parallel_rayon::RenderJobError;
use crate::core::actions::schedule_tiles::worker_pool::TileSchedulerError;
use crate::core::fractals::mandelbrot::errors::ConfigError;

#[derive(Debug)]
pub enum CoordinatorError {
    Config(ConfigError),
    Scheduler(TileSchedulerError),
    Render(RenderJobError),
    /// A worker or the frame assembly broke an invariant. Hosts treat this
    /// as fatal.
    InvariantViolation { generation: u64, message: String },
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration rejected: {}", e),
            Self::Scheduler(e) => write!(f, "tile scheduler failed: {}", e),
            Self::Render(e) => write!(f, "render failed: {}", e),
            Self::InvariantViolation {
                generation,
                message,
            } => write!(f, "invariant violated in generation {}: {}", generation, message),
        }
    }
}

impl Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Scheduler(e) => Some(e),
            Self::Render(e) => Some(e),
            Self::InvariantViolation { .. } => None,
        }
    }
}

impl From<ConfigError> for CoordinatorError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<TileSchedulerError> for CoordinatorError {
    fn from(e: TileSchedulerError) -> Self {
        Self::Scheduler(e)
    }
}

impl From<RenderJobError> for CoordinatorError {
    fn from(e: RenderJobError) -> Self {
        Self::Render(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violation_names_the_generation() {
        let err = CoordinatorError::InvariantViolation {
            generation: 9,
            message: "tile 3 wrote outside its rect".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "invariant violated in generation 9: tile 3 wrote outside its rect"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn config_errors_keep_their_source() {
        let err = CoordinatorError::from(ConfigError::ZeroTileSize);

        assert!(err.source().is_some());
    }
}
