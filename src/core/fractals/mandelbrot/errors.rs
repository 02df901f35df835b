use std::{error::Error, fmt};

/// Rejected explorer settings. Raised while building a viewport, a job or the
/// coordinator itself, never from inside a worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    ZeroMaxIterations,
    ZeroWorkerThreads,
    ZeroTileSize,
    ZeroSamplesPerAxis,
    EmptyCanvas { width: u32, height: u32 },
    CanvasTooLarge { width: u32, height: u32 },
    InvalidScale { scale: f64 },
    InvalidEscapeRadius { radius: f64 },
    InvalidZoomFactor { factor: f64 },
    InvalidCenter { real: f64, imag: f64 },
    InvalidPanDelta { dx: f64, dy: f64 },
    InvalidPivot { x: f64, y: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterations => write!(f, "maximum iterations must be greater than zero"),
            Self::ZeroWorkerThreads => write!(f, "worker thread count must be greater than zero"),
            Self::ZeroTileSize => write!(f, "tile size must be greater than zero"),
            Self::ZeroSamplesPerAxis => {
                write!(f, "anti-aliasing samples per axis must be greater than zero")
            }
            Self::EmptyCanvas { width, height } => {
                write!(f, "canvas size must be positive: {}x{}", width, height)
            }
            Self::CanvasTooLarge { width, height } => {
                write!(f, "canvas edges must not exceed {}: {}x{}", i32::MAX, width, height)
            }
            Self::InvalidScale { scale } => {
                write!(f, "scale must be finite and positive, got {}", scale)
            }
            Self::InvalidEscapeRadius { radius } => {
                write!(f, "escape radius must be finite and greater than 1, got {}", radius)
            }
            Self::InvalidZoomFactor { factor } => {
                write!(f, "zoom factor must be finite and positive, got {}", factor)
            }
            Self::InvalidCenter { real, imag } => {
                write!(f, "viewport center must be finite, got ({}, {})", real, imag)
            }
            Self::InvalidPanDelta { dx, dy } => {
                write!(f, "pan delta must be finite, got ({}, {})", dx, dy)
            }
            Self::InvalidPivot { x, y } => {
                write!(f, "zoom pivot must be finite, got ({}, {})", x, y)
            }
        }
    }
}

impl Error for ConfigError {}
