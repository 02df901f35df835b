use std::time::Duration;

use crate::core::arithmetic::PrecisionTier;

/// Progress notifications for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderEvent {
    TileCompleted {
        generation: u64,
        tile_index: usize,
        completed: usize,
        total: usize,
    },
    FrameCompleted {
        generation: u64,
        tier: PrecisionTier,
        duration: Duration,
    },
    /// The generation was superseded before it finished.
    Cancelled { generation: u64 },
    /// A worker broke an invariant; the generation was discarded.
    Fault { generation: u64, message: String },
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::TileCompleted { generation, .. }
            | Self::FrameCompleted { generation, .. }
            | Self::Cancelled { generation }
            | Self::Fault { generation, .. } => *generation,
        }
    }
}
