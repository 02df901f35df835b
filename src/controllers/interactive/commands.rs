/// Requests the host sends the coordinator. Pixel positions are canvas
/// coordinates with `y` growing downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewCommand {
    /// Drag by `(dx, dy)` pixels; the plane content follows the pointer.
    Pan { dx: f64, dy: f64 },
    /// Multiply the scale by `factor` about `pivot`. Factors below 1 zoom out.
    ZoomAt { pivot: (f64, f64), factor: f64 },
    /// One configured zoom step in about `pivot`.
    ZoomInAt { pivot: (f64, f64) },
    /// The exact inverse of [`ViewCommand::ZoomInAt`].
    ZoomOutAt { pivot: (f64, f64) },
    /// Adjust the iteration limit, saturating and never below 1.
    SetMaxIterations { delta: i64 },
    ResetView,
    Resize { width: u32, height: u32 },
}
