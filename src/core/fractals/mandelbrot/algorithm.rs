use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel, ITERATION_BATCH};
use crate::core::arithmetic::TierArithmetic;
use crate::core::data::pixel_sample::PixelSample;
use crate::core::fractals::mandelbrot::errors::ConfigError;

pub const DEFAULT_ESCAPE_RADIUS: f64 = 2.0;

/// Escape-time evaluator for `z ← z² + c` starting from `z = 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    max_iterations: u32,
    escape_radius: f64,
    escape_radius_squared: f64,
    log_escape_radius: f64,
}

impl MandelbrotAlgorithm {
    pub fn new(max_iterations: u32, escape_radius: f64) -> Result<Self, ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::ZeroMaxIterations);
        }

        // Radii at or below 1 make log|z|/log R meaningless for smoothing.
        if !escape_radius.is_finite() || escape_radius <= 1.0 {
            return Err(ConfigError::InvalidEscapeRadius {
                radius: escape_radius,
            });
        }

        Ok(Self {
            max_iterations,
            escape_radius,
            escape_radius_squared: escape_radius * escape_radius,
            log_escape_radius: escape_radius.ln(),
        })
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[must_use]
    pub fn escape_radius(&self) -> f64 {
        self.escape_radius
    }

    #[must_use]
    pub fn evaluate<T: TierArithmetic>(&self, c: &T) -> PixelSample {
        match self.evaluate_cancelable(c, &NeverCancel) {
            Ok(sample) => sample,
            Err(Cancelled) => unreachable!("NeverCancel token should never signal cancellation"),
        }
    }

    /// Like [`evaluate`](Self::evaluate), polling `cancel` every
    /// [`ITERATION_BATCH`] iterations so long deep-zoom runs can be abandoned.
    pub fn evaluate_cancelable<T, C>(&self, c: &T, cancel: &C) -> Result<PixelSample, Cancelled>
    where
        T: TierArithmetic,
        C: CancelToken,
    {
        let native_c = c.to_native();

        // The cardioid and bulb only stay bounded by 2, so smaller radii must iterate.
        if self.escape_radius >= 2.0 && c.in_known_interior() {
            return Ok(PixelSample::interior(native_c, self.max_iterations));
        }

        let mut z = c.zero_like();

        for iteration in 0..self.max_iterations {
            if iteration > 0 && iteration % ITERATION_BATCH == 0 && cancel.is_cancelled() {
                return Err(Cancelled);
            }

            if z.magnitude_exceeds(self.escape_radius_squared) {
                return Ok(PixelSample {
                    c: native_c,
                    escaped: true,
                    iterations: iteration,
                    smooth: self.smooth_iterations(iteration, z.magnitude_squared()),
                });
            }

            z.step(c);
        }

        Ok(PixelSample::interior(native_c, self.max_iterations))
    }

    /// `n + 1 - log(log|z_n| / log R) / log 2`, clamped at zero.
    #[must_use]
    pub fn smooth_iterations(&self, iterations: u32, magnitude_squared: f64) -> f64 {
        let log_magnitude = 0.5 * magnitude_squared.ln();
        let smooth = f64::from(iterations) + 1.0
            - (log_magnitude / self.log_escape_radius).ln() / std::f64::consts::LN_2;

        smooth.max(0.0)
    }
}
