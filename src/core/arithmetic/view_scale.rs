use std::fmt;

use rug::Float;

use crate::core::fractals::mandelbrot::errors::ConfigError;

/// Significand bits kept for the scale itself. The scale only sets pixel
/// spacing, so it needs far fewer bits than the center it is applied to.
pub const SCALE_BITS: u32 = 64;

/// Deepest zoom accepted, as `|log2(scale)|`. Past this the center would need
/// more MPFR bits than a render can iterate in any reasonable time.
pub const MAX_LOG2_SCALE: f64 = 65_536.0;

/// Pixels per plane unit.
///
/// Held as an MPFR float so zoom depth is limited by MPFR's exponent range
/// rather than by `f64`'s. The `f64` rounding is cached for the native tier,
/// which only ever runs at scales well inside `f64` range.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewScale {
    value: Float,
    native: f64,
}

impl ViewScale {
    pub fn new(scale: f64) -> Result<Self, ConfigError> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ConfigError::InvalidScale { scale });
        }

        Ok(Self::from_float(Float::with_val(SCALE_BITS, scale)))
    }

    fn from_float(value: Float) -> Self {
        let native = value.to_f64();
        Self { value, native }
    }

    /// Nearest `f64`; infinite once the scale leaves `f64` range.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        self.native
    }

    #[must_use]
    pub fn as_float(&self) -> &Float {
        &self.value
    }

    #[must_use]
    pub fn log2(&self) -> f64 {
        Float::with_val(SCALE_BITS, self.value.log2_ref()).to_f64()
    }

    #[must_use]
    pub fn log10(&self) -> f64 {
        Float::with_val(SCALE_BITS, self.value.log10_ref()).to_f64()
    }

    /// `self · factor`. `factor` must be finite and positive.
    pub fn multiplied_by(&self, factor: f64) -> Result<Self, ConfigError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::InvalidZoomFactor { factor });
        }

        Self::checked(Float::with_val(SCALE_BITS, &self.value * factor))
    }

    /// `self / divisor`. `divisor` must be finite and positive.
    pub fn divided_by(&self, divisor: f64) -> Result<Self, ConfigError> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(ConfigError::InvalidZoomFactor { factor: divisor });
        }

        Self::checked(Float::with_val(SCALE_BITS, &self.value / divisor))
    }

    fn checked(value: Float) -> Result<Self, ConfigError> {
        if !value.is_normal() || Float::with_val(SCALE_BITS, value.log2_ref()).abs() > MAX_LOG2_SCALE {
            return Err(ConfigError::InvalidScale {
                scale: value.to_f64(),
            });
        }
        Ok(Self::from_float(value))
    }
}

impl fmt::Display for ViewScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2^{:.2}", self.log2())
    }
}
