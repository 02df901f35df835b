use crate::core::arithmetic::view_scale::ViewScale;
use crate::core::data::complex::Complex;

/// Complex arithmetic the escape-time evaluator needs, implemented once per
/// precision tier.
///
/// A render job resolves its tier up front and the evaluator is monomorphised
/// over the matching implementation, so nothing inside the iteration loop
/// dispatches on the tier.
pub trait TierArithmetic: Clone + Send + Sync {
    /// `center + (dx, dy) / scale`, with `dy` already pointing up the imaginary axis.
    fn from_screen_offset(center: &Self, dx: f64, dy: f64, scale: &ViewScale) -> Self;

    /// Zero at the same precision as `self`.
    fn zero_like(&self) -> Self;

    fn sum(&self, rhs: &Self) -> Self;

    fn product(&self, rhs: &Self) -> Self;

    fn squared(&self) -> Self;

    fn magnitude_exceeds(&self, bound_squared: f64) -> bool;

    /// `|z|²` rounded to native precision, used only for smoothing.
    fn magnitude_squared(&self) -> f64;

    fn to_native(&self) -> Complex;

    /// Main cardioid or period-2 bulb membership.
    fn in_known_interior(&self) -> bool;

    /// `self = self² + c`
    fn step(&mut self, c: &Self) {
        *self = self.squared().sum(c);
    }
}

impl TierArithmetic for Complex {
    #[inline]
    fn from_screen_offset(center: &Self, dx: f64, dy: f64, scale: &ViewScale) -> Self {
        let scale = scale.as_f64();
        Complex {
            real: center.real + dx / scale,
            imag: center.imag + dy / scale,
        }
    }

    #[inline]
    fn zero_like(&self) -> Self {
        Complex::default()
    }

    #[inline]
    fn sum(&self, rhs: &Self) -> Self {
        *self + *rhs
    }

    #[inline]
    fn product(&self, rhs: &Self) -> Self {
        *self * *rhs
    }

    #[inline]
    fn squared(&self) -> Self {
        self.square()
    }

    #[inline]
    fn magnitude_exceeds(&self, bound_squared: f64) -> bool {
        self.magnitude_squared() > bound_squared
    }

    #[inline]
    fn magnitude_squared(&self) -> f64 {
        Complex::magnitude_squared(self)
    }

    #[inline]
    fn to_native(&self) -> Complex {
        *self
    }

    fn in_known_interior(&self) -> bool {
        let x_shift = self.real - 0.25;
        let y_squared = self.imag * self.imag;
        let q = x_shift * x_shift + y_squared;

        if q * (q + x_shift) <= 0.25 * y_squared {
            return true;
        }

        let x_bulb = self.real + 1.0;
        x_bulb * x_bulb + y_squared <= 0.0625
    }

    #[inline]
    fn step(&mut self, c: &Self) {
        let real_sq = self.real * self.real;
        let imag_sq = self.imag * self.imag;
        self.imag = 2.0 * self.real * self.imag + c.imag;
        self.real = real_sq - imag_sq + c.real;
    }
}
