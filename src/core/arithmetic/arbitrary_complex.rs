use rug::Float;

use crate::core::arithmetic::tier_arithmetic::TierArithmetic;
use crate::core::arithmetic::view_scale::ViewScale;
use crate::core::data::complex::Complex;

/// Plane coordinate backed by MPFR floats of a fixed bit width.
#[derive(Debug, Clone, PartialEq)]
pub struct ArbitraryComplex {
    pub real: Float,
    pub imag: Float,
}

impl ArbitraryComplex {
    #[must_use]
    pub fn from_native(value: Complex, bits: u32) -> Self {
        Self {
            real: Float::with_val(bits, value.real),
            imag: Float::with_val(bits, value.imag),
        }
    }

    #[must_use]
    pub fn precision(&self) -> u32 {
        self.real.prec()
    }

    /// Re-rounds both parts to `bits`. Widening is exact.
    #[must_use]
    pub fn with_precision(&self, bits: u32) -> Self {
        Self {
            real: Float::with_val(bits, &self.real),
            imag: Float::with_val(bits, &self.imag),
        }
    }

    fn magnitude(&self) -> Float {
        let prec = self.precision();
        let mut magnitude = Float::with_val(prec, self.real.square_ref());
        let imag_sq = Float::with_val(prec, self.imag.square_ref());
        magnitude += &imag_sq;
        magnitude
    }
}

impl TierArithmetic for ArbitraryComplex {
    fn from_screen_offset(center: &Self, dx: f64, dy: f64, scale: &ViewScale) -> Self {
        let prec = center.precision();
        let scale = scale.as_float();

        let mut real = Float::with_val(prec, dx);
        real /= scale;
        real += &center.real;

        let mut imag = Float::with_val(prec, dy);
        imag /= scale;
        imag += &center.imag;

        Self { real, imag }
    }

    fn zero_like(&self) -> Self {
        let prec = self.precision();
        Self {
            real: Float::new(prec),
            imag: Float::new(prec),
        }
    }

    fn sum(&self, rhs: &Self) -> Self {
        let prec = self.precision();
        Self {
            real: Float::with_val(prec, &self.real + &rhs.real),
            imag: Float::with_val(prec, &self.imag + &rhs.imag),
        }
    }

    fn product(&self, rhs: &Self) -> Self {
        let prec = self.precision();

        let mut real = Float::with_val(prec, &self.real * &rhs.real);
        let imag_imag = Float::with_val(prec, &self.imag * &rhs.imag);
        real -= &imag_imag;

        let mut imag = Float::with_val(prec, &self.real * &rhs.imag);
        let imag_real = Float::with_val(prec, &self.imag * &rhs.real);
        imag += &imag_real;

        Self { real, imag }
    }

    fn squared(&self) -> Self {
        let prec = self.precision();

        let mut real = Float::with_val(prec, self.real.square_ref());
        let imag_sq = Float::with_val(prec, self.imag.square_ref());
        real -= &imag_sq;

        let mut imag = Float::with_val(prec, &self.real * &self.imag);
        imag <<= 1u32;

        Self { real, imag }
    }

    fn magnitude_exceeds(&self, bound_squared: f64) -> bool {
        self.magnitude() > bound_squared
    }

    fn magnitude_squared(&self) -> f64 {
        self.magnitude().to_f64()
    }

    fn to_native(&self) -> Complex {
        Complex {
            real: self.real.to_f64(),
            imag: self.imag.to_f64(),
        }
    }

    fn in_known_interior(&self) -> bool {
        let prec = self.precision();
        let y_squared = Float::with_val(prec, self.imag.square_ref());

        let mut x_shift = self.real.clone();
        x_shift -= 0.25;
        let mut q = Float::with_val(prec, x_shift.square_ref());
        q += &y_squared;

        let mut cardioid = q.clone();
        cardioid += &x_shift;
        cardioid *= &q;
        let mut quarter_y_squared = y_squared.clone();
        quarter_y_squared /= 4;

        if cardioid <= quarter_y_squared {
            return true;
        }

        let mut x_bulb = self.real.clone();
        x_bulb += 1;
        let mut bulb = Float::with_val(prec, x_bulb.square_ref());
        bulb += &y_squared;
        bulb <= 0.0625
    }

    fn step(&mut self, c: &Self) {
        let prec = self.precision();
        let real_sq = Float::with_val(prec, self.real.square_ref());
        let imag_sq = Float::with_val(prec, self.imag.square_ref());

        // imag = 2·real·imag + c.imag
        self.real <<= 1u32;
        self.imag.mul_add_mut(&self.real, &c.imag);

        // real = real² - imag² + c.real
        self.real = real_sq;
        self.real -= &imag_sq;
        self.real += &c.real;
    }
}
