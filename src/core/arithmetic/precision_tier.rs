use std::fmt;

use crate::core::arithmetic::view_scale::ViewScale;

/// Significand width of `f64`; below this many required bits native arithmetic suffices.
pub const MINIMUM_NATIVE_BITS: u32 = 53;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrecisionTier {
    Native,
    Arbitrary { bits: u32 },
}

impl PrecisionTier {
    /// Chooses the tier for a viewport `scale` in pixels per plane unit.
    ///
    /// Adjacent pixels are `1/scale` apart, so resolving them needs
    /// `ceil(log2(scale))` fractional bits plus `guard_bits` of headroom for
    /// sub-pixel samples and accumulated rounding.
    #[must_use]
    pub fn for_scale(scale: f64, guard_bits: u32) -> Self {
        Self::for_log2_scale(scale.log2(), guard_bits)
    }

    /// Tier for a scale that may lie outside `f64` range.
    #[must_use]
    pub fn for_view_scale(scale: &ViewScale, guard_bits: u32) -> Self {
        Self::for_log2_scale(scale.log2(), guard_bits)
    }

    #[must_use]
    pub fn for_log2_scale(log2_scale: f64, guard_bits: u32) -> Self {
        let bits = required_bits_for_log2(log2_scale, guard_bits);

        if bits <= MINIMUM_NATIVE_BITS {
            Self::Native
        } else {
            Self::Arbitrary { bits }
        }
    }

    #[must_use]
    pub fn bits(self) -> u32 {
        match self {
            Self::Native => MINIMUM_NATIVE_BITS,
            Self::Arbitrary { bits } => bits,
        }
    }

    #[must_use]
    pub fn is_arbitrary(self) -> bool {
        matches!(self, Self::Arbitrary { .. })
    }
}

impl fmt::Display for PrecisionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "f64"),
            Self::Arbitrary { bits } => write!(f, "MPFR {} bits", bits),
        }
    }
}

/// `max(MINIMUM_NATIVE_BITS, ceil(log2(scale)) + guard_bits)`, where zoomed-out
/// scales (below one pixel per unit) need no fractional bits at all.
#[must_use]
pub fn required_bits(scale: f64, guard_bits: u32) -> u32 {
    required_bits_for_log2(scale.log2(), guard_bits)
}

#[must_use]
pub fn required_bits_for_log2(log2_scale: f64, guard_bits: u32) -> u32 {
    let fractional_bits = log2_scale.ceil().max(0.0) as u32;
    fractional_bits.saturating_add(guard_bits).max(MINIMUM_NATIVE_BITS)
}
