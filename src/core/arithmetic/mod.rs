//! Precision tiers: native `f64` and MPFR-backed arbitrary precision behind one
//! arithmetic trait.

pub mod arbitrary_complex;
pub mod precision_tier;
pub mod tier_arithmetic;
pub mod view_scale;

pub use arbitrary_complex::ArbitraryComplex;
pub use precision_tier::{PrecisionTier, MINIMUM_NATIVE_BITS};
pub use tier_arithmetic::TierArithmetic;
pub use view_scale::ViewScale;
