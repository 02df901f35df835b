use crate::core::arithmetic::view_scale::SCALE_BITS;
use crate::core::arithmetic::{ArbitraryComplex, PrecisionTier, TierArithmetic, ViewScale};
use crate::core::data::complex::Complex;
use crate::core::fractals::mandelbrot::errors::ConfigError;
use rug::Float;

/// A plane coordinate held in whichever representation the active tier uses.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanePoint {
    Native(Complex),
    Arbitrary(ArbitraryComplex),
}

impl PlanePoint {
    #[must_use]
    pub fn to_native(&self) -> Complex {
        match self {
            Self::Native(c) => *c,
            Self::Arbitrary(c) => c.to_native(),
        }
    }

    #[must_use]
    pub fn tier(&self) -> PrecisionTier {
        match self {
            Self::Native(_) => PrecisionTier::Native,
            Self::Arbitrary(c) => PrecisionTier::Arbitrary { bits: c.precision() },
        }
    }

    #[must_use]
    pub fn to_arbitrary(&self, bits: u32) -> ArbitraryComplex {
        match self {
            Self::Native(c) => ArbitraryComplex::from_native(*c, bits),
            Self::Arbitrary(c) => c.with_precision(bits),
        }
    }

    /// Re-represents the point at `tier`. Moving to a coarser tier rounds.
    #[must_use]
    pub fn at_tier(&self, tier: PrecisionTier) -> Self {
        match (self, tier) {
            (Self::Native(c), PrecisionTier::Native) => Self::Native(*c),
            (Self::Native(c), PrecisionTier::Arbitrary { bits }) => {
                Self::Arbitrary(ArbitraryComplex::from_native(*c, bits))
            }
            (Self::Arbitrary(c), PrecisionTier::Native) => Self::Native(c.to_native()),
            (Self::Arbitrary(c), PrecisionTier::Arbitrary { bits }) => {
                Self::Arbitrary(c.with_precision(bits))
            }
        }
    }
}

/// Maps screen positions into the plane for one concrete tier representation.
///
/// `x` and `y` are pixel coordinates and may carry a sub-pixel fraction.
#[derive(Debug)]
pub struct ScreenMapping<'a, T> {
    center: &'a T,
    scale: &'a ViewScale,
    half_width: f64,
    half_height: f64,
}

impl<'a, T: TierArithmetic> ScreenMapping<'a, T> {
    #[must_use]
    pub fn new(center: &'a T, scale: &'a ViewScale, width: u32, height: u32) -> Self {
        Self {
            center,
            scale,
            half_width: f64::from(width) / 2.0,
            half_height: f64::from(height) / 2.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn plane_at(&self, x: f64, y: f64) -> T {
        T::from_screen_offset(self.center, x - self.half_width, self.half_height - y, self.scale)
    }
}

/// Pan/zoom state of the canvas.
///
/// `scale` is in pixels per plane unit, so
/// `complex(x, y) = center + (x - width/2, height/2 - y) / scale`.
/// The center is always stored at the precision the current scale demands.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    center: PlanePoint,
    scale: ViewScale,
    width: u32,
    height: u32,
    guard_bits: u32,
}

/// Largest canvas edge. Pixel rectangles use signed `i32` coordinates.
pub const MAX_CANVAS_EDGE: u32 = i32::MAX as u32;

/// Rejects empty canvases and edges pixel rectangles cannot address.
pub fn validate_canvas(width: u32, height: u32) -> Result<(), ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::EmptyCanvas { width, height });
    }
    if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
        return Err(ConfigError::CanvasTooLarge { width, height });
    }
    Ok(())
}

impl Viewport {
    pub fn new(
        center: Complex,
        scale: f64,
        width: u32,
        height: u32,
        guard_bits: u32,
    ) -> Result<Self, ConfigError> {
        let scale = ViewScale::new(scale)?;
        validate_canvas(width, height)?;

        if !center.is_finite() {
            return Err(ConfigError::InvalidCenter {
                real: center.real,
                imag: center.imag,
            });
        }

        let tier = PrecisionTier::for_view_scale(&scale, guard_bits);

        Ok(Self {
            center: PlanePoint::Native(center).at_tier(tier),
            scale,
            width,
            height,
            guard_bits,
        })
    }

    #[must_use]
    pub fn center(&self) -> &PlanePoint {
        &self.center
    }

    #[must_use]
    pub fn scale(&self) -> &ViewScale {
        &self.scale
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn guard_bits(&self) -> u32 {
        self.guard_bits
    }

    #[must_use]
    pub fn tier(&self) -> PrecisionTier {
        self.center.tier()
    }

    /// Plane coordinate under pixel position `(x, y)`, in the active tier.
    #[must_use]
    pub fn pixel_to_plane(&self, x: f64, y: f64) -> PlanePoint {
        match &self.center {
            PlanePoint::Native(center) => {
                PlanePoint::Native(ScreenMapping::new(center, &self.scale, self.width, self.height).plane_at(x, y))
            }
            PlanePoint::Arbitrary(center) => PlanePoint::Arbitrary(
                ScreenMapping::new(center, &self.scale, self.width, self.height).plane_at(x, y),
            ),
        }
    }

    /// Pixel position of a plane coordinate. The difference to the center is
    /// taken in the active tier before it is scaled down to `f64`.
    #[must_use]
    pub fn plane_to_pixel(&self, point: &PlanePoint) -> (f64, f64) {
        let (offset_x, offset_y) = match &self.center {
            PlanePoint::Native(center) => {
                let p = point.to_native();
                let scale = self.scale.as_f64();
                ((p.real - center.real) * scale, (p.imag - center.imag) * scale)
            }
            PlanePoint::Arbitrary(center) => {
                let prec = center.precision();
                let p = point.to_arbitrary(prec);
                let mut real = Float::with_val(prec, &p.real - &center.real);
                real *= self.scale.as_float();
                let mut imag = Float::with_val(prec, &p.imag - &center.imag);
                imag *= self.scale.as_float();
                (real.to_f64(), imag.to_f64())
            }
        };

        (
            offset_x + f64::from(self.width) / 2.0,
            f64::from(self.height) / 2.0 - offset_y,
        )
    }

    /// Moves the view so plane content follows a pointer drag of `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center = match &self.center {
            PlanePoint::Native(c) => PlanePoint::Native(Complex::from_screen_offset(c, -dx, dy, &self.scale)),
            PlanePoint::Arbitrary(c) => {
                PlanePoint::Arbitrary(ArbitraryComplex::from_screen_offset(c, -dx, dy, &self.scale))
            }
        };
    }

    /// Multiplies the scale by `factor`, keeping the plane point under
    /// `pivot` fixed on screen. The tier is re-selected for the new scale
    /// before the center is recomputed.
    pub fn zoom_at(&mut self, pivot: (f64, f64), factor: f64) -> Result<(), ConfigError> {
        let new_scale = self.scale.multiplied_by(factor)?;
        self.zoom_to(pivot, new_scale)
    }

    /// Divides the scale by `factor` about `pivot`. Undoes `zoom_at` with the
    /// same pivot and factor: the scale comes back exactly and the center to
    /// within the rounding of the tier in use.
    pub fn zoom_out_at(&mut self, pivot: (f64, f64), factor: f64) -> Result<(), ConfigError> {
        let new_scale = self.scale.divided_by(factor)?;
        self.zoom_to(pivot, new_scale)
    }

    fn zoom_to(&mut self, pivot: (f64, f64), new_scale: ViewScale) -> Result<(), ConfigError> {
        if !pivot.0.is_finite() || !pivot.1.is_finite() {
            return Err(ConfigError::InvalidPivot { x: pivot.0, y: pivot.1 });
        }

        let tier = PrecisionTier::for_view_scale(&new_scale, self.guard_bits);
        let anchor = self.pixel_to_plane(pivot.0, pivot.1).at_tier(tier);
        let dx = f64::from(self.width) / 2.0 - pivot.0;
        let dy = pivot.1 - f64::from(self.height) / 2.0;

        self.center = match &anchor {
            PlanePoint::Native(c) => PlanePoint::Native(Complex::from_screen_offset(c, dx, dy, &new_scale)),
            PlanePoint::Arbitrary(c) => {
                PlanePoint::Arbitrary(ArbitraryComplex::from_screen_offset(c, dx, dy, &new_scale))
            }
        };
        self.scale = new_scale;

        Ok(())
    }

    /// Changes the canvas size around the same center and scale.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), ConfigError> {
        validate_canvas(width, height)?;

        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Orders of magnitude between this scale and `reference_scale`.
    #[must_use]
    pub fn zoom_depth_decades(&self, reference_scale: f64) -> f64 {
        let ratio = Float::with_val(SCALE_BITS, self.scale.as_float() / reference_scale);
        Float::with_val(SCALE_BITS, ratio.log10_ref()).to_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_viewport() -> Viewport {
        Viewport::new(Complex::new(-0.5, 0.0), 200.0, 800, 600, 8).unwrap()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn canvas_center_maps_to_view_center() {
        let viewport = scenario_viewport();

        assert_eq!(viewport.pixel_to_plane(400.0, 300.0).to_native(), Complex::new(-0.5, 0.0));
    }

    #[test]
    fn top_left_pixel_maps_to_upper_left_of_plane() {
        let viewport = scenario_viewport();

        assert_eq!(viewport.pixel_to_plane(0.0, 0.0).to_native(), Complex::new(-2.5, 1.5));
    }

    #[test]
    fn rejects_invalid_construction() {
        assert_eq!(
            Viewport::new(Complex::default(), 0.0, 10, 10, 8),
            Err(ConfigError::InvalidScale { scale: 0.0 })
        );
        assert_eq!(
            Viewport::new(Complex::default(), 1.0, 0, 10, 8),
            Err(ConfigError::EmptyCanvas { width: 0, height: 10 })
        );
        assert!(matches!(
            Viewport::new(Complex::new(f64::NAN, 0.0), 1.0, 10, 10, 8),
            Err(ConfigError::InvalidCenter { .. })
        ));
    }

    #[test]
    fn pixel_round_trip_native() {
        let viewport = scenario_viewport();

        for y in (0..600).step_by(37) {
            for x in (0..800).step_by(41) {
                let plane = viewport.pixel_to_plane(x as f64, y as f64);
                let (px, py) = viewport.plane_to_pixel(&plane);
                assert_close(px, x as f64, 0.5);
                assert_close(py, y as f64, 0.5);
            }
        }
    }

    #[test]
    fn pixel_round_trip_arbitrary() {
        let viewport = Viewport::new(Complex::new(-0.743643887037151, 0.131825904205330), 1e30, 320, 240, 16).unwrap();
        assert!(viewport.tier().is_arbitrary());

        for y in (0..240).step_by(13) {
            for x in (0..320).step_by(17) {
                let plane = viewport.pixel_to_plane(x as f64, y as f64);
                let (px, py) = viewport.plane_to_pixel(&plane);
                assert_close(px, x as f64, 0.5);
                assert_close(py, y as f64, 0.5);
            }
        }
    }

    #[test]
    fn pan_moves_content_with_pointer() {
        let mut viewport = scenario_viewport();
        let before = viewport.pixel_to_plane(100.0, 100.0);

        viewport.pan(20.0, -10.0);

        let (px, py) = viewport.plane_to_pixel(&before);
        assert_close(px, 120.0, 1e-9);
        assert_close(py, 90.0, 1e-9);
    }

    #[test]
    fn zoom_keeps_pivot_fixed() {
        let mut viewport = scenario_viewport();
        let pivot = (123.0, 456.0);
        let under_cursor = viewport.pixel_to_plane(pivot.0, pivot.1);

        viewport.zoom_at(pivot, 8.0).unwrap();

        assert_eq!(viewport.scale().as_f64(), 1600.0);
        let (px, py) = viewport.plane_to_pixel(&under_cursor);
        assert_close(px, pivot.0, 1e-6);
        assert_close(py, pivot.1, 1e-6);
    }

    /// Center drift allowed after a zoom round trip, in pixels. Each step
    /// rounds the center at `bits = log2(scale) + guard_bits`, so one rounding
    /// is about `|center| · 2^-guard_bits` pixels.
    fn round_trip_tolerance(viewport: &Viewport) -> f64 {
        let magnitude = viewport.center().to_native().magnitude_squared().sqrt().max(1.0);
        8.0 * magnitude * 2f64.powi(-(viewport.guard_bits() as i32))
    }

    fn assert_zoom_round_trip(mut viewport: Viewport, pivot: (f64, f64), factor: f64) {
        let original = viewport.clone();

        viewport.zoom_at(pivot, factor).unwrap();
        viewport.zoom_out_at(pivot, factor).unwrap();

        assert_eq!(viewport.scale(), original.scale());
        assert_eq!(viewport.tier(), original.tier());
        let (px, py) = viewport.plane_to_pixel(original.center());
        let tolerance = round_trip_tolerance(&original);
        let (cx, cy) = (f64::from(original.width()) / 2.0, f64::from(original.height()) / 2.0);
        assert_close(px, cx, tolerance);
        assert_close(py, cy, tolerance);
    }

    #[test]
    fn zoom_out_undoes_zoom_in_native() {
        assert_zoom_round_trip(scenario_viewport(), (640.0, 80.0), 3.0);
        assert_zoom_round_trip(scenario_viewport(), (3.0, 597.0), 2.0);
    }

    #[test]
    fn zoom_out_undoes_zoom_in_arbitrary() {
        let viewport = Viewport::new(Complex::new(-1.25, 0.02), 2f64.powi(80), 256, 256, 16).unwrap();
        assert!(viewport.tier().is_arbitrary());

        assert_zoom_round_trip(viewport.clone(), (17.0, 200.0), 3.0);
        assert_zoom_round_trip(viewport, (17.0, 200.0), 2.0);
    }

    #[test]
    fn halving_after_doubling_restores_arbitrary_view() {
        let mut viewport = Viewport::new(Complex::new(-1.25, 0.02), 2f64.powi(80), 256, 256, 16).unwrap();
        let original = viewport.clone();
        let pivot = (17.0, 200.0);

        viewport.zoom_at(pivot, 2.0).unwrap();
        viewport.zoom_at(pivot, 0.5).unwrap();

        assert_eq!(viewport.scale(), original.scale());
        let (px, py) = viewport.plane_to_pixel(original.center());
        let tolerance = round_trip_tolerance(&original);
        assert_close(px, 128.0, tolerance);
        assert_close(py, 128.0, tolerance);
    }

    #[test]
    fn reciprocal_zoom_factor_restores_scale_to_rounding() {
        let mut viewport = scenario_viewport();
        let original = viewport.clone();
        let pivot = (640.0, 80.0);

        viewport.zoom_at(pivot, 3.0).unwrap();
        viewport.zoom_at(pivot, 1.0 / 3.0).unwrap();

        let scale = original.scale().as_f64();
        assert_close(viewport.scale().as_f64(), scale, scale * 1e-15);
        let restored = viewport.center().to_native();
        let expected = original.center().to_native();
        assert_close(restored.real, expected.real, 1e-12);
        assert_close(restored.imag, expected.imag, 1e-12);
    }

    #[test]
    fn zoom_continues_past_f64_scale_range() {
        let mut viewport = Viewport::new(Complex::new(-0.75, 0.1), 16.0, 64, 48, 8).unwrap();
        let pivot = (10.0, 30.0);

        viewport.zoom_at(pivot, 2f64.powi(600)).unwrap();
        viewport.zoom_at(pivot, 2f64.powi(600)).unwrap();

        assert_eq!(viewport.scale().as_f64(), f64::INFINITY);
        assert_eq!(viewport.scale().log2(), 1204.0);
        assert_eq!(viewport.tier(), PrecisionTier::Arbitrary { bits: 1212 });

        let left = viewport.pixel_to_plane(0.0, 0.0);
        let right = viewport.pixel_to_plane(1.0, 0.0);
        let (px, py) = viewport.plane_to_pixel(&right);
        assert_ne!(left, right);
        assert_close(px, 1.0, 1e-6);
        assert_close(py, 0.0, 1e-6);

        viewport.zoom_out_at(pivot, 2f64.powi(600)).unwrap();
        viewport.zoom_out_at(pivot, 2f64.powi(600)).unwrap();
        assert_eq!(viewport.scale().as_f64(), 16.0);
        assert_eq!(viewport.tier(), PrecisionTier::Native);
    }

    #[test]
    fn deep_zoom_switches_tier_and_shallow_zoom_switches_back() {
        let mut viewport = scenario_viewport();
        assert_eq!(viewport.tier(), PrecisionTier::Native);

        viewport.zoom_at((400.0, 300.0), 2f64.powi(50)).unwrap();
        assert!(viewport.tier().is_arbitrary());

        viewport.zoom_at((400.0, 300.0), 2f64.powi(-50)).unwrap();
        assert_eq!(viewport.tier(), PrecisionTier::Native);
        assert_close(viewport.center().to_native().real, -0.5, 1e-12);
    }

    #[test]
    fn zoom_rejects_bad_factors_without_mutating() {
        let mut viewport = scenario_viewport();
        let before = viewport.clone();

        assert_eq!(
            viewport.zoom_at((0.0, 0.0), 0.0),
            Err(ConfigError::InvalidZoomFactor { factor: 0.0 })
        );
        assert!(viewport.zoom_at((0.0, 0.0), f64::INFINITY).is_err());
        assert!(viewport.zoom_out_at((0.0, 0.0), f64::NAN).is_err());
        assert!(matches!(
            viewport.zoom_at((f64::NAN, 0.0), 2.0),
            Err(ConfigError::InvalidPivot { .. })
        ));
        assert_eq!(viewport, before);
    }

    #[test]
    fn resize_keeps_center_and_scale() {
        let mut viewport = scenario_viewport();

        viewport.resize(1024, 768).unwrap();

        assert_eq!(viewport.pixel_to_plane(512.0, 384.0).to_native(), Complex::new(-0.5, 0.0));
        assert_eq!(viewport.scale().as_f64(), 200.0);
        assert!(viewport.resize(0, 768).is_err());
    }

    #[test]
    fn canvas_edges_must_fit_signed_pixel_coordinates() {
        assert_eq!(validate_canvas(MAX_CANVAS_EDGE, 1), Ok(()));
        assert_eq!(
            validate_canvas(3_000_000_000, 20),
            Err(ConfigError::CanvasTooLarge { width: 3_000_000_000, height: 20 })
        );

        let mut viewport = scenario_viewport();
        assert!(viewport.resize(20, MAX_CANVAS_EDGE + 1).is_err());
        assert_eq!(viewport.width(), 800);
    }

    #[test]
    fn zoom_depth_is_reported_in_decades() {
        let mut viewport = scenario_viewport();
        viewport.zoom_at((400.0, 300.0), 1000.0).unwrap();

        assert_close(viewport.zoom_depth_decades(200.0), 3.0, 1e-9);
        assert_eq!(scenario_viewport().zoom_depth_decades(200.0), 0.0);
    }
}
