use crate::core::data::colour::Colour;
use crate::core::data::pixel_sample::PixelSample;
use crate::core::fractals::mandelbrot::colour_mapping::{kinds::ColourMapKind, map::ColourMap};

/// Hue rotates with the square root of the smooth count, so bands widen as
/// the iteration count grows instead of turning to noise at depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HsvCycle {
    colour_cycle: f64,
    saturation: f64,
}

impl HsvCycle {
    #[must_use]
    pub fn new(colour_cycle: u32, saturation: f64) -> Self {
        Self {
            colour_cycle: f64::from(colour_cycle.max(1)),
            saturation: saturation.clamp(0.0, 1.0),
        }
    }

    fn hue(&self, smooth: f64) -> f64 {
        smooth.max(0.0).sqrt() / self.colour_cycle * 360.0
    }
}

impl ColourMap for HsvCycle {
    fn map(&self, sample: &PixelSample) -> Colour {
        if !sample.escaped {
            return Colour::BLACK;
        }

        hsv_to_rgb(self.hue(sample.smooth), self.saturation, 1.0)
    }

    fn kind(&self) -> ColourMapKind {
        ColourMapKind::HsvCycle
    }
}

/// `hue` in degrees (wrapped into 0..360), `saturation` and `value` in 0..=1.
#[must_use]
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Colour {
    let hue = hue.rem_euclid(360.0);
    let chroma = value * saturation;
    let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match hue {
        h if h < 60.0 => (chroma, x, 0.0),
        h if h < 120.0 => (x, chroma, 0.0),
        h if h < 180.0 => (0.0, chroma, x),
        h if h < 240.0 => (0.0, x, chroma),
        h if h < 300.0 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    Colour {
        r: channel(r + m),
        g: channel(g + m),
        b: channel(b + m),
    }
}

fn channel(unit: f64) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}
