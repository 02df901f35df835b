use crate::core::data::colour::Colour;
use crate::core::data::pixel_sample::PixelSample;
use crate::core::fractals::mandelbrot::colour_mapping::{kinds::ColourMapKind, map::ColourMap};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireGradient {
    max_iterations: f64,
}

impl FireGradient {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self {
            max_iterations: f64::from(max_iterations.max(1)),
        }
    }
}

impl ColourMap for FireGradient {
    fn map(&self, sample: &PixelSample) -> Colour {
        if !sample.escaped {
            return Colour::BLACK;
        }

        let t = (sample.smooth / self.max_iterations).clamp(0.0, 1.0);

        // black -> red -> orange -> yellow -> white, in four equal quarters
        let (r, g, b) = if t < 0.25 {
            let local_t = t / 0.25;
            (local_t * 255.0, 0.0, 0.0)
        } else if t < 0.5 {
            let local_t = (t - 0.25) / 0.25;
            (255.0, local_t * 165.0, 0.0)
        } else if t < 0.75 {
            let local_t = (t - 0.5) / 0.25;
            (255.0, 165.0 + local_t * 90.0, 0.0)
        } else {
            let local_t = (t - 0.75) / 0.25;
            (255.0, 255.0, local_t * 255.0)
        };

        Colour {
            r: r as u8,
            g: g as u8,
            b: b as u8,
        }
    }

    fn kind(&self) -> ColourMapKind {
        ColourMapKind::FireGradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;

    fn escaped_at(smooth: f64) -> PixelSample {
        PixelSample {
            c: Complex::new(2.0, 0.0),
            escaped: true,
            iterations: smooth as u32,
            smooth,
        }
    }

    #[test]
    fn interior_is_black() {
        let mapper = FireGradient::new(100);
        let sample = PixelSample::interior(Complex::new(0.0, 0.0), 100);

        assert_eq!(mapper.map(&sample), Colour::BLACK);
    }

    #[test]
    fn quick_escape_is_near_black() {
        let mapper = FireGradient::new(100);

        assert_eq!(mapper.map(&escaped_at(0.0)), Colour::BLACK);
    }

    #[test]
    fn quarter_is_red() {
        let mapper = FireGradient::new(100);

        assert_eq!(mapper.map(&escaped_at(25.0)), Colour { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn half_is_orange() {
        let mapper = FireGradient::new(100);

        assert_eq!(mapper.map(&escaped_at(50.0)), Colour { r: 255, g: 165, b: 0 });
    }

    #[test]
    fn fractional_counts_blend_between_bands() {
        let mapper = FireGradient::new(100);
        let low = mapper.map(&escaped_at(10.0));
        let high = mapper.map(&escaped_at(10.5));

        assert!(high.r > low.r);
    }

    #[test]
    fn near_max_is_near_white() {
        let mapper = FireGradient::new(100);
        let colour = mapper.map(&escaped_at(99.0));

        assert_eq!((colour.r, colour.g), (255, 255));
        assert!(colour.b > 240);
    }
}
