use crate::core::fractals::mandelbrot::colour_mapping::{
    kinds::ColourMapKind,
    map::{ColourMap, ColourMapSettings},
    maps::{fire_gradient::FireGradient, hsv_cycle::HsvCycle},
};

#[must_use]
pub fn colour_map_factory(kind: ColourMapKind, settings: ColourMapSettings) -> Box<dyn ColourMap> {
    match kind {
        ColourMapKind::HsvCycle => Box::new(HsvCycle::new(settings.colour_cycle, settings.saturation)),
        ColourMapKind::FireGradient => Box::new(FireGradient::new(settings.max_iterations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: ColourMapSettings = ColourMapSettings {
        max_iterations: 256,
        colour_cycle: 10,
        saturation: 0.8,
    };

    #[test]
    fn all_array_has_default_first() {
        assert_eq!(ColourMapKind::ALL.first(), Some(&ColourMapKind::default()));
    }

    #[test]
    fn factory_builds_every_kind() {
        for &kind in ColourMapKind::ALL {
            let map = colour_map_factory(kind, SETTINGS);
            assert_eq!(map.kind(), kind);
            assert_eq!(map.display_name(), kind.display_name());
        }
    }

    #[test]
    fn display_names_are_unique() {
        let names: Vec<&str> = ColourMapKind::ALL.iter().map(|k| k.display_name()).collect();
        for (i, name) in names.iter().enumerate() {
            assert!(!names[i + 1..].contains(name), "duplicate display name: {name}");
        }
    }
}
