use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Species;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Species → Color32
// ---------------------------------------------------------------------------

/// Fixed colour per species, shared by the chart and the filter checkboxes.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    mapping: BTreeMap<Species, Color32>,
}

impl Default for SpeciesColors {
    fn default() -> Self {
        let mapping = Species::ALL
            .into_iter()
            .zip(generate_palette(Species::ALL.len()))
            .collect();
        SpeciesColors { mapping }
    }
}

impl SpeciesColors {
    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn species_colors_are_distinct() {
        let colors = SpeciesColors::default();
        let a = colors.color_for(Species::Adelie);
        let g = colors.color_for(Species::Gentoo);
        let c = colors.color_for(Species::Chinstrap);
        assert!(a != g && g != c && a != c);
    }
}
