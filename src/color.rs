use std::sync::OnceLock;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

use crate::data::model::{Gender, Smoker};

// ---------------------------------------------------------------------------
// Categorical palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// One palette entry per gender, in `Gender::ALL` order, built on first use.
fn gender_palette() -> &'static [Color32] {
    static PALETTE: OnceLock<Vec<Color32>> = OnceLock::new();
    PALETTE.get_or_init(|| generate_palette(Gender::ALL.len()))
}

pub fn gender_color(gender: Gender) -> Color32 {
    let idx = match gender {
        Gender::Male => 0,
        Gender::Female => 1,
    };
    gender_palette()[idx]
}

/// Line colour of each trend chart.
pub fn trend_color(smoker: Smoker) -> Color32 {
    match smoker {
        Smoker::Yes => Color32::from_rgb(255, 192, 203),
        Smoker::No => Color32::from_rgb(0, 0, 255),
    }
}

// ---------------------------------------------------------------------------
// Continuous scale for the heatmap
// ---------------------------------------------------------------------------

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (72, 40, 120),
    (62, 73, 137),
    (49, 104, 142),
    (38, 130, 142),
    (31, 158, 137),
    (53, 183, 121),
    (109, 205, 89),
    (253, 231, 37),
];

/// Viridis colour at `t` in `0.0..=1.0`, interpolated in linear RGB.
pub fn viridis(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let segments = (VIRIDIS.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - idx as f32;

    let a = stop(VIRIDIS[idx]);
    let b = stop(VIRIDIS[idx + 1]);
    to_color32(Srgb::from_linear(a.mix(b, frac)))
}

fn stop((r, g, b): (u8, u8, u8)) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let p = generate_palette(2);
        assert_eq!(p.len(), 2);
        assert_ne!(p[0], p[1]);
        assert_ne!(gender_color(Gender::Male), gender_color(Gender::Female));
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn gender_colours_are_built_once() {
        assert!(std::ptr::eq(gender_palette(), gender_palette()));
        assert_eq!(gender_palette(), &generate_palette(2)[..]);
        assert_eq!(gender_color(Gender::Female), generate_palette(2)[1]);
    }

    fn near(a: Color32, b: Color32) -> bool {
        let d = |x: u8, y: u8| (x as i16 - y as i16).abs() <= 1;
        d(a.r(), b.r()) && d(a.g(), b.g()) && d(a.b(), b.b())
    }

    #[test]
    fn viridis_hits_end_stops() {
        assert!(near(viridis(0.0), Color32::from_rgb(68, 1, 84)));
        assert!(near(viridis(1.0), Color32::from_rgb(253, 231, 37)));
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(7.0), viridis(1.0));
    }
}
