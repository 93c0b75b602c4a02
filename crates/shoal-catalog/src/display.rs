//! Display color mapping for the renderer
//!
//! Converts an expressed color gene plus an individual's lightness (0 - 100)
//! into an RGBA value. Breeding never calls into this module.

use crate::catalog::{ColorGeneId, GeneCatalog, Hsl};

/// Maximum lightness shift applied at lightness 0 or 100
pub const LIGHTNESS_RANGE: f32 = 0.25;

/// Neutral lightness that leaves the base color unchanged
pub const NEUTRAL_LIGHTNESS: f32 = 50.0;

/// Compute the RGBA color for a gene at the given lightness
pub fn display_color(catalog: &GeneCatalog, gene: ColorGeneId, lightness: f32) -> [u8; 4] {
    let base = catalog.base_color(gene);
    let shifted = apply_lightness(base, lightness);
    let [r, g, b] = hsl_to_rgb(shifted);
    [r, g, b, 255]
}

/// Shift an HSL color's lightness by an individual's lightness offset
pub fn apply_lightness(base: Hsl, lightness: f32) -> Hsl {
    let lightness = lightness.clamp(0.0, 100.0);
    let offset = (lightness - NEUTRAL_LIGHTNESS) / NEUTRAL_LIGHTNESS * LIGHTNESS_RANGE;
    Hsl {
        l: (base.l + offset).clamp(0.0, 1.0),
        ..base
    }
}

/// Convert HSL to 8-bit RGB
pub fn hsl_to_rgb(color: Hsl) -> [u8; 3] {
    let h = color.h.rem_euclid(360.0) / 360.0;
    let s = color.s.clamp(0.0, 1.0);
    let l = color.l.clamp(0.0, 1.0);

    if s == 0.0 {
        let v = to_byte(l);
        return [v, v, v];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        to_byte(hue_to_channel(p, q, h + 1.0 / 3.0)),
        to_byte(hue_to_channel(p, q, h)),
        to_byte(hue_to_channel(p, q, h - 1.0 / 3.0)),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_byte(channel: f32) -> u8 {
    (channel * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Format a color as `#rrggbb` (alpha is dropped)
pub fn to_hex(color: [u8; 4]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primaries() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 1.0, 0.5)), [255, 0, 0]);
        assert_eq!(hsl_to_rgb(Hsl::new(120.0, 1.0, 0.5)), [0, 255, 0]);
        assert_eq!(hsl_to_rgb(Hsl::new(240.0, 1.0, 0.5)), [0, 0, 255]);
    }

    #[test]
    fn test_hsl_greyscale() {
        assert_eq!(hsl_to_rgb(Hsl::new(90.0, 0.0, 0.0)), [0, 0, 0]);
        assert_eq!(hsl_to_rgb(Hsl::new(90.0, 0.0, 1.0)), [255, 255, 255]);
    }

    #[test]
    fn test_neutral_lightness_keeps_base() {
        let base = Hsl::new(30.0, 0.5, 0.4);
        assert_eq!(apply_lightness(base, NEUTRAL_LIGHTNESS), base);
    }

    #[test]
    fn test_lightness_is_monotonic() {
        let catalog = GeneCatalog::new();
        let dark = display_color(&catalog, ColorGeneId::Red, 0.0);
        let mid = display_color(&catalog, ColorGeneId::Red, 50.0);
        let light = display_color(&catalog, ColorGeneId::Red, 100.0);

        let sum = |c: [u8; 4]| c[0] as u32 + c[1] as u32 + c[2] as u32;
        assert!(sum(dark) < sum(mid));
        assert!(sum(mid) < sum(light));
        assert_eq!(light[3], 255);
    }

    #[test]
    fn test_out_of_range_lightness_is_clamped() {
        let catalog = GeneCatalog::new();
        assert_eq!(
            display_color(&catalog, ColorGeneId::Blue, 250.0),
            display_color(&catalog, ColorGeneId::Blue, 100.0)
        );
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([255, 0, 16, 255]), "#ff0010");
    }
}
