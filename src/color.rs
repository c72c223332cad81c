use palette::{named, Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

/// Lightness of the faintest threshold line (matches an SVG "lightgrey").
const FAINTEST_LIGHTNESS: f32 = 0.83;

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

/// Convert a named `palette` colour into the plotting backend's type.
pub fn to_rgb(color: Srgb<u8>) -> RGBColor {
    RGBColor(color.red, color.green, color.blue)
}

fn float_to_rgb(rgb: Srgb) -> RGBColor {
    RGBColor(
        (rgb.red * 255.0).round().clamp(0.0, 255.0) as u8,
        (rgb.green * 255.0).round().clamp(0.0, 255.0) as u8,
        (rgb.blue * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Threshold shades
// ---------------------------------------------------------------------------

/// `n` greys from black to light grey with evenly spaced lightness.
///
/// The first shade marks the most severe level.
pub fn threshold_shades(n: usize) -> Vec<RGBColor> {
    (0..n)
        .map(|i| {
            let lightness = if n <= 1 {
                0.0
            } else {
                FAINTEST_LIGHTNESS * i as f32 / (n - 1) as f32
            };
            let hsl = Hsl::new(0.0, 0.0, lightness);
            let rgb: Srgb = hsl.into_color();
            float_to_rgb(rgb)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Colour role of every element in the diagnostic chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColors {
    pub close: RGBColor,
    pub residual: RGBColor,
    pub strain: RGBColor,
    pub capacity: RGBColor,
    pub rho: RGBColor,
    pub event: RGBColor,
}

impl Default for ChartColors {
    fn default() -> Self {
        Self {
            close: to_rgb(named::BLACK),
            residual: to_rgb(named::STEELBLUE),
            strain: to_rgb(named::CRIMSON),
            capacity: to_rgb(named::GREY),
            rho: to_rgb(named::DARKRED),
            event: to_rgb(named::DARKRED),
        }
    }
}
