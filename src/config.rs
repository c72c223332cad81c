use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Default output resolution.
pub const DEFAULT_DPI: u32 = 150;

/// TrueType fonts tried, in order, when no font is configured.
pub const FONT_CANDIDATES: [&str; 6] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Canvas geometry and typography for one rendered figure.
///
/// Sizes are specified in inches and typographic points, then converted to
/// pixels through the DPI so that a higher resolution produces the same
/// picture with more detail rather than a smaller one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Canvas width in inches.
    pub width_in: f64,
    /// Canvas height in inches.
    pub height_in: f64,
    pub dpi: u32,
    /// Tick label and legend size in points.
    pub font_pt: f64,
    /// Panel title size in points.
    pub title_pt: f64,
    /// Font file for all chart text; searched for when unset.
    pub font: Option<PathBuf>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width_in: 14.0,
            height_in: 10.0,
            dpi: DEFAULT_DPI,
            font_pt: 10.0,
            title_pt: 12.0,
            font: None,
        }
    }
}

impl ChartConfig {
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi.max(1);
        self
    }

    pub fn with_font(mut self, font: Option<PathBuf>) -> Self {
        self.font = font;
        self
    }

    /// Font files to try, configured font first.
    pub fn font_candidates(&self) -> Vec<PathBuf> {
        self.font
            .iter()
            .cloned()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
            .collect()
    }

    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (self.width_in * dpi).round().max(1.0) as u32,
            (self.height_in * dpi).round().max(1.0) as u32,
        )
    }

    /// Convert points (1/72 inch) to pixels.
    pub fn pt_to_px(&self, points: f64) -> f64 {
        points * f64::from(self.dpi) / 72.0
    }

    /// Pixel stroke width for a line specified in points; never thinner than 1px.
    pub fn stroke_px(&self, points: f64) -> u32 {
        self.pt_to_px(points).round().max(1.0) as u32
    }

    /// Pixel length for layout spacing specified in points.
    pub fn spacing_px(&self, points: f64) -> u32 {
        self.pt_to_px(points).round().max(0.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_is_fourteen_by_ten_at_150_dpi() {
        let config = ChartConfig::default();
        assert_eq!(config.pixel_size(), (2100, 1500));
    }

    #[test]
    fn dpi_scales_canvas_and_strokes() {
        let config = ChartConfig::default().with_dpi(72);
        assert_eq!(config.pixel_size(), (1008, 720));
        assert_eq!(config.stroke_px(2.0), 2);
        // Hairlines stay visible.
        assert_eq!(config.stroke_px(0.1), 1);
    }

    #[test]
    fn configured_font_is_tried_first() {
        let config = ChartConfig::default().with_font(Some(PathBuf::from("my.ttf")));
        let candidates = config.font_candidates();
        assert_eq!(candidates[0], PathBuf::from("my.ttf"));
        assert_eq!(candidates.len(), FONT_CANDIDATES.len() + 1);
    }

    #[test]
    fn zero_dpi_is_clamped() {
        let config = ChartConfig::default().with_dpi(0);
        assert_eq!(config.dpi, 1);
        assert_eq!(config.pixel_size(), (14, 10));
    }
}
