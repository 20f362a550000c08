//! Design tokens: the colors and spacing every widget draws with.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::validation::Checks;

/// Colors and spacing shared by all widgets.
///
/// # TOML Format
///
/// ```toml
/// [theme]
/// accent = "#64b4ff"
/// negative = "#ff8c50"
/// item_spacing = 8.0
/// corner_radius = 4
/// ```
///
/// Omitted fields keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeTokens {
    /// Window background.
    pub background: Rgb,
    /// Panel background.
    pub panel: Rgb,
    /// Widget body fill (knob caps, pad faces, empty cells).
    pub surface: Rgb,
    /// Active value color.
    pub accent: Rgb,
    /// Inactive or secondary value color.
    pub accent_dim: Rgb,
    /// Negative bipolar amounts and accented steps.
    pub negative: Rgb,
    /// Primary text.
    pub text_primary: Rgb,
    /// Labels and value readouts.
    pub text_secondary: Rgb,
    /// Empty tracks and grid lines.
    pub track: Rgb,
    /// Meter color for safe levels.
    pub meter_safe: Rgb,
    /// Meter color for hot levels.
    pub meter_hot: Rgb,
    /// Meter color for clipping.
    pub meter_clip: Rgb,
    /// Gap between laid-out widgets (px).
    pub item_spacing: f32,
    /// Corner radius of rectangles (px).
    pub corner_radius: u8,
    /// Stroke width of outlines and curves (px).
    pub stroke_width: f32,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            background: Rgb::new(25, 25, 30),
            panel: Rgb::new(35, 35, 42),
            surface: Rgb::new(55, 55, 68),
            accent: Rgb::new(100, 180, 255),
            accent_dim: Rgb::new(60, 100, 140),
            negative: Rgb::new(255, 140, 80),
            text_primary: Rgb::new(230, 230, 235),
            text_secondary: Rgb::new(150, 150, 160),
            track: Rgb::new(50, 50, 60),
            meter_safe: Rgb::new(80, 200, 80),
            meter_hot: Rgb::new(220, 200, 60),
            meter_clip: Rgb::new(220, 60, 60),
            item_spacing: 8.0,
            corner_radius: 4,
            stroke_width: 2.0,
        }
    }
}

impl ThemeTokens {
    /// Largest accepted spacing (px).
    pub const MAX_SPACING: f32 = 64.0;
    /// Largest accepted corner radius (px).
    pub const MAX_CORNER_RADIUS: u8 = 32;
    /// Largest accepted stroke width (px).
    pub const MAX_STROKE: f32 = 8.0;

    pub(crate) fn check(&self, checks: &mut Checks) {
        checks
            .range("theme.item_spacing", self.item_spacing, 0.0, Self::MAX_SPACING)
            .range(
                "theme.corner_radius",
                f32::from(self.corner_radius),
                0.0,
                f32::from(Self::MAX_CORNER_RADIUS),
            )
            .range("theme.stroke_width", self.stroke_width, 0.5, Self::MAX_STROKE);
    }
}
