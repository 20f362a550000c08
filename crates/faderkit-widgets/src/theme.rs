//! Visual styling for faderkit widgets.
//!
//! A [`Theme`] is built from [`ThemeTokens`] and installed on an egui
//! context with [`Theme::apply`]; widgets read it back with
//! [`Theme::current`] every frame.

use egui::{Color32, Context, CornerRadius, Id, Stroke, Style, Visuals};
use faderkit_config::{Rgb, ThemeTokens};

/// Theme colors and spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Main window background color.
    pub background: Color32,
    /// Panel/card background color.
    pub panel_bg: Color32,
    /// Widget body fill.
    pub surface: Color32,
    /// Primary accent color for active elements.
    pub accent: Color32,
    /// Dimmed accent color for inactive elements.
    pub accent_dim: Color32,
    /// Negative amounts and accented steps.
    pub negative: Color32,
    /// Primary text color.
    pub text_primary: Color32,
    /// Secondary/muted text color.
    pub text_secondary: Color32,
    /// Empty tracks and grid lines.
    pub track: Color32,
    /// Meter color for safe signal levels.
    pub meter_green: Color32,
    /// Meter color for hot signal levels.
    pub meter_yellow: Color32,
    /// Meter color for clipping signal levels.
    pub meter_red: Color32,
    /// Gap between laid-out widgets.
    pub item_spacing: f32,
    /// Corner radius of rectangles.
    pub corner_radius: u8,
    /// Outline and curve stroke width.
    pub stroke_width: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_tokens(&ThemeTokens::default())
    }
}

fn color(rgb: Rgb) -> Color32 {
    Color32::from_rgb(rgb.r, rgb.g, rgb.b)
}

fn brighten(c: Color32, by: u8) -> Color32 {
    Color32::from_rgb(
        c.r().saturating_add(by),
        c.g().saturating_add(by),
        c.b().saturating_add(by),
    )
}

impl Theme {
    fn storage_id() -> Id {
        Id::new("faderkit_theme")
    }

    /// Theme from configured tokens.
    pub fn from_tokens(tokens: &ThemeTokens) -> Self {
        Self {
            background: color(tokens.background),
            panel_bg: color(tokens.panel),
            surface: color(tokens.surface),
            accent: color(tokens.accent),
            accent_dim: color(tokens.accent_dim),
            negative: color(tokens.negative),
            text_primary: color(tokens.text_primary),
            text_secondary: color(tokens.text_secondary),
            track: color(tokens.track),
            meter_green: color(tokens.meter_safe),
            meter_yellow: color(tokens.meter_hot),
            meter_red: color(tokens.meter_clip),
            item_spacing: tokens.item_spacing,
            corner_radius: tokens.corner_radius,
            stroke_width: tokens.stroke_width,
        }
    }

    /// The theme installed on `ctx`, or the default one.
    pub fn current(ctx: &Context) -> Self {
        ctx.data(|d| d.get_temp::<Self>(Self::storage_id()))
            .unwrap_or_default()
    }

    /// Apply the theme to an egui context and make it the widgets' theme.
    pub fn apply(&self, ctx: &Context) {
        let mut style = Style::default();
        let radius = CornerRadius::same(self.corner_radius);

        // Dark visuals as base
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.panel_bg;
        visuals.panel_fill = self.panel_bg;
        visuals.extreme_bg_color = self.background;
        visuals.faint_bg_color = self.track;

        visuals.widgets.noninteractive.bg_fill = self.panel_bg;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);
        visuals.widgets.noninteractive.corner_radius = radius;

        visuals.widgets.inactive.bg_fill = self.surface;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);
        visuals.widgets.inactive.corner_radius = radius;

        visuals.widgets.hovered.bg_fill = brighten(self.surface, 12);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, self.accent);
        visuals.widgets.hovered.corner_radius = radius;

        visuals.widgets.active.bg_fill = brighten(self.surface, 24);
        visuals.widgets.active.fg_stroke = Stroke::new(self.stroke_width, self.accent);
        visuals.widgets.active.corner_radius = radius;

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.override_text_color = Some(self.text_primary);

        style.visuals = visuals;

        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing * 0.75);
        style.spacing.window_margin = egui::Margin::same(12);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
        ctx.data_mut(|d| d.insert_temp(Self::storage_id(), *self));
    }

    /// Get meter color based on level (0.0 to 1.0+).
    pub fn meter_color(&self, level: f32) -> Color32 {
        if level > 0.95 {
            self.meter_red
        } else if level > 0.7 {
            self.meter_yellow
        } else {
            self.meter_green
        }
    }

    /// Fill for a signed amount: accent when positive, negative color below zero.
    pub fn amount_color(&self, amount: f32) -> Color32 {
        if amount < 0.0 { self.negative } else { self.accent }
    }

    /// Value color, brighter while the widget is being dragged.
    pub fn value_color(&self, active: bool) -> Color32 {
        if active {
            brighten(self.accent, 20)
        } else {
            self.accent
        }
    }

    /// Widget body fill, lifted while hovered or dragged.
    pub fn surface_color(&self, lifted: bool) -> Color32 {
        if lifted {
            brighten(self.surface, 10)
        } else {
            self.surface
        }
    }

    /// Rectangle corner radius.
    pub fn radius(&self) -> CornerRadius {
        CornerRadius::same(self.corner_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_map_to_colors() {
        let tokens = ThemeTokens {
            accent: Rgb::new(1, 2, 3),
            ..ThemeTokens::default()
        };
        assert_eq!(Theme::from_tokens(&tokens).accent, Color32::from_rgb(1, 2, 3));
    }

    #[test]
    fn meter_color_thresholds() {
        let theme = Theme::default();
        assert_eq!(theme.meter_color(0.5), theme.meter_green);
        assert_eq!(theme.meter_color(0.8), theme.meter_yellow);
        assert_eq!(theme.meter_color(1.2), theme.meter_red);
    }

    #[test]
    fn applied_theme_is_current() {
        let ctx = Context::default();
        assert_eq!(Theme::current(&ctx), Theme::default());
        let theme = Theme {
            corner_radius: 9,
            ..Theme::default()
        };
        theme.apply(&ctx);
        assert_eq!(Theme::current(&ctx).corner_radius, 9);
    }
}
