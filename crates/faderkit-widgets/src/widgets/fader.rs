//! Linear controls: faders and synth wheels.
//!
//! [`PitchWheel`] and [`ModWheel`] are faders with a wheel body; the pitch
//! wheel springs back to center on release.

use egui::{Pos2, Rect, Sense, Stroke, Ui, pos2, vec2};
use faderkit_core::{
    Control, FaderControl, Feel, ListenerSet, Orientation, ParamRange, ParamUnit, SpringReturn,
    TrackMode,
};

use super::{Formatter, impl_widget};
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{caption, local_bounds, to_screen};
use crate::theme::Theme;

/// Label and value text below the track.
const CAPTION_HEIGHT: f32 = 32.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    Slider,
    Wheel,
}

/// A straight slider.
pub struct Fader<'a> {
    value: f32,
    range: ParamRange,
    default: f32,
    label: &'a str,
    unit: ParamUnit,
    format_value: Formatter<'a>,
    orientation: Orientation,
    mode: TrackMode,
    spring: SpringReturn,
    length: f32,
    thickness: f32,
    body: Body,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<f32>>,
}

impl<'a> Fader<'a> {
    /// Vertical fader showing `value` within `range`.
    pub fn new(value: f32, range: ParamRange, label: &'a str) -> Self {
        Self {
            value,
            range,
            default: range.center(),
            label,
            unit: ParamUnit::None,
            format_value: None,
            orientation: Orientation::Vertical,
            mode: TrackMode::Absolute,
            spring: SpringReturn::None,
            length: 140.0,
            thickness: 28.0,
            body: Body::Slider,
            feel: None,
            listeners: None,
        }
    }

    /// Set the default (reset) value.
    pub fn default(mut self, default: f32) -> Self {
        self.default = default;
        self
    }

    /// Format the value with a [`ParamUnit`].
    pub fn unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set a custom value formatter.
    pub fn format(mut self, formatter: impl Fn(f32) -> String + 'a) -> Self {
        self.format_value = Some(Box::new(formatter));
        self
    }

    /// Lay the track out horizontally.
    pub fn horizontal(mut self) -> Self {
        self.orientation = Orientation::Horizontal;
        self
    }

    /// Absolute (jump to pointer) or relative (drag distance) tracking.
    pub fn mode(mut self, mode: TrackMode) -> Self {
        self.mode = mode;
        self
    }

    /// Snap back on release.
    pub fn spring(mut self, spring: SpringReturn) -> Self {
        self.spring = spring;
        self
    }

    /// Track length and thickness in pixels.
    pub fn size(mut self, length: f32, thickness: f32) -> Self {
        self.length = length.max(16.0);
        self.thickness = thickness.max(8.0);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<f32>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    fn wheel(mut self) -> Self {
        self.body = Body::Wheel;
        self.mode = TrackMode::Relative;
        self
    }

    fn value_text(&self, value: f32) -> String {
        match &self.format_value {
            Some(formatter) => formatter(value),
            None => self.unit.format(value),
        }
    }

    fn track_size(&self) -> egui::Vec2 {
        match self.orientation {
            Orientation::Vertical => vec2(self.thickness, self.length),
            Orientation::Horizontal => vec2(self.length, self.thickness),
        }
    }

    /// Draw the fader and run its interaction.
    pub fn show(mut self, ui: &mut Ui) -> ControlResponse<f32> {
        let track_size = self.track_size();
        let size = vec2(track_size.x.max(48.0), track_size.y + CAPTION_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let track_rect = Rect::from_center_size(
            pos2(rect.center().x, rect.top() + track_size.y / 2.0),
            track_size,
        );
        let origin = track_rect.min;

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = FaderControl::new(self.range, local_bounds(track_rect))
            .default(self.default)
            .orientation(self.orientation)
            .mode(self.mode)
            .spring(self.spring)
            .feel(feel);
        let current = self.range.clamp(self.value);
        let listeners = self.listeners.take();
        let update = drive_control(ui, &response, origin, &mut control, &current, listeners);

        let shown = update.value.unwrap_or(current);
        let is_active = control.is_dragging();

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let thumb = to_screen(origin, control.thumb_at(shown));
            // Bipolar ranges fill from zero.
            let rest = if self.range.min < 0.0 && self.range.max > 0.0 {
                0.0
            } else {
                self.range.min
            };
            let rest = to_screen(origin, control.thumb_at(rest));
            let fill = theme.value_color(is_active);

            match self.body {
                Body::Slider => {
                    let groove_size = match self.orientation {
                        Orientation::Vertical => vec2(6.0, track_size.y),
                        Orientation::Horizontal => vec2(track_size.x, 6.0),
                    };
                    let groove = Rect::from_center_size(track_rect.center(), groove_size);
                    painter.rect_filled(groove, 3.0, theme.track);
                    painter.rect_filled(
                        span_rect(groove, rest, thumb, self.orientation),
                        3.0,
                        fill,
                    );

                    let thumb_size = match self.orientation {
                        Orientation::Vertical => vec2(self.thickness, 10.0),
                        Orientation::Horizontal => vec2(10.0, self.thickness),
                    };
                    let thumb_rect = Rect::from_center_size(thumb, thumb_size);
                    painter.rect_filled(
                        thumb_rect,
                        theme.radius(),
                        theme.surface_color(is_active || response.hovered()),
                    );
                    painter.rect_stroke(
                        thumb_rect,
                        theme.radius(),
                        Stroke::new(1.0, fill),
                        egui::StrokeKind::Inside,
                    );
                }
                Body::Wheel => {
                    paint_wheel(painter, &theme, track_rect, thumb, rest, self.orientation, fill);
                }
            }

            let x = rect.center().x;
            caption(
                painter,
                pos2(x, track_rect.bottom() + 4.0),
                self.label,
                12.0,
                theme.text_primary,
            );
            caption(
                painter,
                pos2(x, track_rect.bottom() + 18.0),
                self.value_text(shown),
                11.0,
                theme.text_secondary,
            );
        }

        ControlResponse::new(response, update)
    }
}

/// Rectangle along `groove` between two points on its axis.
fn span_rect(groove: Rect, a: Pos2, b: Pos2, orientation: Orientation) -> Rect {
    match orientation {
        Orientation::Vertical => {
            Rect::from_x_y_ranges(groove.x_range(), a.y.min(b.y)..=a.y.max(b.y))
        }
        Orientation::Horizontal => {
            Rect::from_x_y_ranges(a.x.min(b.x)..=a.x.max(b.x), groove.y_range())
        }
    }
}

fn paint_wheel(
    painter: &egui::Painter,
    theme: &Theme,
    body: Rect,
    thumb: Pos2,
    rest: Pos2,
    orientation: Orientation,
    fill: egui::Color32,
) {
    painter.rect_filled(body, theme.radius(), theme.surface);

    // Ridges scroll with the value.
    let spacing = 8.0;
    let (along, offset) = match orientation {
        Orientation::Vertical => (body.height(), (thumb.y - body.top()) % spacing),
        Orientation::Horizontal => (body.width(), (thumb.x - body.left()) % spacing),
    };
    let ridge = Stroke::new(1.0, theme.track);
    let mut t = offset;
    while t < along {
        let segment = match orientation {
            Orientation::Vertical => {
                let y = body.top() + t;
                [pos2(body.left() + 3.0, y), pos2(body.right() - 3.0, y)]
            }
            Orientation::Horizontal => {
                let x = body.left() + t;
                [pos2(x, body.top() + 3.0), pos2(x, body.bottom() - 3.0)]
            }
        };
        painter.line_segment(segment, ridge);
        t += spacing;
    }

    // Rest position detent and the value band.
    let (detent, band) = match orientation {
        Orientation::Vertical => (
            [pos2(body.left(), rest.y), pos2(body.right(), rest.y)],
            Rect::from_center_size(thumb, vec2(body.width(), 6.0)),
        ),
        Orientation::Horizontal => (
            [pos2(rest.x, body.top()), pos2(rest.x, body.bottom())],
            Rect::from_center_size(thumb, vec2(6.0, body.height())),
        ),
    };
    painter.line_segment(detent, Stroke::new(1.0, theme.text_secondary));
    painter.rect_filled(band.intersect(body), 2.0, fill);
}

/// Bipolar pitch-bend wheel: relative drag, springs back to center.
pub struct PitchWheel<'a>(Fader<'a>);

impl<'a> PitchWheel<'a> {
    /// Wheel over -1..1 showing `value`.
    pub fn new(value: f32) -> Self {
        Self(
            Fader::new(value, ParamRange::bipolar(), "Pitch")
                .default(0.0)
                .unit(ParamUnit::BipolarPercent)
                .spring(SpringReturn::Center)
                .size(120.0, 32.0)
                .wheel(),
        )
    }

    /// Replace the label.
    pub fn label(mut self, label: &'a str) -> Self {
        self.0.label = label;
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(self, feel: Feel) -> Self {
        Self(self.0.feel(feel))
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(self, listeners: &'a mut ListenerSet<f32>) -> Self {
        Self(self.0.listeners(listeners))
    }

    /// Draw the wheel and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<f32> {
        self.0.show(ui)
    }
}

/// Unipolar modulation wheel: relative drag, stays where released.
pub struct ModWheel<'a>(Fader<'a>);

impl<'a> ModWheel<'a> {
    /// Wheel over 0..1 showing `value`.
    pub fn new(value: f32) -> Self {
        Self(
            Fader::new(value, ParamRange::unit(), "Mod")
                .default(0.0)
                .unit(ParamUnit::Percent)
                .size(120.0, 32.0)
                .wheel(),
        )
    }

    /// Replace the label.
    pub fn label(mut self, label: &'a str) -> Self {
        self.0.label = label;
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(self, feel: Feel) -> Self {
        Self(self.0.feel(feel))
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(self, listeners: &'a mut ListenerSet<f32>) -> Self {
        Self(self.0.listeners(listeners))
    }

    /// Draw the wheel and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<f32> {
        self.0.show(ui)
    }
}

impl_widget!(Fader<'_>, PitchWheel<'_>, ModWheel<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_wheel_springs_to_center() {
        let wheel = PitchWheel::new(0.4);
        assert_eq!(wheel.0.spring, SpringReturn::Center);
        assert_eq!(wheel.0.mode, TrackMode::Relative);
        assert_eq!(wheel.0.value_text(0.25), "+25%");
    }

    #[test]
    fn mod_wheel_holds_value() {
        let wheel = ModWheel::new(0.4);
        assert_eq!(wheel.0.spring, SpringReturn::None);
        assert_eq!(wheel.0.range, ParamRange::unit());
    }

    #[test]
    fn horizontal_swaps_track_size() {
        let fader = Fader::new(0.0, ParamRange::unit(), "Pan").size(100.0, 20.0).horizontal();
        assert_eq!(fader.track_size(), vec2(100.0, 20.0));
    }

    #[test]
    fn span_rect_orders_endpoints() {
        let groove = Rect::from_min_max(pos2(0.0, 0.0), pos2(6.0, 100.0));
        let r = span_rect(groove, pos2(3.0, 80.0), pos2(3.0, 20.0), Orientation::Vertical);
        assert_eq!(r.y_range(), egui::Rangef::new(20.0, 80.0));
    }
}
