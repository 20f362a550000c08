//! Rotary knob widgets.
//!
//! - [`Knob`]: a single 270° knob, vertical drag or circular motion
//! - [`TimeKnob`]: a knob over a logarithmic millisecond range
//! - [`RingKnob`]: concentric circular sliders, one value per ring
//!
//! Shift drags finely and double-click restores the default.

use egui::{Rect, Sense, Stroke, Ui, pos2, vec2};
use faderkit_core::{
    Arc, Control, Feel, KnobControl, KnobDrag, ListenerSet, ParamRange, ParamSpec, ParamUnit,
    Point, Ring, RingControl, SpringReturn, concentric_rings,
};

use super::{Formatter, impl_widget};
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{caption, draw_arc, local_bounds};
use crate::theme::Theme;

/// Rotary knob.
pub struct Knob<'a> {
    value: f32,
    range: ParamRange,
    default: f32,
    label: &'a str,
    unit: ParamUnit,
    format_value: Formatter<'a>,
    diameter: f32,
    drag: KnobDrag,
    spring: SpringReturn,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<f32>>,
}

impl<'a> Knob<'a> {
    /// Create a knob showing `value` within `range`.
    pub fn new(value: f32, range: ParamRange, label: &'a str) -> Self {
        Self {
            value,
            range,
            default: range.center(),
            label,
            unit: ParamUnit::None,
            format_value: None,
            diameter: 60.0,
            drag: KnobDrag::Vertical,
            spring: SpringReturn::None,
            feel: None,
            listeners: None,
        }
    }

    /// Create a knob from a parameter descriptor: range, default, unit and
    /// short label all come from `spec`.
    pub fn from_spec(value: f32, spec: &ParamSpec) -> Self {
        Self::new(value, spec.range, spec.short_name)
            .default(spec.default)
            .unit(spec.unit)
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

    /// Set knob diameter in pixels.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter.max(16.0);
        self
    }

    /// Set the drag style.
    pub fn drag(mut self, drag: KnobDrag) -> Self {
        self.drag = drag;
        self
    }

    /// Snap back on release.
    pub fn spring(mut self, spring: SpringReturn) -> Self {
        self.spring = spring;
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

    fn value_text(&self, value: f32) -> String {
        match &self.format_value {
            Some(formatter) => formatter(value),
            None => self.unit.format(value),
        }
    }

    /// Draw the knob and run its interaction.
    pub fn show(mut self, ui: &mut Ui) -> ControlResponse<f32> {
        let d = self.diameter;
        let size = vec2(d, d + 35.0); // Extra space for label
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());
        let knob_rect = Rect::from_min_size(rect.min, vec2(d, d));

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = KnobControl::new(self.range, local_bounds(knob_rect))
            .default(self.default)
            .drag(self.drag)
            .spring(self.spring)
            .feel(feel);
        let current = self.range.clamp(self.value);
        let listeners = self.listeners.take();
        let update = drive_control(ui, &response, rect.min, &mut control, &current, listeners);

        let shown = update.value.unwrap_or(current);
        let is_active = control.is_dragging();

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let center = knob_rect.center();
            let radius = d / 2.0 - 4.0;
            let arc = control.value_arc();
            let normalized = self.range.normalize(shown);

            // Track, then the filled portion
            draw_arc(painter, center, radius - 2.0, arc, 0.0, 1.0, Stroke::new(6.0, theme.track));
            let fill = theme.value_color(is_active);
            if normalized > 0.001 {
                draw_arc(
                    painter,
                    center,
                    radius - 2.0,
                    arc,
                    0.0,
                    normalized,
                    Stroke::new(6.0, fill),
                );
            }

            // Knob body
            painter.circle_filled(
                center,
                radius - 8.0,
                theme.surface_color(is_active || response.hovered()),
            );

            // Pointer line
            let angle = arc.angle_at(normalized);
            let pointer_len = radius - 14.0;
            let pointer_end = pos2(
                center.x + angle.cos() * pointer_len,
                center.y + angle.sin() * pointer_len,
            );
            painter.line_segment([center, pointer_end], Stroke::new(3.0, fill));
            painter.circle_filled(center, 3.0, fill);

            caption(
                painter,
                pos2(center.x, center.y + radius + 8.0),
                self.label,
                12.0,
                theme.text_primary,
            );
            caption(
                painter,
                pos2(center.x, center.y + radius + 22.0),
                self.value_text(shown),
                11.0,
                theme.text_secondary,
            );
        }

        ControlResponse::new(response, update)
    }
}

/// A knob over a logarithmic time range, formatted as ms / s.
pub struct TimeKnob<'a>(Knob<'a>);

impl<'a> TimeKnob<'a> {
    /// Knob for `value_ms` between `min_ms` and `max_ms`.
    pub fn new(value_ms: f32, min_ms: f32, max_ms: f32, label: &'a str) -> Self {
        let range = ParamRange::time_ms(min_ms, max_ms);
        Self(Knob::new(value_ms, range, label).unit(ParamUnit::Milliseconds))
    }

    /// Set the default (reset) time.
    pub fn default(self, default_ms: f32) -> Self {
        Self(self.0.default(default_ms))
    }

    /// Set knob diameter in pixels.
    pub fn diameter(self, diameter: f32) -> Self {
        Self(self.0.diameter(diameter))
    }

    /// Override the context's interaction constants.
    pub fn feel(self, feel: Feel) -> Self {
        Self(self.0.feel(feel))
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(self, listeners: &'a mut ListenerSet<f32>) -> Self {
        Self(self.0.listeners(listeners))
    }

    /// Draw the knob and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<f32> {
        self.0.show(ui)
    }
}

/// Concentric circular sliders sharing one center.
///
/// Ring 0 is the outermost. The proposed value always has one entry per
/// ring; only the dragged ring changes.
pub struct RingKnob<'a> {
    values: &'a [f32],
    rings: Option<Vec<Ring>>,
    range: ParamRange,
    count: usize,
    labels: &'a [&'a str],
    diameter: f32,
    gap: f32,
    arc: Arc,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<Vec<f32>>>,
}

impl<'a> RingKnob<'a> {
    /// One ring per entry of `values`, all over `range`.
    pub fn new(values: &'a [f32], range: ParamRange) -> Self {
        Self {
            values,
            rings: None,
            range,
            count: values.len().max(1),
            labels: &[],
            diameter: 96.0,
            gap: 3.0,
            arc: Arc::FULL,
            feel: None,
            listeners: None,
        }
    }

    /// Use explicit ring bands (radii in pixels from the center) instead of
    /// equal bands.
    pub fn rings(mut self, rings: Vec<Ring>) -> Self {
        self.count = rings.len().max(1);
        self.rings = Some(rings);
        self
    }

    /// Per-ring labels, outermost first.
    pub fn labels(mut self, labels: &'a [&'a str]) -> Self {
        self.labels = labels;
        self
    }

    /// Set the outer diameter in pixels.
    pub fn diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter.max(24.0);
        self
    }

    /// Gap between equal bands.
    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Value arc shared by every ring.
    pub fn arc(mut self, arc: Arc) -> Self {
        self.arc = arc;
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<Vec<f32>>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the rings and run their interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<Vec<f32>> {
        let d = self.diameter;
        let label_rows = if self.labels.is_empty() { 0.0 } else { 16.0 };
        let (rect, response) =
            ui.allocate_exact_size(vec2(d, d + label_rows), Sense::click_and_drag());
        let dial = Rect::from_min_size(rect.min, vec2(d, d));
        let center = Point::new(d / 2.0, d / 2.0);

        let rings = self
            .rings
            .unwrap_or_else(|| concentric_rings(d / 2.0 - 2.0, self.count, self.gap, self.range));
        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = RingControl::new(center, rings).arc(self.arc).feel(feel);

        // One value per ring, out-of-range entries clamped.
        let current: Vec<f32> = control
            .rings()
            .iter()
            .enumerate()
            .map(|(i, ring)| ring.range.clamp(self.values.get(i).copied().unwrap_or(ring.default)))
            .collect();
        let update = drive_control(ui, &response, rect.min, &mut control, &current, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.as_deref().unwrap_or(current.as_slice());
            let active = control.active_target();
            let screen_center = dial.center();

            for (i, ring) in control.rings().iter().enumerate() {
                let width = ((ring.outer_radius - ring.inner_radius) * 0.6).max(1.0);
                let radius = ring.mid_radius();
                draw_arc(
                    painter,
                    screen_center,
                    radius,
                    self.arc,
                    0.0,
                    1.0,
                    Stroke::new(width, theme.track),
                );

                let normalized =
                    ring.range.normalize(shown.get(i).copied().unwrap_or(ring.default));
                let color = if active == Some(i) {
                    theme.value_color(true)
                } else if i % 2 == 0 {
                    theme.accent
                } else {
                    theme.accent_dim
                };
                if normalized > 0.001 {
                    draw_arc(
                        painter,
                        screen_center,
                        radius,
                        self.arc,
                        0.0,
                        normalized,
                        Stroke::new(width, color),
                    );
                }
            }

            if let Some(i) = active
                && let Some(label) = self.labels.get(i)
            {
                let value = shown.get(i).copied().unwrap_or_default();
                caption(
                    painter,
                    pos2(dial.center().x, dial.bottom() + 2.0),
                    format!("{label} {value:.2}"),
                    11.0,
                    theme.text_secondary,
                );
            } else if let Some(label) = self.labels.first() {
                caption(
                    painter,
                    pos2(dial.center().x, dial.bottom() + 2.0),
                    label,
                    11.0,
                    theme.text_secondary,
                );
            }
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(Knob<'_>, TimeKnob<'_>, RingKnob<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knob_default_value() {
        let knob = Knob::new(0.5, ParamRange::unit(), "Test").default(0.25);
        assert_eq!(knob.default, 0.25);
    }

    #[test]
    fn knob_from_spec_takes_unit_and_label() {
        let spec = ParamSpec::frequency_hz("Cutoff", "Cut", 20.0, 20000.0, 1000.0);
        let knob = Knob::from_spec(1000.0, &spec);
        assert_eq!(knob.label, "Cut");
        assert_eq!(knob.default, 1000.0);
        assert_eq!(knob.value_text(2500.0), "2.5 kHz");
    }

    #[test]
    fn custom_formatter_wins_over_unit() {
        let knob = Knob::new(0.5, ParamRange::unit(), "Mix")
            .unit(ParamUnit::Percent)
            .format(|v| format!("{v:.3}"));
        assert_eq!(knob.value_text(0.5), "0.500");
    }

    #[test]
    fn time_knob_formats_milliseconds() {
        let knob = TimeKnob::new(1500.0, 1.0, 5000.0, "Rel");
        assert_eq!(knob.0.value_text(1500.0), "1.50 s");
    }

    #[test]
    fn ring_knob_counts_values() {
        let values = [0.1, 0.2, 0.3];
        let rings = RingKnob::new(&values, ParamRange::unit());
        assert_eq!(rings.count, 3);
        let empty = RingKnob::new(&[], ParamRange::unit());
        assert_eq!(empty.count, 1);
    }
}
