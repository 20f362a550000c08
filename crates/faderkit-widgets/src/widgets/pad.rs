//! Two-dimensional pads: the XY pad and the drum pad grid.

use egui::{Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{
    Control, Feel, ListenerSet, PadGridControl, PadHit, SpringReturn, VelocityCurve, XyPadControl,
    XyValue,
};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{caption, local_bounds, screen_rect, to_screen};
use crate::theme::Theme;

/// Two values on one square: x left→right, y bottom→top.
pub struct XyPad<'a> {
    value: XyValue,
    default: XyValue,
    label: &'a str,
    size: f32,
    spring_x: SpringReturn,
    spring_y: SpringReturn,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<XyValue>>,
}

impl<'a> XyPad<'a> {
    /// Pad showing `value`.
    pub fn new(value: XyValue, label: &'a str) -> Self {
        Self {
            value,
            default: XyValue::CENTER,
            label,
            size: 140.0,
            spring_x: SpringReturn::None,
            spring_y: SpringReturn::None,
            feel: None,
            listeners: None,
        }
    }

    /// Set the double-click reset value.
    pub fn default(mut self, default: XyValue) -> Self {
        self.default = default;
        self
    }

    /// Side length in pixels.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size.max(32.0);
        self
    }

    /// Per-axis release policy, in normalized space.
    pub fn spring(mut self, x: SpringReturn, y: SpringReturn) -> Self {
        self.spring_x = x;
        self.spring_y = y;
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<XyValue>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the pad and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<XyValue> {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.size, self.size + 18.0), Sense::click_and_drag());
        let pad_rect = Rect::from_min_size(rect.min, vec2(self.size, self.size));

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = XyPadControl::new(local_bounds(pad_rect))
            .default(self.default)
            .spring(self.spring_x, self.spring_y)
            .feel(feel);
        let current = self.value.clamped();
        let update = drive_control(ui, &response, rect.min, &mut control, &current, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.unwrap_or(current);
            let is_active = control.is_dragging();

            painter.rect_filled(pad_rect, theme.radius(), theme.background);
            painter.rect_stroke(
                pad_rect,
                theme.radius(),
                Stroke::new(1.0, theme.track),
                StrokeKind::Inside,
            );

            // Center cross
            let grid = Stroke::new(1.0, theme.track);
            let c = pad_rect.center();
            painter.line_segment([pos2(pad_rect.left(), c.y), pos2(pad_rect.right(), c.y)], grid);
            painter.line_segment([pos2(c.x, pad_rect.top()), pos2(c.x, pad_rect.bottom())], grid);

            // Crosshair through the value
            let p = to_screen(rect.min, control.point_for(shown));
            let color = theme.value_color(is_active);
            let hair = Stroke::new(1.0, color.gamma_multiply(0.5));
            painter.line_segment([pos2(pad_rect.left(), p.y), pos2(pad_rect.right(), p.y)], hair);
            painter.line_segment([pos2(p.x, pad_rect.top()), pos2(p.x, pad_rect.bottom())], hair);
            painter.circle_filled(p, if is_active { 7.0 } else { 5.0 }, color);

            caption(
                painter,
                pos2(pad_rect.center().x, pad_rect.bottom() + 3.0),
                format!("{}  {:.2} / {:.2}", self.label, shown.x, shown.y),
                11.0,
                theme.text_secondary,
            );
        }

        ControlResponse::new(response, update)
    }
}

/// A grid of momentary drum pads.
///
/// Proposes a [`PadHit`] with `pressed: true` on press and `pressed: false`
/// on release. Velocity comes from how high on the pad the press landed.
pub struct DrumPad<'a> {
    cols: usize,
    rows: usize,
    labels: &'a [&'a str],
    cell: f32,
    curve: VelocityCurve,
    listeners: Option<&'a mut ListenerSet<PadHit>>,
}

impl<'a> DrumPad<'a> {
    /// A `cols` x `rows` grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            labels: &[],
            cell: 56.0,
            curve: VelocityCurve::default(),
            listeners: None,
        }
    }

    /// Pad labels, row-major from the top-left.
    pub fn labels(mut self, labels: &'a [&'a str]) -> Self {
        self.labels = labels;
        self
    }

    /// Side length of one pad in pixels.
    pub fn cell_size(mut self, cell: f32) -> Self {
        self.cell = cell.max(16.0);
        self
    }

    /// Velocity curve over the pad height.
    pub fn curve(mut self, curve: VelocityCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Report hits to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<PadHit>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the pads and run their interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<PadHit> {
        let size = vec2(self.cols as f32 * self.cell, self.rows as f32 * self.cell);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let mut control =
            PadGridControl::new(local_bounds(rect), self.cols, self.rows).curve(self.curve);
        let update = drive_control(
            ui,
            &response,
            rect.min,
            &mut control,
            &PadHit::default(),
            self.listeners,
        );

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let held = control.gesture().session().map(|s| s.start_value);

            for index in 0..control.len() {
                let pad = screen_rect(rect.min, control.pad_bounds(index)).shrink(2.0);
                let fill = if let Some(hit) = held.filter(|hit| hit.pad == index) {
                    theme.accent.gamma_multiply(0.4 + 0.6 * hit.velocity)
                } else {
                    let hovered = response.hover_pos().is_some_and(|p| pad.contains(p));
                    theme.surface_color(response.hovered() && hovered)
                };
                painter.rect_filled(pad, theme.radius(), fill);
                painter.rect_stroke(
                    pad,
                    theme.radius(),
                    Stroke::new(1.0, theme.track),
                    StrokeKind::Inside,
                );

                if let Some(label) = self.labels.get(index) {
                    caption(
                        painter,
                        pos2(pad.center().x, pad.bottom() - 16.0),
                        label,
                        11.0,
                        theme.text_primary,
                    );
                }
            }
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(XyPad<'_>, DrumPad<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drum_pad_grid_is_never_empty() {
        let pads = DrumPad::new(0, 0);
        assert_eq!((pads.cols, pads.rows), (1, 1));
    }

    #[test]
    fn xy_pad_size_has_a_floor() {
        let pad = XyPad::new(XyValue::CENTER, "XY").size(4.0);
        assert_eq!(pad.size, 32.0);
    }
}
