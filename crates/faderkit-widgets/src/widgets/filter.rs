//! Filter response pad: cutoff across, resonance up.

use egui::{Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{Control, Feel, FilterControl, FilterPoint, ListenerSet, ParamUnit};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{local_bounds, polyline, to_screen};
use crate::theme::Theme;

/// Decade markers drawn behind the curve.
const GRID_HZ: [f32; 3] = [100.0, 1000.0, 10_000.0];

/// Lowpass response curve with a draggable cutoff/resonance handle.
pub struct FilterCurve<'a> {
    value: FilterPoint,
    default: FilterPoint,
    min_hz: f32,
    max_hz: f32,
    max_q: f32,
    db_span: f32,
    width: f32,
    height: f32,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<FilterPoint>>,
}

impl<'a> FilterCurve<'a> {
    /// Pad showing `value`, 20 Hz to 20 kHz.
    pub fn new(value: FilterPoint) -> Self {
        Self {
            value,
            default: FilterPoint::default(),
            min_hz: 20.0,
            max_hz: 20_000.0,
            max_q: 12.0,
            db_span: 24.0,
            width: 260.0,
            height: 120.0,
            feel: None,
            listeners: None,
        }
    }

    /// Cutoff range in Hz (log-mapped across the width).
    pub fn cutoff_range(mut self, min_hz: f32, max_hz: f32) -> Self {
        self.min_hz = min_hz;
        self.max_hz = max_hz;
        self
    }

    /// Quality factor at full resonance.
    pub fn max_q(mut self, max_q: f32) -> Self {
        self.max_q = max_q;
        self
    }

    /// Double-click reset value.
    pub fn default(mut self, default: FilterPoint) -> Self {
        self.default = default;
        self
    }

    /// Pad size in pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width.max(32.0);
        self.height = height.max(32.0);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<FilterPoint>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the pad and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<FilterPoint> {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.width, self.height + 18.0), Sense::click_and_drag());
        let pad = Rect::from_min_size(rect.min, vec2(self.width, self.height));

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = FilterControl::new(local_bounds(pad))
            .cutoff_range(self.min_hz, self.max_hz)
            .max_q(self.max_q)
            .default(self.default)
            .feel(feel);
        let current = control.clamp(self.value);
        let update = drive_control(ui, &response, rect.min, &mut control, &current, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let shown = update.value.unwrap_or(current);
            let origin = rect.min;
            let painter = ui.painter().with_clip_rect(pad);

            painter.rect_filled(pad, theme.radius(), theme.background);

            let grid = Stroke::new(1.0, theme.track);
            let cutoff = *control.cutoff();
            for hz in GRID_HZ.into_iter().filter(|hz| cutoff.contains(*hz)) {
                let x = pad.left() + cutoff.normalize(hz) * pad.width();
                painter.line_segment([pos2(x, pad.top()), pos2(x, pad.bottom())], grid);
            }
            // 0 dB line
            painter.line_segment(
                [pos2(pad.left(), pad.center().y), pos2(pad.right(), pad.center().y)],
                grid,
            );

            let samples = (self.width / 2.0) as usize;
            let curve = control.response(shown, samples, self.db_span);
            polyline(&painter, origin, &curve, Stroke::new(theme.stroke_width, theme.accent));

            let handle = to_screen(origin, control.handle_for(shown));
            let is_active = control.is_dragging();
            painter.circle_filled(
                handle,
                if is_active { 7.0 } else { 5.0 },
                theme.value_color(is_active),
            );
            painter.rect_stroke(pad, theme.radius(), grid, StrokeKind::Inside);

            ui.painter().text(
                pos2(pad.left(), pad.bottom() + 3.0),
                egui::Align2::LEFT_TOP,
                format!(
                    "{}  Q {:.2}",
                    ParamUnit::Hertz.format(shown.cutoff_hz),
                    shown.q(self.max_q)
                ),
                egui::FontId::proportional(11.0),
                theme.text_secondary,
            );
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(FilterCurve<'_>);

#[cfg(test)]
mod tests {
    use super::*;
    use faderkit_core::{Bounds, Point};

    fn marker(control: &FilterControl, hz: f32) -> Point {
        control.handle_for(FilterPoint {
            cutoff_hz: hz,
            resonance: 0.5,
        })
    }

    #[test]
    fn decade_markers_are_log_spaced() {
        let control = FilterControl::new(Bounds::from_size(300.0, 100.0))
            .cutoff_range(10.0, 10_000.0);
        let xs: Vec<f32> = GRID_HZ.iter().map(|&hz| marker(&control, hz).x).collect();
        assert!((xs[0] - 100.0).abs() < 0.1);
        assert!((xs[1] - 200.0).abs() < 0.1);
        assert!((xs[2] - 300.0).abs() < 0.1);
    }
}
