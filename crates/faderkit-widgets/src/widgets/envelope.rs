//! ADSR envelope editor with four draggable handles.

use egui::{Color32, Rect, Sense, Shape, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{
    Adsr, AdsrLimits, Control, EnvelopeControl, EnvelopeHandle, Feel, ListenerSet, ParamUnit, Point,
};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{local_bounds, polyline, to_screen};
use crate::theme::Theme;

/// Room around the graph so edge handles stay visible.
const MARGIN: f32 = 8.0;

/// Envelope graph: attack peak, decay/sustain corner, sustain end and
/// release end are draggable.
///
/// Each of the four time zones spans a quarter of the width; a handle at
/// the right edge of its zone is that stage's configured maximum.
pub struct EnvelopeEditor<'a> {
    value: Adsr,
    limits: AdsrLimits,
    default: Adsr,
    width: f32,
    height: f32,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<Adsr>>,
}

impl<'a> EnvelopeEditor<'a> {
    /// Editor showing `value`.
    pub fn new(value: Adsr) -> Self {
        Self {
            value,
            limits: AdsrLimits::default(),
            default: Adsr::default(),
            width: 260.0,
            height: 120.0,
            feel: None,
            listeners: None,
        }
    }

    /// Longest attack, decay and release.
    pub fn limits(mut self, limits: AdsrLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Double-click reset value.
    pub fn default(mut self, default: Adsr) -> Self {
        self.default = default;
        self
    }

    /// Graph size in pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width.max(4.0 * MARGIN);
        self.height = height.max(4.0 * MARGIN);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<Adsr>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the editor and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<Adsr> {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.width, self.height + 18.0), Sense::click_and_drag());
        let graph = Rect::from_min_size(rect.min, vec2(self.width, self.height));

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = EnvelopeControl::new(local_bounds(graph).inset(MARGIN), self.limits)
            .default(self.default)
            .feel(feel);
        let current = self.limits.clamp(self.value);
        let update = drive_control(ui, &response, rect.min, &mut control, &current, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.unwrap_or(current);
            let layout = control.layout();
            let origin = rect.min;

            painter.rect_filled(graph, theme.radius(), theme.background);
            painter.rect_stroke(
                graph,
                theme.radius(),
                Stroke::new(1.0, theme.track),
                StrokeKind::Inside,
            );

            // Zone dividers
            let inner = layout.bounds;
            for i in 1..4 {
                let x = inner.x + layout.zone_width() * i as f32;
                let top = to_screen(origin, Point::new(x, inner.y));
                let bottom = to_screen(origin, Point::new(x, inner.bottom()));
                painter.line_segment(
                    [top, bottom],
                    Stroke::new(1.0, theme.track.gamma_multiply(0.6)),
                );
            }

            // Area under the curve, one convex strip per segment
            let outline = layout.outline(&shown);
            let base_y = origin.y + inner.bottom();
            let area = theme.accent.gamma_multiply(0.15);
            for pair in outline.windows(2) {
                let a = to_screen(origin, pair[0]);
                let b = to_screen(origin, pair[1]);
                if (b.x - a.x).abs() < 0.5 {
                    continue;
                }
                painter.add(Shape::convex_polygon(
                    vec![a, b, pos2(b.x, base_y), pos2(a.x, base_y)],
                    area,
                    Stroke::NONE,
                ));
            }
            polyline(painter, origin, &outline, Stroke::new(theme.stroke_width, theme.accent));

            let active = control.active_target();
            for (handle, p) in EnvelopeHandle::ALL.into_iter().zip(layout.handles(&shown)) {
                let p = to_screen(origin, p);
                let (radius, fill) = if active == Some(handle) {
                    (6.0, theme.value_color(true))
                } else {
                    (4.5, theme.text_primary)
                };
                painter.circle_filled(p, radius, fill);
                painter.circle_stroke(
                    p,
                    radius,
                    Stroke::new(1.0, Color32::BLACK.gamma_multiply(0.5)),
                );
            }

            let ms = ParamUnit::Milliseconds;
            painter.text(
                pos2(graph.left(), graph.bottom() + 3.0),
                egui::Align2::LEFT_TOP,
                format!(
                    "A {}  D {}  S {}  R {}",
                    ms.format(shown.attack_ms),
                    ms.format(shown.decay_ms),
                    ParamUnit::Percent.format(shown.sustain),
                    ms.format(shown.release_ms),
                ),
                egui::FontId::proportional(11.0),
                theme.text_secondary,
            );
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(EnvelopeEditor<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_keeps_room_for_margins() {
        let editor = EnvelopeEditor::new(Adsr::default()).size(1.0, 1.0);
        assert_eq!((editor.width, editor.height), (32.0, 32.0));
    }
}
