//! Oscilloscope display.

use egui::{Pos2, Sense, Shape, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{Animation, ListenerSet, ScopeBuffer, Update, decimate};

use super::impl_widget;
use crate::interact::ControlResponse;
use crate::paint::caption;
use crate::theme::Theme;

/// Draws a triggered window of a [`ScopeBuffer`].
///
/// The host owns the [`Animation`] and feeds the buffer. While the
/// animation runs the scope asks egui for another frame; a click proposes
/// toggling it (`true` = run).
pub struct Oscilloscope<'a> {
    buffer: &'a ScopeBuffer,
    animation: Option<&'a Animation>,
    window: usize,
    width: f32,
    height: f32,
    gain: f32,
    label: &'a str,
    listeners: Option<&'a mut ListenerSet<bool>>,
}

impl<'a> Oscilloscope<'a> {
    /// Scope over `buffer`.
    pub fn new(buffer: &'a ScopeBuffer) -> Self {
        Self {
            buffer,
            animation: None,
            window: 512,
            width: 260.0,
            height: 100.0,
            gain: 1.0,
            label: "",
            listeners: None,
        }
    }

    /// Frame clock that drives redraws.
    pub fn animation(mut self, animation: &'a Animation) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Samples shown per frame.
    pub fn window(mut self, window: usize) -> Self {
        self.window = window.max(2);
        self
    }

    /// Display size in pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width.max(16.0);
        self.height = height.max(16.0);
        self
    }

    /// Vertical gain applied to samples.
    pub fn gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Caption drawn in the corner.
    pub fn label(mut self, label: &'a str) -> Self {
        self.label = label;
        self
    }

    /// Report run/pause proposals to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<bool>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the trace and handle run/pause clicks.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<bool> {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.width, self.height), Sense::click());

        let running = self.animation.is_some_and(Animation::is_running);
        let update = if self.animation.is_some() && response.clicked() {
            tracing::debug!(running = !running, "scope toggled");
            Update::one_shot(!running)
        } else {
            Update::none()
        };
        if let Some(listeners) = self.listeners {
            listeners.dispatch(&update);
        }
        if running {
            ui.ctx().request_repaint();
        }

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            painter.rect_filled(rect, theme.radius(), theme.background);

            let grid = Stroke::new(1.0, theme.track);
            let mid = rect.center().y;
            painter.line_segment([pos2(rect.left(), mid), pos2(rect.right(), mid)], grid);
            for i in 1..4 {
                let x = rect.left() + rect.width() * i as f32 / 4.0;
                painter.line_segment([pos2(x, rect.top()), pos2(x, rect.bottom())], grid);
            }

            let samples = decimate(&self.buffer.snapshot(self.window), rect.width() as usize);
            if samples.len() >= 2 {
                let step = rect.width() / (samples.len() - 1) as f32;
                let half = rect.height() * 0.5 - 2.0;
                let points: Vec<Pos2> = samples
                    .iter()
                    .enumerate()
                    .map(|(i, s)| {
                        let y = (s * self.gain).clamp(-1.0, 1.0);
                        pos2(rect.left() + i as f32 * step, mid - y * half)
                    })
                    .collect();
                painter.add(Shape::line(points, Stroke::new(theme.stroke_width, theme.accent)));
            }

            painter.rect_stroke(rect, theme.radius(), grid, StrokeKind::Inside);
            if !self.label.is_empty() {
                caption(
                    painter,
                    pos2(rect.left() + 24.0, rect.top() + 3.0),
                    self.label,
                    11.0,
                    theme.text_secondary,
                );
            }
            if self.animation.is_some() && !running {
                caption(
                    painter,
                    pos2(rect.right() - 28.0, rect.top() + 3.0),
                    "PAUSED",
                    10.0,
                    theme.text_secondary,
                );
            }
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(Oscilloscope<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_has_a_floor() {
        let buffer = ScopeBuffer::new(64);
        let scope = Oscilloscope::new(&buffer).window(0);
        assert_eq!(scope.window, 2);
    }
}
