//! One-row step sequencer.

use egui::{Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{Control, Feel, ListenerSet, SequencerControl, StepPattern};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{local_bounds, screen_rect};
use crate::theme::Theme;

/// Step grid over a [`StepPattern`].
///
/// Click an off step to turn it on and sweep to paint more; drag an on step
/// vertically for velocity or click it to turn it off. Alt-drag edits
/// probability; right-click (or command-click) toggles accent; double-click
/// resets a step.
pub struct StepSequencer<'a> {
    pattern: &'a StepPattern,
    playhead: Option<usize>,
    step_width: f32,
    height: f32,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<StepPattern>>,
}

impl<'a> StepSequencer<'a> {
    /// Grid showing `pattern`.
    pub fn new(pattern: &'a StepPattern) -> Self {
        Self {
            pattern,
            playhead: None,
            step_width: 22.0,
            height: 72.0,
            feel: None,
            listeners: None,
        }
    }

    /// Highlight the step currently playing.
    pub fn playhead(mut self, step: Option<usize>) -> Self {
        self.playhead = step;
        self
    }

    /// Step width and grid height in pixels.
    pub fn size(mut self, step_width: f32, height: f32) -> Self {
        self.step_width = step_width.max(6.0);
        self.height = height.max(16.0);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<StepPattern>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the grid and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<StepPattern> {
        let len = self.pattern.len();
        let size = vec2(self.step_width * len as f32, self.height);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = SequencerControl::new(local_bounds(rect)).feel(feel);
        let update =
            drive_control(ui, &response, rect.min, &mut control, self.pattern, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.as_ref().unwrap_or(self.pattern);

            for (i, step) in shown.steps().iter().enumerate() {
                let cell = screen_rect(rect.min, control.cell(i, len)).shrink2(vec2(1.5, 0.0));
                // Beats of four alternate shade
                let bg = if (i / 4) % 2 == 0 { theme.surface } else { theme.panel_bg };
                painter.rect_filled(cell, theme.radius(), bg);

                if step.active {
                    let color = if step.accent { theme.negative } else { theme.accent };
                    let bar = Rect::from_min_max(
                        pos2(cell.left(), cell.bottom() - cell.height() * step.velocity),
                        cell.max,
                    );
                    painter.rect_filled(
                        bar,
                        theme.radius(),
                        color.gamma_multiply(0.4 + 0.6 * step.probability),
                    );

                    // Probability tick along the top
                    let tick =
                        Rect::from_min_size(cell.min, vec2(cell.width() * step.probability, 3.0));
                    painter.rect_filled(tick, 0.0, theme.text_secondary);
                }

                if self.playhead == Some(i) {
                    painter.rect_stroke(
                        cell,
                        theme.radius(),
                        Stroke::new(2.0, theme.text_primary),
                        StrokeKind::Inside,
                    );
                }
            }
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(StepSequencer<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_have_floors() {
        let pattern = StepPattern::new(8);
        let seq = StepSequencer::new(&pattern).size(1.0, 1.0).playhead(Some(3));
        assert_eq!((seq.step_width, seq.height), (6.0, 16.0));
        assert_eq!(seq.playhead, Some(3));
    }
}
