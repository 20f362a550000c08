//! Proportional segment bar.

use egui::{Rect, Sense, Stroke, Ui, pos2, vec2};
use faderkit_core::{Control, Feel, ListenerSet, SegmentControl, SegmentWeights};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{caption, local_bounds};
use crate::theme::Theme;

/// A bar split into weighted segments that always fill it.
///
/// Drag a divider to trade weight between its two neighbours; double-click
/// to make every segment equal.
pub struct SegmentBar<'a> {
    weights: &'a SegmentWeights,
    labels: &'a [&'a str],
    width: f32,
    height: f32,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<SegmentWeights>>,
}

impl<'a> SegmentBar<'a> {
    /// Bar showing `weights`.
    pub fn new(weights: &'a SegmentWeights) -> Self {
        Self {
            weights,
            labels: &[],
            width: 260.0,
            height: 30.0,
            feel: None,
            listeners: None,
        }
    }

    /// Segment labels, left to right.
    pub fn labels(mut self, labels: &'a [&'a str]) -> Self {
        self.labels = labels;
        self
    }

    /// Bar size in pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width.max(16.0);
        self.height = height.max(8.0);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<SegmentWeights>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the bar and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<SegmentWeights> {
        let (rect, response) =
            ui.allocate_exact_size(vec2(self.width, self.height), Sense::click_and_drag());

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = SegmentControl::new(local_bounds(rect)).feel(feel);
        let update =
            drive_control(ui, &response, rect.min, &mut control, self.weights, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.as_ref().unwrap_or(self.weights);
            let dividers = control.divider_xs(shown);

            let mut left = rect.left();
            for (i, weight) in shown.weights().iter().enumerate() {
                let right = dividers.get(i).map_or(rect.right(), |x| rect.left() + x);
                let segment = Rect::from_x_y_ranges(left..=right, rect.y_range());
                let fill = if i % 2 == 0 { theme.accent_dim } else { theme.surface };
                painter.rect_filled(segment, theme.radius(), fill);

                let text = match self.labels.get(i) {
                    Some(label) => format!("{label} {:.0}%", weight * 100.0),
                    None => format!("{:.0}%", weight * 100.0),
                };
                if segment.width() > 28.0 {
                    caption(
                        painter,
                        pos2(segment.center().x, segment.center().y - 6.0),
                        text,
                        11.0,
                        theme.text_primary,
                    );
                }
                left = right;
            }

            let active = control.active_target();
            for (i, x) in dividers.iter().enumerate() {
                let x = rect.left() + x;
                let color = if active == Some(i) {
                    theme.value_color(true)
                } else {
                    theme.text_secondary
                };
                painter.line_segment(
                    [pos2(x, rect.top()), pos2(x, rect.bottom())],
                    Stroke::new(2.0, color),
                );
            }
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(SegmentBar<'_>);
