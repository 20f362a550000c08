//! On/off toggle.

use egui::{Align2, FontId, Sense, Stroke, Ui, pos2, vec2};
use faderkit_core::{ListenerSet, Update};

use super::impl_widget;
use crate::interact::ControlResponse;
use crate::theme::Theme;

/// A round indicator and label. A click proposes the opposite state.
pub struct Toggle<'a> {
    on: bool,
    label: &'a str,
    size: f32,
    listeners: Option<&'a mut ListenerSet<bool>>,
}

impl<'a> Toggle<'a> {
    /// Create a toggle showing `on`.
    pub fn new(on: bool, label: &'a str) -> Self {
        Self {
            on,
            label,
            size: 20.0,
            listeners: None,
        }
    }

    /// Set the indicator size.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size.max(8.0);
        self
    }

    /// Report flips to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<bool>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the toggle and handle clicks.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<bool> {
        let font = FontId::proportional(12.0);
        let text_width = ui.fonts(|f| f.glyph_width(&font, 'M') * self.label.len() as f32);
        let size = vec2((self.size + 8.0 + text_width).max(60.0), self.size + 4.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        let update = if response.clicked() {
            Update::one_shot(!self.on)
        } else {
            Update::none()
        };
        if let Some(listeners) = self.listeners {
            listeners.dispatch(&update);
        }
        let shown = update.value.unwrap_or(self.on);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();

            let center = pos2(rect.left() + self.size / 2.0 + 2.0, rect.center().y);
            let radius = self.size / 2.0 - 2.0;

            painter.circle_stroke(center, radius, Stroke::new(2.0, theme.track));
            if shown {
                painter.circle_filled(center, radius - 3.0, theme.accent);
            }
            if response.hovered() {
                painter.circle_stroke(
                    center,
                    radius + 2.0,
                    Stroke::new(1.0, theme.accent.gamma_multiply(0.5)),
                );
            }

            let text_color = if shown { theme.text_primary } else { theme.text_secondary };
            painter.text(
                pos2(rect.left() + self.size + 8.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                font,
                text_color,
            );
        }

        ControlResponse::new(response, update)
    }
}

impl_widget!(Toggle<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_has_a_floor() {
        assert_eq!(Toggle::new(true, "On").size(2.0).size, 8.0);
    }
}
