//! Waveform selector with a pulse-width slider.

use egui::{Pos2, Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{
    Bounds, Control, FaderControl, Feel, ListenerSet, Orientation, ParamRange, PulseWidthBounds,
    Update, WaveSelection, WaveShape,
};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::{caption, screen_rect, to_local, to_screen};
use crate::theme::Theme;

const BUTTON_HEIGHT: f32 = 28.0;
const PREVIEW_HEIGHT: f32 = 60.0;
const SLIDER_HEIGHT: f32 = 16.0;
const GAP: f32 = 6.0;

/// Shape buttons, a one-cycle preview and a pulse-width slider.
///
/// Clicking a button proposes that shape; dragging the slider proposes a
/// pulse width inside the configured bounds. The slider is dimmed unless
/// the pulse shape is selected.
pub struct WaveSelector<'a> {
    value: WaveSelection,
    bounds: PulseWidthBounds,
    width: f32,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<WaveSelection>>,
}

impl<'a> WaveSelector<'a> {
    /// Selector showing `value`.
    pub fn new(value: WaveSelection) -> Self {
        Self {
            value,
            bounds: PulseWidthBounds::default(),
            width: 240.0,
            feel: None,
            listeners: None,
        }
    }

    /// Limits for the pulse width.
    pub fn pulse_width_bounds(mut self, bounds: PulseWidthBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Width in pixels.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width.max(80.0);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<WaveSelection>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    fn button(&self, index: usize) -> Bounds {
        Bounds::new(0.0, 0.0, self.width, BUTTON_HEIGHT).column(index, WaveShape::ALL.len())
    }

    fn preview_area(&self) -> Bounds {
        Bounds::new(0.0, BUTTON_HEIGHT + GAP, self.width, PREVIEW_HEIGHT)
    }

    fn slider_track(&self) -> Bounds {
        let top = BUTTON_HEIGHT + PREVIEW_HEIGHT + 2.0 * GAP;
        Bounds::new(8.0, top, self.width - 16.0, SLIDER_HEIGHT)
    }

    fn shape_at(&self, origin: Pos2, pos: Pos2) -> Option<WaveShape> {
        let local = to_local(origin, pos);
        (0..WaveShape::ALL.len())
            .find(|&i| self.button(i).contains(local))
            .map(WaveShape::from_index)
    }

    /// Draw the selector and run its interaction.
    pub fn show(mut self, ui: &mut Ui) -> ControlResponse<WaveSelection> {
        let track = self.slider_track();
        let size = vec2(self.width, track.bottom() + 16.0);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let bounds = self.bounds;
        let mut slider = FaderControl::new(ParamRange::new(bounds.min, bounds.max), track)
            .orientation(Orientation::Horizontal)
            .default(bounds.clamp(0.5))
            .feel(feel);
        let current = WaveSelection {
            pulse_width: bounds.clamp(self.value.pulse_width),
            ..self.value
        };
        let pulse_width = current.pulse_width;
        let mut update = drive_control(ui, &response, rect.min, &mut slider, &pulse_width, None)
            .map(|pulse_width| WaveSelection {
                pulse_width: bounds.clamp(pulse_width),
                ..current
            });

        if !slider.is_dragging()
            && response.clicked()
            && let Some(pos) = response.interact_pointer_pos()
            && let Some(shape) = self.shape_at(rect.min, pos)
            && shape != current.shape
        {
            tracing::debug!(shape = shape.label(), "wave shape selected");
            update = Update::one_shot(WaveSelection { shape, ..current });
        }
        if let Some(listeners) = self.listeners.take() {
            listeners.dispatch(&update);
        }

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.unwrap_or(current);
            let origin = rect.min;

            for (i, shape) in WaveShape::ALL.into_iter().enumerate() {
                let button = screen_rect(origin, self.button(i)).shrink(2.0);
                let selected = shape == shown.shape;
                let fill = if selected { theme.accent_dim } else { theme.surface };
                painter.rect_filled(button, theme.radius(), fill);
                let glyph = WaveSelection { shape, pulse_width: 0.5 }.preview(24);
                paint_cycle(
                    painter,
                    button.shrink2(vec2(10.0, 8.0)),
                    &glyph,
                    Stroke::new(1.5, theme.text_primary),
                );
            }

            let preview = screen_rect(origin, self.preview_area());
            painter.rect_filled(preview, theme.radius(), theme.background);
            painter.rect_stroke(
                preview,
                theme.radius(),
                Stroke::new(1.0, theme.track),
                StrokeKind::Inside,
            );
            let cycle = shown.preview(preview.width() as usize);
            paint_cycle(
                painter,
                preview.shrink(6.0),
                &cycle,
                Stroke::new(theme.stroke_width, theme.accent),
            );

            let pulse = shown.shape == WaveShape::Pulse;
            let groove = screen_rect(origin, track);
            let color = if pulse { theme.value_color(slider.is_dragging()) } else { theme.track };
            let mid = groove.center().y;
            painter.line_segment(
                [pos2(groove.left(), mid), pos2(groove.right(), mid)],
                Stroke::new(4.0, theme.track),
            );
            let thumb = to_screen(origin, slider.thumb_at(shown.pulse_width));
            painter.rect_filled(
                Rect::from_center_size(thumb, vec2(8.0, SLIDER_HEIGHT)),
                2.0,
                color,
            );

            caption(
                painter,
                pos2(rect.center().x, groove.bottom() + 2.0),
                format!("{}  PW {:.0}%", shown.shape.label(), shown.pulse_width * 100.0),
                11.0,
                if pulse { theme.text_primary } else { theme.text_secondary },
            );
        }

        ControlResponse::new(response, update)
    }
}

/// One cycle of samples in -1..1 stretched across `area`.
fn paint_cycle(painter: &egui::Painter, area: Rect, samples: &[f32], stroke: Stroke) {
    if samples.len() < 2 {
        return;
    }
    let step = area.width() / (samples.len() - 1) as f32;
    let points: Vec<Pos2> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| {
            pos2(area.left() + i as f32 * step, area.center().y - s * area.height() * 0.5)
        })
        .collect();
    painter.add(egui::Shape::line(points, stroke));
}

impl_widget!(WaveSelector<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_split_the_top_row() {
        let selector = WaveSelector::new(WaveSelection::default()).width(200.0);
        assert_eq!(selector.button(0), Bounds::new(0.0, 0.0, 50.0, BUTTON_HEIGHT));
        assert_eq!(
            selector.shape_at(pos2(10.0, 10.0), pos2(170.0, 20.0)),
            Some(WaveShape::Pulse)
        );
        assert_eq!(selector.shape_at(pos2(0.0, 0.0), pos2(50.0, 80.0)), None);
    }

    #[test]
    fn slider_sits_below_preview() {
        let selector = WaveSelector::new(WaveSelection::default());
        assert!(selector.slider_track().y > selector.preview_area().bottom());
    }
}
