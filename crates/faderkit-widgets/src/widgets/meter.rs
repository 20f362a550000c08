//! Level meter for visualizing signal amplitude next to the controls.

use egui::{Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};

use super::impl_widget;
use crate::interact::ControlResponse;
use crate::paint::caption;
use crate::theme::Theme;

/// VU-style level meter with peak line and clip indicator.
///
/// Display only: it never proposes a value.
pub struct LevelMeter {
    peak: f32,
    rms: f32,
    label: String,
    width: f32,
    height: f32,
    horizontal: bool,
}

impl LevelMeter {
    /// Create a new level meter. Levels are linear, 1.0 = full scale.
    pub fn new(peak: f32, rms: f32) -> Self {
        Self {
            peak: peak.clamp(0.0, 1.5),
            rms: rms.clamp(0.0, 1.5),
            label: String::new(),
            width: 24.0,
            height: 120.0,
            horizontal: false,
        }
    }

    /// Set the label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set dimensions.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Make horizontal instead of vertical.
    pub fn horizontal(mut self) -> Self {
        self.horizontal = true;
        self
    }

    /// Draw the meter.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<()> {
        let extra_height = if self.label.is_empty() { 0.0 } else { 18.0 };
        let meter_size = if self.horizontal {
            vec2(self.height, self.width)
        } else {
            vec2(self.width, self.height)
        };
        let (rect, response) =
            ui.allocate_exact_size(meter_size + vec2(0.0, extra_height), Sense::hover());

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let meter_rect = Rect::from_min_size(rect.min, meter_size);

            painter.rect_filled(meter_rect, 2.0, theme.background);
            painter.rect_stroke(meter_rect, 2.0, Stroke::new(1.0, theme.track), StrokeKind::Inside);

            let inner = meter_rect.shrink(2.0);
            let peak_stroke = Stroke::new(2.0, theme.text_primary);

            if self.horizontal {
                let rms_width = (self.rms.min(1.0) * inner.width()).max(0.0);
                if rms_width > 0.0 {
                    let rms_rect = Rect::from_min_size(inner.min, vec2(rms_width, inner.height()));
                    painter.rect_filled(rms_rect, 1.0, theme.meter_color(self.rms));
                }

                if self.peak > 0.01 {
                    let peak_x = inner.left() + self.peak.min(1.0) * inner.width();
                    painter.line_segment(
                        [pos2(peak_x, inner.top()), pos2(peak_x, inner.bottom())],
                        peak_stroke,
                    );
                }

                if self.peak > 1.0 {
                    let clip_rect = Rect::from_min_size(
                        pos2(inner.right() - 4.0, inner.top()),
                        vec2(4.0, inner.height()),
                    );
                    painter.rect_filled(clip_rect, 0.0, theme.meter_red);
                }
            } else {
                // Segmented bar growing from the bottom
                let rms_height = (self.rms.min(1.0) * inner.height()).max(0.0);
                if rms_height > 0.0 {
                    let top = inner.bottom() - rms_height;
                    let segment_height = 3.0;
                    let gap = 1.0;
                    let mut y = inner.bottom();
                    while y > top {
                        let seg_top = (y - segment_height).max(top);
                        let level = 1.0 - (seg_top - inner.top()) / inner.height();
                        painter.rect_filled(
                            Rect::from_min_max(pos2(inner.left(), seg_top), pos2(inner.right(), y)),
                            0.0,
                            theme.meter_color(level),
                        );
                        y -= segment_height + gap;
                    }
                }

                if self.peak > 0.01 {
                    let peak_y = inner.bottom() - self.peak.min(1.0) * inner.height();
                    painter.line_segment(
                        [pos2(inner.left(), peak_y), pos2(inner.right(), peak_y)],
                        peak_stroke,
                    );
                }

                if self.peak > 1.0 {
                    let clip_rect = Rect::from_min_size(inner.min, vec2(inner.width(), 4.0));
                    painter.rect_filled(clip_rect, 0.0, theme.meter_red);
                }
            }

            if !self.label.is_empty() {
                let label_pos = pos2(rect.center().x, meter_rect.bottom() + 4.0);
                caption(painter, label_pos, &self.label, 11.0, theme.text_secondary);
            }
        }

        ControlResponse::idle(response)
    }
}

impl_widget!(LevelMeter);
