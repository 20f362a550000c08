//! Modulation matrix grid.

use egui::{Align2, FontId, Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2};
use faderkit_core::{
    Bounds, Control, DestinationId, Feel, ListenerSet, MatrixCell, MatrixControl, ModMatrix,
    SourceId,
};

use super::impl_widget;
use crate::interact::{ControlResponse, current_feel, drive_control};
use crate::paint::screen_rect;
use crate::theme::Theme;

const LABEL_WIDTH: f32 = 56.0;
const HEADER_HEIGHT: f32 = 18.0;

/// Sources down the left, destinations across the top.
///
/// Drag a cell vertically for its amount, double-click to remove the route,
/// alt-click or right-click to bypass it.
pub struct ModMatrixGrid<'a> {
    matrix: &'a ModMatrix,
    sources: &'a [&'a str],
    destinations: &'a [&'a str],
    cell: f32,
    feel: Option<Feel>,
    listeners: Option<&'a mut ListenerSet<ModMatrix>>,
}

impl<'a> ModMatrixGrid<'a> {
    /// Grid showing `matrix`. Source and destination ids are indices into
    /// the label slices.
    pub fn new(matrix: &'a ModMatrix, sources: &'a [&'a str], destinations: &'a [&'a str]) -> Self {
        Self {
            matrix,
            sources,
            destinations,
            cell: 30.0,
            feel: None,
            listeners: None,
        }
    }

    /// Cell side length in pixels.
    pub fn cell_size(mut self, cell: f32) -> Self {
        self.cell = cell.max(12.0);
        self
    }

    /// Override the context's interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = Some(feel);
        self
    }

    /// Report the gesture to `listeners`.
    pub fn listeners(mut self, listeners: &'a mut ListenerSet<ModMatrix>) -> Self {
        self.listeners = Some(listeners);
        self
    }

    /// Draw the grid and run its interaction.
    pub fn show(self, ui: &mut Ui) -> ControlResponse<ModMatrix> {
        let rows = self.sources.len();
        let cols = self.destinations.len();
        let grid = Bounds::new(
            LABEL_WIDTH,
            HEADER_HEIGHT,
            cols as f32 * self.cell,
            rows as f32 * self.cell,
        );
        let size = vec2(grid.right(), grid.bottom());
        let (rect, response) = ui.allocate_exact_size(size, Sense::click_and_drag());

        let feel = self.feel.unwrap_or_else(|| current_feel(ui.ctx()));
        let mut control = MatrixControl::new(grid, rows, cols).feel(feel);
        let update =
            drive_control(ui, &response, rect.min, &mut control, self.matrix, self.listeners);

        if ui.is_rect_visible(rect) {
            let theme = Theme::current(ui.ctx());
            let painter = ui.painter();
            let shown = update.value.as_ref().unwrap_or(self.matrix);
            let active = control.active_target();
            let font = FontId::proportional(11.0);

            for (col, name) in self.destinations.iter().enumerate() {
                let x = rect.left() + LABEL_WIDTH + (col as f32 + 0.5) * self.cell;
                painter.text(
                    pos2(x, rect.top() + 2.0),
                    Align2::CENTER_TOP,
                    name,
                    font.clone(),
                    theme.text_secondary,
                );
            }

            for (row, name) in self.sources.iter().enumerate() {
                let y = rect.top() + HEADER_HEIGHT + (row as f32 + 0.5) * self.cell;
                painter.text(
                    pos2(rect.left() + 2.0, y),
                    Align2::LEFT_CENTER,
                    name,
                    font.clone(),
                    theme.text_secondary,
                );

                for col in 0..cols {
                    let (Ok(s), Ok(d)) = (u16::try_from(row), u16::try_from(col)) else {
                        continue;
                    };
                    let cell = MatrixCell {
                        source: SourceId(s),
                        destination: DestinationId(d),
                    };
                    let r = screen_rect(rect.min, control.cell_bounds(cell)).shrink(1.5);
                    painter.rect_filled(r, theme.radius(), theme.surface);
                    paint_route(painter, &theme, r, shown, cell);
                    if active == Some(cell) {
                        painter.rect_stroke(
                            r,
                            theme.radius(),
                            Stroke::new(1.5, theme.text_primary),
                            StrokeKind::Inside,
                        );
                    }
                }
            }
        }

        ControlResponse::new(response, update)
    }
}

/// Amount bar from the cell's vertical center: up for positive, down for
/// negative. Bypassed routes are dimmed.
fn paint_route(
    painter: &egui::Painter,
    theme: &Theme,
    r: Rect,
    matrix: &ModMatrix,
    cell: MatrixCell,
) {
    let Some(route) = matrix.get(cell.source, cell.destination) else {
        return;
    };
    let mid = r.center().y;
    let end = mid - route.amount * r.height() * 0.5;
    let bar = Rect::from_x_y_ranges(r.left() + 4.0..=r.right() - 4.0, mid.min(end)..=mid.max(end));
    let color = theme.amount_color(route.amount);
    let color = if route.enabled { color } else { color.gamma_multiply(0.3) };
    painter.rect_filled(bar, 1.0, color);
    painter.line_segment(
        [pos2(r.left() + 2.0, mid), pos2(r.right() - 2.0, mid)],
        Stroke::new(1.0, theme.track),
    );
}

impl_widget!(ModMatrixGrid<'_>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_size_has_a_floor() {
        let matrix = ModMatrix::new();
        let grid = ModMatrixGrid::new(&matrix, &["LFO"], &["Cut"]).cell_size(2.0);
        assert_eq!(grid.cell, 12.0);
    }
}
