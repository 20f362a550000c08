//! Drawing helpers shared by the widgets.
//!
//! Controllers work in widget-local [`Point`]s (origin at the widget's
//! top-left); these helpers place them on screen.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, pos2, vec2};
use faderkit_core::{Arc, Bounds, Point};

/// Local bounds covering `rect`.
pub(crate) fn local_bounds(rect: Rect) -> Bounds {
    Bounds::from_size(rect.width(), rect.height())
}

/// Screen position of a local point.
pub(crate) fn to_screen(origin: Pos2, p: Point) -> Pos2 {
    pos2(origin.x + p.x, origin.y + p.y)
}

/// Local point of a screen position.
pub(crate) fn to_local(origin: Pos2, p: Pos2) -> Point {
    Point::new(p.x - origin.x, p.y - origin.y)
}

/// Screen rectangle of local bounds.
pub(crate) fn screen_rect(origin: Pos2, b: Bounds) -> Rect {
    Rect::from_min_size(pos2(origin.x + b.x, origin.y + b.y), vec2(b.width, b.height))
}

/// Stroke an arc of `radius` around the screen point `center`, between two
/// normalized positions along `arc`.
pub(crate) fn draw_arc(
    painter: &Painter,
    center: Pos2,
    radius: f32,
    arc: Arc,
    from: f32,
    to: f32,
    stroke: Stroke,
) {
    let segments = 32;
    let points: Vec<Pos2> = (0..=segments)
        .map(|i| {
            let angle = arc.angle_at(from + (to - from) * i as f32 / segments as f32);
            pos2(center.x + angle.cos() * radius, center.y + angle.sin() * radius)
        })
        .collect();
    painter.add(Shape::line(points, stroke));
}

/// Stroke an open polyline of local points.
pub(crate) fn polyline(painter: &Painter, origin: Pos2, points: &[Point], stroke: Stroke) {
    if points.len() < 2 {
        return;
    }
    let points = points.iter().map(|&p| to_screen(origin, p)).collect();
    painter.add(Shape::line(points, stroke));
}

/// Centered caption text.
pub(crate) fn caption(
    painter: &Painter,
    pos: Pos2,
    text: impl ToString,
    size: f32,
    color: Color32,
) {
    painter.text(pos, Align2::CENTER_TOP, text, FontId::proportional(size), color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_and_local_are_inverse() {
        let origin = pos2(100.0, 50.0);
        let p = Point::new(3.0, 4.0);
        assert_eq!(to_screen(origin, p), pos2(103.0, 54.0));
        assert_eq!(to_local(origin, to_screen(origin, p)), p);
    }

    #[test]
    fn screen_rect_offsets_bounds() {
        let r = screen_rect(pos2(10.0, 20.0), Bounds::new(1.0, 2.0, 30.0, 40.0));
        assert_eq!(r.min, pos2(11.0, 22.0));
        assert_eq!(r.size(), vec2(30.0, 40.0));
        assert_eq!(local_bounds(r), Bounds::from_size(30.0, 40.0));
    }
}
