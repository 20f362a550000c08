//! 2D geometry shared by every control.
//!
//! Coordinates follow screen convention: `x` grows to the right, `y` grows
//! downward, and angles are measured in radians from the positive x axis,
//! increasing clockwise on screen.

use crate::scale::{clamp_unit, safe_div};
use core::f32::consts::{PI, TAU};

/// A point in widget-local coordinates (pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position (down is positive).
    pub y: f32,
}

impl Point {
    /// Construct a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f32 {
        libm::hypotf(self.x - other.x, self.y - other.y)
    }

    /// Component-wise difference `self - origin`.
    pub fn delta_from(self, origin: Point) -> (f32, f32) {
        (self.x - origin.x, self.y - origin.y)
    }

    /// Angle of this point around `center`, in (-π, π].
    pub fn angle_around(self, center: Point) -> f32 {
        libm::atan2f(self.y - center.y, self.x - center.x)
    }
}

/// An axis-aligned rectangle in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width (never negative).
    pub width: f32,
    /// Height (never negative).
    pub height: f32,
}

impl Bounds {
    /// Rectangle from origin and size. Negative sizes are treated as zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Rectangle at the origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns `true` if `p` lies inside (inclusive).
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink by `margin` on every side, never below zero size.
    pub fn inset(&self, margin: f32) -> Self {
        Self::new(
            self.x + margin,
            self.y + margin,
            self.width - 2.0 * margin,
            self.height - 2.0 * margin,
        )
    }

    /// Horizontal position as a fraction of the width, clamped to \[0, 1\].
    ///
    /// A zero-width rectangle yields the neutral `0.5`.
    pub fn fraction_x(&self, p: Point) -> f32 {
        clamp_unit(safe_div(p.x - self.x, self.width, 0.5))
    }

    /// Vertical position as a fraction of the height measured from the
    /// bottom edge (bottom = 0, top = 1), clamped to \[0, 1\].
    ///
    /// A zero-height rectangle yields the neutral `0.5`.
    pub fn fraction_y_up(&self, p: Point) -> f32 {
        clamp_unit(safe_div(self.bottom() - p.y, self.height, 0.5))
    }

    /// Point at fractional coordinates (y measured from the bottom).
    pub fn point_at(&self, fx: f32, fy_up: f32) -> Point {
        Point::new(
            self.x + clamp_unit(fx) * self.width,
            self.bottom() - clamp_unit(fy_up) * self.height,
        )
    }

    /// Split horizontally into `count` equal columns and return the index
    /// of the column containing `x`, or `None` when outside or `count == 0`.
    pub fn column_at(&self, x: f32, count: usize) -> Option<usize> {
        if count == 0 || self.width <= 0.0 || x < self.x || x > self.right() {
            return None;
        }
        let idx = ((x - self.x) / self.width * count as f32) as usize;
        Some(idx.min(count - 1))
    }

    /// Split vertically into `count` equal rows and return the index of the
    /// row containing `y`, or `None` when outside or `count == 0`.
    pub fn row_at(&self, y: f32, count: usize) -> Option<usize> {
        if count == 0 || self.height <= 0.0 || y < self.y || y > self.bottom() {
            return None;
        }
        let idx = ((y - self.y) / self.height * count as f32) as usize;
        Some(idx.min(count - 1))
    }

    /// The `index`-th of `count` equal columns.
    pub fn column(&self, index: usize, count: usize) -> Bounds {
        let w = safe_div(self.width, count as f32, 0.0);
        Bounds::new(self.x + w * index as f32, self.y, w, self.height)
    }

    /// The `index`-th of `count` equal rows.
    pub fn row(&self, index: usize, count: usize) -> Bounds {
        let h = safe_div(self.height, count as f32, 0.0);
        Bounds::new(self.x, self.y + h * index as f32, self.width, h)
    }
}

/// A circular arc used by rotary controls.
///
/// `start` is the angle of the minimum value; `sweep` is the clockwise
/// angular extent of the value range. The classic synth knob is
/// [`Arc::KNOB`]: 270° starting at bottom-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arc {
    /// Angle of the minimum value (radians).
    pub start: f32,
    /// Clockwise extent (radians), in (0, 2π].
    pub sweep: f32,
}

impl Arc {
    /// 270° knob arc from bottom-left (135°) to bottom-right (405°).
    pub const KNOB: Arc = Arc {
        start: PI * 0.75,
        sweep: PI * 1.5,
    };

    /// A full circle starting at 12 o'clock.
    pub const FULL: Arc = Arc {
        start: -PI * 0.5,
        sweep: TAU,
    };

    /// Angle for a normalized value.
    pub fn angle_at(&self, normalized: f32) -> f32 {
        self.start + clamp_unit(normalized) * self.sweep
    }

    /// Point on a circle of `radius` around `center` for a normalized value.
    pub fn point_at(&self, center: Point, radius: f32, normalized: f32) -> Point {
        let a = self.angle_at(normalized);
        Point::new(
            center.x + libm::cosf(a) * radius,
            center.y + libm::sinf(a) * radius,
        )
    }

    /// Normalized value for an absolute angle.
    ///
    /// Angles that fall in the gap of a partial arc snap to the nearer end.
    /// A degenerate (zero) sweep yields `0.0`.
    pub fn value_at_angle(&self, angle: f32) -> f32 {
        if self.sweep <= 0.0 {
            return 0.0;
        }
        let rel = wrap_angle(angle - self.start);
        if self.sweep >= TAU {
            return clamp_unit(rel / TAU);
        }
        if rel <= self.sweep {
            return clamp_unit(rel / self.sweep);
        }
        let gap_mid = self.sweep + (TAU - self.sweep) * 0.5;
        if rel < gap_mid { 1.0 } else { 0.0 }
    }

    /// Normalized value for a pointer position around `center`.
    pub fn value_at_point(&self, center: Point, p: Point) -> f32 {
        self.value_at_angle(p.angle_around(center))
    }
}

/// Wrap an angle into \[0, 2π).
pub fn wrap_angle(angle: f32) -> f32 {
    let a = libm::fmodf(angle, TAU);
    if a < 0.0 { a + TAU } else { a }
}
