//! Rotary controls: knobs and nested circular sliders.
//!
//! A knob is dragged vertically (up = increase) in normalized space, so a
//! logarithmic time knob changes by the same *ratio* for the same pixel
//! delta wherever it starts. A [`RingControl`] instead maps the pointer angle
//! directly onto one of several concentric rings.

use crate::geometry::{Arc, Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, SpringReturn, Update};
use crate::scale::{ParamRange, clamp_unit};
use alloc::vec::Vec;
use core::f32::consts::TAU;

/// How pointer motion turns a knob.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum KnobDrag {
    /// Vertical relative drag, `Feel::sensitivity` per pixel.
    #[default]
    Vertical,
    /// The pointer angle around the knob center sets the value.
    Circular,
}

/// Controller for a rotary knob.
#[derive(Debug, Clone)]
pub struct KnobControl {
    range: ParamRange,
    default: f32,
    bounds: Bounds,
    arc: Arc,
    drag: KnobDrag,
    spring: SpringReturn,
    feel: Feel,
    state: GestureState<(), f32>,
}

impl KnobControl {
    /// Knob occupying `bounds` and editing a value in `range`.
    pub fn new(range: ParamRange, bounds: Bounds) -> Self {
        Self {
            range,
            default: range.center(),
            bounds,
            arc: Arc::KNOB,
            drag: KnobDrag::Vertical,
            spring: SpringReturn::None,
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Set the double-tap reset value.
    pub fn default(mut self, default: f32) -> Self {
        self.default = self.range.clamp(default);
        self
    }

    /// Set the drag style.
    pub fn drag(mut self, drag: KnobDrag) -> Self {
        self.drag = drag;
        self
    }

    /// Set the value arc.
    pub fn arc(mut self, arc: Arc) -> Self {
        self.arc = arc;
        self
    }

    /// Set the release policy.
    pub fn spring(mut self, spring: SpringReturn) -> Self {
        self.spring = spring;
        self
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<(), f32>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<(), f32> {
        self.state
    }

    /// The value arc.
    pub fn value_arc(&self) -> Arc {
        self.arc
    }
}

impl Control for KnobControl {
    type Target = ();
    type Value = f32;

    fn handle(&mut self, event: &PointerEvent, current: &f32) -> Update<f32> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                if !self.bounds.contains(pos) {
                    return Update::none();
                }
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    return Update::one_shot(self.default);
                }
                let start = self.range.clamp(*current);
                let progress = self.range.normalize(start);
                let center = self.bounds.center();
                let (drag, arc, range) = (self.drag, self.arc, self.range);
                let session = self.state.begin((), pos, start);
                session.progress = progress;
                match drag {
                    KnobDrag::Vertical => Update::began(),
                    KnobDrag::Circular => {
                        session.progress = arc.value_at_point(center, pos);
                        let v = range.denormalize(session.progress);
                        session.current = v;
                        Update::began_with(v)
                    }
                }
            }
            PointerEvent::Move { pos, modifiers } => {
                let (feel, drag, arc, range) = (self.feel, self.drag, self.arc, self.range);
                let center = self.bounds.center();
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                let (_, dy) = session.advance(pos, &feel);
                session.progress = match drag {
                    KnobDrag::Vertical => {
                        clamp_unit(session.progress - dy * feel.sensitivity_for(modifiers))
                    }
                    KnobDrag::Circular => {
                        continuous(arc, session.progress, arc.value_at_point(center, pos))
                    }
                };
                let v = range.denormalize(session.progress);
                session.current = v;
                Update::changed(v)
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                if self.state.end().is_none() {
                    return Update::none();
                }
                Update::ended(self.spring.target(&self.range))
            }
        }
    }

    fn gesture(&self) -> &GestureState<(), f32> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<(), f32> {
        &mut self.state
    }
}

/// On a full-circle arc, stop at the end instead of wrapping through
/// 12 o'clock when the angle jumps across the seam.
fn continuous(arc: Arc, previous: f32, next: f32) -> f32 {
    if arc.sweep >= TAU && libm::fabsf(next - previous) > 0.5 {
        if previous > 0.5 { 1.0 } else { 0.0 }
    } else {
        next
    }
}

/// One ring of a [`RingControl`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Inner hit radius (pixels).
    pub inner_radius: f32,
    /// Outer hit radius (pixels).
    pub outer_radius: f32,
    /// Declared domain.
    pub range: ParamRange,
    /// Double-tap reset value.
    pub default: f32,
}

impl Ring {
    /// A ring band between two radii over `range`, defaulting to its center.
    pub fn new(inner_radius: f32, outer_radius: f32, range: ParamRange) -> Self {
        let (inner_radius, outer_radius) = if inner_radius <= outer_radius {
            (inner_radius, outer_radius)
        } else {
            (outer_radius, inner_radius)
        };
        Self {
            inner_radius,
            outer_radius,
            range,
            default: range.center(),
        }
    }

    /// Set the reset value.
    pub fn with_default(mut self, default: f32) -> Self {
        self.default = self.range.clamp(default);
        self
    }

    /// Radius of the band's center line.
    pub fn mid_radius(&self) -> f32 {
        (self.inner_radius + self.outer_radius) * 0.5
    }

    fn hit(&self, radius: f32) -> bool {
        radius >= self.inner_radius && radius <= self.outer_radius
    }
}

/// Split a radius into `count` equal bands from the outside in, leaving a
/// `gap` between bands. Ring 0 is outermost.
pub fn concentric_rings(outer_radius: f32, count: usize, gap: f32, range: ParamRange) -> Vec<Ring> {
    if count == 0 || outer_radius <= 0.0 {
        return Vec::new();
    }
    let band = outer_radius / count as f32;
    (0..count)
        .map(|i| {
            let outer = outer_radius - band * i as f32;
            let inner = (outer - band + gap).max(0.0).min(outer);
            Ring::new(inner, outer, range)
        })
        .collect()
}

/// Controller for concentric circular sliders, one value per ring.
///
/// The ring under the press becomes the drag target; the angle around the
/// shared center sets that ring's value. Other rings keep their drag-start
/// values.
#[derive(Debug, Clone)]
pub struct RingControl {
    center: Point,
    rings: Vec<Ring>,
    arc: Arc,
    feel: Feel,
    state: GestureState<usize, Vec<f32>>,
}

impl RingControl {
    /// Rings around `center`. Values are indexed like `rings`.
    pub fn new(center: Point, rings: Vec<Ring>) -> Self {
        Self {
            center,
            rings,
            arc: Arc::FULL,
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Set the value arc shared by every ring.
    pub fn arc(mut self, arc: Arc) -> Self {
        self.arc = arc;
        self
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<usize, Vec<f32>>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<usize, Vec<f32>> {
        self.state
    }

    /// The configured rings.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Index of the ring under `pos`, if any. Overlaps resolve to the
    /// outermost ring.
    pub fn ring_at(&self, pos: Point) -> Option<usize> {
        let r = pos.distance(self.center);
        self.rings.iter().position(|ring| ring.hit(r))
    }

    /// Caller values padded or truncated to the ring count and clamped.
    fn conform(&self, current: &[f32]) -> Vec<f32> {
        self.rings
            .iter()
            .enumerate()
            .map(|(i, ring)| ring.range.clamp(current.get(i).copied().unwrap_or(ring.default)))
            .collect()
    }
}

impl Control for RingControl {
    type Target = usize;
    type Value = Vec<f32>;

    fn handle(&mut self, event: &PointerEvent, current: &Vec<f32>) -> Update<Vec<f32>> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                let Some(index) = self.ring_at(pos) else {
                    return Update::none();
                };
                let ring = self.rings[index];
                let mut values = self.conform(current);
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    values[index] = ring.default;
                    return Update::one_shot(values);
                }
                let n = self.arc.value_at_point(self.center, pos);
                let start = values.clone();
                values[index] = ring.range.denormalize(n);
                let session = self.state.begin(index, pos, start);
                session.progress = n;
                session.current = values.clone();
                Update::began_with(values)
            }
            PointerEvent::Move { pos, .. } => {
                let (feel, arc, center) = (self.feel, self.arc, self.center);
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                let Some(ring) = self.rings.get(session.target).copied() else {
                    return Update::none();
                };
                session.advance(pos, &feel);
                let pointed = arc.value_at_point(center, pos);
                session.progress = continuous(arc, session.progress, pointed);
                let mut values = session.start_value.clone();
                values[session.target] = ring.range.denormalize(session.progress);
                session.current = values.clone();
                Update::changed(values)
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                if self.state.end().is_none() {
                    Update::none()
                } else {
                    Update::ended(None)
                }
            }
        }
    }

    fn gesture(&self) -> &GestureState<usize, Vec<f32>> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<usize, Vec<f32>> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::drive;

    fn knob(range: ParamRange) -> KnobControl {
        KnobControl::new(range, Bounds::from_size(60.0, 60.0))
    }

    #[test]
    fn vertical_drag_up_increases() {
        let mut k = knob(ParamRange::unit());
        let ups = drive(
            &mut k,
            &[
                PointerEvent::down(30.0, 30.0, 0.0),
                PointerEvent::moved(30.0, 5.0),
            ],
            &0.5,
        );
        // 25 px * 0.004 = 0.1
        let v = ups.last().and_then(|u| u.value).unwrap();
        assert!((v - 0.6).abs() < 1e-5);
    }

    #[test]
    fn log_knob_ratio_is_position_independent() {
        let range = ParamRange::time_ms(1.0, 10_000.0);
        let ratio = |start: f32| {
            let mut k = knob(range);
            let ups = drive(
                &mut k,
                &[
                    PointerEvent::down(30.0, 30.0, 0.0),
                    PointerEvent::moved(30.0, 20.0),
                ],
                &start,
            );
            ups.last().and_then(|u| u.value).unwrap() / start
        };
        assert!((ratio(10.0) - ratio(500.0)).abs() < 1e-3);
    }

    #[test]
    fn knob_value_clamped_at_top() {
        let mut k = knob(ParamRange::new(0.0, 10.0));
        let ups = drive(
            &mut k,
            &[
                PointerEvent::down(30.0, 30.0, 0.0),
                PointerEvent::moved(30.0, -2000.0),
            ],
            &9.0,
        );
        assert_eq!(ups.last().and_then(|u| u.value), Some(10.0));
    }

    #[test]
    fn circular_knob_follows_angle() {
        let mut k = knob(ParamRange::unit()).drag(KnobDrag::Circular);
        // Straight up from center is the middle of the 270° arc.
        let u = k.handle(&PointerEvent::down(30.0, 5.0, 0.0), &0.0);
        assert!((u.value.unwrap() - 0.5).abs() < 1e-4);
    }

    #[test]
    fn concentric_rings_outermost_first() {
        let rings = concentric_rings(60.0, 3, 2.0, ParamRange::unit());
        assert_eq!(rings.len(), 3);
        assert_eq!(rings[0].outer_radius, 60.0);
        assert_eq!(rings[0].inner_radius, 42.0);
        assert_eq!(rings[1].outer_radius, 40.0);
        assert_eq!(rings[2].outer_radius, 20.0);
    }

    #[test]
    fn ring_press_sets_only_that_ring() {
        let center = Point::new(100.0, 100.0);
        let mut c = RingControl::new(center, concentric_rings(60.0, 3, 0.0, ParamRange::unit()));
        // 50 px to the right: ring 0 (40..60). 3 o'clock = 0.25 on a full arc.
        let u = c.handle(&PointerEvent::down(150.0, 100.0, 0.0), &alloc::vec![0.9, 0.8, 0.7]);
        let v = u.value.unwrap();
        assert!((v[0] - 0.25).abs() < 1e-4);
        assert_eq!(&v[1..], &[0.8, 0.7]);
        assert_eq!(c.active_target(), Some(0));
    }

    #[test]
    fn ring_drag_does_not_wrap_through_seam() {
        let center = Point::new(100.0, 100.0);
        let mut c = RingControl::new(center, concentric_rings(60.0, 1, 0.0, ParamRange::unit()));
        // Just left of 12 o'clock is near 1.0; crossing to the right must stick at 1.0.
        c.handle(&PointerEvent::down(99.0, 50.0, 0.0), &alloc::vec![0.0]);
        let u = c.handle(&PointerEvent::moved(101.0, 50.0), &alloc::vec![0.0]);
        assert_eq!(u.value.unwrap()[0], 1.0);
    }

    #[test]
    fn ring_miss_is_ignored() {
        let rings = concentric_rings(10.0, 1, 0.0, ParamRange::unit());
        let mut c = RingControl::new(Point::new(0.0, 0.0), rings);
        assert!(c.handle(&PointerEvent::down(50.0, 0.0, 0.0), &alloc::vec![0.5]).is_none());
    }

    #[test]
    fn ring_values_padded_to_ring_count() {
        let rings = concentric_rings(30.0, 2, 0.0, ParamRange::unit());
        let mut c = RingControl::new(Point::new(0.0, 0.0), rings);
        let u = c.handle(&PointerEvent::down(25.0, 0.0, 0.0), &alloc::vec![]);
        assert_eq!(u.value.unwrap().len(), 2);
    }
}
