//! XY pad and drum pads.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, SpringReturn, Update};
use crate::scale::{ParamRange, bipolar_to_unipolar, clamp_unit, unipolar_to_bipolar};

/// Two normalized coordinates. `y` grows upward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XyValue {
    /// Horizontal position in \[0, 1\].
    pub x: f32,
    /// Vertical position in \[0, 1\], bottom = 0.
    pub y: f32,
}

impl Default for XyValue {
    fn default() -> Self {
        Self::CENTER
    }
}

impl XyValue {
    /// The pad center.
    pub const CENTER: XyValue = XyValue { x: 0.5, y: 0.5 };

    /// Construct, clamping both axes.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_unit(x),
            y: clamp_unit(y),
        }
    }

    /// Construct from bipolar coordinates in \[-1, 1\].
    pub fn from_bipolar(x: f32, y: f32) -> Self {
        Self::new(bipolar_to_unipolar(x), bipolar_to_unipolar(y))
    }

    /// Horizontal position in \[-1, 1\].
    pub fn x_bipolar(&self) -> f32 {
        unipolar_to_bipolar(self.x)
    }

    /// Vertical position in \[-1, 1\].
    pub fn y_bipolar(&self) -> f32 {
        unipolar_to_bipolar(self.y)
    }

    /// Both axes clamped.
    pub fn clamped(self) -> Self {
        Self::new(self.x, self.y)
    }
}

/// Controller for a two-axis pad. The value follows the pointer.
#[derive(Debug, Clone)]
pub struct XyPadControl {
    bounds: Bounds,
    default: XyValue,
    spring_x: SpringReturn,
    spring_y: SpringReturn,
    feel: Feel,
    state: GestureState<(), XyValue>,
}

impl XyPadControl {
    /// Pad covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            default: XyValue::CENTER,
            spring_x: SpringReturn::None,
            spring_y: SpringReturn::None,
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Set the double-tap reset value.
    pub fn default(mut self, default: XyValue) -> Self {
        self.default = default.clamped();
        self
    }

    /// Release policy per axis, evaluated in normalized \[0, 1\] space.
    pub fn spring(mut self, x: SpringReturn, y: SpringReturn) -> Self {
        self.spring_x = x;
        self.spring_y = y;
        self
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<(), XyValue>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<(), XyValue> {
        self.state
    }

    /// Value under a pointer position.
    pub fn value_at(&self, pos: Point) -> XyValue {
        XyValue::new(self.bounds.fraction_x(pos), self.bounds.fraction_y_up(pos))
    }

    /// Screen position of a value.
    pub fn point_for(&self, value: XyValue) -> Point {
        self.bounds.point_at(value.x, value.y)
    }

    fn released(&self, last: XyValue) -> Option<XyValue> {
        let unit = ParamRange::unit();
        let x = self.spring_x.target(&unit);
        let y = self.spring_y.target(&unit);
        if x.is_none() && y.is_none() {
            return None;
        }
        Some(XyValue::new(x.unwrap_or(last.x), y.unwrap_or(last.y)))
    }
}

impl Control for XyPadControl {
    type Target = ();
    type Value = XyValue;

    fn handle(&mut self, event: &PointerEvent, current: &XyValue) -> Update<XyValue> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                if !self.bounds.contains(pos) {
                    return Update::none();
                }
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    return Update::one_shot(self.default);
                }
                let v = self.value_at(pos);
                self.state.begin((), pos, current.clamped()).current = v;
                Update::began_with(v)
            }
            PointerEvent::Move { pos, .. } => {
                let v = self.value_at(pos);
                let feel = self.feel;
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                session.advance(pos, &feel);
                session.current = v;
                Update::changed(v)
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => match self.state.end() {
                Some(session) => Update::ended(self.released(session.current)),
                None => Update::none(),
            },
        }
    }

    fn gesture(&self) -> &GestureState<(), XyValue> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<(), XyValue> {
        &mut self.state
    }
}

/// Velocity from the vertical hit position on a pad:
/// `floor + (1 - floor) * y^exponent`, with `y` measured from the bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityCurve {
    /// Velocity of a hit at the very bottom.
    pub floor: f32,
    /// Curve exponent; 1.0 is linear.
    pub exponent: f32,
}

impl Default for VelocityCurve {
    fn default() -> Self {
        Self {
            floor: 0.1,
            exponent: 1.0,
        }
    }
}

impl VelocityCurve {
    /// Velocity for a normalized height.
    pub fn velocity(&self, y_up: f32) -> f32 {
        let floor = clamp_unit(self.floor);
        let exponent = if self.exponent > 0.0 { self.exponent } else { 1.0 };
        clamp_unit(floor + (1.0 - floor) * libm::powf(clamp_unit(y_up), exponent))
    }
}

/// A pad press or release.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PadHit {
    /// Pad index, row-major from the top-left.
    pub pad: usize,
    /// Strike velocity in \[0, 1\].
    pub velocity: f32,
    /// `true` on press, `false` on release.
    pub pressed: bool,
}

/// Controller for a grid of momentary drum pads.
#[derive(Debug, Clone)]
pub struct PadGridControl {
    bounds: Bounds,
    cols: usize,
    rows: usize,
    curve: VelocityCurve,
    state: GestureState<usize, PadHit>,
}

impl PadGridControl {
    /// A `cols` x `rows` grid over `bounds`.
    pub fn new(bounds: Bounds, cols: usize, rows: usize) -> Self {
        Self {
            bounds,
            cols,
            rows,
            curve: VelocityCurve::default(),
            state: GestureState::default(),
        }
    }

    /// Set the velocity curve.
    pub fn curve(mut self, curve: VelocityCurve) -> Self {
        self.curve = curve;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<usize, PadHit>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<usize, PadHit> {
        self.state
    }

    /// Number of pads.
    pub fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// Whether the grid has no pads.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rectangle of pad `index`.
    pub fn pad_bounds(&self, index: usize) -> Bounds {
        let cols = self.cols.max(1);
        self.bounds
            .row(index / cols, self.rows)
            .column(index % cols, self.cols)
    }

    /// Pad index under `pos`.
    pub fn pad_at(&self, pos: Point) -> Option<usize> {
        let col = self.bounds.column_at(pos.x, self.cols)?;
        let row = self.bounds.row_at(pos.y, self.rows)?;
        Some(row * self.cols + col)
    }
}

impl Control for PadGridControl {
    type Target = usize;
    type Value = PadHit;

    fn handle(&mut self, event: &PointerEvent, _current: &PadHit) -> Update<PadHit> {
        match *event {
            PointerEvent::Down { pos, .. } => {
                let Some(pad) = self.pad_at(pos) else {
                    return Update::none();
                };
                let velocity = self.curve.velocity(self.pad_bounds(pad).fraction_y_up(pos));
                let hit = PadHit {
                    pad,
                    velocity,
                    pressed: true,
                };
                self.state.begin(pad, pos, hit);
                Update::began_with(hit)
            }
            PointerEvent::Move { .. } => Update::none(),
            PointerEvent::Up { .. } | PointerEvent::Cancel => match self.state.end() {
                Some(session) => Update::ended(Some(PadHit {
                    pressed: false,
                    ..session.start_value
                })),
                None => Update::none(),
            },
        }
    }

    fn gesture(&self) -> &GestureState<usize, PadHit> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<usize, PadHit> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::drive;

    #[test]
    fn xy_follows_pointer_with_y_up() {
        let mut c = XyPadControl::new(Bounds::from_size(100.0, 100.0));
        let u = c.handle(&PointerEvent::down(25.0, 25.0, 0.0), &XyValue::CENTER);
        assert_eq!(u.value, Some(XyValue::new(0.25, 0.75)));
    }

    #[test]
    fn xy_clamps_outside_drag() {
        let mut c = XyPadControl::new(Bounds::from_size(100.0, 100.0));
        let ups = drive(
            &mut c,
            &[
                PointerEvent::down(50.0, 50.0, 0.0),
                PointerEvent::moved(300.0, -40.0),
            ],
            &XyValue::CENTER,
        );
        assert_eq!(ups.last().and_then(|u| u.value), Some(XyValue::new(1.0, 1.0)));
    }

    #[test]
    fn xy_spring_y_only() {
        let mut c = XyPadControl::new(Bounds::from_size(100.0, 100.0))
            .spring(SpringReturn::None, SpringReturn::Center);
        let ups = drive(
            &mut c,
            &[
                PointerEvent::down(10.0, 10.0, 0.0),
                PointerEvent::up(10.0, 10.0),
            ],
            &XyValue::CENTER,
        );
        let last = ups.last().unwrap();
        assert!(last.ended);
        assert_eq!(last.value, Some(XyValue::new(0.1, 0.5)));
    }

    #[test]
    fn bipolar_view() {
        let v = XyValue::from_bipolar(-1.0, 0.5);
        assert_eq!(v, XyValue::new(0.0, 0.75));
        assert_eq!(v.x_bipolar(), -1.0);
    }

    #[test]
    fn velocity_curve_floor_and_top() {
        let c = VelocityCurve::default();
        assert!((c.velocity(0.0) - 0.1).abs() < 1e-6);
        assert_eq!(c.velocity(1.0), 1.0);
        let squared = VelocityCurve {
            floor: 0.0,
            exponent: 2.0,
        };
        assert!((squared.velocity(0.5) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn pad_grid_press_and_release() {
        let mut c = PadGridControl::new(Bounds::from_size(200.0, 200.0), 4, 4);
        // Second row, third column, struck at the top of the pad.
        let down = c.handle(&PointerEvent::down(110.0, 50.0, 0.0), &PadHit::default());
        let hit = down.value.unwrap();
        assert_eq!(hit.pad, 6);
        assert!(hit.pressed);
        assert!((hit.velocity - 1.0).abs() < 1e-6);
        let up = c.handle(&PointerEvent::up(110.0, 50.0), &hit);
        assert!(up.ended);
        assert_eq!(up.value.map(|h| h.pressed), Some(false));
    }

    #[test]
    fn empty_grid_ignores_presses() {
        let mut c = PadGridControl::new(Bounds::from_size(100.0, 100.0), 0, 4);
        assert!(c.is_empty());
        assert!(c.handle(&PointerEvent::down(10.0, 10.0, 0.0), &PadHit::default()).is_none());
    }
}
