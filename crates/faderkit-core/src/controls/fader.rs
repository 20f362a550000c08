//! Linear track control: sliders, faders, pitch and mod wheels.
//!
//! The track is a rectangle; the value runs along one axis. In
//! [`TrackMode::Absolute`] the value jumps to the pointer; in
//! [`TrackMode::Relative`] it moves by `pixel delta / track length` of the
//! normalized range, wherever the press landed.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, Modifiers, PointerEvent, SpringReturn, Update};
use crate::scale::{ParamRange, clamp_unit, safe_div};

/// Axis the value runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Bottom = minimum, top = maximum.
    #[default]
    Vertical,
    /// Left = minimum, right = maximum.
    Horizontal,
}

/// How pointer position maps to the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackMode {
    /// The value follows the pointer position along the track.
    #[default]
    Absolute,
    /// The value moves by the drag distance relative to the press.
    Relative,
}

/// Controller for a single value along a straight track.
#[derive(Debug, Clone)]
pub struct FaderControl {
    range: ParamRange,
    default: f32,
    track: Bounds,
    orientation: Orientation,
    mode: TrackMode,
    spring: SpringReturn,
    feel: Feel,
    state: GestureState<(), f32>,
}

impl FaderControl {
    /// Controller over `track` editing a value in `range`.
    ///
    /// The default is the range center until [`default`](Self::default) is set.
    pub fn new(range: ParamRange, track: Bounds) -> Self {
        Self {
            range,
            default: range.center(),
            track,
            orientation: Orientation::Vertical,
            mode: TrackMode::Absolute,
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

    /// Set the track axis.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set absolute or relative dragging.
    pub fn mode(mut self, mode: TrackMode) -> Self {
        self.mode = mode;
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

    /// The declared range.
    pub fn range(&self) -> &ParamRange {
        &self.range
    }

    /// Track length along the value axis, in pixels.
    pub fn track_length(&self) -> f32 {
        match self.orientation {
            Orientation::Vertical => self.track.height,
            Orientation::Horizontal => self.track.width,
        }
    }

    /// Normalized position of a point along the track.
    pub fn fraction_at(&self, pos: Point) -> f32 {
        match self.orientation {
            Orientation::Vertical => self.track.fraction_y_up(pos),
            Orientation::Horizontal => self.track.fraction_x(pos),
        }
    }

    /// Point on the track's center line for a plain value (thumb position).
    pub fn thumb_at(&self, value: f32) -> Point {
        let n = self.range.normalize(value);
        match self.orientation {
            Orientation::Vertical => self.track.point_at(0.5, n),
            Orientation::Horizontal => self.track.point_at(n, 0.5),
        }
    }

    fn along_axis(&self, step: (f32, f32)) -> f32 {
        match self.orientation {
            // Up increases.
            Orientation::Vertical => -step.1,
            Orientation::Horizontal => step.0,
        }
    }

    fn relative_step(&self, step: (f32, f32), modifiers: Modifiers) -> f32 {
        let px = self.along_axis(step);
        let scale = if modifiers.fine { self.feel.fine_factor } else { 1.0 };
        safe_div(px, self.track_length(), 0.0) * scale
    }

    fn release(&mut self) -> Update<f32> {
        if self.state.end().is_none() {
            return Update::none();
        }
        Update::ended(self.spring.target(&self.range))
    }
}

impl Control for FaderControl {
    type Target = ();
    type Value = f32;

    fn handle(&mut self, event: &PointerEvent, current: &f32) -> Update<f32> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                if !self.track.contains(pos) {
                    return Update::none();
                }
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    return Update::one_shot(self.default);
                }
                let start = self.range.clamp(*current);
                let absolute = self.range.denormalize(self.fraction_at(pos));
                let progress = self.range.normalize(start);
                let mode = self.mode;
                let session = self.state.begin((), pos, start);
                session.progress = progress;
                match mode {
                    TrackMode::Absolute => {
                        session.current = absolute;
                        Update::began_with(absolute)
                    }
                    TrackMode::Relative => Update::began(),
                }
            }
            PointerEvent::Move { pos, modifiers } => {
                let feel = self.feel;
                let Some(step) = self.state.session_mut().map(|s| s.advance(pos, &feel)) else {
                    return Update::none();
                };
                let delta = self.relative_step(step, modifiers);
                let absolute = self.range.denormalize(self.fraction_at(pos));
                let (mode, range) = (self.mode, self.range);
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                let value = match mode {
                    TrackMode::Absolute => absolute,
                    TrackMode::Relative => {
                        session.progress = clamp_unit(session.progress + delta);
                        range.denormalize(session.progress)
                    }
                };
                session.current = value;
                Update::changed(value)
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => self.release(),
        }
    }

    fn gesture(&self) -> &GestureState<(), f32> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<(), f32> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::drive;

    fn track() -> Bounds {
        Bounds::from_size(20.0, 100.0)
    }

    #[test]
    fn absolute_press_jumps_to_pointer() {
        let mut c = FaderControl::new(ParamRange::unit(), track());
        let u = c.handle(&PointerEvent::down(10.0, 25.0, 0.0), &0.0);
        assert!(u.began);
        assert_eq!(u.value, Some(0.75));
    }

    #[test]
    fn press_outside_track_is_ignored() {
        let mut c = FaderControl::new(ParamRange::unit(), track());
        assert!(c.handle(&PointerEvent::down(50.0, 25.0, 0.0), &0.0).is_none());
        assert!(!c.is_dragging());
    }

    #[test]
    fn relative_drag_is_proportional_to_track_length() {
        let mut c =
            FaderControl::new(ParamRange::new(0.0, 10.0), track()).mode(TrackMode::Relative);
        let ups = drive(
            &mut c,
            &[
                PointerEvent::down(10.0, 50.0, 0.0),
                PointerEvent::moved(10.0, 40.0),
            ],
            &2.0,
        );
        // 10 px of a 100 px track is 10% of a 10-unit span.
        let last = ups.last().and_then(|u| u.value).unwrap();
        assert!((last - 3.0).abs() < 1e-5);
    }

    #[test]
    fn spring_center_is_final_value() {
        let mut c = FaderControl::new(ParamRange::bipolar(), track()).spring(SpringReturn::Center);
        let ups = drive(
            &mut c,
            &[
                PointerEvent::down(10.0, 10.0, 0.0),
                PointerEvent::moved(10.0, 0.0),
                PointerEvent::up(10.0, 0.0),
            ],
            &0.0,
        );
        let last = ups.last().unwrap();
        assert!(last.ended);
        assert_eq!(last.value, Some(0.0));
    }

    #[test]
    fn double_tap_resets_to_default() {
        let mut c = FaderControl::new(ParamRange::unit(), track()).default(0.2);
        c.handle(&PointerEvent::down(10.0, 50.0, 1.0), &0.9);
        c.handle(&PointerEvent::up(10.0, 50.0), &0.5);
        let u = c.handle(&PointerEvent::down(10.0, 50.0, 1.1), &0.5);
        assert_eq!(u, Update::one_shot(0.2));
        assert!(!c.is_dragging());
    }

    #[test]
    fn zero_length_track_does_not_divide_by_zero() {
        let mut c = FaderControl::new(ParamRange::unit(), Bounds::from_size(20.0, 0.0))
            .mode(TrackMode::Relative);
        c.handle(&PointerEvent::down(10.0, 0.0, 0.0), &0.4);
        let u = c.handle(&PointerEvent::moved(10.0, -30.0), &0.4);
        assert_eq!(u.value, Some(0.4));
    }

    #[test]
    fn moves_after_release_are_ignored() {
        let mut c = FaderControl::new(ParamRange::unit(), track());
        c.handle(&PointerEvent::down(10.0, 50.0, 0.0), &0.0);
        c.handle(&PointerEvent::Cancel, &0.0);
        assert!(c.handle(&PointerEvent::moved(10.0, 0.0), &0.0).is_none());
    }

    #[test]
    fn horizontal_thumb_position() {
        let c = FaderControl::new(ParamRange::unit(), Bounds::from_size(200.0, 10.0))
            .orientation(Orientation::Horizontal);
        assert_eq!(c.thumb_at(0.25), Point::new(50.0, 5.0));
    }
}
