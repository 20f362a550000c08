//! Filter cutoff/resonance pad with a response curve.
//!
//! Horizontal position maps to cutoff on a logarithmic axis, vertical
//! position to resonance (bottom = 0). The drawn curve is the magnitude of a
//! 2-pole lowpass, `|H| = 1 / sqrt((1 - r²)² + (r / q)²)` with `r = f / fc`.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, Update};
use crate::scale::{ParamRange, Scale, clamp_unit};
use alloc::vec::Vec;

/// Butterworth Q, the response with no resonance.
pub const FLAT_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Cutoff frequency and resonance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPoint {
    /// Cutoff in Hz.
    pub cutoff_hz: f32,
    /// Resonance in \[0, 1\].
    pub resonance: f32,
}

impl Default for FilterPoint {
    fn default() -> Self {
        Self {
            cutoff_hz: 1000.0,
            resonance: 0.0,
        }
    }
}

impl FilterPoint {
    /// Quality factor for this resonance, from [`FLAT_Q`] up to `max_q`.
    pub fn q(&self, max_q: f32) -> f32 {
        FLAT_Q + clamp_unit(self.resonance) * (max_q.max(FLAT_Q) - FLAT_Q)
    }

    /// Lowpass gain at `freq_hz`, in dB.
    pub fn magnitude_db(&self, freq_hz: f32, max_q: f32) -> f32 {
        if self.cutoff_hz <= 0.0 {
            return 0.0;
        }
        let r = freq_hz.max(0.0) / self.cutoff_hz;
        let q = self.q(max_q);
        let a = 1.0 - r * r;
        let b = r / q;
        let mag = 1.0 / libm::sqrtf(a * a + b * b);
        20.0 * libm::log10f(mag.max(1e-9))
    }
}

/// Controller for the cutoff/resonance pad.
#[derive(Debug, Clone)]
pub struct FilterControl {
    bounds: Bounds,
    cutoff: ParamRange,
    max_q: f32,
    default: FilterPoint,
    feel: Feel,
    state: GestureState<(), FilterPoint>,
}

impl FilterControl {
    /// Pad over `bounds` spanning 20 Hz to 20 kHz.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            cutoff: ParamRange::new(20.0, 20_000.0).with_scale(Scale::Logarithmic),
            max_q: 12.0,
            default: FilterPoint::default(),
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Set the cutoff range (always logarithmic).
    pub fn cutoff_range(mut self, min_hz: f32, max_hz: f32) -> Self {
        self.cutoff = ParamRange::new(min_hz, max_hz).with_scale(Scale::Logarithmic);
        self
    }

    /// Set the Q reached at full resonance.
    pub fn max_q(mut self, max_q: f32) -> Self {
        self.max_q = max_q.max(FLAT_Q);
        self
    }

    /// Set the double-tap reset point.
    pub fn default(mut self, default: FilterPoint) -> Self {
        self.default = self.clamp(default);
        self
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<(), FilterPoint>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<(), FilterPoint> {
        self.state
    }

    /// The cutoff range.
    pub fn cutoff(&self) -> &ParamRange {
        &self.cutoff
    }

    /// Clamp both fields into their domains.
    pub fn clamp(&self, point: FilterPoint) -> FilterPoint {
        FilterPoint {
            cutoff_hz: self.cutoff.clamp(point.cutoff_hz),
            resonance: clamp_unit(point.resonance),
        }
    }

    /// Value under a pointer position.
    pub fn point_at(&self, pos: Point) -> FilterPoint {
        FilterPoint {
            cutoff_hz: self.cutoff.denormalize(self.bounds.fraction_x(pos)),
            resonance: self.bounds.fraction_y_up(pos),
        }
    }

    /// Screen position of a value.
    pub fn handle_for(&self, point: FilterPoint) -> Point {
        self.bounds
            .point_at(self.cutoff.normalize(point.cutoff_hz), clamp_unit(point.resonance))
    }

    /// Response curve as `samples` screen points, log-spaced across the
    /// cutoff range. The vertical axis spans `±db_span` dB around the center.
    pub fn response(&self, point: FilterPoint, samples: usize, db_span: f32) -> Vec<Point> {
        let samples = samples.max(2);
        let db_span = if db_span > 0.0 { db_span } else { 24.0 };
        (0..samples)
            .map(|i| {
                let fx = i as f32 / (samples - 1) as f32;
                let db = point.magnitude_db(self.cutoff.denormalize(fx), self.max_q);
                self.bounds.point_at(fx, 0.5 + db / (2.0 * db_span))
            })
            .collect()
    }
}

impl Control for FilterControl {
    type Target = ();
    type Value = FilterPoint;

    fn handle(&mut self, event: &PointerEvent, current: &FilterPoint) -> Update<FilterPoint> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                if !self.bounds.contains(pos) {
                    return Update::none();
                }
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    return Update::one_shot(self.default);
                }
                let start = self.clamp(*current);
                let v = self.point_at(pos);
                self.state.begin((), pos, start).current = v;
                Update::began_with(v)
            }
            PointerEvent::Move { pos, .. } => {
                let v = self.point_at(pos);
                let feel = self.feel;
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                session.advance(pos, &feel);
                session.current = v;
                Update::changed(v)
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

    fn gesture(&self) -> &GestureState<(), FilterPoint> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<(), FilterPoint> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_response_is_minus_3db_at_cutoff() {
        let p = FilterPoint {
            cutoff_hz: 1000.0,
            resonance: 0.0,
        };
        assert!((p.magnitude_db(1000.0, 12.0) + 3.01).abs() < 0.05);
        assert!(p.magnitude_db(10.0, 12.0).abs() < 0.01);
        assert!(p.magnitude_db(10_000.0, 12.0) < -39.0);
    }

    #[test]
    fn full_resonance_peaks_at_max_q() {
        let p = FilterPoint {
            cutoff_hz: 1000.0,
            resonance: 1.0,
        };
        // |H(fc)| = q.
        let expected = 20.0 * libm::log10f(12.0);
        assert!((p.magnitude_db(1000.0, 12.0) - expected).abs() < 0.01);
    }

    #[test]
    fn pointer_maps_log_x_linear_y() {
        let c = FilterControl::new(Bounds::from_size(100.0, 100.0));
        let p = c.point_at(Point::new(50.0, 25.0));
        assert!((p.cutoff_hz - 632.455).abs() < 0.1);
        assert_eq!(p.resonance, 0.75);
    }

    #[test]
    fn drag_clamps_outside_pad() {
        let mut c = FilterControl::new(Bounds::from_size(100.0, 100.0));
        c.handle(&PointerEvent::down(50.0, 50.0, 0.0), &FilterPoint::default());
        let u = c.handle(&PointerEvent::moved(500.0, 500.0), &FilterPoint::default());
        let v = u.value.unwrap();
        assert!((v.cutoff_hz - 20_000.0).abs() < 0.5);
        assert_eq!(v.resonance, 0.0);
    }

    #[test]
    fn response_has_requested_samples() {
        let c = FilterControl::new(Bounds::from_size(200.0, 100.0));
        let curve = c.response(FilterPoint::default(), 64, 24.0);
        assert_eq!(curve.len(), 64);
        assert_eq!(curve[0].x, 0.0);
        assert_eq!(curve[63].x, 200.0);
    }
}
