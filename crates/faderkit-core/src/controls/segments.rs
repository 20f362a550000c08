//! Proportional segment bar (oscillator mix, split points).
//!
//! N weights, each at least `min_weight`, always summing to one. Dragging the
//! divider between two segments trades weight between those two only.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, Update};
use crate::scale::{clamp_unit, safe_div};
use alloc::vec::Vec;

/// Normalized proportions with a per-segment minimum.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentWeights {
    weights: Vec<f32>,
    min_weight: f32,
}

impl SegmentWeights {
    /// `count` equal segments (at least one). `min_weight` is limited so that
    /// `count * min_weight <= 1`.
    pub fn equal(count: usize, min_weight: f32) -> Self {
        let count = count.max(1);
        let share = 1.0 / count as f32;
        Self {
            weights: alloc::vec![share; count],
            min_weight: Self::limit_min(min_weight, count),
        }
    }

    /// Normalize arbitrary non-negative proportions. An all-zero (or empty)
    /// input yields equal segments; any segment below the minimum lifts the
    /// whole set proportionally.
    pub fn from_weights(raw: impl IntoIterator<Item = f32>, min_weight: f32) -> Self {
        let raw: Vec<f32> = raw
            .into_iter()
            .map(|w| if w.is_finite() { w.max(0.0) } else { 0.0 })
            .collect();
        let total: f32 = raw.iter().sum();
        if raw.is_empty() || total <= 0.0 {
            return Self::equal(raw.len(), min_weight);
        }
        let n = raw.len();
        let min_weight = Self::limit_min(min_weight, n);
        let mut weights: Vec<f32> = raw.iter().map(|w| w / total).collect();
        if weights.iter().any(|w| *w < min_weight) {
            let free = 1.0 - min_weight * n as f32;
            for w in &mut weights {
                *w = min_weight + free * *w;
            }
        }
        Self { weights, min_weight }
    }

    fn limit_min(min_weight: f32, count: usize) -> f32 {
        let min_weight = if min_weight.is_finite() { min_weight.max(0.0) } else { 0.0 };
        min_weight.min(1.0 / count as f32)
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The weights, summing to one.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Smallest allowed weight.
    pub fn min_weight(&self) -> f32 {
        self.min_weight
    }

    /// Divider positions in \[0, 1\]: `len() - 1` cumulative sums.
    pub fn boundaries(&self) -> Vec<f32> {
        let mut acc = 0.0;
        self.weights[..self.weights.len() - 1]
            .iter()
            .map(|w| {
                acc += w;
                clamp_unit(acc)
            })
            .collect()
    }

    /// Move divider `index` (between segments `index` and `index + 1`) to
    /// `position` in \[0, 1\]. Only the two adjacent segments change.
    pub fn set_divider(&mut self, index: usize, position: f32) -> &mut Self {
        if index + 1 >= self.weights.len() {
            return self;
        }
        let left_edge: f32 = self.weights[..index].iter().sum();
        let pair = self.weights[index] + self.weights[index + 1];
        let hi = (pair - self.min_weight).max(self.min_weight);
        let left = (clamp_unit(position) - left_edge).clamp(self.min_weight, hi).min(pair);
        self.weights[index] = left;
        self.weights[index + 1] = pair - left;
        self
    }

    /// Reset to equal segments, keeping count and minimum.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::equal(self.len(), self.min_weight);
        self
    }
}

/// Controller for a horizontal segment bar.
#[derive(Debug, Clone)]
pub struct SegmentControl {
    bounds: Bounds,
    feel: Feel,
    state: GestureState<usize, SegmentWeights>,
}

impl SegmentControl {
    /// Bar covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<usize, SegmentWeights>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<usize, SegmentWeights> {
        self.state
    }

    /// Screen x of every divider.
    pub fn divider_xs(&self, weights: &SegmentWeights) -> Vec<f32> {
        weights
            .boundaries()
            .into_iter()
            .map(|b| self.bounds.x + b * self.bounds.width)
            .collect()
    }

    /// Divider nearest to `pos` within the handle radius.
    pub fn divider_at(&self, weights: &SegmentWeights, pos: Point) -> Option<usize> {
        if pos.y < self.bounds.y || pos.y > self.bounds.bottom() {
            return None;
        }
        self.divider_xs(weights)
            .into_iter()
            .enumerate()
            .map(|(i, x)| (i, (x - pos.x).abs()))
            .filter(|(_, d)| *d <= self.feel.handle_radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i)
    }
}

impl Control for SegmentControl {
    type Target = usize;
    type Value = SegmentWeights;

    fn handle(&mut self, event: &PointerEvent, current: &SegmentWeights) -> Update<SegmentWeights> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                if !self.bounds.contains(pos) {
                    return Update::none();
                }
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    let mut next = current.clone();
                    next.reset();
                    return Update::one_shot(next);
                }
                let Some(divider) = self.divider_at(current, pos) else {
                    return Update::none();
                };
                self.state.begin(divider, pos, current.clone());
                Update::began()
            }
            PointerEvent::Move { pos, .. } => {
                let feel = self.feel;
                let x = safe_div(pos.x - self.bounds.x, self.bounds.width, 0.5);
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                session.advance(pos, &feel);
                let mut next = session.start_value.clone();
                next.set_divider(session.target, x);
                session.current = next.clone();
                Update::changed(next)
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

    fn gesture(&self) -> &GestureState<usize, SegmentWeights> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<usize, SegmentWeights> {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::drive;

    fn sum(w: &SegmentWeights) -> f32 {
        w.weights().iter().sum()
    }

    #[test]
    fn from_weights_normalizes() {
        let w = SegmentWeights::from_weights([2.0, 1.0, 1.0], 0.0);
        assert_eq!(w.weights(), &[0.5, 0.25, 0.25]);
    }

    #[test]
    fn from_weights_lifts_small_segments() {
        let w = SegmentWeights::from_weights([1.0, 0.0], 0.1);
        assert!((w.weights()[1] - 0.1).abs() < 1e-6);
        assert!((sum(&w) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn all_zero_is_equal() {
        let w = SegmentWeights::from_weights([0.0, 0.0, 0.0, 0.0], 0.05);
        assert_eq!(w.weights(), &[0.25; 4]);
    }

    #[test]
    fn divider_respects_minimum() {
        let mut w = SegmentWeights::equal(3, 0.1);
        w.set_divider(0, 0.0);
        assert!((w.weights()[0] - 0.1).abs() < 1e-6);
        assert!((sum(&w) - 1.0).abs() < 1e-6);
        w.set_divider(1, 1.0);
        assert!((w.weights()[2] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn divider_touches_only_neighbours() {
        let mut w = SegmentWeights::equal(4, 0.0);
        w.set_divider(1, 0.6);
        assert_eq!(w.weights()[0], 0.25);
        assert!((w.weights()[1] - 0.35).abs() < 1e-6);
        assert!((w.weights()[2] - 0.15).abs() < 1e-6);
        assert_eq!(w.weights()[3], 0.25);
    }

    #[test]
    fn drag_divider() {
        let mut c = SegmentControl::new(Bounds::from_size(200.0, 20.0));
        let ups = drive(
            &mut c,
            &[
                PointerEvent::down(100.0, 10.0, 0.0),
                PointerEvent::moved(150.0, 10.0),
                PointerEvent::up(150.0, 10.0),
            ],
            &SegmentWeights::equal(2, 0.05),
        );
        let last = ups.iter().rev().find_map(|u| u.value.clone()).unwrap();
        assert!((last.weights()[0] - 0.75).abs() < 1e-6);
    }

    #[test]
    fn press_away_from_dividers_is_ignored() {
        let mut c = SegmentControl::new(Bounds::from_size(200.0, 20.0));
        let w = SegmentWeights::equal(2, 0.0);
        assert!(c.handle(&PointerEvent::down(20.0, 10.0, 0.0), &w).is_none());
    }

    #[test]
    fn single_segment_has_no_dividers() {
        let w = SegmentWeights::equal(1, 0.5);
        assert!(w.boundaries().is_empty());
        assert_eq!(w.weights(), &[1.0]);
    }
}
