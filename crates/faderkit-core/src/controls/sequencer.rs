//! Step sequencer pattern and grid controller.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, Update};
use crate::scale::clamp_unit;
use alloc::vec::Vec;

/// Longest supported pattern.
pub const MAX_STEPS: usize = 64;

/// One sequencer step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Whether the step triggers.
    pub active: bool,
    /// Trigger velocity in \[0, 1\].
    pub velocity: f32,
    /// Chance of triggering in \[0, 1\].
    pub probability: f32,
    /// Accented step.
    pub accent: bool,
}

impl Default for Step {
    fn default() -> Self {
        Self {
            active: false,
            velocity: 0.8,
            probability: 1.0,
            accent: false,
        }
    }
}

impl Step {
    /// An active step with default velocity and probability.
    pub fn on() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }
}

/// A fixed-length sequence of steps. Length is always in `1..=MAX_STEPS`;
/// no operation other than [`resized`](Self::resized) changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPattern {
    steps: Vec<Step>,
}

impl Default for StepPattern {
    fn default() -> Self {
        Self::new(16)
    }
}

impl StepPattern {
    /// An empty pattern of `len` steps, clamped to `1..=MAX_STEPS`.
    pub fn new(len: usize) -> Self {
        Self {
            steps: alloc::vec![Step::default(); len.clamp(1, MAX_STEPS)],
        }
    }

    /// Build from existing steps, truncating or padding to a valid length
    /// and clamping every field.
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        let mut steps: Vec<Step> = steps
            .into_iter()
            .take(MAX_STEPS)
            .map(|s| Step {
                velocity: clamp_unit(s.velocity),
                probability: clamp_unit(s.probability),
                ..s
            })
            .collect();
        if steps.is_empty() {
            steps.push(Step::default());
        }
        Self { steps }
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false`; patterns have at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Step `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Number of active steps.
    pub fn active_count(&self) -> usize {
        self.steps.iter().filter(|s| s.active).count()
    }

    fn with_step(&mut self, index: usize, f: impl FnOnce(&mut Step)) -> &mut Self {
        if let Some(step) = self.steps.get_mut(index) {
            f(step);
        }
        self
    }

    /// Flip a step on or off. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) -> &mut Self {
        self.with_step(index, |s| s.active = !s.active)
    }

    /// Turn a step on or off.
    pub fn set_active(&mut self, index: usize, active: bool) -> &mut Self {
        self.with_step(index, |s| s.active = active)
    }

    /// Set a step's velocity (clamped).
    pub fn set_velocity(&mut self, index: usize, velocity: f32) -> &mut Self {
        self.with_step(index, |s| s.velocity = clamp_unit(velocity))
    }

    /// Set a step's trigger probability (clamped).
    pub fn set_probability(&mut self, index: usize, probability: f32) -> &mut Self {
        self.with_step(index, |s| s.probability = clamp_unit(probability))
    }

    /// Flip a step's accent.
    pub fn toggle_accent(&mut self, index: usize) -> &mut Self {
        self.with_step(index, |s| s.accent = !s.accent)
    }

    /// Replace a step wholesale (fields clamped).
    pub fn set_step(&mut self, index: usize, step: Step) -> &mut Self {
        self.with_step(index, |s| {
            *s = Step {
                velocity: clamp_unit(step.velocity),
                probability: clamp_unit(step.probability),
                ..step
            };
        })
    }

    /// Reset every step, keeping the length.
    pub fn clear(&mut self) -> &mut Self {
        self.steps.fill(Step::default());
        self
    }

    /// Rotate by `by` steps; positive moves steps later in time.
    pub fn rotate(&mut self, by: isize) -> &mut Self {
        let len = self.steps.len() as isize;
        let n = by.rem_euclid(len) as usize;
        self.steps.rotate_right(n);
        self
    }

    /// A copy with a new length, keeping the overlapping prefix.
    pub fn resized(&self, len: usize) -> Self {
        let len = len.clamp(1, MAX_STEPS);
        let mut steps = self.steps.clone();
        steps.resize(len, Step::default());
        Self { steps }
    }
}

/// What a sequencer drag edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDrag {
    /// Painting steps on while sweeping across the row.
    Paint,
    /// Dragging a step's velocity bar. A click without movement turns the
    /// step off on release.
    Velocity(usize),
    /// Dragging a step's probability (alt modifier).
    Probability(usize),
}

/// Controller for a one-row step grid.
///
/// Press an off step to turn it on and paint across neighbours. Press an on
/// step and drag vertically for velocity, or click it to turn it off. Hold
/// alt to drag probability instead; the secondary button toggles accent.
#[derive(Debug, Clone)]
pub struct SequencerControl {
    bounds: Bounds,
    feel: Feel,
    state: GestureState<StepDrag, StepPattern>,
}

impl SequencerControl {
    /// Grid covering `bounds`; the column count follows the pattern length.
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
    pub fn with_state(mut self, state: GestureState<StepDrag, StepPattern>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<StepDrag, StepPattern> {
        self.state
    }

    /// Cell of step `index` in a pattern of `len` steps.
    pub fn cell(&self, index: usize, len: usize) -> Bounds {
        self.bounds.column(index, len)
    }

    /// Step index under `pos`.
    pub fn step_at(&self, pos: Point, len: usize) -> Option<usize> {
        if !self.bounds.contains(pos) {
            return None;
        }
        self.bounds.column_at(pos.x, len)
    }
}

impl Control for SequencerControl {
    type Target = StepDrag;
    type Value = StepPattern;

    fn handle(&mut self, event: &PointerEvent, current: &StepPattern) -> Update<StepPattern> {
        match *event {
            PointerEvent::Down { pos, time, modifiers } => {
                let Some(index) = self.step_at(pos, current.len()) else {
                    return Update::none();
                };
                let mut next = current.clone();
                if modifiers.secondary {
                    next.toggle_accent(index);
                    return Update::one_shot(next);
                }
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    next.set_step(index, Step::on());
                    return Update::one_shot(next);
                }
                let active = current.get(index).is_some_and(|s| s.active);
                let drag = if modifiers.alt {
                    StepDrag::Probability(index)
                } else if active {
                    StepDrag::Velocity(index)
                } else {
                    StepDrag::Paint
                };
                if drag == StepDrag::Paint {
                    next.set_active(index, true);
                    self.state.begin(drag, pos, current.clone()).current = next.clone();
                    return Update::began_with(next);
                }
                self.state.begin(drag, pos, next);
                Update::began()
            }
            PointerEvent::Move { pos, .. } => {
                let feel = self.feel;
                let len = self.state.session().map_or(0, |s| s.start_value.len());
                let over = self.step_at(pos, len);
                let level = self.bounds.fraction_y_up(pos);
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                session.advance(pos, &feel);
                match session.target {
                    StepDrag::Paint => {
                        let Some(i) = over else {
                            return Update::none();
                        };
                        if session.current.get(i).is_some_and(|s| s.active) {
                            return Update::none();
                        }
                        session.current.set_active(i, true);
                    }
                    StepDrag::Velocity(i) => {
                        if !session.moved {
                            return Update::none();
                        }
                        session.current = session.start_value.clone();
                        session.current.set_velocity(i, level);
                    }
                    StepDrag::Probability(i) => {
                        session.current = session.start_value.clone();
                        session.current.set_probability(i, level);
                    }
                }
                Update::changed(session.current.clone())
            }
            PointerEvent::Up { .. } => match self.state.end() {
                Some(session) => match session.target {
                    StepDrag::Velocity(i) if !session.moved => {
                        let mut next = session.start_value;
                        next.set_active(i, false);
                        Update::ended(Some(next))
                    }
                    _ => Update::ended(None),
                },
                None => Update::none(),
            },
            PointerEvent::Cancel => {
                if self.state.end().is_none() {
                    Update::none()
                } else {
                    Update::ended(None)
                }
            }
        }
    }

    fn gesture(&self) -> &GestureState<StepDrag, StepPattern> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<StepDrag, StepPattern> {
        &mut self.state
    }
}
