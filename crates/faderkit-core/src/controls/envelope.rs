//! ADSR envelope editor.
//!
//! The editor area is split into four equal horizontal zones. Each time
//! segment occupies up to one zone, proportionally to its maximum, so the
//! handles never overlap:
//!
//! ```text
//!  top    A
//!        / \
//!       /   D-------S
//!      /              \
//! bottom               R
//!      |zone |zone |zone |zone |
//! ```
//!
//! Dragging a handle recomputes its fields from the drag-start snapshot, so
//! a host that applies values late never makes the handle jump.

use crate::geometry::{Bounds, Point};
use crate::gesture::{Control, Feel, GestureState, PointerEvent, Update};
use crate::scale::{clamp_unit, safe_div};

/// Four-stage envelope. Times are milliseconds, sustain is a level in \[0, 1\].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    /// Attack time (ms).
    pub attack_ms: f32,
    /// Decay time (ms).
    pub decay_ms: f32,
    /// Sustain level.
    pub sustain: f32,
    /// Release time (ms).
    pub release_ms: f32,
}

impl Default for Adsr {
    fn default() -> Self {
        Self {
            attack_ms: 10.0,
            decay_ms: 100.0,
            sustain: 0.7,
            release_ms: 300.0,
        }
    }
}

impl Adsr {
    /// Construct an envelope (unclamped; see [`AdsrLimits::clamp`]).
    pub const fn new(attack_ms: f32, decay_ms: f32, sustain: f32, release_ms: f32) -> Self {
        Self {
            attack_ms,
            decay_ms,
            sustain,
            release_ms,
        }
    }

    /// Level at `t_ms` after note-on while the note is held.
    pub fn held_level(&self, t_ms: f32) -> f32 {
        if t_ms <= 0.0 {
            return 0.0;
        }
        if t_ms < self.attack_ms {
            return t_ms / self.attack_ms;
        }
        let t = t_ms - self.attack_ms;
        if t < self.decay_ms {
            return 1.0 - (1.0 - self.sustain) * (t / self.decay_ms);
        }
        self.sustain
    }
}

/// Upper bounds for the envelope's time fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdsrLimits {
    /// Longest attack (ms).
    pub max_attack: f32,
    /// Longest decay (ms).
    pub max_decay: f32,
    /// Longest release (ms).
    pub max_release: f32,
}

impl Default for AdsrLimits {
    fn default() -> Self {
        Self {
            max_attack: 2000.0,
            max_decay: 2000.0,
            max_release: 5000.0,
        }
    }
}

impl AdsrLimits {
    /// Clamp every field of `adsr` into its domain. NaN times become zero.
    pub fn clamp(&self, adsr: Adsr) -> Adsr {
        fn time(v: f32, max: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, max.max(0.0)) }
        }
        Adsr {
            attack_ms: time(adsr.attack_ms, self.max_attack),
            decay_ms: time(adsr.decay_ms, self.max_decay),
            sustain: clamp_unit(adsr.sustain),
            release_ms: time(adsr.release_ms, self.max_release),
        }
    }

    /// Whether every field already lies in its domain.
    pub fn contains(&self, adsr: &Adsr) -> bool {
        self.clamp(*adsr) == *adsr
    }
}

/// The four draggable handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeHandle {
    /// Peak at the end of the attack. Drags horizontally.
    Attack,
    /// End of decay. Horizontal sets decay, vertical sets sustain.
    Decay,
    /// End of the sustain plateau. Drags vertically.
    Sustain,
    /// End of release. Drags horizontally.
    Release,
}

impl EnvelopeHandle {
    /// All handles in drawing order.
    pub const ALL: [EnvelopeHandle; 4] = [Self::Attack, Self::Decay, Self::Sustain, Self::Release];
}

/// Maps an [`Adsr`] to handle positions inside a rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeLayout {
    /// Drawing area.
    pub bounds: Bounds,
    /// Time limits; each limit fills one zone.
    pub limits: AdsrLimits,
}

impl EnvelopeLayout {
    /// Layout over `bounds`.
    pub fn new(bounds: Bounds, limits: AdsrLimits) -> Self {
        Self { bounds, limits }
    }

    /// Width of one of the four zones.
    pub fn zone_width(&self) -> f32 {
        self.bounds.width * 0.25
    }

    fn level_y(&self, level: f32) -> f32 {
        self.bounds.bottom() - clamp_unit(level) * self.bounds.height
    }

    fn time_dx(&self, ms: f32, max: f32) -> f32 {
        clamp_unit(safe_div(ms, max, 0.0)) * self.zone_width()
    }

    /// Handle position for one stage.
    pub fn handle(&self, adsr: &Adsr, handle: EnvelopeHandle) -> Point {
        let [a, d, s, r] = self.handles(adsr);
        match handle {
            EnvelopeHandle::Attack => a,
            EnvelopeHandle::Decay => d,
            EnvelopeHandle::Sustain => s,
            EnvelopeHandle::Release => r,
        }
    }

    /// All four handle positions, in [`EnvelopeHandle::ALL`] order.
    pub fn handles(&self, adsr: &Adsr) -> [Point; 4] {
        let l = &self.limits;
        let y_s = self.level_y(adsr.sustain);
        let attack_x = self.bounds.x + self.time_dx(adsr.attack_ms, l.max_attack);
        let decay_x = attack_x + self.time_dx(adsr.decay_ms, l.max_decay);
        let sustain_x = decay_x + self.zone_width();
        let release_x = sustain_x + self.time_dx(adsr.release_ms, l.max_release);
        [
            Point::new(attack_x, self.bounds.y),
            Point::new(decay_x, y_s),
            Point::new(sustain_x, y_s),
            Point::new(release_x, self.bounds.bottom()),
        ]
    }

    /// Polyline of the envelope shape from note-on to the end of release.
    pub fn outline(&self, adsr: &Adsr) -> [Point; 5] {
        let [a, d, s, r] = self.handles(adsr);
        [Point::new(self.bounds.x, self.bounds.bottom()), a, d, s, r]
    }

    /// The handle nearest to `pos` within `radius`.
    pub fn hit(&self, adsr: &Adsr, pos: Point, radius: f32) -> Option<EnvelopeHandle> {
        EnvelopeHandle::ALL
            .into_iter()
            .zip(self.handles(adsr))
            .map(|(h, p)| (h, p.distance(pos)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, _)| h)
    }

    /// Recompute the fields owned by `handle` after the pointer moved from
    /// `grab` to `pos`. The handle keeps its offset from the pointer.
    pub fn drag(&self, start: &Adsr, handle: EnvelopeHandle, grab: Point, pos: Point) -> Adsr {
        let l = &self.limits;
        let [a, _, s, _] = self.handles(start);
        let anchor = self.handle(start, handle);
        let (dx, dy) = pos.delta_from(grab);
        let pos = Point::new(anchor.x + dx, anchor.y + dy);
        let zw = self.zone_width();
        let sustain = || self.bounds.fraction_y_up(pos);
        let time = |from_x: f32, max: f32, fallback: f32| {
            clamp_unit(safe_div(pos.x - from_x, zw, safe_div(fallback, max, 0.0))) * max
        };
        let mut next = *start;
        match handle {
            EnvelopeHandle::Attack => {
                next.attack_ms = time(self.bounds.x, l.max_attack, start.attack_ms);
            }
            EnvelopeHandle::Decay => {
                next.decay_ms = time(a.x, l.max_decay, start.decay_ms);
                next.sustain = sustain();
            }
            EnvelopeHandle::Sustain => next.sustain = sustain(),
            EnvelopeHandle::Release => {
                next.release_ms = time(s.x, l.max_release, start.release_ms);
            }
        }
        l.clamp(next)
    }
}

/// Controller for the four-handle envelope editor.
#[derive(Debug, Clone)]
pub struct EnvelopeControl {
    layout: EnvelopeLayout,
    default: Adsr,
    feel: Feel,
    state: GestureState<EnvelopeHandle, Adsr>,
}

impl EnvelopeControl {
    /// Editor over `bounds` with the given limits.
    pub fn new(bounds: Bounds, limits: AdsrLimits) -> Self {
        Self {
            layout: EnvelopeLayout::new(bounds, limits),
            default: limits.clamp(Adsr::default()),
            feel: Feel::default(),
            state: GestureState::default(),
        }
    }

    /// Set the double-tap reset envelope.
    pub fn default(mut self, default: Adsr) -> Self {
        self.default = self.layout.limits.clamp(default);
        self
    }

    /// Override interaction constants.
    pub fn feel(mut self, feel: Feel) -> Self {
        self.feel = feel;
        self
    }

    /// Resume with interaction state kept from a previous frame.
    pub fn with_state(mut self, state: GestureState<EnvelopeHandle, Adsr>) -> Self {
        self.state = state;
        self
    }

    /// Hand the interaction state back for storage.
    pub fn into_state(self) -> GestureState<EnvelopeHandle, Adsr> {
        self.state
    }

    /// The layout used for hit-testing and drawing.
    pub fn layout(&self) -> &EnvelopeLayout {
        &self.layout
    }

    /// Reset the fields a handle owns to the default.
    fn reset(&self, current: Adsr, handle: EnvelopeHandle) -> Adsr {
        let d = self.default;
        let mut next = current;
        match handle {
            EnvelopeHandle::Attack => next.attack_ms = d.attack_ms,
            EnvelopeHandle::Decay => {
                next.decay_ms = d.decay_ms;
                next.sustain = d.sustain;
            }
            EnvelopeHandle::Sustain => next.sustain = d.sustain,
            EnvelopeHandle::Release => next.release_ms = d.release_ms,
        }
        next
    }
}

impl Control for EnvelopeControl {
    type Target = EnvelopeHandle;
    type Value = Adsr;

    fn handle(&mut self, event: &PointerEvent, current: &Adsr) -> Update<Adsr> {
        match *event {
            PointerEvent::Down { pos, time, .. } => {
                let start = self.layout.limits.clamp(*current);
                let Some(handle) = self.layout.hit(&start, pos, self.feel.handle_radius) else {
                    return Update::none();
                };
                if self.state.register_tap(time, pos, &self.feel) {
                    self.state.end();
                    return Update::one_shot(self.reset(start, handle));
                }
                self.state.begin(handle, pos, start);
                Update::began()
            }
            PointerEvent::Move { pos, .. } => {
                let (feel, layout) = (self.feel, self.layout);
                let Some(session) = self.state.session_mut() else {
                    return Update::none();
                };
                session.advance(pos, &feel);
                let next = layout.drag(&session.start_value, session.target, session.origin, pos);
                session.current = next;
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

    fn gesture(&self) -> &GestureState<EnvelopeHandle, Adsr> {
        &self.state
    }

    fn gesture_mut(&mut self) -> &mut GestureState<EnvelopeHandle, Adsr> {
        &mut self.state
    }
}
