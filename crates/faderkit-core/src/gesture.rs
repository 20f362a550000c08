//! Pointer gesture protocol shared by every control.
//!
//! Each control is a small state machine, `Idle ↔ Dragging(target)`, driven
//! by [`PointerEvent`]s in widget-local coordinates:
//!
//! ```text
//!          Down (hit)                 Up / Cancel
//!   Idle ─────────────► Dragging(t) ─────────────► Idle
//!     ▲                   │    ▲                  (spring return)
//!     │  Down (2nd tap)   │    │ Move
//!     └── reset default ◄─┘    └──── report clamped value
//! ```
//!
//! The value at drag start is captured in a [`DragSession`] and every move is
//! computed from that snapshot, never from the caller's current value, so a
//! host that applies updates a frame late does not make the control snap
//! back. Controls report through [`Update`], which mirrors the host gesture
//! protocol: `began` → zero or more values → `ended`.

use crate::geometry::Point;
use crate::scale::ParamRange;

/// Modifier state sampled with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Fine adjustment (Shift on desktop).
    pub fine: bool,
    /// Alternate action (Alt/Option).
    pub alt: bool,
    /// Secondary action (right button or Ctrl/Cmd-click).
    pub secondary: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self {
        fine: false,
        alt: false,
        secondary: false,
    };
}

/// A pointer event in widget-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary press. `time` is in seconds on any monotonic clock.
    Down {
        /// Press position.
        pos: Point,
        /// Press timestamp (seconds).
        time: f64,
        /// Modifiers at press time.
        modifiers: Modifiers,
    },
    /// Pointer motion while pressed.
    Move {
        /// Current position.
        pos: Point,
        /// Modifiers held during the move.
        modifiers: Modifiers,
    },
    /// Primary release.
    Up {
        /// Release position.
        pos: Point,
    },
    /// The interaction was interrupted (focus loss, Escape, capture lost).
    Cancel,
}

impl PointerEvent {
    /// Press without modifiers.
    pub fn down(x: f32, y: f32, time: f64) -> Self {
        Self::Down {
            pos: Point::new(x, y),
            time,
            modifiers: Modifiers::NONE,
        }
    }

    /// Move without modifiers.
    pub fn moved(x: f32, y: f32) -> Self {
        Self::Move {
            pos: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Release.
    pub fn up(x: f32, y: f32) -> Self {
        Self::Up {
            pos: Point::new(x, y),
        }
    }

    /// Replace the modifiers of a `Down` or `Move` event.
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        match self {
            Self::Down { pos, time, .. } => Self::Down {
                pos,
                time,
                modifiers,
            },
            Self::Move { pos, .. } => Self::Move { pos, modifiers },
            other => other,
        }
    }
}

/// Interaction tuning constants.
///
/// The numbers are chosen for feel; hosts may override them (see the
/// `faderkit-config` crate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feel {
    /// Normalized value change per pixel of relative drag.
    pub sensitivity: f32,
    /// Multiplier applied to `sensitivity` while the fine modifier is held.
    pub fine_factor: f32,
    /// Maximum time between two presses counted as a double-tap (seconds).
    pub double_tap_window: f64,
    /// Maximum distance between two presses counted as a double-tap (pixels).
    pub double_tap_distance: f32,
    /// Hit radius for point handles (envelope nodes, filter point), pixels.
    pub handle_radius: f32,
    /// Movement below this distance (pixels) still counts as a click.
    pub drag_threshold: f32,
}

impl Default for Feel {
    fn default() -> Self {
        Self {
            sensitivity: 0.004,
            fine_factor: 0.1,
            double_tap_window: 0.3,
            double_tap_distance: 6.0,
            handle_radius: 10.0,
            drag_threshold: 3.0,
        }
    }
}

impl Feel {
    /// Effective per-pixel sensitivity for the given modifiers.
    pub fn sensitivity_for(&self, modifiers: Modifiers) -> f32 {
        if modifiers.fine {
            self.sensitivity * self.fine_factor
        } else {
            self.sensitivity
        }
    }
}

/// What to do with the value when the pointer is released.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SpringReturn {
    /// Keep the last dragged value.
    #[default]
    None,
    /// Snap to the middle of the range (normalized 0.5).
    Center,
    /// Snap to zero (clamped into the range).
    Zero,
    /// Snap to an explicit plain value (clamped into the range).
    To(f32),
}

impl SpringReturn {
    /// The plain value to snap to, or `None` when the policy is disabled.
    pub fn target(&self, range: &ParamRange) -> Option<f32> {
        match *self {
            Self::None => None,
            Self::Center => Some(range.center()),
            Self::Zero => Some(range.clamp(0.0)),
            Self::To(v) => Some(range.clamp(v)),
        }
    }
}

/// Transient state of one drag, created on press and dropped on release.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession<K, V> {
    /// Which sub-element is being dragged.
    pub target: K,
    /// Press position.
    pub origin: Point,
    /// Most recent pointer position.
    pub last: Point,
    /// Value at drag start.
    pub start_value: V,
    /// Most recently proposed value.
    pub current: V,
    /// Running normalized position for relative drags.
    pub progress: f32,
    /// Whether the pointer travelled past the drag threshold.
    pub moved: bool,
}

impl<K, V: Clone> DragSession<K, V> {
    /// Start a session at `origin`.
    pub fn new(target: K, origin: Point, start_value: V) -> Self {
        Self {
            target,
            origin,
            last: origin,
            current: start_value.clone(),
            start_value,
            progress: 0.0,
            moved: false,
        }
    }

    /// Record a pointer position, returning the step since the last one and
    /// updating `moved` against the drag threshold.
    pub fn advance(&mut self, pos: Point, feel: &Feel) -> (f32, f32) {
        let step = pos.delta_from(self.last);
        self.last = pos;
        if !self.moved && pos.distance(self.origin) > feel.drag_threshold {
            self.moved = true;
        }
        step
    }

    /// Total displacement since press.
    pub fn total_delta(&self, pos: Point) -> (f32, f32) {
        pos.delta_from(self.origin)
    }
}

/// Detects a second press close in time and space to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DoubleTap {
    last: Option<(f64, Point)>,
}

impl DoubleTap {
    /// Record a press. Returns `true` if it completes a double-tap, in which
    /// case the detector resets so a third press starts a new sequence.
    pub fn register(&mut self, time: f64, pos: Point, feel: &Feel) -> bool {
        if let Some((t, p)) = self.last {
            let dt = time - t;
            let close = pos.distance(p) <= feel.double_tap_distance;
            if close && (0.0..=feel.double_tap_window).contains(&dt) {
                self.last = None;
                return true;
            }
        }
        self.last = Some((time, pos));
        false
    }

    /// Forget the previous press.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Persistent per-control interaction state: the active session (if any)
/// plus the double-tap detector, which must outlive individual sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureState<K, V> {
    session: Option<DragSession<K, V>>,
    taps: DoubleTap,
}

impl<K, V> Default for GestureState<K, V> {
    fn default() -> Self {
        Self {
            session: None,
            taps: DoubleTap::default(),
        }
    }
}

impl<K: Copy + PartialEq, V: Clone> GestureState<K, V> {
    /// Idle state that remembers earlier presses.
    pub fn from_taps(taps: DoubleTap) -> Self {
        Self {
            session: None,
            taps,
        }
    }

    /// The double-tap detector, for storage while idle.
    pub fn taps(&self) -> DoubleTap {
        self.taps
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The sub-element being dragged.
    pub fn target(&self) -> Option<K> {
        self.session.as_ref().map(|s| s.target)
    }

    /// The active session.
    pub fn session(&self) -> Option<&DragSession<K, V>> {
        self.session.as_ref()
    }

    /// The active session, mutably.
    pub fn session_mut(&mut self) -> Option<&mut DragSession<K, V>> {
        self.session.as_mut()
    }

    /// Register a press with the double-tap detector.
    pub fn register_tap(&mut self, time: f64, pos: Point, feel: &Feel) -> bool {
        self.taps.register(time, pos, feel)
    }

    /// Begin a session, replacing any stale one, and return it.
    pub fn begin(&mut self, target: K, origin: Point, start_value: V) -> &mut DragSession<K, V> {
        #[cfg(feature = "tracing")]
        tracing::trace!(x = origin.x, y = origin.y, "drag session begin");
        self.session.insert(DragSession::new(target, origin, start_value))
    }

    /// End the session, returning it.
    pub fn end(&mut self) -> Option<DragSession<K, V>> {
        #[cfg(feature = "tracing")]
        if self.session.is_some() {
            tracing::trace!("drag session end");
        }
        self.session.take()
    }

    /// Drop the session and forget tap history.
    pub fn clear(&mut self) {
        self.session = None;
        self.taps.reset();
    }
}

/// Result of feeding one event to a control.
///
/// Mirrors the host gesture protocol: `began` opens an edit, `value`
/// carries a proposed (already clamped) value, `ended` closes the edit.
/// A double-tap reset produces all three at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<V> {
    /// An edit gesture started with this event.
    pub began: bool,
    /// Proposed new value.
    pub value: Option<V>,
    /// The edit gesture finished with this event.
    pub ended: bool,
}

impl<V> Default for Update<V> {
    fn default() -> Self {
        Self::none()
    }
}

impl<V> Update<V> {
    /// Nothing happened.
    pub const fn none() -> Self {
        Self {
            began: false,
            value: None,
            ended: false,
        }
    }

    /// An edit started without a value change yet.
    pub const fn began() -> Self {
        Self {
            began: true,
            value: None,
            ended: false,
        }
    }

    /// A value changed mid-gesture.
    pub const fn changed(value: V) -> Self {
        Self {
            began: false,
            value: Some(value),
            ended: false,
        }
    }

    /// An edit ended, optionally with a final value (spring return).
    pub const fn ended(value: Option<V>) -> Self {
        Self {
            began: false,
            value,
            ended: true,
        }
    }

    /// A complete one-shot edit: begin, value, end.
    pub const fn one_shot(value: V) -> Self {
        Self {
            began: true,
            value: Some(value),
            ended: true,
        }
    }

    /// Start an edit that already carries a value (absolute press).
    pub const fn began_with(value: V) -> Self {
        Self {
            began: true,
            value: Some(value),
            ended: false,
        }
    }

    /// Whether anything was reported.
    pub fn is_none(&self) -> bool {
        !self.began && self.value.is_none() && !self.ended
    }

    /// Transform the carried value.
    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> Update<U> {
        Update {
            began: self.began,
            value: self.value.map(f),
            ended: self.ended,
        }
    }
}

/// A pointer-driven control: pure interaction logic with no rendering.
///
/// Widgets keep the [`GestureState`] between frames and rebuild the control
/// around it, so configuration (geometry, limits) can change every frame.
pub trait Control {
    /// Identifies the draggable sub-element.
    type Target: Copy + PartialEq + Send + Sync + 'static;
    /// The value shape this control proposes.
    type Value: Clone + Send + Sync + 'static;

    /// Feed one event. `current` is the caller's value; it is read only on
    /// press, never during a drag.
    fn handle(&mut self, event: &PointerEvent, current: &Self::Value) -> Update<Self::Value>;

    /// Interaction state.
    fn gesture(&self) -> &GestureState<Self::Target, Self::Value>;

    /// Interaction state, mutably.
    fn gesture_mut(&mut self) -> &mut GestureState<Self::Target, Self::Value>;

    /// Whether a drag is in progress.
    fn is_dragging(&self) -> bool {
        self.gesture().is_dragging()
    }

    /// The sub-element being dragged.
    fn active_target(&self) -> Option<Self::Target> {
        self.gesture().target()
    }
}

/// Feed a whole event sequence and collect every non-empty update.
///
/// Convenience for hosts that batch events and for tests.
pub fn drive<C: Control>(
    control: &mut C,
    events: &[PointerEvent],
    current: &C::Value,
) -> alloc::vec::Vec<Update<C::Value>> {
    let mut value = current.clone();
    let mut out = alloc::vec::Vec::new();
    for event in events {
        let update = control.handle(event, &value);
        if let Some(v) = &update.value {
            value = v.clone();
        }
        if !update.is_none() {
            out.push(update);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_tap_within_window() {
        let feel = Feel::default();
        let mut taps = DoubleTap::default();
        assert!(!taps.register(1.0, Point::new(5.0, 5.0), &feel));
        assert!(taps.register(1.2, Point::new(6.0, 5.0), &feel));
        // Third press starts over.
        assert!(!taps.register(1.3, Point::new(6.0, 5.0), &feel));
    }

    #[test]
    fn double_tap_too_slow_or_too_far() {
        let feel = Feel::default();
        let mut taps = DoubleTap::default();
        assert!(!taps.register(1.0, Point::new(0.0, 0.0), &feel));
        assert!(!taps.register(1.5, Point::new(0.0, 0.0), &feel));
        assert!(!taps.register(1.6, Point::new(50.0, 0.0), &feel));
    }

    #[test]
    fn double_tap_ignores_clock_going_backwards() {
        let feel = Feel::default();
        let mut taps = DoubleTap::default();
        taps.register(2.0, Point::default(), &feel);
        assert!(!taps.register(1.9, Point::default(), &feel));
    }

    #[test]
    fn spring_return_targets() {
        let r = ParamRange::bipolar();
        assert_eq!(SpringReturn::Center.target(&r), Some(0.0));
        assert_eq!(SpringReturn::Zero.target(&ParamRange::new(2.0, 5.0)), Some(2.0));
        assert_eq!(SpringReturn::To(9.0).target(&r), Some(1.0));
        assert_eq!(SpringReturn::None.target(&r), None);
    }

    #[test]
    fn fine_modifier_scales_sensitivity() {
        let feel = Feel::default();
        let fine = Modifiers {
            fine: true,
            ..Modifiers::NONE
        };
        assert!((feel.sensitivity_for(fine) - 0.0004).abs() < 1e-9);
    }

    #[test]
    fn gesture_state_lifecycle() {
        let mut g: GestureState<u8, f32> = GestureState::default();
        assert!(!g.is_dragging());
        g.begin(3, Point::new(1.0, 2.0), 0.5);
        assert_eq!(g.target(), Some(3));
        let s = g.end().unwrap();
        assert_eq!(s.start_value, 0.5);
        assert!(!g.is_dragging());
    }

    #[test]
    fn tap_history_survives_idle_storage() {
        let feel = Feel::default();
        let mut g: GestureState<(), f32> = GestureState::default();
        assert!(!g.register_tap(1.0, Point::new(5.0, 5.0), &feel));
        let mut restored: GestureState<(), f32> = GestureState::from_taps(g.taps());
        assert!(restored.register_tap(1.1, Point::new(5.0, 6.0), &feel));
    }

    #[test]
    fn update_map_preserves_flags() {
        let u = Update::one_shot(2).map(|v| v * 10);
        assert!(u.began && u.ended);
        assert_eq!(u.value, Some(20));
    }
}
