//! egui input → controller events, and what widgets hand back.
//!
//! Every widget rebuilds its `faderkit-core` controller each frame, restores
//! the drag session from egui temp memory, feeds it the frame's pointer
//! input as [`PointerEvent`]s and stores the session again while a drag is
//! live. On release or cancel the session entry is removed; only the
//! double-tap history stays behind.
//!
//! The gesture protocol reaches hosts twice: as [`ControlResponse`] flags
//! and, when the widget was given a [`ListenerSet`], as
//! `begin_edit` → `changed` → `end_edit` calls.

use egui::{Context, Id, Key, PointerButton, Pos2, Response, Ui};
use faderkit_core::{
    Control, DoubleTap, Feel, GestureState, ListenerSet, Modifiers, Point, PointerEvent, Update,
};

/// A widget's egui response plus the value it proposes.
///
/// The caller owns the value: a widget never writes it, it only proposes.
#[derive(Debug)]
pub struct ControlResponse<T> {
    /// The egui response of the widget's area. Marked changed when a value
    /// was proposed.
    pub response: Response,
    /// Proposed new value, already clamped to the widget's domain.
    pub proposed: Option<T>,
    /// An edit gesture started this frame.
    pub began: bool,
    /// An edit gesture finished this frame.
    pub ended: bool,
}

impl<T> ControlResponse<T> {
    pub(crate) fn new(mut response: Response, update: Update<T>) -> Self {
        if update.value.is_some() {
            response.mark_changed();
        }
        Self {
            response,
            proposed: update.value,
            began: update.began,
            ended: update.ended,
        }
    }

    /// A response that proposes nothing.
    pub(crate) fn idle(response: Response) -> Self {
        Self::new(response, Update::none())
    }

    /// Whether a value was proposed.
    pub fn changed(&self) -> bool {
        self.proposed.is_some()
    }

    /// Accept the proposal into `value`. Returns whether it changed.
    pub fn apply(self, value: &mut T) -> bool {
        match self.proposed {
            Some(v) => {
                *value = v;
                true
            }
            None => false,
        }
    }

    /// The frame's gesture report as a core [`Update`].
    pub fn update(&self) -> Update<T>
    where
        T: Clone,
    {
        Update {
            began: self.began,
            value: self.proposed.clone(),
            ended: self.ended,
        }
    }
}

fn feel_id() -> Id {
    Id::new("faderkit_feel")
}

/// Make `feel` the interaction constants of every widget on `ctx`.
pub fn install_feel(ctx: &Context, feel: Feel) {
    ctx.data_mut(|d| d.insert_temp(feel_id(), feel));
}

/// The installed interaction constants, or the defaults.
pub fn current_feel(ctx: &Context) -> Feel {
    ctx.data(|d| d.get_temp::<Feel>(feel_id())).unwrap_or_default()
}

/// One frame of pointer input relative to a widget origin.
#[derive(Debug, Clone, Copy)]
struct PointerFrame {
    pos: Option<Point>,
    pressed: bool,
    released: bool,
    any_down: bool,
    moved: bool,
    escape: bool,
    time: f64,
    modifiers: Modifiers,
}

impl PointerFrame {
    fn read(ui: &Ui, origin: Pos2) -> Self {
        ui.input(|i| Self {
            pos: i
                .pointer
                .interact_pos()
                .map(|p| Point::new(p.x - origin.x, p.y - origin.y)),
            pressed: i.pointer.any_pressed(),
            released: i.pointer.any_released(),
            any_down: i.pointer.any_down(),
            moved: i.pointer.delta() != egui::Vec2::ZERO,
            escape: i.key_pressed(Key::Escape),
            time: i.time,
            modifiers: Modifiers {
                fine: i.modifiers.shift,
                alt: i.modifiers.alt,
                secondary: i.pointer.button_down(PointerButton::Secondary) || i.modifiers.command,
            },
        })
    }
}

fn merge<V>(acc: &mut Update<V>, next: Update<V>) {
    acc.began |= next.began;
    acc.ended |= next.ended;
    if next.value.is_some() {
        acc.value = next.value;
    }
}

/// Run one frame of interaction for `control` over the widget whose
/// response is `response` and whose local origin is `origin`.
///
/// `current` is the caller's value; controllers read it only on press.
pub(crate) fn drive_control<C: Control>(
    ui: &Ui,
    response: &Response,
    origin: Pos2,
    control: &mut C,
    current: &C::Value,
    listeners: Option<&mut ListenerSet<C::Value>>,
) -> Update<C::Value> {
    let session_id = response.id.with("faderkit_session");
    let taps_id = response.id.with("faderkit_taps");

    let stored = ui.data(|d| d.get_temp::<GestureState<C::Target, C::Value>>(session_id));
    let resumed = stored.is_some();
    *control.gesture_mut() = match stored {
        Some(state) => state,
        None => GestureState::from_taps(
            ui.data(|d| d.get_temp::<DoubleTap>(taps_id))
                .unwrap_or_default(),
        ),
    };

    let frame = PointerFrame::read(ui, origin);
    let mut events: Vec<PointerEvent> = Vec::with_capacity(2);
    let mut just_pressed = false;
    if !control.is_dragging()
        && frame.pressed
        && response.is_pointer_button_down_on()
        && let Some(pos) = frame.pos
    {
        events.push(PointerEvent::Down {
            pos,
            time: frame.time,
            modifiers: frame.modifiers,
        });
        just_pressed = true;
    }

    let mut update = Update::none();
    let mut value = current.clone();
    for event in events.drain(..) {
        let next = control.handle(&event, &value);
        if let Some(v) = &next.value {
            value = v.clone();
        }
        merge(&mut update, next);
    }

    if control.is_dragging() {
        match frame.pos {
            _ if frame.escape => events.push(PointerEvent::Cancel),
            None => events.push(PointerEvent::Cancel),
            Some(pos) => {
                if frame.moved && !just_pressed {
                    events.push(PointerEvent::Move {
                        pos,
                        modifiers: frame.modifiers,
                    });
                }
                if frame.released || !frame.any_down {
                    events.push(PointerEvent::Up { pos });
                }
            }
        }
        if events.contains(&PointerEvent::Cancel) {
            tracing::debug!(id = ?response.id, "gesture cancelled");
        }
        for event in &events {
            let next = control.handle(event, &value);
            if let Some(v) = &next.value {
                value = v.clone();
            }
            merge(&mut update, next);
        }
    }

    if update.began {
        tracing::debug!(id = ?response.id, "gesture begin");
    }
    if update.ended {
        tracing::debug!(id = ?response.id, "gesture end");
    }

    if resumed || !update.is_none() || just_pressed {
        let dragging = control.is_dragging();
        let gesture = control.gesture().clone();
        ui.data_mut(|d| {
            if dragging {
                d.insert_temp(session_id, gesture);
                d.remove::<DoubleTap>(taps_id);
            } else {
                d.remove::<GestureState<C::Target, C::Value>>(session_id);
                d.insert_temp(taps_id, gesture.taps());
            }
        });
    }

    if let Some(listeners) = listeners {
        listeners.dispatch(&update);
    }
    update
}
