//! Integration tests for faderkit-core.
//!
//! Exercises controllers together with listeners the way a host wires them:
//! events in, updates dispatched to a [`ListenerSet`], the host applying the
//! proposed value and feeding it back on the next press.

use std::cell::RefCell;
use std::rc::Rc;

use faderkit_core::{
    Adsr, AdsrLimits, Animation, Bounds, Control, ControlListener, EnvelopeControl, FaderControl,
    KnobControl, ListenerSet, ParamRange, ParamSpec, ParamUnit, PointerEvent, RingControl,
    ScopeBuffer, SpringReturn, TrackMode, Update, WaveShape, concentric_rings, decimate, drive,
};

/// Records the gesture protocol as strings.
struct Journal(Rc<RefCell<Vec<String>>>);

impl<T: std::fmt::Debug> ControlListener<T> for Journal {
    fn begin_edit(&mut self) {
        self.0.borrow_mut().push("begin".into());
    }

    fn changed(&mut self, value: &T) {
        self.0.borrow_mut().push(format!("{value:?}"));
    }

    fn end_edit(&mut self) {
        self.0.borrow_mut().push("end".into());
    }
}

/// Feed events one at a time, dispatching each update and applying the
/// proposal to the host-owned value.
fn host_loop<C: Control>(
    control: &mut C,
    listeners: &mut ListenerSet<C::Value>,
    value: &mut C::Value,
    events: &[PointerEvent],
) {
    for e in events {
        let update = control.handle(e, value);
        listeners.dispatch(&update);
        if let Some(v) = update.value {
            *value = v;
        }
    }
}

// ============================================================================
// Listener protocol
// ============================================================================

#[test]
fn pitch_wheel_gesture_protocol() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut listeners = ListenerSet::new();
    let _sub = listeners.subscribe(Journal(log.clone()));

    let mut wheel = FaderControl::new(ParamRange::bipolar(), Bounds::from_size(20.0, 100.0))
        .spring(SpringReturn::Center);
    let mut value = 0.0f32;
    host_loop(
        &mut wheel,
        &mut listeners,
        &mut value,
        &[
            PointerEvent::down(10.0, 50.0, 0.0),
            PointerEvent::moved(10.0, 0.0),
            PointerEvent::up(10.0, 0.0),
        ],
    );

    assert_eq!(*log.borrow(), ["begin", "0.0", "1.0", "0.0", "end"]);
    assert_eq!(value, 0.0);
}

#[test]
fn unsubscribed_listener_sees_nothing_further() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let mut listeners = ListenerSet::new();
    let sub = listeners.subscribe(move |v: &f32| sink.borrow_mut().push(*v));

    listeners.dispatch(&Update::changed(0.1));
    assert!(listeners.unsubscribe(sub));
    listeners.dispatch(&Update::changed(0.2));

    assert_eq!(*seen.borrow(), [0.1]);
}

// ============================================================================
// Envelope scenario
// ============================================================================

#[test]
fn envelope_attack_drag_scenario() {
    let limits = AdsrLimits::default();
    let bounds = Bounds::from_size(400.0, 120.0);
    let mut editor = EnvelopeControl::new(bounds, limits);
    let mut value = Adsr::new(100.0, 200.0, 0.7, 500.0);
    let attack = editor
        .layout()
        .handle(&value, faderkit_core::EnvelopeHandle::Attack);
    // 1500 ms is three quarters of the first zone.
    let target_x = bounds.x + 0.75 * editor.layout().zone_width();

    let proposals = Rc::new(RefCell::new(Vec::new()));
    let sink = proposals.clone();
    let mut listeners = ListenerSet::new();
    let _sub = listeners.subscribe(move |v: &Adsr| sink.borrow_mut().push(*v));

    host_loop(
        &mut editor,
        &mut listeners,
        &mut value,
        &[
            PointerEvent::down(attack.x, attack.y, 0.0),
            PointerEvent::moved(attack.x + 10.0, attack.y + 3.0),
            PointerEvent::moved(target_x, attack.y),
            PointerEvent::up(target_x, attack.y),
        ],
    );

    assert!((value.attack_ms - 1500.0).abs() < 1e-2);
    assert_eq!((value.decay_ms, value.sustain, value.release_ms), (200.0, 0.7, 500.0));
    for p in proposals.borrow().iter() {
        assert!(p.attack_ms <= limits.max_attack);
        assert_eq!(p.decay_ms, 200.0);
    }
}

#[test]
fn late_host_does_not_cause_snap_back() {
    // A host that never applies proposals mid-drag still sees a smooth drag:
    // controllers read the caller's value only on press.
    let mut fader = FaderControl::new(ParamRange::new(0.0, 10.0), Bounds::from_size(20.0, 100.0))
        .mode(TrackMode::Relative);
    let stale = 5.0f32;
    fader.handle(&PointerEvent::down(10.0, 50.0, 0.0), &stale);
    let a = fader.handle(&PointerEvent::moved(10.0, 40.0), &stale).value.unwrap();
    let b = fader.handle(&PointerEvent::moved(10.0, 30.0), &stale).value.unwrap();
    assert!((a - 6.0).abs() < 1e-4);
    assert!((b - 7.0).abs() < 1e-4);
}

// ============================================================================
// Rotary controls
// ============================================================================

#[test]
fn time_knob_formats_through_param_spec() {
    let spec = ParamSpec::time_ms("Release", "Rel", 1.0, 10_000.0, 300.0);
    let mut knob =
        KnobControl::new(spec.range, Bounds::from_size(48.0, 48.0)).default(spec.default);
    let ups = drive(
        &mut knob,
        &[
            PointerEvent::down(24.0, 24.0, 0.0),
            PointerEvent::up(24.0, 24.0),
            PointerEvent::down(24.0, 24.0, 0.1),
        ],
        &1200.0,
    );
    let reset = ups.last().and_then(|u| u.value).unwrap();
    assert_eq!(reset, 300.0);
    assert_eq!(spec.unit, ParamUnit::Milliseconds);
    assert_eq!(spec.format(1500.0), "1.50 s");
}

#[test]
fn nested_rings_edit_independently() {
    let center = faderkit_core::Point::new(60.0, 60.0);
    let mut rings = RingControl::new(center, concentric_rings(60.0, 3, 2.0, ParamRange::unit()));
    let mut values = vec![0.1, 0.2, 0.3];
    let mut listeners = ListenerSet::new();

    // Inner ring (0..20 px): press at 9 o'clock = 0.75 of a full turn.
    host_loop(
        &mut rings,
        &mut listeners,
        &mut values,
        &[PointerEvent::down(50.0, 60.0, 0.0), PointerEvent::up(50.0, 60.0)],
    );
    assert!((values[2] - 0.75).abs() < 1e-4);
    assert_eq!(&values[..2], &[0.1, 0.2]);
}

// ============================================================================
// Oscilloscope
// ============================================================================

#[test]
fn scope_animation_feeds_stable_window() {
    let mut anim = Animation::new();
    let mut buffer = ScopeBuffer::new(1024);
    let freq = 110.0f64;
    let sample_rate = 8000.0f64;
    let mut phase = 0.0f64;

    anim.start();
    for frame in 0..10 {
        let now = f64::from(frame) / 60.0;
        let Some(dt) = anim.tick(now) else {
            break;
        };
        let n = (dt * sample_rate) as usize;
        for _ in 0..n {
            buffer.push(WaveShape::Sine.sample(phase as f32, 0.5));
            phase = (phase + freq / sample_rate).fract();
        }
    }
    anim.stop();
    assert!(anim.tick(1.0).is_none());

    let window = buffer.snapshot(128);
    assert_eq!(window.len(), 128);
    // Triggered on a rising zero crossing.
    assert!(window[0] >= 0.0 && window[0] < 0.2);
    assert!(window[1] > window[0]);

    let points = decimate(&window, 32);
    assert_eq!(points.len(), 32);
}
