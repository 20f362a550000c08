//! Headless frames through egui: widgets render, propose only on input, and
//! report the gesture protocol to listeners.

use std::cell::RefCell;
use std::rc::Rc;

use egui::{CentralPanel, Context, Event, Key, PointerButton, Pos2, RawInput, Ui, pos2};
use faderkit_core::{
    Adsr, Animation, ControlListener, FilterPoint, ListenerSet, ModMatrix, ParamRange, ScopeBuffer,
    SegmentWeights, StepPattern, WaveSelection, XyValue,
};
use faderkit_widgets::{
    DrumPad, EnvelopeEditor, Fader, FilterCurve, Knob, LevelMeter, ModMatrixGrid, ModWheel,
    Oscilloscope, PitchWheel, RingKnob, SegmentBar, StepSequencer, Theme, TimeKnob, Toggle,
    WaveSelector, XyPad,
};

fn frame<R>(ctx: &Context, events: Vec<Event>, add: impl FnMut(&mut Ui) -> R) -> R {
    run(
        ctx,
        RawInput {
            events,
            ..RawInput::default()
        },
        add,
    )
}

/// A frame stamped with an explicit clock, for timing-sensitive gestures.
fn frame_at<R>(
    ctx: &Context,
    time: f64,
    events: Vec<Event>,
    add: impl FnMut(&mut Ui) -> R,
) -> R {
    run(
        ctx,
        RawInput {
            events,
            time: Some(time),
            ..RawInput::default()
        },
        add,
    )
}

fn run<R>(ctx: &Context, input: RawInput, mut add: impl FnMut(&mut Ui) -> R) -> R {
    let mut out = None;
    let _ = ctx.run(input, |ctx| {
        CentralPanel::default().show(ctx, |ui| {
            out = Some(add(ui));
        });
    });
    out.expect("frame ran")
}

fn press(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: egui::Modifiers::NONE,
    }
}

fn escape() -> Event {
    Event::Key {
        key: Key::Escape,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::NONE,
    }
}

struct Recorder(Rc<RefCell<Vec<String>>>);

impl ControlListener<f32> for Recorder {
    fn begin_edit(&mut self) {
        self.0.borrow_mut().push("begin".into());
    }

    fn changed(&mut self, value: &f32) {
        self.0.borrow_mut().push(format!("changed {value:.2}"));
    }

    fn end_edit(&mut self) {
        self.0.borrow_mut().push("end".into());
    }
}

#[test]
fn every_widget_renders_without_proposing() {
    let ctx = Context::default();
    Theme::default().apply(&ctx);

    let rings = [0.2, 0.5, 0.8];
    let pattern = StepPattern::new(16);
    let matrix = ModMatrix::new();
    let weights = SegmentWeights::equal(3, 0.05);
    let mut buffer = ScopeBuffer::new(1024);
    buffer.extend((0..1024).map(|i| (i as f32 * 0.05).sin()));
    let animation = Animation::new();

    let changed = frame(&ctx, Vec::new(), |ui| {
        [
            Knob::new(0.5, ParamRange::unit(), "Knob").show(ui).changed(),
            TimeKnob::new(100.0, 1.0, 5000.0, "Time").show(ui).changed(),
            RingKnob::new(&rings, ParamRange::unit()).show(ui).changed(),
            Fader::new(0.5, ParamRange::unit(), "Fader").show(ui).changed(),
            PitchWheel::new(0.0).show(ui).changed(),
            ModWheel::new(0.3).show(ui).changed(),
            XyPad::new(XyValue::CENTER, "XY").show(ui).changed(),
            DrumPad::new(4, 2).show(ui).changed(),
            EnvelopeEditor::new(Adsr::default()).show(ui).changed(),
            StepSequencer::new(&pattern).show(ui).changed(),
            ModMatrixGrid::new(&matrix, &["LFO", "Env"], &["Cut", "Pitch"]).show(ui).changed(),
            SegmentBar::new(&weights).show(ui).changed(),
            FilterCurve::new(FilterPoint::default()).show(ui).changed(),
            WaveSelector::new(WaveSelection::default()).show(ui).changed(),
            Oscilloscope::new(&buffer).animation(&animation).show(ui).changed(),
            LevelMeter::new(0.8, 0.5).label("Out").show(ui).changed(),
            Toggle::new(true, "On").show(ui).changed(),
        ]
    });
    assert!(changed.iter().all(|c| !c), "unexpected proposal: {changed:?}");
}

#[test]
fn fader_press_proposes_and_release_ends() {
    let ctx = Context::default();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut listeners = ListenerSet::new();
    let _sub = listeners.subscribe(Recorder(log.clone()));

    let value = 0.2f32;
    let fader = |ui: &mut Ui, listeners: &mut ListenerSet<f32>| {
        Fader::new(value, ParamRange::unit(), "Level")
            .size(100.0, 28.0)
            .listeners(listeners)
            .show(ui)
    };

    let rect = frame(&ctx, Vec::new(), |ui| fader(ui, &mut listeners).response.rect);
    // Track starts at the top of the widget; a quarter down is 0.75.
    let target = pos2(rect.center().x, rect.top() + 25.0);

    frame(&ctx, vec![Event::PointerMoved(target)], |ui| {
        assert!(!fader(ui, &mut listeners).changed());
    });

    let pressed = frame(&ctx, vec![press(target, true)], |ui| {
        let r = fader(ui, &mut listeners);
        (r.began, r.proposed)
    });
    assert!(pressed.0);
    let proposed = pressed.1.expect("press proposes the pointer value");
    assert!((proposed - 0.75).abs() < 0.02, "proposed {proposed}");

    let released = frame(&ctx, vec![press(target, false)], |ui| {
        let r = fader(ui, &mut listeners);
        (r.ended, r.proposed)
    });
    assert_eq!(released, (true, None));

    // The caller's value is untouched; only the proposal moved.
    assert_eq!(value, 0.2);
    assert_eq!(log.borrow().first().map(String::as_str), Some("begin"));
    assert_eq!(log.borrow().last().map(String::as_str), Some("end"));
}

#[test]
fn fader_double_click_proposes_default() {
    let ctx = Context::default();
    let fader = |ui: &mut Ui| {
        Fader::new(0.5, ParamRange::unit(), "Level")
            .default(0.2)
            .size(100.0, 28.0)
            .show(ui)
    };

    let rect = frame_at(&ctx, 0.0, Vec::new(), |ui| fader(ui).response.rect);
    let at = pos2(rect.center().x, rect.top() + 25.0);
    frame_at(&ctx, 0.02, vec![Event::PointerMoved(at)], fader);
    frame_at(&ctx, 0.04, vec![press(at, true)], fader);
    frame_at(&ctx, 0.08, vec![press(at, false)], fader);

    let second = frame_at(&ctx, 0.12, vec![press(at, true)], |ui| {
        let r = fader(ui);
        (r.began, r.ended, r.proposed)
    });
    assert_eq!(second, (true, true, Some(0.2)));
}

#[test]
fn pitch_wheel_release_springs_to_center() {
    let ctx = Context::default();
    let rect = frame(&ctx, Vec::new(), |ui| PitchWheel::new(0.4).show(ui).response.rect);
    let at = rect.center();

    frame(&ctx, vec![Event::PointerMoved(at)], |ui| PitchWheel::new(0.4).show(ui));
    let began = frame(&ctx, vec![press(at, true)], |ui| PitchWheel::new(0.4).show(ui).began);
    assert!(began);

    let released = frame(&ctx, vec![press(at, false)], |ui| {
        let r = PitchWheel::new(0.4).show(ui);
        (r.ended, r.proposed)
    });
    assert_eq!(released, (true, Some(0.0)));
}

#[test]
fn escape_cancels_a_live_drag() {
    let ctx = Context::default();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut listeners = ListenerSet::new();
    let _sub = listeners.subscribe(Recorder(log.clone()));

    let fader = |ui: &mut Ui, listeners: &mut ListenerSet<f32>| {
        Fader::new(0.2, ParamRange::unit(), "Level")
            .size(100.0, 28.0)
            .listeners(listeners)
            .show(ui)
    };

    let rect = frame(&ctx, Vec::new(), |ui| fader(ui, &mut listeners).response.rect);
    let at = pos2(rect.center().x, rect.top() + 25.0);
    frame(&ctx, vec![Event::PointerMoved(at)], |ui| fader(ui, &mut listeners));
    let began = frame(&ctx, vec![press(at, true)], |ui| fader(ui, &mut listeners).began);
    assert!(began);

    // Button still held; Escape alone ends the gesture.
    let cancelled = frame(&ctx, vec![escape()], |ui| fader(ui, &mut listeners).ended);
    assert!(cancelled);
    assert_eq!(log.borrow().last().map(String::as_str), Some("end"));

    let after = frame(&ctx, vec![press(at, false)], |ui| {
        let r = fader(ui, &mut listeners);
        (r.began, r.ended, r.proposed)
    });
    assert_eq!(after, (false, false, None));
    assert_eq!(log.borrow().iter().filter(|e| *e == "end").count(), 1);
}

#[test]
fn toggle_click_proposes_the_opposite() {
    let ctx = Context::default();
    let rect = frame(&ctx, Vec::new(), |ui| Toggle::new(false, "Run").show(ui).response.rect);
    let at = rect.center();

    let toggle = |ui: &mut Ui| Toggle::new(false, "Run").show(ui).changed();
    frame(&ctx, vec![Event::PointerMoved(at)], toggle);
    frame(&ctx, vec![press(at, true)], toggle);
    let proposed = frame(&ctx, vec![press(at, false)], |ui| {
        Toggle::new(false, "Run").show(ui).proposed
    });
    assert_eq!(proposed, Some(true));
}

#[test]
fn applied_theme_reaches_widgets() {
    let ctx = Context::default();
    let theme = Theme {
        stroke_width: 3.5,
        ..Theme::default()
    };
    theme.apply(&ctx);
    let seen = frame(&ctx, Vec::new(), |ui| Theme::current(ui.ctx()).stroke_width);
    assert_eq!(seen, 3.5);
}
