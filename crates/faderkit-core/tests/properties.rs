//! Property-based tests for faderkit-core controllers.
//!
//! Random drag sequences are fed through each controller and the reported
//! values are checked against their declared domains, spring-return and
//! scaling laws, and the structural invariants of the value records.

use faderkit_core::{
    Adsr, AdsrLimits, Bounds, EnvelopeControl, EnvelopeHandle, FaderControl, KnobControl,
    MatrixControl, ModMatrix, ParamRange, PointerEvent, Scale, SegmentWeights, SpringReturn,
    StepPattern, TrackMode, XyPadControl, XyValue, drive,
};
use proptest::prelude::*;

/// A press followed by moves and a release, all in a 200 x 200 px box
/// (moves may leave it).
fn drag_events(press: (f32, f32), moves: &[(f32, f32)]) -> Vec<PointerEvent> {
    let mut events = vec![PointerEvent::down(press.0, press.1, 0.0)];
    events.extend(moves.iter().map(|&(x, y)| PointerEvent::moved(x, y)));
    let end = moves.last().copied().unwrap_or(press);
    events.push(PointerEvent::up(end.0, end.1));
    events
}

fn moves() -> impl Strategy<Value = Vec<(f32, f32)>> {
    prop::collection::vec((-400.0f32..600.0, -400.0f32..600.0), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Every value a fader reports stays inside its range, for both modes
    /// and any scale.
    #[test]
    fn fader_values_in_domain(
        min in -100.0f32..100.0,
        span in 0.0f32..1000.0,
        relative in any::<bool>(),
        press in (0.0f32..40.0, 0.0f32..200.0),
        moves in moves(),
        start in -1000.0f32..1000.0,
    ) {
        let range = ParamRange::new(min, min + span);
        let mode = if relative { TrackMode::Relative } else { TrackMode::Absolute };
        let mut c = FaderControl::new(range, Bounds::from_size(40.0, 200.0)).mode(mode);
        for u in drive(&mut c, &drag_events(press, &moves), &start) {
            if let Some(v) = u.value {
                prop_assert!(range.contains(v), "{v} outside [{}, {}]", range.min, range.max);
            }
        }
    }

    /// Releasing a center-spring control reports exactly the center last.
    #[test]
    fn spring_center_is_last_report(
        press in (0.0f32..40.0, 0.0f32..200.0),
        moves in moves(),
        start in -1.0f32..1.0,
    ) {
        let range = ParamRange::bipolar();
        let mut c = FaderControl::new(range, Bounds::from_size(40.0, 200.0))
            .spring(SpringReturn::Center);
        let ups = drive(&mut c, &drag_events(press, &moves), &start);
        let last = ups.last().unwrap();
        prop_assert!(last.ended);
        prop_assert_eq!(last.value, Some(range.center()));
    }

    /// Linear relative drag: value delta = pixel delta / track length x span,
    /// wherever the drag starts (away from the ends).
    #[test]
    fn linear_delta_proportional(
        start in 20.0f32..80.0,
        dy in -10.0f32..10.0,
        length in 100.0f32..400.0,
    ) {
        let range = ParamRange::new(0.0, 100.0);
        let mut c = FaderControl::new(range, Bounds::from_size(20.0, length))
            .mode(TrackMode::Relative);
        let y0 = length * 0.5;
        let ups = drive(
            &mut c,
            &[PointerEvent::down(10.0, y0, 0.0), PointerEvent::moved(10.0, y0 + dy)],
            &start,
        );
        let v = ups.last().and_then(|u| u.value).unwrap();
        let expected = start - dy / length * range.span();
        prop_assert!((v - expected).abs() < 1e-2, "{v} vs {expected}");
    }

    /// Logarithmic knob: the ratio new / old depends only on the pixel delta.
    #[test]
    fn log_ratio_independent_of_start(
        a in 10.0f32..100.0,
        b in 10.0f32..100.0,
        dy in -40.0f32..40.0,
    ) {
        let range = ParamRange::new(1.0, 10_000.0).with_scale(Scale::Logarithmic);
        let ratio = |start: f32| {
            let mut k = KnobControl::new(range, Bounds::from_size(60.0, 60.0));
            let ups = drive(
                &mut k,
                &[PointerEvent::down(30.0, 30.0, 0.0), PointerEvent::moved(30.0, 30.0 + dy)],
                &start,
            );
            ups.last().and_then(|u| u.value).unwrap() / start
        };
        let (ra, rb) = (ratio(a), ratio(b));
        prop_assert!((ra - rb).abs() / ra < 1e-3, "{ra} vs {rb}");
    }

    /// Envelope drags keep sustain in [0, 1] and every time within its limit.
    #[test]
    fn envelope_values_in_domain(
        handle in 0usize..4,
        moves in moves(),
        attack in 0.0f32..2000.0,
        decay in 0.0f32..2000.0,
        sustain in 0.0f32..1.0,
        release in 0.0f32..5000.0,
    ) {
        let limits = AdsrLimits::default();
        let start = Adsr::new(attack, decay, sustain, release);
        let mut c = EnvelopeControl::new(Bounds::from_size(400.0, 200.0), limits);
        let press = c.layout().handle(&start, EnvelopeHandle::ALL[handle]);
        for u in drive(&mut c, &drag_events((press.x, press.y), &moves), &start) {
            if let Some(v) = u.value {
                prop_assert!(limits.contains(&v), "{v:?}");
            }
        }
    }

    /// XY values stay in the unit square.
    #[test]
    fn xy_values_in_unit_square(press in (0.0f32..200.0, 0.0f32..200.0), moves in moves()) {
        let mut c = XyPadControl::new(Bounds::from_size(200.0, 200.0));
        for u in drive(&mut c, &drag_events(press, &moves), &XyValue::CENTER) {
            if let Some(v) = u.value {
                prop_assert!((0.0..=1.0).contains(&v.x) && (0.0..=1.0).contains(&v.y));
            }
        }
    }

    /// Segment weights sum to one and respect the minimum after any divider move.
    #[test]
    fn segment_weights_sum_to_one(
        raw in prop::collection::vec(0.0f32..10.0, 1..8),
        min in 0.0f32..0.2,
        edits in prop::collection::vec((0usize..8, -0.5f32..1.5), 0..16),
    ) {
        let mut w = SegmentWeights::from_weights(raw, min);
        for (i, pos) in edits {
            w.set_divider(i, pos);
            let sum: f32 = w.weights().iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-4, "sum {sum}");
            for &x in w.weights() {
                prop_assert!(x >= w.min_weight() - 1e-5, "{x} below {}", w.min_weight());
            }
        }
    }

    /// Pattern operations never change the length.
    #[test]
    fn pattern_length_preserved(
        len in 1usize..=64,
        ops in prop::collection::vec((0usize..6, 0usize..80, -2.0f32..2.0), 0..32),
    ) {
        let mut p = StepPattern::new(len);
        for (op, i, x) in ops {
            match op {
                0 => { p.toggle(i); }
                1 => { p.set_velocity(i, x); }
                2 => { p.set_probability(i, x); }
                3 => { p.toggle_accent(i); }
                4 => { p.rotate(i as isize - 40); }
                _ => { p.clear(); }
            }
            prop_assert_eq!(p.len(), len);
        }
        for s in p.steps() {
            prop_assert!((0.0..=1.0).contains(&s.velocity));
            prop_assert!((0.0..=1.0).contains(&s.probability));
        }
    }

    /// Matrix drags keep one route per cell and amounts in [-1, 1].
    #[test]
    fn matrix_one_route_per_cell(
        presses in prop::collection::vec((0.0f32..100.0, 0.0f32..100.0, -300.0f32..300.0), 1..12),
    ) {
        let mut m = ModMatrix::new();
        for (x, y, dy) in presses {
            let mut c = MatrixControl::new(Bounds::from_size(100.0, 100.0), 4, 4);
            let ups = drive(
                &mut c,
                &[
                    PointerEvent::down(x, y, 0.0),
                    PointerEvent::moved(x, y + dy),
                    PointerEvent::up(x, y + dy),
                ],
                &m,
            );
            if let Some(next) = ups.iter().rev().find_map(|u| u.value.clone()) {
                m = next;
            }
        }
        let routes = m.routes();
        for (i, a) in routes.iter().enumerate() {
            prop_assert!((-1.0..=1.0).contains(&a.amount));
            for b in &routes[i + 1..] {
                prop_assert!(a.source != b.source || a.destination != b.destination);
            }
        }
    }
}
