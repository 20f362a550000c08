//! Per-widget controllers.
//!
//! Each controller implements [`Control`](crate::Control): it owns its
//! geometry and a [`GestureState`](crate::GestureState), turns pointer events
//! into clamped value proposals, and never renders anything.
//!
//! | Controller | Value | Used by |
//! |------------|-------|---------|
//! | [`FaderControl`] | `f32` | sliders, pitch and mod wheels |
//! | [`KnobControl`] | `f32` | knobs, time knobs |
//! | [`RingControl`] | `Vec<f32>` | nested circular sliders |
//! | [`EnvelopeControl`] | [`Adsr`] | envelope editor |
//! | [`XyPadControl`] | [`XyValue`] | XY pad |
//! | [`PadGridControl`] | [`PadHit`] | drum pads |
//! | [`SequencerControl`] | [`StepPattern`] | step sequencer |
//! | [`MatrixControl`] | [`ModMatrix`] | modulation matrix |
//! | [`SegmentControl`] | [`SegmentWeights`] | mix / split bars |
//! | [`FilterControl`] | [`FilterPoint`] | filter curve |

pub mod envelope;
pub mod fader;
pub mod filter;
pub mod matrix;
pub mod pad;
pub mod rotary;
pub mod segments;
pub mod sequencer;
pub mod wave;

pub use envelope::{Adsr, AdsrLimits, EnvelopeControl, EnvelopeHandle, EnvelopeLayout};
pub use fader::{FaderControl, Orientation, TrackMode};
pub use filter::{FLAT_Q, FilterControl, FilterPoint};
pub use matrix::{DestinationId, MatrixCell, MatrixControl, ModMatrix, ModRoute, SourceId};
pub use pad::{PadGridControl, PadHit, VelocityCurve, XyPadControl, XyValue};
pub use rotary::{KnobControl, KnobDrag, Ring, RingControl, concentric_rings};
pub use segments::{SegmentControl, SegmentWeights};
pub use sequencer::{MAX_STEPS, SequencerControl, Step, StepDrag, StepPattern};
pub use wave::{PulseWidthBounds, WaveSelection, WaveShape};
