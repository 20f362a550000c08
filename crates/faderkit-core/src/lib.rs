//! faderkit Core - interaction math for synth UI controls
//!
//! This crate turns pointer gestures into parameter values. It knows nothing
//! about rendering: every control here is a pure state machine that receives
//! widget-local [`PointerEvent`]s and proposes clamped values through
//! [`Update`]s. The `faderkit-widgets` crate draws them with egui.
//!
//! # Core Abstractions
//!
//! ## Values and Scales
//!
//! - [`ParamRange`] / [`Scale`] - normalization (linear, logarithmic, power)
//! - [`ParamSpec`] / [`ParamUnit`] - named parameters with display formatting
//!
//! ## Geometry
//!
//! - [`Point`], [`Bounds`] - widget-local coordinates, y down
//! - [`Arc`] - angle ↔ value mapping for knobs and rings
//!
//! ## Gestures
//!
//! - [`Control`] - the controller trait
//! - [`GestureState`] / [`DragSession`] - `Idle ↔ Dragging(target)`
//! - [`Feel`] - tunable interaction constants
//! - [`SpringReturn`] - snap-back on release
//! - [`ListenerSet`] - observers with explicit unsubscribe
//!
//! ## Controllers
//!
//! See [`controls`]: fader, knob, rings, envelope, XY and drum pads, step
//! sequencer, modulation matrix, segment bar, filter pad, waveform.
//!
//! ## Oscilloscope
//!
//! - [`ScopeBuffer`] - triggered sample ring
//! - [`Animation`] - host-owned frame clock
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! faderkit-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use faderkit_core::{Bounds, Control, FaderControl, ParamRange, PointerEvent, SpringReturn};
//!
//! // A 100 px pitch wheel that springs back to center.
//! let mut wheel = FaderControl::new(ParamRange::bipolar(), Bounds::from_size(20.0, 100.0))
//!     .spring(SpringReturn::Center);
//!
//! let pressed = wheel.handle(&PointerEvent::down(10.0, 25.0, 0.0), &0.0);
//! assert_eq!(pressed.value, Some(0.5));
//!
//! let released = wheel.handle(&PointerEvent::up(10.0, 25.0), &0.5);
//! assert!(released.ended);
//! assert_eq!(released.value, Some(0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod controls;
pub mod geometry;
pub mod gesture;
pub mod listener;
pub mod param;
pub mod scale;
pub mod scope;

// Re-export main types at crate root
pub use controls::{
    Adsr, AdsrLimits, DestinationId, EnvelopeControl, EnvelopeHandle, EnvelopeLayout, FLAT_Q,
    FaderControl, FilterControl, FilterPoint, KnobControl, KnobDrag, MAX_STEPS, MatrixCell,
    MatrixControl, ModMatrix, ModRoute, Orientation, PadGridControl, PadHit, PulseWidthBounds,
    Ring, RingControl, SegmentControl, SegmentWeights, SequencerControl, SourceId, Step, StepDrag,
    StepPattern, TrackMode, VelocityCurve, WaveSelection, WaveShape, XyPadControl, XyValue,
    concentric_rings,
};
pub use geometry::{Arc, Bounds, Point, wrap_angle};
pub use gesture::{
    Control, DoubleTap, DragSession, Feel, GestureState, Modifiers, PointerEvent, SpringReturn,
    Update, drive,
};
pub use listener::{ControlListener, ListenerSet, Subscription};
pub use param::{ParamSpec, ParamUnit};
pub use scale::{
    ParamRange, Scale, bipolar_to_unipolar, clamp_bipolar, clamp_unit, safe_div,
    unipolar_to_bipolar,
};
pub use scope::{Animation, ScopeBuffer, decimate};
