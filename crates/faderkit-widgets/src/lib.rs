//! egui widgets for synth-style controls.
//!
//! Every widget draws a value it does not own and runs one of the
//! `faderkit-core` controllers against the frame's pointer input. The
//! result is a [`ControlResponse`]: the egui response plus the proposed
//! new value and the gesture's begin/end flags.
//!
//! ```rust,no_run
//! # fn ui(ui: &mut egui::Ui, cutoff: &mut f32) {
//! use faderkit_core::{ParamRange, ParamUnit, Scale};
//! use faderkit_widgets::Knob;
//!
//! let range = ParamRange::new(20.0, 20_000.0).with_scale(Scale::Logarithmic);
//! Knob::new(*cutoff, range, "Cutoff")
//!     .unit(ParamUnit::Hertz)
//!     .show(ui)
//!     .apply(cutoff);
//! # }
//! ```
//!
//! # Modules
//!
//! - [`theme`] - Colors and spacing from configured design tokens
//! - [`widgets`] - Knobs, faders, wheels, pads, envelope, sequencer, matrix,
//!   segment bar, filter pad, wave selector, oscilloscope, meter, toggle
//!
//! Interaction constants ([`Feel`](faderkit_core::Feel)) are installed per
//! context with [`install_feel`]; widgets can still override them one by one.

mod interact;
mod paint;
pub mod theme;
pub mod widgets;

pub use interact::{ControlResponse, current_feel, install_feel};
pub use theme::Theme;
pub use widgets::{
    DrumPad, EnvelopeEditor, Fader, FilterCurve, Knob, LevelMeter, ModMatrixGrid, ModWheel,
    Oscilloscope, PitchWheel, RingKnob, SegmentBar, StepSequencer, TimeKnob, Toggle, WaveSelector,
    XyPad,
};
