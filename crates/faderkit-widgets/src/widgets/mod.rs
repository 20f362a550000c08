//! The widget set.
//!
//! Every widget takes the caller's value by value or by reference, draws
//! it, and returns a [`ControlResponse`](crate::ControlResponse) carrying
//! the proposed replacement. Each one also implements [`egui::Widget`] for
//! `ui.add(...)` when only the egui response matters.

/// Implement [`egui::Widget`] by forwarding to the widget's `show`.
///
/// ```rust,ignore
/// impl_widget!(Knob<'_>);
/// ```
macro_rules! impl_widget {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl egui::Widget for $ty {
                fn ui(self, ui: &mut egui::Ui) -> egui::Response {
                    self.show(ui).response
                }
            }
        )+
    };
}

pub(crate) use impl_widget;

/// Text for a value with an optional custom formatter.
pub(crate) type Formatter<'a> = Option<Box<dyn Fn(f32) -> String + 'a>>;

mod envelope;
mod fader;
mod filter;
mod knob;
mod matrix;
mod meter;
mod pad;
mod scope;
mod segment;
mod sequencer;
mod toggle;
mod wave;

pub use envelope::EnvelopeEditor;
pub use fader::{Fader, ModWheel, PitchWheel};
pub use filter::FilterCurve;
pub use knob::{Knob, RingKnob, TimeKnob};
pub use matrix::ModMatrixGrid;
pub use meter::LevelMeter;
pub use pad::{DrumPad, XyPad};
pub use scope::Oscilloscope;
pub use segment::SegmentBar;
pub use sequencer::StepSequencer;
pub use toggle::Toggle;
pub use wave::WaveSelector;
