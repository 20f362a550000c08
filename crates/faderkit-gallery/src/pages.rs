//! Gallery pages, one per widget family.

use egui::{Button, Ui};
use faderkit_core::{DestinationId, ParamRange, ParamSpec, ParamUnit, Scale};
use faderkit_widgets::{
    DrumPad, EnvelopeEditor, Fader, FilterCurve, Knob, LevelMeter, ModMatrixGrid, ModWheel,
    Oscilloscope, PitchWheel, RingKnob, SegmentBar, StepSequencer, TimeKnob, Toggle,
    WaveSelector, XyPad,
};

use crate::values::Values;

const SOURCES: &[&str] = &["LFO 1", "LFO 2", "Env", "Vel"];
const DESTINATIONS: &[&str] = &["Cutoff", "Pitch", "Amp", "Pan"];
const PADS: &[&str] = &["Kick", "Snare", "Clap", "Rim", "CH", "OH", "Tom", "Crash"];

/// A page of the gallery.
pub trait Page {
    /// Tab title.
    fn name(&self) -> &'static str;

    /// Draw the page, writing accepted proposals into `values`.
    fn ui(&mut self, ui: &mut Ui, values: &mut Values);
}

/// Implement [`Page`] for a struct with an inherent
/// `ui(&mut self, &mut Ui, &mut Values)` method.
macro_rules! impl_page {
    ($page:ty, $name:expr) => {
        impl Page for $page {
            fn name(&self) -> &'static str {
                $name
            }
            fn ui(&mut self, ui: &mut Ui, values: &mut Values) {
                <$page>::ui(self, ui, values);
            }
        }
    };
}

/// Every page, in tab order.
pub fn all() -> Vec<Box<dyn Page>> {
    vec![
        Box::new(ControlsPage::new()),
        Box::new(ShapesPage),
        Box::new(PadsPage),
        Box::new(ModulationPage),
        Box::new(ScopePage),
    ]
}

/// Knobs, faders, wheels, meter and toggle.
struct ControlsPage {
    cutoff: ParamSpec,
}

impl ControlsPage {
    fn new() -> Self {
        Self {
            cutoff: ParamSpec::frequency_hz("Filter Cutoff", "Cutoff", 20.0, 20_000.0, 1_000.0),
        }
    }

    fn ui(&mut self, ui: &mut Ui, values: &mut Values) {
        ui.heading("Knobs");
        ui.horizontal(|ui| {
            Knob::from_spec(values.cutoff, &self.cutoff)
                .show(ui)
                .apply(&mut values.cutoff);
            Knob::new(values.mix, ParamRange::unit(), "Mix")
                .unit(ParamUnit::Percent)
                .show(ui)
                .apply(&mut values.mix);
            TimeKnob::new(values.delay_ms, 1.0, 2_000.0, "Delay")
                .default(250.0)
                .show(ui)
                .apply(&mut values.delay_ms);

            let rings = RingKnob::new(&values.rings, ParamRange::unit())
                .labels(&["Attack", "Body", "Tail"])
                .show(ui);
            rings.apply(&mut values.rings);
        });

        ui.add_space(12.0);
        ui.heading("Faders and wheels");
        ui.horizontal(|ui| {
            let level = Fader::new(values.level, ParamRange::unit(), "Level")
                .unit(ParamUnit::Percent)
                .listeners(&mut values.level_listeners)
                .show(ui);
            level.apply(&mut values.level);
            ui.add(LevelMeter::new(values.level, values.level * 0.7).label("Out"));

            Fader::new(values.pan, ParamRange::bipolar(), "Pan")
                .horizontal()
                .unit(ParamUnit::BipolarPercent)
                .show(ui)
                .apply(&mut values.pan);

            PitchWheel::new(values.pitch).show(ui).apply(&mut values.pitch);
            ModWheel::new(values.mod_wheel).show(ui).apply(&mut values.mod_wheel);
        });

        ui.add_space(12.0);
        Toggle::new(values.bypass, "Bypass").show(ui).apply(&mut values.bypass);
    }
}

/// Envelope, filter and waveform editors.
struct ShapesPage;

impl ShapesPage {
    fn ui(&mut self, ui: &mut Ui, values: &mut Values) {
        ui.heading("Envelope");
        EnvelopeEditor::new(values.envelope)
            .show(ui)
            .apply(&mut values.envelope);

        ui.add_space(12.0);
        ui.heading("Filter");
        FilterCurve::new(values.filter).show(ui).apply(&mut values.filter);

        ui.add_space(12.0);
        ui.heading("Waveform");
        WaveSelector::new(values.wave)
            .pulse_width_bounds(values.pulse_width)
            .show(ui)
            .apply(&mut values.wave);
    }
}

/// XY pad, drum pads and step sequencer.
struct PadsPage;

impl PadsPage {
    fn ui(&mut self, ui: &mut Ui, values: &mut Values) {
        ui.horizontal(|ui| {
            XyPad::new(values.xy, "X / Y").show(ui).apply(&mut values.xy);

            let hit = DrumPad::new(4, 2).labels(PADS).curve(values.velocity).show(ui);
            if let Some(hit) = hit.proposed {
                tracing::debug!(
                    pad = hit.pad,
                    velocity = hit.velocity,
                    pressed = hit.pressed,
                    "pad"
                );
                if hit.pressed {
                    values.last_hit = Some(hit);
                }
            }
        });

        ui.add_space(12.0);
        ui.heading("Sequencer");
        let playhead = values.playhead();
        let edited = StepSequencer::new(&values.pattern).playhead(playhead).show(ui);
        edited.apply(&mut values.pattern);

        ui.horizontal(|ui| {
            if ui.add(Button::new("Clear")).clicked() {
                values.pattern.clear();
            }
            if ui.add(Button::new("Rotate ▶")).clicked() {
                values.pattern.rotate(1);
            }
        });
    }
}

/// Modulation matrix and segment bar.
struct ModulationPage;

impl ModulationPage {
    fn ui(&mut self, ui: &mut Ui, values: &mut Values) {
        ui.heading("Modulation");
        let routed = ModMatrixGrid::new(&values.matrix, SOURCES, DESTINATIONS).show(ui);
        routed.apply(&mut values.matrix);

        ui.horizontal(|ui| {
            for (i, name) in DESTINATIONS.iter().enumerate() {
                let total = values.matrix.total_to(DestinationId(i as u16));
                ui.label(format!("{name}: {:+.0}%", total * 100.0));
            }
        });

        ui.add_space(12.0);
        ui.heading("Oscillator mix");
        let mixed = SegmentBar::new(&values.weights)
            .labels(&["Osc 1", "Osc 2", "Noise"])
            .show(ui);
        mixed.apply(&mut values.weights);
    }
}

/// Oscilloscope fed by the gallery clock.
struct ScopePage;

impl ScopePage {
    fn ui(&mut self, ui: &mut Ui, values: &mut Values) {
        ui.heading("Oscilloscope");
        let toggled = Oscilloscope::new(&values.scope)
            .animation(&values.animation)
            .size(480.0, 160.0)
            .label(values.wave.shape.label())
            .show(ui);
        match toggled.proposed {
            Some(true) => values.animation.start(),
            Some(false) => values.animation.stop(),
            None => {}
        }

        ui.horizontal(|ui| {
            let range = ParamRange::new(20.0, 2_000.0).with_scale(Scale::Logarithmic);
            Knob::new(values.tone_hz, range, "Tone")
                .unit(ParamUnit::Hertz)
                .show(ui)
                .apply(&mut values.tone_hz);
            ui.label("Click the scope to pause or resume the clock.");
        });
    }
}

impl_page!(ControlsPage, "Controls");
impl_page!(ShapesPage, "Shapes");
impl_page!(PadsPage, "Pads");
impl_page!(ModulationPage, "Modulation");
impl_page!(ScopePage, "Scope");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_names_are_unique() {
        let pages = all();
        let mut names: Vec<_> = pages.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), pages.len());
    }
}
