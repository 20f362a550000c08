//! Everything the gallery's widgets display. Widgets only propose; the
//! pages write proposals back here.

use faderkit_config::FaderkitConfig;
use faderkit_core::{
    Adsr, Animation, ControlListener, DestinationId, FilterPoint, ListenerSet, MAX_STEPS,
    ModMatrix, PadHit, PulseWidthBounds, ScopeBuffer, SegmentWeights, SourceId, StepPattern,
    VelocityCurve, WaveSelection, XyValue,
};

use crate::app::GallerySettings;

/// Sample rate of the generated scope tone.
pub const TONE_RATE: f64 = 8_000.0;

/// Sequencer speed while the clock runs (sixteenths at 120 BPM).
pub const STEPS_PER_SECOND: f64 = 8.0;

const SCOPE_CAPACITY: usize = 4096;

/// Logs edit gestures of one named control.
struct EditLog(&'static str);

impl ControlListener<f32> for EditLog {
    fn begin_edit(&mut self) {
        tracing::debug!(control = self.0, "edit began");
    }

    fn changed(&mut self, value: &f32) {
        tracing::trace!(control = self.0, value, "edit");
    }

    fn end_edit(&mut self) {
        tracing::debug!(control = self.0, "edit ended");
    }
}

/// Gallery-owned values.
pub struct Values {
    pub cutoff: f32,
    pub mix: f32,
    pub delay_ms: f32,
    pub rings: Vec<f32>,
    pub level: f32,
    pub pan: f32,
    pub pitch: f32,
    pub mod_wheel: f32,
    pub bypass: bool,
    pub level_listeners: ListenerSet<f32>,

    pub envelope: Adsr,
    pub filter: FilterPoint,
    pub wave: WaveSelection,
    pub pulse_width: PulseWidthBounds,

    pub xy: XyValue,
    pub velocity: VelocityCurve,
    pub last_hit: Option<PadHit>,
    pub pattern: StepPattern,

    pub matrix: ModMatrix,
    pub weights: SegmentWeights,

    pub scope: ScopeBuffer,
    pub animation: Animation,
    pub tone_hz: f32,
    phase: f64,
}

impl Values {
    /// Initial values for the given startup settings and config.
    pub fn new(settings: &GallerySettings, config: &FaderkitConfig) -> Self {
        let mut pattern = StepPattern::new(settings.pattern_length.clamp(1, MAX_STEPS));
        for i in (0..pattern.len()).step_by(4) {
            pattern.set_active(i, true);
        }

        let mut matrix = ModMatrix::new();
        matrix.set_amount(SourceId(0), DestinationId(0), 0.5);
        matrix.set_amount(SourceId(2), DestinationId(2), 1.0);

        let mut level_listeners = ListenerSet::new();
        // Lives as long as the gallery; never unsubscribed.
        let _ = level_listeners.subscribe(EditLog("level"));

        let mut animation = Animation::new();
        animation.start();

        Self {
            cutoff: 1_000.0,
            mix: 0.5,
            delay_ms: 250.0,
            rings: vec![0.25, 0.5, 0.75],
            level: 0.8,
            pan: 0.0,
            pitch: 0.0,
            mod_wheel: 0.0,
            bypass: false,
            level_listeners,

            envelope: Adsr::default(),
            filter: FilterPoint::default(),
            wave: WaveSelection::default(),
            pulse_width: config.feel.pulse_width(),

            xy: XyValue::CENTER,
            velocity: config.feel.velocity_curve(),
            last_hit: None,
            pattern,

            matrix,
            weights: SegmentWeights::equal(3, 0.05),

            scope: ScopeBuffer::new(SCOPE_CAPACITY),
            animation,
            tone_hz: settings.scope_hz.clamp(1.0, TONE_RATE as f32 / 2.0),
            phase: 0.0,
        }
    }

    /// Advance the clock to `now` (seconds) and feed the scope.
    pub fn tick(&mut self, now: f64) {
        let Some(dt) = self.animation.tick(now) else {
            return;
        };
        let count = ((dt * TONE_RATE).round() as usize).min(SCOPE_CAPACITY);
        let step = f64::from(self.tone_hz) / TONE_RATE;
        for _ in 0..count {
            let sample = self.wave.shape.sample(self.phase as f32, self.wave.pulse_width);
            self.scope.push(sample);
            self.phase = (self.phase + step).fract();
        }
    }

    /// Sequencer step under the clock, while it runs.
    pub fn playhead(&self) -> Option<usize> {
        if !self.animation.is_running() {
            return None;
        }
        let step = (self.animation.elapsed() * STEPS_PER_SECOND) as usize;
        Some(step % self.pattern.len())
    }

    /// One-line summary for the status bar.
    pub fn status(&self) -> String {
        let mut status = format!(
            "{} / {} steps  ·  {} routes  ·  {}",
            self.pattern.active_count(),
            self.pattern.len(),
            self.matrix.len(),
            if self.animation.is_running() { "running" } else { "paused" },
        );
        if let Some(hit) = self.last_hit {
            status.push_str(&format!("  ·  pad {} @ {:.0}%", hit.pad + 1, hit.velocity * 100.0));
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values() -> Values {
        Values::new(&GallerySettings::default(), &FaderkitConfig::default())
    }

    #[test]
    fn clock_feeds_the_scope() {
        let mut v = values();
        v.tick(1.0);
        assert!(v.scope.is_empty(), "first tick after start is zero length");
        v.tick(1.01);
        assert_eq!(v.scope.len(), 80);
    }

    #[test]
    fn paused_clock_feeds_nothing() {
        let mut v = values();
        v.animation.stop();
        v.tick(1.0);
        v.tick(2.0);
        assert!(v.scope.is_empty());
        assert_eq!(v.playhead(), None);
    }

    #[test]
    fn playhead_wraps_the_pattern() {
        let mut v = values();
        v.tick(0.0);
        // 21 ticks of 0.1 s = 2.1 s = step 16 of 16 → wraps to 0
        for i in 1..=21 {
            v.tick(f64::from(i) * 0.1);
        }
        assert_eq!(v.playhead(), Some(16 % v.pattern.len()));
    }

    #[test]
    fn pattern_length_is_clamped() {
        let settings = GallerySettings {
            pattern_length: 500,
            ..GallerySettings::default()
        };
        let v = Values::new(&settings, &FaderkitConfig::default());
        assert_eq!(v.pattern.len(), MAX_STEPS);
        assert_eq!(v.pattern.active_count(), MAX_STEPS / 4);
    }

    #[test]
    fn status_mentions_last_hit() {
        let mut v = values();
        v.last_hit = Some(PadHit {
            pad: 2,
            velocity: 0.5,
            pressed: true,
        });
        assert!(v.status().contains("pad 3 @ 50%"));
    }
}
