//! Interaction constants: drag sensitivity, double-tap detection, pulse
//! width limits and the drum pad velocity curve.

use faderkit_core::{Feel, PulseWidthBounds, VelocityCurve};
use serde::{Deserialize, Serialize};

use crate::validation::Checks;

/// Tunable interaction constants.
///
/// # TOML Format
///
/// ```toml
/// [feel]
/// sensitivity = 0.004
/// double_tap_window = 0.3
/// pulse_width_min = 0.1
/// pulse_width_max = 0.9
/// velocity_floor = 0.1
/// velocity_exponent = 1.0
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeelConfig {
    /// Normalized change per pixel of relative drag.
    pub sensitivity: f32,
    /// Sensitivity multiplier while Shift is held.
    pub fine_factor: f32,
    /// Double-tap window (seconds).
    pub double_tap_window: f64,
    /// Double-tap distance (px).
    pub double_tap_distance: f32,
    /// Hit radius of point handles (px).
    pub handle_radius: f32,
    /// Movement that still counts as a click (px).
    pub drag_threshold: f32,
    /// Narrowest pulse width.
    pub pulse_width_min: f32,
    /// Widest pulse width.
    pub pulse_width_max: f32,
    /// Pad velocity at the bottom edge.
    pub velocity_floor: f32,
    /// Pad velocity curve exponent.
    pub velocity_exponent: f32,
}

impl Default for FeelConfig {
    fn default() -> Self {
        let feel = Feel::default();
        let pw = PulseWidthBounds::default();
        let curve = VelocityCurve::default();
        Self {
            sensitivity: feel.sensitivity,
            fine_factor: feel.fine_factor,
            double_tap_window: feel.double_tap_window,
            double_tap_distance: feel.double_tap_distance,
            handle_radius: feel.handle_radius,
            drag_threshold: feel.drag_threshold,
            pulse_width_min: pw.min,
            pulse_width_max: pw.max,
            velocity_floor: curve.floor,
            velocity_exponent: curve.exponent,
        }
    }
}

impl FeelConfig {
    /// Drag and tap constants for controllers.
    pub fn feel(&self) -> Feel {
        Feel {
            sensitivity: self.sensitivity,
            fine_factor: self.fine_factor,
            double_tap_window: self.double_tap_window,
            double_tap_distance: self.double_tap_distance,
            handle_radius: self.handle_radius,
            drag_threshold: self.drag_threshold,
        }
    }

    /// Pulse width limits for the waveform selector.
    pub fn pulse_width(&self) -> PulseWidthBounds {
        PulseWidthBounds::new(self.pulse_width_min, self.pulse_width_max)
    }

    /// Velocity curve for drum pads.
    pub fn velocity_curve(&self) -> VelocityCurve {
        VelocityCurve {
            floor: self.velocity_floor,
            exponent: self.velocity_exponent,
        }
    }

    pub(crate) fn check(&self, checks: &mut Checks) {
        checks
            .range("feel.sensitivity", self.sensitivity, 0.0001, 0.1)
            .range("feel.fine_factor", self.fine_factor, 0.01, 1.0)
            .range(
                "feel.double_tap_window",
                self.double_tap_window as f32,
                0.05,
                2.0,
            )
            .range("feel.double_tap_distance", self.double_tap_distance, 0.0, 50.0)
            .range("feel.handle_radius", self.handle_radius, 2.0, 40.0)
            .range("feel.drag_threshold", self.drag_threshold, 0.0, 20.0)
            .range("feel.pulse_width_min", self.pulse_width_min, 0.0, 1.0)
            .range("feel.pulse_width_max", self.pulse_width_max, 0.0, 1.0)
            .bounds("feel.pulse_width", self.pulse_width_min, self.pulse_width_max)
            .range("feel.velocity_floor", self.velocity_floor, 0.0, 1.0)
            .range("feel.velocity_exponent", self.velocity_exponent, 0.1, 8.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_core() {
        let config = FeelConfig::default();
        assert_eq!(config.feel(), Feel::default());
        assert_eq!(config.pulse_width(), PulseWidthBounds::default());
        assert_eq!(config.velocity_curve(), VelocityCurve::default());
    }

    #[test]
    fn defaults_pass_checks() {
        let mut checks = Checks::new();
        FeelConfig::default().check(&mut checks);
        assert!(checks.is_empty());
    }

    #[test]
    fn inverted_pulse_width_fails() {
        let config = FeelConfig {
            pulse_width_min: 0.8,
            pulse_width_max: 0.2,
            ..FeelConfig::default()
        };
        let mut checks = Checks::new();
        config.check(&mut checks);
        assert_eq!(checks.len(), 1);
    }

    #[test]
    fn overrides_reach_the_core_types() {
        let config: FeelConfig =
            toml::from_str("sensitivity = 0.01\nvelocity_exponent = 2.0").unwrap();
        assert_eq!(config.feel().sensitivity, 0.01);
        assert_eq!(config.velocity_curve().exponent, 2.0);
        assert_eq!(config.feel().fine_factor, Feel::default().fine_factor);
    }
}
