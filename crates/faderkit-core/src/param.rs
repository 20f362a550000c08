//! Parameter metadata for display and reset behavior.
//!
//! A [`ParamSpec`] bundles what a control needs to know about the value it
//! edits: a display name, a [`ParamUnit`] for formatting, the declared
//! [`ParamRange`], and the default a double-tap resets to.
//!
//! # Example
//!
//! ```rust
//! use faderkit_core::{ParamSpec, ParamUnit};
//!
//! let attack = ParamSpec::time_ms("Attack", "Atk", 1.0, 2000.0, 10.0);
//! assert_eq!(attack.unit, ParamUnit::Milliseconds);
//! assert_eq!(attack.format(1500.0), "1.50 s");
//! assert_eq!(attack.format(250.0), "250.0 ms");
//! ```

use crate::scale::{ParamRange, Scale};
use alloc::format;
use alloc::string::String;

/// Describes a single control parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Full parameter name for display (e.g., "Attack", "Cutoff").
    pub name: &'static str,

    /// Short label drawn under compact controls, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Declared domain and scale.
    pub range: ParamRange,

    /// Value restored by double-activation.
    pub default: f32,

    /// Recommended step increment for keyboard nudges.
    pub step: f32,
}

impl ParamSpec {
    /// Plain parameter with linear scaling and no unit.
    pub fn new(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        let range = ParamRange::new(min, max);
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            range,
            default: range.clamp(default),
            step: 0.01,
        }
    }

    /// Normalized level 0–1 displayed as a percentage.
    pub fn level(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::new(name, short_name, 0.0, 1.0, default).with_unit(ParamUnit::Percent)
    }

    /// Bipolar amount -1..1 displayed as a signed percentage, default 0.
    pub fn bipolar(name: &'static str, short_name: &'static str) -> Self {
        Self::new(name, short_name, -1.0, 1.0, 0.0).with_unit(ParamUnit::BipolarPercent)
    }

    /// Time parameter in milliseconds with logarithmic scaling.
    ///
    /// Falls back to linear when `min` is zero.
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, min, max, default)
            .with_unit(ParamUnit::Milliseconds)
            .with_scale(Scale::Logarithmic)
            .with_step(1.0)
    }

    /// Frequency parameter in Hertz with logarithmic scaling.
    pub fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, min, max, default)
            .with_unit(ParamUnit::Hertz)
            .with_scale(Scale::Logarithmic)
            .with_step(1.0)
    }

    /// Gain parameter in decibels.
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::new(name, short_name, min, max, default)
            .with_unit(ParamUnit::Decibels)
            .with_step(0.5)
    }

    /// Sets the display unit.
    pub const fn with_unit(mut self, unit: ParamUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: Scale) -> Self {
        self.range.scale = scale;
        self
    }

    /// Sets the step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Sets the reset value (clamped to the range).
    pub fn with_default(mut self, default: f32) -> Self {
        self.default = self.range.clamp(default);
        self
    }

    /// Clamps a value to this parameter's range.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        self.range.clamp(value)
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        self.range.normalize(value)
    }

    /// Converts a normalized value to the plain range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.range.denormalize(normalized)
    }

    /// Formats a plain value with this parameter's unit.
    pub fn format(&self, value: f32) -> String {
        self.unit.format(value)
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamUnit {
    /// Decibels (dB).
    Decibels,
    /// Hertz, switching to kHz above 1000.
    Hertz,
    /// Milliseconds, switching to seconds above 1000.
    Milliseconds,
    /// A 0–1 value shown as 0–100%.
    Percent,
    /// A -1..1 value shown as a signed percentage.
    BipolarPercent,
    /// Ratio (e.g., "4.0:1").
    Ratio,
    /// Semitones, signed.
    Semitones,
    /// Unitless, two decimal places.
    #[default]
    None,
}

impl ParamUnit {
    /// Render a value the way compact synth displays do.
    ///
    /// | Unit             | Display                     |
    /// |------------------|-----------------------------|
    /// | `Decibels`       | `"-3.5 dB"`                 |
    /// | `Hertz`          | `"1.2 kHz"` / `"440 Hz"`    |
    /// | `Milliseconds`   | `"1.50 s"` / `"100.0 ms"`   |
    /// | `Percent`        | `"50%"` (value is 0–1)      |
    /// | `BipolarPercent` | `"+25%"` / `"-40%"` / `"0%"`|
    /// | `Ratio`          | `"4.0:1"`                   |
    /// | `Semitones`      | `"+7 st"`                   |
    /// | `None`           | `"0.50"`                    |
    pub fn format(self, value: f32) -> String {
        match self {
            Self::Decibels => format!("{value:.1} dB"),
            Self::Hertz => {
                if value >= 1000.0 {
                    format!("{:.1} kHz", value / 1000.0)
                } else {
                    format!("{value:.0} Hz")
                }
            }
            Self::Milliseconds => {
                if value >= 1000.0 {
                    format!("{:.2} s", value / 1000.0)
                } else {
                    format!("{value:.1} ms")
                }
            }
            Self::Percent => format!("{:.0}%", value * 100.0),
            Self::BipolarPercent => {
                let pct = libm::roundf(value * 100.0);
                if pct > 0.0 {
                    format!("+{pct:.0}%")
                } else if pct < 0.0 {
                    format!("{pct:.0}%")
                } else {
                    String::from("0%")
                }
            }
            Self::Ratio => format!("{value:.1}:1"),
            Self::Semitones => {
                let st = libm::roundf(value);
                if st > 0.0 {
                    format!("+{st:.0} st")
                } else if st < 0.0 {
                    format!("{st:.0} st")
                } else {
                    String::from("0 st")
                }
            }
            Self::None => format!("{value:.2}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_clamped_into_range() {
        let p = ParamSpec::new("X", "X", 0.0, 1.0, 4.0);
        assert_eq!(p.default, 1.0);
        assert_eq!(p.with_default(-3.0).default, 0.0);
    }

    #[test]
    fn time_ms_formats_seconds_above_one_thousand() {
        assert_eq!(ParamUnit::Milliseconds.format(999.0), "999.0 ms");
        assert_eq!(ParamUnit::Milliseconds.format(2000.0), "2.00 s");
    }

    #[test]
    fn hertz_switches_to_khz() {
        assert_eq!(ParamUnit::Hertz.format(440.0), "440 Hz");
        assert_eq!(ParamUnit::Hertz.format(12_500.0), "12.5 kHz");
    }

    #[test]
    fn bipolar_percent_has_sign() {
        assert_eq!(ParamUnit::BipolarPercent.format(0.25), "+25%");
        assert_eq!(ParamUnit::BipolarPercent.format(-0.4), "-40%");
        assert_eq!(ParamUnit::BipolarPercent.format(0.001), "0%");
    }

    #[test]
    fn percent_scales_unit_value() {
        assert_eq!(ParamUnit::Percent.format(0.5), "50%");
    }

    #[test]
    fn semitones_signed() {
        assert_eq!(ParamUnit::Semitones.format(7.0), "+7 st");
        assert_eq!(ParamUnit::Semitones.format(-12.0), "-12 st");
    }

    #[test]
    fn bipolar_spec_defaults_to_center() {
        let p = ParamSpec::bipolar("Amount", "Amt");
        assert_eq!(p.default, 0.0);
        assert_eq!(p.range.min, -1.0);
    }
}
