//! Value ranges and normalization curves.
//!
//! Every control in faderkit works internally in normalized \[0.0, 1.0\]
//! space. A [`ParamRange`] maps between that space and the plain value the
//! caller owns (milliseconds, Hertz, a sustain level), using a [`Scale`]
//! curve.
//!
//! # Normalization Formulas
//!
//! - **Linear**: `normalized = (value - min) / (max - min)`
//! - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
//! - **Power(exp)**: `normalized = ((value - min) / (max - min)).powf(1.0 / exp)`
//!
//! A logarithmic range with `min <= 0` cannot be evaluated and falls back to
//! linear. A zero-span range normalizes everything to `0.0`.
//!
//! # Example
//!
//! ```rust
//! use faderkit_core::{ParamRange, Scale};
//!
//! let cutoff = ParamRange::new(20.0, 20_000.0).with_scale(Scale::Logarithmic);
//! let mid = cutoff.denormalize(0.5);
//! assert!((mid - 632.45).abs() < 0.1); // geometric mean
//! ```

/// Scaling curve for normalization.
///
/// Linear is default. Use Logarithmic for wide time and frequency ranges
/// (1 ms → 10 s, 20 Hz → 20 kHz), Power for more resolution at one end.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Scale {
    /// Linear mapping (default). Equal resolution across the range.
    #[default]
    Linear,
    /// Logarithmic mapping. Equal pixel deltas give equal value ratios.
    /// Requires `min > 0.0`.
    Logarithmic,
    /// Power curve mapping with configurable exponent.
    /// exponent < 1.0 → more resolution at low end.
    /// exponent > 1.0 → more resolution at high end.
    Power(f32),
}

/// Declared domain of a scalar control value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Normalization curve.
    pub scale: Scale,
}

impl Default for ParamRange {
    fn default() -> Self {
        Self::unit()
    }
}

impl ParamRange {
    /// Linear range between `min` and `max`.
    ///
    /// Inverted bounds are swapped so that `min <= max` always holds.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            scale: Scale::Linear,
        }
    }

    /// The unit range \[0, 1\].
    pub const fn unit() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            scale: Scale::Linear,
        }
    }

    /// The bipolar range \[-1, 1\].
    pub const fn bipolar() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            scale: Scale::Linear,
        }
    }

    /// Logarithmic time range in milliseconds.
    pub fn time_ms(min_ms: f32, max_ms: f32) -> Self {
        Self::new(min_ms, max_ms).with_scale(Scale::Logarithmic)
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    /// Width of the range in plain units.
    #[inline]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Midpoint in normalized space, expressed as a plain value.
    ///
    /// For a logarithmic range this is the geometric mean.
    pub fn center(&self) -> f32 {
        self.denormalize(0.5)
    }

    /// Returns `true` if `value` lies inside the range (inclusive).
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps a value to this range. NaN maps to `min`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    fn log_usable(&self) -> bool {
        self.min > 0.0
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// The input is clamped first, so the result is always within \[0, 1\].
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.span();
        if range <= 0.0 {
            return 0.0;
        }
        let value = self.clamp(value);
        let n = match self.scale {
            Scale::Linear => (value - self.min) / range,
            Scale::Logarithmic if self.log_usable() => {
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
            Scale::Logarithmic => (value - self.min) / range,
            Scale::Power(exp) => {
                let linear = (value - self.min) / range;
                if exp > 0.0 {
                    libm::powf(linear, 1.0 / exp)
                } else {
                    linear
                }
            }
        };
        clamp_unit(n)
    }

    /// Converts a normalized value (0.0 to 1.0) to the plain range.
    ///
    /// Inverse of [`normalize`](Self::normalize). The normalized input is
    /// clamped to \[0, 1\] and the result is clamped to the range.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let n = clamp_unit(normalized);
        let v = match self.scale {
            Scale::Linear => self.min + n * self.span(),
            Scale::Logarithmic if self.log_usable() => {
                self.min * libm::powf(self.max / self.min, n)
            }
            Scale::Logarithmic => self.min + n * self.span(),
            Scale::Power(exp) => {
                let curved = if exp > 0.0 { libm::powf(n, exp) } else { n };
                self.min + curved * self.span()
            }
        };
        self.clamp(v)
    }

    /// Offsets a plain value by `delta` in normalized space.
    ///
    /// This is the core of relative dragging: for a linear range the plain
    /// delta is proportional to `delta`; for a logarithmic range the ratio
    /// `new / old` depends only on `delta`.
    pub fn offset(&self, value: f32, delta: f32) -> f32 {
        self.denormalize(self.normalize(value) + delta)
    }

    /// Maps a plain value to the bipolar view \[-1, 1\].
    pub fn to_bipolar(&self, value: f32) -> f32 {
        unipolar_to_bipolar(self.normalize(value))
    }

    /// Maps a bipolar \[-1, 1\] value back to the plain range.
    pub fn from_bipolar(&self, bipolar: f32) -> f32 {
        self.denormalize(bipolar_to_unipolar(bipolar))
    }
}

/// Clamp to \[0, 1\], mapping NaN to `0.0`.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp to \[-1, 1\], mapping NaN to `0.0`.
#[inline]
pub fn clamp_bipolar(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// \[0, 1\] → \[-1, 1\].
#[inline]
pub fn unipolar_to_bipolar(n: f32) -> f32 {
    clamp_bipolar(clamp_unit(n) * 2.0 - 1.0)
}

/// \[-1, 1\] → \[0, 1\].
#[inline]
pub fn bipolar_to_unipolar(b: f32) -> f32 {
    clamp_unit((clamp_bipolar(b) + 1.0) * 0.5)
}

/// Divide, substituting `fallback` when the divisor is zero or not finite.
#[inline]
pub fn safe_div(numerator: f32, denominator: f32, fallback: f32) -> f32 {
    if denominator == 0.0 || !denominator.is_finite() {
        fallback
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, tol: f32) -> bool {
        libm::fabsf(a - b) <= tol
    }

    #[test]
    fn linear_roundtrip_endpoints() {
        let r = ParamRange::new(0.0, 100.0);
        assert_eq!(r.normalize(0.0), 0.0);
        assert_eq!(r.normalize(50.0), 0.5);
        assert_eq!(r.normalize(100.0), 1.0);
        assert_eq!(r.denormalize(0.25), 25.0);
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let r = ParamRange::new(10.0, -10.0);
        assert_eq!(r.min, -10.0);
        assert_eq!(r.max, 10.0);
    }

    #[test]
    fn zero_span_normalizes_to_zero() {
        let r = ParamRange::new(5.0, 5.0);
        assert_eq!(r.normalize(5.0), 0.0);
        assert_eq!(r.normalize(100.0), 0.0);
        assert_eq!(r.denormalize(0.7), 5.0);
    }

    #[test]
    fn log_midpoint_is_geometric_mean() {
        let r = ParamRange::time_ms(1.0, 10_000.0);
        assert!(close(r.denormalize(0.5), 100.0, 0.01));
    }

    #[test]
    fn log_with_nonpositive_min_falls_back_to_linear() {
        let r = ParamRange::new(0.0, 10.0).with_scale(Scale::Logarithmic);
        assert_eq!(r.normalize(5.0), 0.5);
        assert_eq!(r.denormalize(0.5), 5.0);
    }

    #[test]
    fn power_scale_inverts() {
        let r = ParamRange::new(0.0, 1.0).with_scale(Scale::Power(2.0));
        let n = r.normalize(0.25);
        assert!(close(n, 0.5, 1e-6));
        assert!(close(r.denormalize(n), 0.25, 1e-6));
    }

    #[test]
    fn clamp_handles_nan() {
        let r = ParamRange::new(-1.0, 1.0);
        assert_eq!(r.clamp(f32::NAN), -1.0);
        assert_eq!(clamp_unit(f32::NAN), 0.0);
    }

    #[test]
    fn bipolar_conversion() {
        let r = ParamRange::unit();
        assert_eq!(r.to_bipolar(0.5), 0.0);
        assert_eq!(r.to_bipolar(1.0), 1.0);
        assert_eq!(r.from_bipolar(-1.0), 0.0);
    }

    #[test]
    fn offset_log_ratio_independent_of_start() {
        let r = ParamRange::time_ms(1.0, 10_000.0);
        let a = r.offset(10.0, 0.1) / 10.0;
        let b = r.offset(200.0, 0.1) / 200.0;
        assert!(close(a, b, 1e-3));
    }

    #[test]
    fn safe_div_guards_zero() {
        assert_eq!(safe_div(1.0, 0.0, 0.5), 0.5);
        assert_eq!(safe_div(1.0, 2.0, 0.5), 0.5);
        assert_eq!(safe_div(3.0, 2.0, 0.0), 1.5);
    }
}
