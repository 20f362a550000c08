//! Oscillator waveform selection and preview sampling.

use crate::scale::{clamp_unit, safe_div};
use core::f32::consts::TAU;

/// Basic oscillator shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WaveShape {
    /// Sine.
    #[default]
    Sine,
    /// Triangle.
    Triangle,
    /// Rising sawtooth.
    Saw,
    /// Pulse with variable width.
    Pulse,
}

impl WaveShape {
    /// Every shape, in selector order.
    pub const ALL: [WaveShape; 4] = [Self::Sine, Self::Triangle, Self::Saw, Self::Pulse];

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sine => "SIN",
            Self::Triangle => "TRI",
            Self::Saw => "SAW",
            Self::Pulse => "PLS",
        }
    }

    /// Position in [`ALL`](Self::ALL).
    pub fn index(self) -> usize {
        match self {
            Self::Sine => 0,
            Self::Triangle => 1,
            Self::Saw => 2,
            Self::Pulse => 3,
        }
    }

    /// Shape at `index`, wrapping.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Sample in \[-1, 1\] at `phase` in cycles (wrapped to \[0, 1)).
    /// `pulse_width` only affects [`Pulse`](Self::Pulse).
    pub fn sample(self, phase: f32, pulse_width: f32) -> f32 {
        let p = phase - libm::floorf(phase);
        match self {
            Self::Sine => libm::sinf(p * TAU),
            Self::Triangle => {
                if p < 0.25 {
                    4.0 * p
                } else if p < 0.75 {
                    2.0 - 4.0 * p
                } else {
                    4.0 * p - 4.0
                }
            }
            Self::Saw => 2.0 * p - 1.0,
            Self::Pulse => {
                if p < pulse_width { 1.0 } else { -1.0 }
            }
        }
    }
}

/// Allowed pulse-width interval. Extreme widths are silent or clicky, so the
/// interval is kept away from 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseWidthBounds {
    /// Narrowest width.
    pub min: f32,
    /// Widest width.
    pub max: f32,
}

impl Default for PulseWidthBounds {
    fn default() -> Self {
        Self { min: 0.1, max: 0.9 }
    }
}

impl PulseWidthBounds {
    /// Bounds inside \[0, 1\], swapped if inverted.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = (clamp_unit(min), clamp_unit(max));
        if min <= max { Self { min, max } } else { Self { min: max, max: min } }
    }

    /// Clamp a pulse width into the interval.
    pub fn clamp(&self, width: f32) -> f32 {
        if width.is_nan() { self.min } else { width.clamp(self.min, self.max) }
    }

    /// Position of `width` within the interval, \[0, 1\].
    pub fn normalize(&self, width: f32) -> f32 {
        clamp_unit(safe_div(self.clamp(width) - self.min, self.max - self.min, 0.5))
    }

    /// Width at a normalized position.
    pub fn denormalize(&self, n: f32) -> f32 {
        self.clamp(self.min + clamp_unit(n) * (self.max - self.min))
    }
}

/// Shape plus pulse width: the value of a waveform selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSelection {
    /// Selected shape.
    pub shape: WaveShape,
    /// Pulse width, meaningful for [`WaveShape::Pulse`].
    pub pulse_width: f32,
}

impl Default for WaveSelection {
    fn default() -> Self {
        Self {
            shape: WaveShape::Sine,
            pulse_width: 0.5,
        }
    }
}

impl WaveSelection {
    /// One cycle of the selection sampled at `samples` evenly spaced phases.
    pub fn preview(&self, samples: usize) -> alloc::vec::Vec<f32> {
        let n = samples.max(1);
        (0..n)
            .map(|i| self.shape.sample(i as f32 / n as f32, self.pulse_width))
            .collect()
    }
}
