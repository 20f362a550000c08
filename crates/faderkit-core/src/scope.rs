//! Oscilloscope buffering and frame animation.
//!
//! [`ScopeBuffer`] keeps the most recent samples in a bounded ring and hands
//! out a display window aligned to a rising zero crossing, so a periodic
//! signal stands still on screen. [`Animation`] is the explicit per-frame
//! clock a host owns: while it runs the host keeps requesting repaints;
//! stopping or dropping it ends them.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

/// Bounded ring of the most recent samples.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeBuffer {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl ScopeBuffer {
    /// A buffer holding at most `capacity` samples (at least one).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of samples kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are held.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Append one sample, dropping the oldest when full. Non-finite samples
    /// are stored as silence.
    pub fn push(&mut self, sample: f32) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(if sample.is_finite() { sample } else { 0.0 });
    }

    /// Append many samples.
    pub fn extend(&mut self, samples: impl IntoIterator<Item = f32>) {
        for s in samples {
            self.push(s);
        }
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Index of the latest rising zero crossing that still leaves `window`
    /// samples after it.
    fn trigger(&self, window: usize) -> Option<usize> {
        let last_start = self.samples.len().checked_sub(window)?;
        (1..=last_start)
            .rev()
            .find(|&i| self.samples[i - 1] < 0.0 && self.samples[i] >= 0.0)
    }

    /// `window` samples for display, starting at a rising zero crossing when
    /// one exists, otherwise the most recent `window` samples. Returns fewer
    /// samples while the buffer is still filling.
    pub fn snapshot(&self, window: usize) -> Vec<f32> {
        let window = window.min(self.samples.len());
        if window == 0 {
            return Vec::new();
        }
        let start = self
            .trigger(window)
            .unwrap_or(self.samples.len() - window);
        self.samples.range(start..start + window).copied().collect()
    }
}

/// Reduce `samples` to at most `max_points`, keeping the largest-magnitude
/// sample of each bucket so peaks survive.
pub fn decimate(samples: &[f32], max_points: usize) -> Vec<f32> {
    if max_points == 0 {
        return Vec::new();
    }
    if samples.len() <= max_points {
        return samples.to_vec();
    }
    let bucket = samples.len() as f32 / max_points as f32;
    (0..max_points)
        .map(|i| {
            let from = (i as f32 * bucket) as usize;
            let to = (((i + 1) as f32 * bucket) as usize).clamp(from + 1, samples.len());
            samples[from..to]
                .iter()
                .copied()
                .max_by(|a, b| libm::fabsf(*a).total_cmp(&libm::fabsf(*b)))
                .unwrap_or(0.0)
        })
        .collect()
}

/// Host-owned frame clock for animated widgets.
///
/// Long gaps (a hidden window, a debugger pause) are capped at
/// [`MAX_STEP`](Self::MAX_STEP) so animation does not jump.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Animation {
    running: bool,
    last: Option<f64>,
    elapsed: f64,
}

impl Animation {
    /// Longest step reported by [`tick`](Self::tick), in seconds.
    pub const MAX_STEP: f64 = 0.1;

    /// A stopped animation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or resume) ticking. The first tick after starting reports zero.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.last = None;
        }
    }

    /// Stop ticking. Elapsed time is kept.
    pub fn stop(&mut self) {
        self.running = false;
        self.last = None;
    }

    /// Whether frames should keep being requested.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Total running time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance to `now` (seconds on any monotonic clock). Returns the step
    /// since the previous tick, or `None` while stopped.
    pub fn tick(&mut self, now: f64) -> Option<f64> {
        if !self.running {
            return None;
        }
        let dt = match self.last {
            Some(prev) => (now - prev).clamp(0.0, Self::MAX_STEP),
            None => 0.0,
        };
        self.last = Some(now);
        self.elapsed += dt;
        Some(dt)
    }
}
