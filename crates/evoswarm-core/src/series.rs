//! Sliding-window time series and the series ticker.
//!
//! Each tracked metric is a fixed-length window of samples. A tick appends
//! `last + uniform(-delta, +delta)` and drops the oldest sample, so the
//! window length never changes. Values are not clamped and may drift over
//! a long session.
//!
//! The module also computes the display range and sparkline projection the
//! dashboard draws. A window shorter than two samples has no meaningful
//! projection, so such configurations are rejected up front.

use std::collections::VecDeque;

use evoswarm_types::{SeriesKind, SeriesSnapshot, SparkPoint};
use rand::Rng;

use crate::config::SeriesConfig;

/// Minimum number of samples a window must hold.
pub const MIN_WINDOW: usize = 2;

/// Errors raised when building a series window.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// The window is shorter than [`MIN_WINDOW`].
    #[error("window must hold at least {MIN_WINDOW} samples, got {len}")]
    WindowTooShort {
        /// Number of samples supplied.
        len: usize,
    },

    /// The per-tick delta is negative, NaN, or too large for its
    /// `[-delta, +delta]` range to have a finite width.
    #[error("delta must be finite and non-negative with a finite range width, got {delta}")]
    InvalidDelta {
        /// The rejected delta.
        delta: f64,
    },

    /// An initial sample is NaN or infinite.
    #[error("initial samples must be finite")]
    NonFiniteSample,
}

/// Validate the parameters of a series window.
pub fn check_track(delta: f64, initial: &[f64]) -> Result<(), SeriesError> {
    if initial.len() < MIN_WINDOW {
        return Err(SeriesError::WindowTooShort { len: initial.len() });
    }
    if !(delta * 2.0).is_finite() || delta < 0.0 {
        return Err(SeriesError::InvalidDelta { delta });
    }
    if initial.iter().any(|v| !v.is_finite()) {
        return Err(SeriesError::NonFiniteSample);
    }
    Ok(())
}

/// Vertical extent of a window as drawn on the sparkline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayRange {
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// `max - min`, or 1 when the window is flat.
    pub span: f64,
}

/// A fixed-length sliding window over one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesWindow {
    kind: SeriesKind,
    delta: f64,
    samples: VecDeque<f64>,
}

impl SeriesWindow {
    /// Create a window whose length is the number of initial samples.
    pub fn new(kind: SeriesKind, delta: f64, initial: Vec<f64>) -> Result<Self, SeriesError> {
        check_track(delta, &initial)?;
        Ok(Self {
            kind,
            delta,
            samples: VecDeque::from(initial),
        })
    }

    /// Which metric this window tracks.
    pub const fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Maximum absolute change per tick.
    pub const fn delta(&self) -> f64 {
        self.delta
    }

    /// Number of samples (constant for the lifetime of the window).
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always `false`: construction guarantees at least [`MIN_WINDOW`] samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Most recent sample.
    pub fn last(&self) -> f64 {
        self.samples.back().copied().unwrap_or_default()
    }

    /// Samples, oldest first.
    pub fn samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    /// Append a sample and drop the oldest one.
    pub fn push_sample(&mut self, next: f64) {
        self.samples.pop_front();
        self.samples.push_back(next);
    }

    /// Advance by one random step and return the new sample.
    pub fn advance(&mut self, rng: &mut impl Rng) -> f64 {
        let noise = if self.delta > 0.0 {
            rng.random_range(-self.delta..=self.delta)
        } else {
            0.0
        };
        let next = self.last() + noise;
        self.push_sample(next);
        next
    }

    /// Smallest and largest sample, with a flat window drawn over a span of 1.
    pub fn display_range(&self) -> DisplayRange {
        let min = self.samples().fold(f64::INFINITY, f64::min);
        let max = self.samples().fold(f64::NEG_INFINITY, f64::max);
        let raw_span = max - min;
        let span = if raw_span > 0.0 { raw_span } else { 1.0 };
        DisplayRange { min, max, span }
    }

    /// Project the samples onto a `width x height` viewport.
    ///
    /// The first sample sits at `x = 0`, the last at `x = width`. The
    /// smallest value sits at the bottom (`y = height`).
    pub fn sparkline(&self, width: f64, height: f64) -> Vec<SparkPoint> {
        let range = self.display_range();
        let last_index = index_to_f64(self.len().saturating_sub(1)).max(1.0);
        self.samples()
            .enumerate()
            .map(|(i, value)| SparkPoint {
                x: index_to_f64(i) / last_index * width,
                y: height - (value - range.min) / range.span * height,
            })
            .collect()
    }

    /// Serializable view of the window.
    pub fn snapshot(&self, width: f64, height: f64) -> SeriesSnapshot {
        let range = self.display_range();
        SeriesSnapshot {
            kind: self.kind,
            label: self.kind.label().to_owned(),
            samples: self.samples().collect(),
            min: range.min,
            max: range.max,
            points: self.sparkline(width, height),
        }
    }
}

fn index_to_f64(i: usize) -> f64 {
    f64::from(u32::try_from(i).unwrap_or(u32::MAX))
}

/// All tracked series plus the sparkline viewport they are drawn on.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesState {
    windows: Vec<SeriesWindow>,
    width: f64,
    height: f64,
}

impl SeriesState {
    /// Build every configured window.
    pub fn from_config(config: &SeriesConfig) -> Result<Self, SeriesError> {
        let windows = config
            .tracks
            .iter()
            .map(|t| SeriesWindow::new(t.kind, t.delta, t.initial.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            windows,
            width: config.sparkline_width,
            height: config.sparkline_height,
        })
    }

    /// Run one ticker step over every window.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        for window in &mut self.windows {
            window.advance(rng);
        }
    }

    /// Window for a given metric.
    pub fn get(&self, kind: SeriesKind) -> Option<&SeriesWindow> {
        self.windows.iter().find(|w| w.kind == kind)
    }

    /// All windows in display order.
    pub fn windows(&self) -> &[SeriesWindow] {
        &self.windows
    }

    /// Serializable views of every window.
    pub fn snapshot(&self) -> Vec<SeriesSnapshot> {
        self.windows
            .iter()
            .map(|w| w.snapshot(self.width, self.height))
            .collect()
    }
}
