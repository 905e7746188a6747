//! Windowed scroll velocity tracking
//!
//! A drag that ends in a fling crosses several hand-off points: the header
//! consumes some deltas at pre-scroll, the content scrolls the rest, and then
//! the platform reports a single release velocity. The tracker keeps its own
//! short history of the deltas a coordinator saw so that, at fling time, the
//! coordinator can tell how much of the release velocity it actually observed.
//!
//! # Estimate
//!
//! Samples are `(time, cumulative position)` pairs. Only samples within
//! [`HORIZON_MS`] of the newest one count. If the newest sample is older than
//! [`ASSUME_STOPPED_MS`] the pointer is considered at rest and the velocity is
//! zero. Otherwise the velocity is the slope of a least-squares line through
//! the samples, weighted so recent samples count more.

use std::sync::Arc;

use furl_animation::TimeSource;
use smallvec::SmallVec;

/// Samples older than this (relative to the newest) are ignored
pub const HORIZON_MS: u64 = 100;

/// A pause longer than this before resolving means the pointer had stopped
pub const ASSUME_STOPPED_MS: u64 = 40;

/// Maximum number of samples retained
const HISTORY_SIZE: usize = 20;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: u64,
    position: f32,
}

/// Time-windowed velocity estimate over recorded scroll deltas
pub struct VelocityTracker {
    time: Arc<dyn TimeSource>,
    samples: SmallVec<[Sample; HISTORY_SIZE]>,
    /// Sum of all deltas since the last reset
    position: f32,
}

impl VelocityTracker {
    pub fn new(time: Arc<dyn TimeSource>) -> Self {
        Self {
            time,
            samples: SmallVec::new(),
            position: 0.0,
        }
    }

    /// Record a scroll delta at the current time
    pub fn record_delta(&mut self, dy: f32) {
        // Samples stay ordered even if the time source steps backwards
        let now = match self.samples.last() {
            Some(newest) => self.time.now_ms().max(newest.time_ms),
            None => self.time.now_ms(),
        };
        self.position += dy;

        // Discard samples that have fallen out of the window
        let cutoff = now.saturating_sub(HORIZON_MS);
        self.samples.retain(|s| s.time_ms >= cutoff);
        if self.samples.len() == HISTORY_SIZE {
            self.samples.remove(0);
        }

        self.samples.push(Sample {
            time_ms: now,
            position: self.position,
        });
    }

    /// Current velocity estimate in pixels/second, or None without enough data
    pub fn velocity(&self) -> Option<f32> {
        self.estimate(self.time.now_ms())
    }

    /// Resolve the velocity of the tracked motion and start over
    pub fn resolve_and_reset(&mut self) -> Option<f32> {
        let velocity = self.velocity();
        self.reset();
        velocity
    }

    /// Split a starting fling velocity by what this tracker observed.
    ///
    /// Returns the part of `initial_velocity` NOT explained by the tracked
    /// motion: `initial - observed`, where `observed` is the tracked velocity
    /// clipped to the sign and magnitude of `initial`. Without an estimate
    /// there is nothing to apportion and the adjustment is zero. The tracker
    /// is left untouched.
    pub fn derive_adjustment(&self, initial_velocity: f32) -> f32 {
        let Some(tracked) = self.velocity() else {
            return 0.0;
        };
        if initial_velocity == 0.0 {
            return 0.0;
        }

        let observed = if tracked.signum() == initial_velocity.signum() {
            tracked.abs().min(initial_velocity.abs()) * initial_velocity.signum()
        } else {
            0.0
        };

        initial_velocity - observed
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        self.samples.clear();
        self.position = 0.0;
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn estimate(&self, now: u64) -> Option<f32> {
        let newest = self.samples.last()?;
        if now.saturating_sub(newest.time_ms) > ASSUME_STOPPED_MS {
            return Some(0.0);
        }

        let window: SmallVec<[(f64, f64, f64); HISTORY_SIZE]> = self
            .samples
            .iter()
            .filter(|s| newest.time_ms.saturating_sub(s.time_ms) <= HORIZON_MS)
            .map(|s| {
                let age = newest.time_ms.saturating_sub(s.time_ms) as f64;
                // Newest sample weighs HORIZON_MS + 1, oldest admissible weighs 1
                let weight = HORIZON_MS as f64 - age + 1.0;
                (-age, s.position as f64, weight)
            })
            .collect();

        if window.len() < 2 {
            return None;
        }

        let total_weight: f64 = window.iter().map(|&(_, _, w)| w).sum();
        let mean_t = window.iter().map(|&(t, _, w)| t * w).sum::<f64>() / total_weight;
        let mean_p = window.iter().map(|&(_, p, w)| p * w).sum::<f64>() / total_weight;

        let (mut s_tt, mut s_tp) = (0.0, 0.0);
        for &(t, p, w) in &window {
            s_tt += w * (t - mean_t) * (t - mean_t);
            s_tp += w * (t - mean_t) * (p - mean_p);
        }

        // All samples share one timestamp
        if s_tt.abs() < f64::EPSILON {
            return None;
        }

        // Slope is in px/ms
        Some((s_tp / s_tt * 1000.0) as f32)
    }
}

impl std::fmt::Debug for VelocityTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VelocityTracker")
            .field("samples", &self.samples.len())
            .field("position", &self.position)
            .finish()
    }
}
