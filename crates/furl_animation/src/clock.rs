//! Time sources and frame clocks
//!
//! Two notions of time drive a collapsing header:
//!
//! - A [`TimeSource`] timestamps scroll samples for velocity tracking.
//! - A [`FrameClock`] paces animations; awaiting it yields the time elapsed
//!   since the previous frame.
//!
//! Tests and simulations use [`ManualTime`] and [`FixedStepClock`] so runs are
//! deterministic. Hosts use [`MonotonicTime`] and their own frame clock (or
//! `TokioFrameClock` with the `tokio` feature).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Milliseconds since an arbitrary, fixed origin
pub trait TimeSource: Send + Sync {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time measured from construction
#[derive(Clone, Copy, Debug)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Time that only moves when told to. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub struct ManualTime {
    now_ms: Arc<AtomicU64>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, duration: Duration) {
        self.now_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }

    pub fn set_ms(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::Relaxed);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

/// Source of animation frames
#[allow(async_fn_in_trait)]
pub trait FrameClock {
    /// Wait for the next frame and return the time elapsed since the last one
    async fn next_frame(&mut self) -> Duration;
}

/// Frames that resolve immediately with a constant step.
///
/// When linked to a [`ManualTime`], every frame also advances that time so
/// velocity samples taken during an animation line up with the frames.
#[derive(Clone, Debug)]
pub struct FixedStepClock {
    step: Duration,
    frames: u64,
    time: Option<ManualTime>,
}

impl FixedStepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            frames: 0,
            time: None,
        }
    }

    /// Clock stepping at `fps` frames per second
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / fps.max(1) as f64))
    }

    /// Advance `time` by one step on every frame
    pub fn linked(mut self, time: ManualTime) -> Self {
        self.time = Some(time);
        self
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Number of frames produced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for FixedStepClock {
    fn default() -> Self {
        Self::from_fps(60)
    }
}

impl FrameClock for FixedStepClock {
    async fn next_frame(&mut self) -> Duration {
        self.frames += 1;
        if let Some(time) = &self.time {
            time.advance(self.step);
        }
        self.step
    }
}

/// Frames paced by `tokio::time` at a target rate
#[cfg(feature = "tokio")]
pub struct TokioFrameClock {
    interval: tokio::time::Interval,
    last_frame: tokio::time::Instant,
}

#[cfg(feature = "tokio")]
impl TokioFrameClock {
    /// Must be called from within a tokio runtime with the time driver enabled
    pub fn new(target_fps: u32) -> Self {
        let period = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        Self {
            interval,
            last_frame: tokio::time::Instant::now(),
        }
    }
}

#[cfg(feature = "tokio")]
impl FrameClock for TokioFrameClock {
    async fn next_frame(&mut self) -> Duration {
        let now = self.interval.tick().await;
        let dt = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        dt
    }
}
