//! Timed interpolation between two values

use std::time::Duration;

use crate::easing::Easing;

/// A tween from `from` to `to` over a fixed duration
#[derive(Clone, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: u32,
    easing: Easing,
    elapsed_ms: f32,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms,
            easing,
            elapsed_ms: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms as f32).min(1.0)
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(self.progress())
    }

    /// Advance by `dt` and return the new value
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt.as_secs_f32() * 1000.0).min(self.duration_ms as f32);
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms as f32
    }
}
