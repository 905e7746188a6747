//! Exponential decay for fling momentum
//!
//! Position and velocity follow
//!
//! ```text
//! x(t) = v0 / f * (e^(f t) - 1)
//! v(t) = v0 * e^(f t)
//! ```
//!
//! with `f = -4.2 * friction`. The animation ends once `|v(t)|` drops below
//! the configured threshold, at which point it has covered almost all of its
//! asymptotic distance `-v0 / f`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base friction coefficient; `friction = 1.0` matches platform fling feel
const FRICTION_SCALE: f32 = -4.2;

/// Configuration for fling decay
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DecayConfig {
    /// Friction multiplier (higher = stops sooner)
    pub friction: f32,
    /// Velocity below which the fling stops (pixels/second)
    pub velocity_threshold: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            friction: 1.0,
            velocity_threshold: 10.0,
        }
    }
}

impl DecayConfig {
    /// Total distance a fling starting at `velocity` travels
    pub fn target_distance(&self, velocity: f32) -> f32 {
        DecayAnimation::new(*self, velocity).target()
    }
}

/// A running exponential decay
#[derive(Clone, Debug)]
pub struct DecayAnimation {
    initial_velocity: f32,
    /// Exponent coefficient, always negative
    coefficient: f32,
    duration_secs: f32,
    elapsed_secs: f32,
}

impl DecayAnimation {
    pub fn new(config: DecayConfig, initial_velocity: f32) -> Self {
        let coefficient = FRICTION_SCALE * config.friction.max(f32::EPSILON);
        let threshold = config.velocity_threshold.max(f32::EPSILON);
        let speed = initial_velocity.abs();

        let duration_secs = if speed <= threshold {
            0.0
        } else {
            (threshold / speed).ln() / coefficient
        };

        Self {
            initial_velocity,
            coefficient,
            duration_secs,
            elapsed_secs: 0.0,
        }
    }

    /// Distance travelled at `t` seconds
    pub fn value_at(&self, t: f32) -> f32 {
        let t = t.min(self.duration_secs);
        self.initial_velocity / self.coefficient * ((self.coefficient * t).exp() - 1.0)
    }

    /// Velocity at `t` seconds
    pub fn velocity_at(&self, t: f32) -> f32 {
        let t = t.min(self.duration_secs);
        self.initial_velocity * (self.coefficient * t).exp()
    }

    /// Asymptotic distance of the whole fling
    pub fn target(&self) -> f32 {
        -self.initial_velocity / self.coefficient
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.duration_secs)
    }

    /// Advance by `dt`, returning the new distance travelled
    pub fn advance(&mut self, dt: Duration) -> f32 {
        self.elapsed_secs = (self.elapsed_secs + dt.as_secs_f32()).min(self.duration_secs);
        self.value()
    }

    pub fn value(&self) -> f32 {
        self.value_at(self.elapsed_secs)
    }

    pub fn velocity(&self) -> f32 {
        self.velocity_at(self.elapsed_secs)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }
}
