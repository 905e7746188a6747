//! Fling execution
//!
//! A [`FlingBehavior`] turns a release velocity into a sequence of scroll
//! deltas, feeding them to a [`ScrollScope`] one frame at a time until the
//! scope stops accepting them or the momentum runs out.

use furl_animation::{DecayAnimation, DecayConfig, FrameClock};

/// Receiver of fling-driven scroll deltas
pub trait ScrollScope {
    /// Scroll by `delta` pixels and return how much was actually consumed
    fn scroll_by(&mut self, delta: f32) -> f32;
}

/// Policy that animates a fling against a [`ScrollScope`]
#[allow(async_fn_in_trait)]
pub trait FlingBehavior {
    /// Run the fling and return the velocity left unconsumed
    async fn perform_fling<S: ScrollScope>(&mut self, scope: &mut S, initial_velocity: f32) -> f32;
}

/// Consumed amounts within this distance of the offered delta count as full
const CONSUME_TOLERANCE: f32 = 0.5;

/// Exponential-decay fling paced by a frame clock
#[derive(Clone, Debug)]
pub struct DecayFlingBehavior<C: FrameClock> {
    config: DecayConfig,
    clock: C,
}

impl<C: FrameClock> DecayFlingBehavior<C> {
    pub fn new(config: DecayConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: FrameClock> FlingBehavior for DecayFlingBehavior<C> {
    async fn perform_fling<S: ScrollScope>(&mut self, scope: &mut S, initial_velocity: f32) -> f32 {
        // Too slow to be worth animating; hand it back untouched
        if initial_velocity.abs() <= self.config.velocity_threshold {
            return initial_velocity;
        }

        let mut anim = DecayAnimation::new(self.config, initial_velocity);
        let mut travelled = 0.0;

        while !anim.is_finished() {
            let dt = self.clock.next_frame().await;
            let value = anim.advance(dt);
            let delta = value - travelled;
            travelled = value;

            let consumed = scope.scroll_by(delta);
            if (delta - consumed).abs() > CONSUME_TOLERANCE {
                // Scope hit a bound (or was interrupted); the rest is leftover
                tracing::debug!(
                    "fling stopped: offered {:.1}, consumed {:.1}, velocity left {:.1}",
                    delta,
                    consumed,
                    anim.velocity()
                );
                return anim.velocity();
            }
        }

        0.0
    }
}
