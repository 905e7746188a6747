//! Furl Animation System
//!
//! Frame-driven animations used by collapsing headers.
//!
//! # Features
//!
//! - **Frame Clocks**: Await the next frame from a fixed-step or wall-clock source
//! - **Exponential Decay**: Fling momentum that slows down smoothly
//! - **Tweens**: Timed interpolation with easing, used for snapping
//! - **Interruptible**: Running animations stop when their ticket goes stale

pub mod clock;
pub mod decay;
pub mod easing;
pub mod interrupt;
pub mod tween;

pub use clock::{FixedStepClock, FrameClock, ManualTime, MonotonicTime, TimeSource};
#[cfg(feature = "tokio")]
pub use clock::TokioFrameClock;
pub use decay::{DecayAnimation, DecayConfig};
pub use easing::Easing;
pub use interrupt::{InterruptHandle, Ticket};
pub use tween::Tween;
