//! Furl Toolbar
//!
//! Nested scroll coordination between a collapsible header and the content
//! scrolling beneath it. A single stream of scroll deltas and fling velocities
//! is split between the header's height, an optional header offset that slides
//! it off-screen, and the content, without losing or double-counting motion.
//!
//! # Features
//!
//! - **Three Strategies**: `EnterAlways`, `EnterAlwaysCollapsed`, `ExitUntilCollapsed`
//! - **Drift-free Offsets**: Fractional deltas accumulate into whole pixels
//! - **Velocity Tracking**: Windowed estimate used to apportion fling velocity
//! - **Fling and Snap**: Decay flings and tweened snaps paced by a frame clock
//! - **Configuration**: `furl.toml` describing bounds, strategy, snap and fling
//!
//! # Example
//!
//! ```rust
//! use furl_toolbar::{
//!     FixedStepClock, NestedScrollConnection, NestedScrollSource, Offset, ScrollStrategy,
//!     ToolbarConfig, ToolbarState,
//! };
//!
//! let config = ToolbarConfig::new(ScrollStrategy::EnterAlways, 50, 80);
//! let mut coordinator = config.build_with(FixedStepClock::from_fps).unwrap();
//!
//! let consumed = coordinator.on_pre_scroll(Offset::vertical(-50.0), NestedScrollSource::Drag);
//!
//! assert_eq!(consumed.y, -50.0);
//! assert_eq!(coordinator.toolbar().height(), 50);
//! assert_eq!(coordinator.offset(), -20);
//! ```

pub mod accumulator;
pub mod config;
pub mod connection;
pub mod error;
pub mod fling;
pub mod snap;
pub mod strategy;
pub mod toolbar;
pub mod velocity;

pub use accumulator::OffsetAccumulator;
pub use config::{ConfiguredCoordinator, ToolbarConfig};
pub use connection::NestedScrollConnection;
pub use error::{Result, ToolbarError};
pub use fling::{DecayFlingBehavior, FlingBehavior, ScrollScope};
pub use snap::{SnapStrategy, SnapTarget};
pub use strategy::{
    EnterAlways, EnterAlwaysCollapsed, ExitUntilCollapsed, ScrollCoordinator, ScrollStrategy,
};
pub use toolbar::{CollapsingToolbarState, ToolbarState};
pub use velocity::VelocityTracker;

// Re-export the types hosts need alongside the coordinators
pub use furl_animation::{
    DecayConfig, Easing, FixedStepClock, FrameClock, InterruptHandle, ManualTime, MonotonicTime,
    TimeSource,
};
#[cfg(feature = "tokio")]
pub use furl_animation::TokioFrameClock;
pub use furl_core::{GesturePhase, NestedScrollSource, Offset, Velocity};
