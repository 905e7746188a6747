//! Furl Core
//!
//! This crate provides the foundational primitives shared by the Furl crates:
//!
//! - **Geometry**: `Offset` and `Velocity` vectors exchanged by nested scroll hooks
//! - **Scroll Sources**: Where a scroll delta came from (drag, wheel, fling)
//! - **Gesture Phases**: A small state machine tracking one continuous gesture
//!
//! # Example
//!
//! ```rust
//! use furl_core::events::event_types;
//! use furl_core::fsm::{GesturePhase, PhaseMachine};
//!
//! let mut phase = PhaseMachine::new(GesturePhase::Idle);
//!
//! phase.send(event_types::DRAG_SCROLL);
//! assert_eq!(phase.current(), GesturePhase::Dragging);
//!
//! phase.send(event_types::PRE_FLING);
//! assert_eq!(phase.current(), GesturePhase::Flinging);
//! ```

pub mod events;
pub mod fsm;
pub mod geometry;

pub use events::{EventId, NestedScrollSource};
pub use fsm::{GesturePhase, PhaseMachine, StateTransitions};
pub use geometry::{Offset, Velocity};
