//! Nested scroll events
//!
//! Event identifiers fed to gesture phase machines, and the kinds of input a
//! scroll delta can originate from.

use serde::{Deserialize, Serialize};

/// Event type identifier
pub type EventId = u32;

/// Events emitted by the nested scroll hooks
pub mod event_types {
    use super::EventId;

    /// Pre-scroll driven by the user's finger or wheel
    pub const DRAG_SCROLL: EventId = 1;
    /// Pre-scroll driven by a running fling
    pub const FLING_SCROLL: EventId = 2;
    /// Finger lifted with velocity; fling about to start
    pub const PRE_FLING: EventId = 10;
    /// Content finished its fling; leftover velocity is being resolved
    pub const POST_FLING: EventId = 11;
    /// Post-fling work (including snapping) completed
    pub const SETTLED: EventId = 12;
}

/// Where a scroll delta came from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NestedScrollSource {
    /// Touch drag
    #[default]
    Drag,
    /// Mouse wheel or trackpad
    Wheel,
    /// Deltas produced by an in-flight fling animation
    Fling,
}

impl NestedScrollSource {
    /// Whether the delta is direct user input (as opposed to momentum)
    pub fn is_user_input(&self) -> bool {
        matches!(self, NestedScrollSource::Drag | NestedScrollSource::Wheel)
    }

    /// Event id a pre-scroll from this source feeds into the phase machine
    pub fn pre_scroll_event(&self) -> EventId {
        if self.is_user_input() {
            event_types::DRAG_SCROLL
        } else {
            event_types::FLING_SCROLL
        }
    }
}
