//! Nested scroll hooks
//!
//! The host's gesture dispatcher calls these around the content's own
//! scrolling. For every scroll event: `on_pre_scroll` (coordinator first),
//! then the content scrolls, then `on_post_scroll` with what is left. When the
//! finger lifts: `on_pre_fling`, the content flings, then `on_post_fling`.
//!
//! Every hook returns the amount it consumed. Hooks a strategy does not
//! implement consume nothing.

use furl_core::{NestedScrollSource, Offset, Velocity};

/// Participant in nested scroll dispatch
#[allow(async_fn_in_trait)]
pub trait NestedScrollConnection {
    /// Claim part of `available` before the content scrolls
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        let _ = (available, source);
        Offset::ZERO
    }

    /// Claim part of what the content left unconsumed
    fn on_post_scroll(
        &mut self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        let _ = (consumed, available, source);
        Offset::ZERO
    }

    /// Claim part of the release velocity before the content flings
    async fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        let _ = available;
        Velocity::ZERO
    }

    /// Claim part of the velocity the content's fling left over
    async fn on_post_fling(&mut self, consumed: Velocity, available: Velocity) -> Velocity {
        let _ = (consumed, available);
        Velocity::ZERO
    }
}
