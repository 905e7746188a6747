//! Header that re-enters on any expanding scroll

use std::sync::Arc;

use furl_animation::TimeSource;
use furl_core::{GesturePhase, NestedScrollSource, Offset, Velocity};

use super::{settle, GestureState};
use crate::accumulator::OffsetAccumulator;
use crate::connection::NestedScrollConnection;
use crate::fling::FlingBehavior;
use crate::snap::SnapStrategy;
use crate::toolbar::ToolbarState;

/// Collapses the header, then slides it off-screen. Any expanding scroll
/// brings it back, offset first, before the content moves.
///
/// At rest at most one of height and offset is away from its resting value:
/// the offset only moves once the height is at its minimum, and the height
/// only grows once the offset is back at 0.
pub struct EnterAlways<T, F> {
    toolbar: T,
    flinger: F,
    snap: Option<SnapStrategy>,
    offset: i32,
    accumulator: OffsetAccumulator,
    gesture: GestureState,
}

impl<T: ToolbarState, F: FlingBehavior> EnterAlways<T, F> {
    pub fn new(
        toolbar: T,
        flinger: F,
        snap: Option<SnapStrategy>,
        time: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            toolbar,
            flinger,
            snap,
            offset: 0,
            accumulator: OffsetAccumulator::new(),
            gesture: GestureState::new(time),
        }
    }

    /// Header offset, from 0 (shown) to `-height` (hidden)
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn toolbar(&self) -> &T {
        &self.toolbar
    }

    pub fn toolbar_mut(&mut self) -> &mut T {
        &mut self.toolbar
    }

    pub fn phase(&self) -> GesturePhase {
        self.gesture.phase.current()
    }

    pub fn snap(&self) -> Option<&SnapStrategy> {
        self.snap.as_ref()
    }

    fn apply_offset(&mut self, delta: f32) {
        let height = self.toolbar.height();
        self.accumulator
            .apply_within(&mut self.offset, delta, -height, 0);
    }
}

impl<T: ToolbarState, F: FlingBehavior> NestedScrollConnection for EnterAlways<T, F> {
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        let dy = available.y;
        self.gesture.on_pre_scroll(source, dy);

        let consumed = if dy < 0.0 {
            // Collapsing: height first, then slide off
            let toolbar_consumed = self.toolbar.dispatch_raw_delta(dy);
            let height = self.toolbar.height();
            let offset_consumed = (dy - toolbar_consumed)
                .max((-height - self.offset) as f32)
                .min(0.0);
            self.apply_offset(offset_consumed);
            toolbar_consumed + offset_consumed
        } else {
            // Expanding: slide back in, then grow
            let offset_consumed = dy.min(-self.offset as f32).max(0.0);
            self.apply_offset(offset_consumed);
            let toolbar_consumed = self.toolbar.dispatch_raw_delta(dy - offset_consumed);
            offset_consumed + toolbar_consumed
        };

        tracing::trace!(
            "enter-always pre-scroll {:.2}: consumed {:.2}, height {}, offset {}",
            dy,
            consumed,
            self.toolbar.height(),
            self.offset
        );
        Offset::vertical(consumed)
    }

    async fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        self.gesture.on_pre_fling();
        let velocity = self
            .gesture
            .tracker
            .resolve_and_reset()
            .unwrap_or(available.y);

        // Collapsing momentum is left to the content; its fling comes back
        // through pre-scroll. Same for expanding while the header is slid off,
        // so the offset is restored before the height grows.
        if velocity <= 0.0 || available.y <= 0.0 || self.offset != 0 {
            return Velocity::ZERO;
        }

        let left = self.toolbar.fling(&mut self.flinger, velocity).await;
        let consumed = (velocity - left).clamp(0.0, available.y);
        tracing::debug!(
            "enter-always pre-fling {:.1} (tracked {:.1}): consumed {:.1}",
            available.y,
            velocity,
            consumed
        );
        Velocity::vertical(consumed)
    }

    async fn on_post_fling(&mut self, _consumed: Velocity, _available: Velocity) -> Velocity {
        self.gesture.on_post_fling();
        settle(
            &mut self.toolbar,
            self.snap.as_ref(),
            &mut self.offset,
            &mut self.accumulator,
        )
        .await;
        self.gesture.settled();
        Velocity::ZERO
    }
}
