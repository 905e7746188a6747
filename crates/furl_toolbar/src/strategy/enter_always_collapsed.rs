//! Header that re-enters collapsed and expands at the top of the content

use std::sync::Arc;

use furl_animation::TimeSource;
use furl_core::{GesturePhase, NestedScrollSource, Offset, Velocity};

use super::{settle, GestureState};
use crate::accumulator::OffsetAccumulator;
use crate::connection::NestedScrollConnection;
use crate::fling::FlingBehavior;
use crate::snap::SnapStrategy;
use crate::toolbar::ToolbarState;

/// Collapses and slides off like [`EnterAlways`](super::EnterAlways), but an
/// expanding scroll only slides the collapsed header back in. Its height grows
/// from whatever the content leaves over, i.e. once the content is at its top.
pub struct EnterAlwaysCollapsed<T, F> {
    toolbar: T,
    flinger: F,
    snap: Option<SnapStrategy>,
    offset: i32,
    accumulator: OffsetAccumulator,
    gesture: GestureState,
}

impl<T: ToolbarState, F: FlingBehavior> EnterAlwaysCollapsed<T, F> {
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
}

impl<T: ToolbarState, F: FlingBehavior> NestedScrollConnection for EnterAlwaysCollapsed<T, F> {
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        let dy = available.y;
        self.gesture.on_pre_scroll(source, dy);

        let consumed = if dy > 0.0 {
            let offset_consumed = dy.min(-self.offset as f32).max(0.0);
            let height = self.toolbar.height();
            self.accumulator
                .apply_within(&mut self.offset, offset_consumed, -height, 0);
            offset_consumed
        } else {
            let toolbar_consumed = self.toolbar.dispatch_raw_delta(dy);
            let height = self.toolbar.height();
            let offset_consumed = (dy - toolbar_consumed)
                .max((-height - self.offset) as f32)
                .min(0.0);
            self.accumulator
                .apply_within(&mut self.offset, offset_consumed, -height, 0);
            toolbar_consumed + offset_consumed
        };

        tracing::trace!(
            "enter-always-collapsed pre-scroll {:.2}: consumed {:.2}, height {}, offset {}",
            dy,
            consumed,
            self.toolbar.height(),
            self.offset
        );
        Offset::vertical(consumed)
    }

    fn on_post_scroll(
        &mut self,
        _consumed: Offset,
        available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        if available.y <= 0.0 {
            return Offset::ZERO;
        }
        // Content is at its top: the header grows
        Offset::vertical(self.toolbar.dispatch_raw_delta(available.y))
    }

    async fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        self.gesture.on_pre_fling();
        // Only the part of the release velocity this coordinator did not see
        let consumed = self.gesture.tracker.derive_adjustment(available.y);
        tracing::debug!(
            "enter-always-collapsed pre-fling {:.1}: adjustment {:.1}",
            available.y,
            consumed
        );
        Velocity::vertical(consumed)
    }

    async fn on_post_fling(&mut self, _consumed: Velocity, available: Velocity) -> Velocity {
        self.gesture.on_post_fling();

        let mut consumed = 0.0;
        if available.y > 0.0 {
            let left = self.toolbar.fling(&mut self.flinger, available.y).await;
            consumed = available.y - left;
        }
        self.gesture.tracker.reset();

        settle(
            &mut self.toolbar,
            self.snap.as_ref(),
            &mut self.offset,
            &mut self.accumulator,
        )
        .await;
        self.gesture.settled();
        Velocity::vertical(consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fling::DecayFlingBehavior;
    use crate::toolbar::CollapsingToolbarState;
    use furl_animation::{DecayConfig, FixedStepClock, ManualTime};

    type Coordinator = EnterAlwaysCollapsed<
        CollapsingToolbarState<FixedStepClock>,
        DecayFlingBehavior<FixedStepClock>,
    >;

    fn coordinator(snap: Option<SnapStrategy>) -> (Coordinator, ManualTime) {
        let time = ManualTime::new();
        let toolbar = CollapsingToolbarState::new(50, 80, FixedStepClock::from_fps(60)).unwrap();
        let flinger = DecayFlingBehavior::new(DecayConfig::default(), FixedStepClock::from_fps(60));
        (
            EnterAlwaysCollapsed::new(toolbar, flinger, snap, Arc::new(time.clone())),
            time,
        )
    }

    fn drag(c: &mut Coordinator, dy: f32) -> f32 {
        c.on_pre_scroll(Offset::vertical(dy), NestedScrollSource::Drag)
            .y
    }

    #[test]
    fn test_expand_restores_offset_only() {
        let (mut c, _) = coordinator(None);
        drag(&mut c, -50.0);
        assert_eq!(c.offset(), -20);

        assert_eq!(drag(&mut c, 15.0), 15.0);
        assert_eq!(c.offset(), -5);
        assert_eq!(c.toolbar().height(), 50);

        // Offset back at rest; the height does not grow at pre-scroll
        assert_eq!(drag(&mut c, 15.0), 5.0);
        assert_eq!(c.offset(), 0);
        assert_eq!(c.toolbar().height(), 50);
    }

    #[test]
    fn test_post_scroll_grows_header() {
        let (mut c, _) = coordinator(None);
        drag(&mut c, -50.0);
        drag(&mut c, 15.0);

        let consumed = c.on_post_scroll(
            Offset::ZERO,
            Offset::vertical(10.0),
            NestedScrollSource::Drag,
        );

        assert_eq!(consumed.y, 10.0);
        assert_eq!(c.toolbar().height(), 60);

        // Collapsing leftovers are not taken
        let consumed = c.on_post_scroll(
            Offset::ZERO,
            Offset::vertical(-10.0),
            NestedScrollSource::Drag,
        );
        assert_eq!(consumed, Offset::ZERO);
    }

    #[test]
    fn test_pre_fling_consumes_unobserved_velocity() {
        let (mut c, time) = coordinator(None);
        for _ in 0..4 {
            time.advance_ms(16);
            drag(&mut c, -16.0);
        }

        let consumed = pollster::block_on(c.on_pre_fling(Velocity::vertical(-1500.0)));

        // Tracked about -1000 px/s of the -1500 reported
        assert!((consumed.y + 500.0).abs() < 1.0, "consumed {}", consumed.y);
    }

    #[test]
    fn test_pre_fling_without_estimate_consumes_nothing() {
        let (mut c, _) = coordinator(None);

        let consumed = pollster::block_on(c.on_pre_fling(Velocity::vertical(-1500.0)));

        assert_eq!(consumed, Velocity::ZERO);
    }

    #[test]
    fn test_post_fling_expands_header() {
        let (mut c, _) = coordinator(None);
        drag(&mut c, -30.0);

        let consumed =
            pollster::block_on(c.on_post_fling(Velocity::ZERO, Velocity::vertical(2000.0)));

        assert!(c.toolbar().is_expanded());
        assert!(consumed.y > 0.0 && consumed.y < 2000.0);
        assert_eq!(c.phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_post_fling_snaps() {
        let (mut c, _) = coordinator(Some(SnapStrategy::default()));
        drag(&mut c, -20.0); // progress 1/3

        let consumed = pollster::block_on(c.on_post_fling(Velocity::ZERO, Velocity::ZERO));

        assert_eq!(consumed, Velocity::ZERO);
        assert!(c.toolbar().is_collapsed());
    }
}
