//! Header that collapses to its minimum and stays

use std::sync::Arc;

use furl_animation::TimeSource;
use furl_core::{GesturePhase, NestedScrollSource, Offset, Velocity};

use super::GestureState;
use crate::connection::NestedScrollConnection;
use crate::fling::FlingBehavior;
use crate::snap::SnapStrategy;
use crate::toolbar::ToolbarState;

/// Collapses the header before the content scrolls; expands it only with what
/// the content leaves over. No offset: the header never leaves the screen.
pub struct ExitUntilCollapsed<T, F> {
    toolbar: T,
    flinger: F,
    snap: Option<SnapStrategy>,
    gesture: GestureState,
}

impl<T: ToolbarState, F: FlingBehavior> ExitUntilCollapsed<T, F> {
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
            gesture: GestureState::new(time),
        }
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

impl<T: ToolbarState, F: FlingBehavior> NestedScrollConnection for ExitUntilCollapsed<T, F> {
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        let dy = available.y;
        self.gesture.on_pre_scroll(source, dy);

        if dy >= 0.0 {
            return Offset::ZERO;
        }
        let consumed = self.toolbar.dispatch_raw_delta(dy);
        tracing::trace!(
            "exit-until-collapsed pre-scroll {:.2}: consumed {:.2}, height {}",
            dy,
            consumed,
            self.toolbar.height()
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
        Offset::vertical(self.toolbar.dispatch_raw_delta(available.y))
    }

    async fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        self.gesture.on_pre_fling();
        let tracked = self.gesture.tracker.resolve_and_reset();

        // A collapsing fling the tracker disagrees with is not the header's
        if available.y >= 0.0 || tracked.is_some_and(|v| v > 0.0) {
            return Velocity::ZERO;
        }

        let left = self.toolbar.fling(&mut self.flinger, available.y).await;
        tracing::debug!(
            "exit-until-collapsed pre-fling {:.1}: left {:.1}",
            available.y,
            left
        );
        Velocity::vertical(available.y - left)
    }

    async fn on_post_fling(&mut self, _consumed: Velocity, available: Velocity) -> Velocity {
        self.gesture.on_post_fling();

        let mut consumed = 0.0;
        if available.y > 0.0 {
            let left = self.toolbar.fling(&mut self.flinger, available.y).await;
            consumed = available.y - left;
        }

        if let Some(snap) = &self.snap {
            self.toolbar.process_snap(snap).await;
        }
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

    type Coordinator = ExitUntilCollapsed<
        CollapsingToolbarState<FixedStepClock>,
        DecayFlingBehavior<FixedStepClock>,
    >;

    fn coordinator(snap: Option<SnapStrategy>) -> (Coordinator, ManualTime) {
        let time = ManualTime::new();
        let toolbar = CollapsingToolbarState::new(50, 80, FixedStepClock::from_fps(60)).unwrap();
        let flinger = DecayFlingBehavior::new(DecayConfig::default(), FixedStepClock::from_fps(60));
        (
            ExitUntilCollapsed::new(toolbar, flinger, snap, Arc::new(time.clone())),
            time,
        )
    }

    fn drag(c: &mut Coordinator, dy: f32) -> f32 {
        c.on_pre_scroll(Offset::vertical(dy), NestedScrollSource::Drag)
            .y
    }

    #[test]
    fn test_collapses_to_minimum() {
        let (mut c, _) = coordinator(None);

        assert_eq!(drag(&mut c, -40.0), -30.0);
        assert_eq!(c.toolbar().height(), 50);
        assert_eq!(drag(&mut c, -10.0), 0.0);
    }

    #[test]
    fn test_expands_only_after_content() {
        let (mut c, _) = coordinator(None);
        drag(&mut c, -40.0);

        assert_eq!(drag(&mut c, 20.0), 0.0);
        assert_eq!(c.toolbar().height(), 50);

        let consumed = c.on_post_scroll(
            Offset::vertical(5.0),
            Offset::vertical(15.0),
            NestedScrollSource::Drag,
        );
        assert_eq!(consumed.y, 15.0);
        assert_eq!(c.toolbar().height(), 65);
    }

    #[test]
    fn test_pre_fling_collapses_header() {
        let (mut c, time) = coordinator(None);
        for _ in 0..3 {
            time.advance_ms(16);
            drag(&mut c, -4.0);
        }

        let consumed = pollster::block_on(c.on_pre_fling(Velocity::vertical(-2000.0)));

        assert!(c.toolbar().is_collapsed());
        assert!(consumed.y < 0.0 && consumed.y > -2000.0);
    }

    #[test]
    fn test_pre_fling_ignores_contradicting_velocity() {
        let (mut c, time) = coordinator(None);
        for _ in 0..3 {
            time.advance_ms(16);
            drag(&mut c, 8.0);
        }

        let consumed = pollster::block_on(c.on_pre_fling(Velocity::vertical(-2000.0)));

        assert_eq!(consumed, Velocity::ZERO);
        assert!(c.toolbar().is_expanded());
    }

    #[test]
    fn test_post_fling_expands_and_snaps() {
        let (mut c, _) = coordinator(Some(SnapStrategy::default()));
        drag(&mut c, -20.0); // progress 1/3

        let consumed =
            pollster::block_on(c.on_post_fling(Velocity::ZERO, Velocity::vertical(-800.0)));

        assert_eq!(consumed, Velocity::ZERO);
        assert!(c.toolbar().is_collapsed());
        assert_eq!(c.phase(), GesturePhase::Idle);

        let consumed =
            pollster::block_on(c.on_post_fling(Velocity::ZERO, Velocity::vertical(2500.0)));
        assert!(consumed.y > 0.0);
        assert!(c.toolbar().is_expanded());
    }
}
