//! Collapsible header state
//!
//! [`ToolbarState`] is the narrow contract scroll coordinators drive: read the
//! current height, push raw deltas into it, fling it, and snap it.
//! [`CollapsingToolbarState`] is the stock implementation: an integer height
//! between two bounds, with animated fling, snap, expand and collapse.

use furl_animation::{Easing, FrameClock, InterruptHandle, Ticket, Tween};

use crate::error::{Result, ToolbarError};
use crate::fling::{FlingBehavior, ScrollScope};
use crate::snap::{SnapStrategy, SnapTarget};

/// Header height contract consumed by scroll coordinators.
///
/// Implementations clamp internally; none of these operations fail.
#[allow(async_fn_in_trait)]
pub trait ToolbarState {
    /// Current header height in pixels
    fn height(&self) -> i32;

    /// Consume as much of `dy` as the header's own height range allows.
    ///
    /// Returns the consumed amount: same sign as `dy`, magnitude at most `|dy|`.
    fn dispatch_raw_delta(&mut self, dy: f32) -> f32;

    /// Animate the height with `flinger` and return the velocity left over
    /// once a height bound is reached.
    async fn fling<F: FlingBehavior>(&mut self, flinger: &mut F, velocity: f32) -> f32;

    /// Settle the height to the nearer of collapsed / expanded
    async fn process_snap(&mut self, snap: &SnapStrategy);

    /// Settle a header offset (not the height) to fully shown or fully hidden
    async fn process_offset_snap(&mut self, snap: &SnapStrategy, offset: &mut i32);
}

/// Default expand / collapse animation length
const DEFAULT_DURATION_MS: u32 = 200;

/// Header whose height varies between `min_height` and `max_height`
#[derive(Debug)]
pub struct CollapsingToolbarState<C: FrameClock> {
    min_height: i32,
    max_height: i32,
    height: i32,
    /// Fractional height change not yet applied, within (-1, 1)
    deferred: f32,
    clock: C,
    interrupt: InterruptHandle,
}

impl<C: FrameClock> CollapsingToolbarState<C> {
    /// Create a fully expanded header
    pub fn new(min_height: i32, max_height: i32, clock: C) -> Result<Self> {
        if min_height < 0 || min_height > max_height {
            return Err(ToolbarError::InvalidBounds {
                min: min_height,
                max: max_height,
            });
        }

        Ok(Self {
            min_height,
            max_height,
            height: max_height,
            deferred: 0.0,
            clock,
            interrupt: InterruptHandle::new(),
        })
    }

    /// Start at `height` instead of fully expanded
    pub fn with_height(mut self, height: i32) -> Result<Self> {
        if !(self.min_height..=self.max_height).contains(&height) {
            return Err(ToolbarError::InvalidHeight {
                height,
                min: self.min_height,
                max: self.max_height,
            });
        }
        self.height = height;
        Ok(self)
    }

    pub fn min_height(&self) -> i32 {
        self.min_height
    }

    pub fn max_height(&self) -> i32 {
        self.max_height
    }

    /// 0.0 when collapsed, 1.0 when expanded
    pub fn progress(&self) -> f32 {
        if self.min_height == self.max_height {
            return 0.0;
        }
        ((self.height - self.min_height) as f32 / (self.max_height - self.min_height) as f32)
            .clamp(0.0, 1.0)
    }

    pub fn is_collapsed(&self) -> bool {
        self.height == self.min_height
    }

    pub fn is_expanded(&self) -> bool {
        self.height == self.max_height
    }

    /// Handle that stops running animations of this header
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Animate to fully expanded
    pub async fn expand(&mut self, duration_ms: u32) {
        self.animate_height_to(self.max_height, duration_ms, Easing::default())
            .await;
    }

    /// Animate to fully collapsed
    pub async fn collapse(&mut self, duration_ms: u32) {
        self.animate_height_to(self.min_height, duration_ms, Easing::default())
            .await;
    }

    /// Expand with the default duration
    pub async fn expand_default(&mut self) {
        self.expand(DEFAULT_DURATION_MS).await;
    }

    /// Collapse with the default duration
    pub async fn collapse_default(&mut self) {
        self.collapse(DEFAULT_DURATION_MS).await;
    }

    /// Tween the height to `target` (clamped to the bounds)
    pub async fn animate_height_to(&mut self, target: i32, duration_ms: u32, easing: Easing) {
        let target = target.clamp(self.min_height, self.max_height);
        if target == self.height {
            return;
        }

        let ticket = self.interrupt.ticket();
        let mut tween = Tween::new(self.height as f32, target as f32, duration_ms, easing);
        let mut previous = tween.value();
        tracing::debug!("height animation {} -> {}", self.height, target);

        while !tween.is_finished() {
            let dt = self.clock.next_frame().await;
            if ticket.is_stale() {
                tracing::debug!("height animation interrupted at {}", self.height);
                return;
            }
            let value = tween.advance(dt);
            self.feed_scroll(value - previous);
            previous = value;
        }

        self.height = target;
        self.deferred = 0.0;
    }

    /// Apply `value` to the height within bounds, returning what was consumed
    fn feed_scroll(&mut self, value: f32) -> f32 {
        let consume = if value < 0.0 {
            value.max((self.min_height - self.height) as f32)
        } else {
            value.min((self.max_height - self.height) as f32)
        };

        let target = self.height as f32 + consume;
        if target <= self.min_height as f32 {
            self.height = self.min_height;
            self.deferred = 0.0;
        } else if target >= self.max_height as f32 {
            self.height = self.max_height;
            self.deferred = 0.0;
        } else {
            let current = consume + self.deferred;
            let whole = current.trunc();
            self.height += whole as i32;
            self.deferred = current - whole;
        }

        consume
    }
}

/// Fling target that stops accepting deltas once its ticket goes stale
struct HeightScope<'a, C: FrameClock> {
    state: &'a mut CollapsingToolbarState<C>,
    ticket: Ticket,
}

impl<C: FrameClock> ScrollScope for HeightScope<'_, C> {
    fn scroll_by(&mut self, delta: f32) -> f32 {
        if self.ticket.is_stale() {
            return 0.0;
        }
        self.state.feed_scroll(delta)
    }
}

impl<C: FrameClock> ToolbarState for CollapsingToolbarState<C> {
    fn height(&self) -> i32 {
        self.height
    }

    fn dispatch_raw_delta(&mut self, dy: f32) -> f32 {
        let consumed = self.feed_scroll(dy);
        tracing::trace!(
            "toolbar delta {:.2}: consumed {:.2}, height {}",
            dy,
            consumed,
            self.height
        );
        consumed
    }

    async fn fling<F: FlingBehavior>(&mut self, flinger: &mut F, velocity: f32) -> f32 {
        let ticket = self.interrupt.ticket();
        let start = self.height;
        let mut scope = HeightScope {
            state: self,
            ticket,
        };

        let left = flinger.perform_fling(&mut scope, velocity).await;
        tracing::debug!(
            "toolbar fling {:.1}: height {} -> {}, left {:.1}",
            velocity,
            start,
            self.height,
            left
        );
        left
    }

    async fn process_snap(&mut self, snap: &SnapStrategy) {
        let target = match snap.target_for(self.progress()) {
            SnapTarget::Collapsed => self.min_height,
            SnapTarget::Expanded => self.max_height,
        };
        self.animate_height_to(target, snap.duration_ms, snap.easing)
            .await;
    }

    async fn process_offset_snap(&mut self, snap: &SnapStrategy, offset: &mut i32) {
        let height = self.height;
        if height <= 0 {
            *offset = 0;
            return;
        }

        // Offset runs from 0 (shown) to -height (hidden)
        let visible = (1.0 + *offset as f32 / height as f32).clamp(0.0, 1.0);
        let target = match snap.target_for(visible) {
            SnapTarget::Collapsed => -height,
            SnapTarget::Expanded => 0,
        };
        if target == *offset {
            return;
        }

        let ticket = self.interrupt.ticket();
        let mut tween = Tween::new(*offset as f32, target as f32, snap.duration_ms, snap.easing);
        tracing::debug!("offset snap {} -> {}", *offset, target);

        while !tween.is_finished() {
            let dt = self.clock.next_frame().await;
            if ticket.is_stale() {
                tracing::debug!("offset snap interrupted at {}", *offset);
                return;
            }
            *offset = tween.advance(dt).round() as i32;
        }

        *offset = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fling::DecayFlingBehavior;
    use furl_animation::{DecayConfig, FixedStepClock};

    fn toolbar() -> CollapsingToolbarState<FixedStepClock> {
        CollapsingToolbarState::new(50, 80, FixedStepClock::from_fps(60)).unwrap()
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(matches!(
            CollapsingToolbarState::new(80, 50, FixedStepClock::default()),
            Err(ToolbarError::InvalidBounds { min: 80, max: 50 })
        ));
        assert!(CollapsingToolbarState::new(-1, 50, FixedStepClock::default()).is_err());
        assert!(matches!(
            toolbar().with_height(90),
            Err(ToolbarError::InvalidHeight { .. })
        ));
    }

    #[test]
    fn test_dispatch_clamps_to_bounds() {
        let mut toolbar = toolbar();

        assert_eq!(toolbar.dispatch_raw_delta(-50.0), -30.0);
        assert_eq!(toolbar.height(), 50);
        assert!(toolbar.is_collapsed());

        // Nothing left to collapse
        assert_eq!(toolbar.dispatch_raw_delta(-10.0), 0.0);

        assert_eq!(toolbar.dispatch_raw_delta(12.0), 12.0);
        assert_eq!(toolbar.height(), 62);
        assert_eq!(toolbar.dispatch_raw_delta(100.0), 18.0);
        assert!(toolbar.is_expanded());
    }

    #[test]
    fn test_fractional_deltas_accumulate() {
        let mut toolbar = toolbar();
        for _ in 0..10 {
            toolbar.dispatch_raw_delta(-0.5);
        }
        assert_eq!(toolbar.height(), 75);
    }

    #[test]
    fn test_progress() {
        let mut toolbar = toolbar();
        assert_eq!(toolbar.progress(), 1.0);
        toolbar.dispatch_raw_delta(-15.0);
        assert!((toolbar.progress() - 0.5).abs() < 1e-6);

        let fixed = CollapsingToolbarState::new(56, 56, FixedStepClock::default()).unwrap();
        assert_eq!(fixed.progress(), 0.0);
    }

    #[test]
    fn test_expand_and_collapse_animate_to_bounds() {
        let mut toolbar = toolbar();

        pollster::block_on(toolbar.collapse(200));
        assert!(toolbar.is_collapsed());
        let frames = toolbar.clock().frames();
        assert!(frames >= 12, "collapsed in {} frames", frames);

        pollster::block_on(toolbar.expand_default());
        assert!(toolbar.is_expanded());
    }

    #[test]
    fn test_snap_picks_nearest_bound() {
        let snap = SnapStrategy::default();

        let mut toolbar = toolbar();
        toolbar.dispatch_raw_delta(-20.0); // progress 1/3
        pollster::block_on(toolbar.process_snap(&snap));
        assert!(toolbar.is_collapsed());

        let mut toolbar = self::toolbar();
        toolbar.dispatch_raw_delta(-10.0); // progress 2/3
        pollster::block_on(toolbar.process_snap(&snap));
        assert!(toolbar.is_expanded());
    }

    #[test]
    fn test_offset_snap() {
        let snap = SnapStrategy::default();
        let mut toolbar = toolbar();
        toolbar.dispatch_raw_delta(-30.0); // height 50

        let mut offset = -30; // 40% visible
        pollster::block_on(toolbar.process_offset_snap(&snap, &mut offset));
        assert_eq!(offset, -50);

        let mut offset = -10; // 80% visible
        pollster::block_on(toolbar.process_offset_snap(&snap, &mut offset));
        assert_eq!(offset, 0);
        // Height untouched
        assert_eq!(toolbar.height(), 50);
    }

    #[test]
    fn test_fling_stops_at_bound() {
        let mut toolbar = toolbar();
        toolbar.dispatch_raw_delta(-30.0);
        let mut flinger = DecayFlingBehavior::new(DecayConfig::default(), FixedStepClock::from_fps(60));

        let left = pollster::block_on(toolbar.fling(&mut flinger, 3000.0));

        assert!(toolbar.is_expanded());
        assert!(left > 0.0 && left < 3000.0);
    }

    /// Fling that interrupts its own target after a few frames
    struct InterruptingFling {
        handle: InterruptHandle,
        frames_before_interrupt: usize,
    }

    impl FlingBehavior for InterruptingFling {
        async fn perform_fling<S: ScrollScope>(&mut self, scope: &mut S, initial_velocity: f32) -> f32 {
            for frame in 0.. {
                if frame == self.frames_before_interrupt {
                    self.handle.interrupt();
                }
                if scope.scroll_by(-1.0) == 0.0 {
                    return initial_velocity;
                }
            }
            0.0
        }
    }

    #[test]
    fn test_interrupt_stops_fling() {
        let mut toolbar = toolbar();
        let mut flinger = InterruptingFling {
            handle: toolbar.interrupt_handle(),
            frames_before_interrupt: 5,
        };

        let left = pollster::block_on(toolbar.fling(&mut flinger, -500.0));

        assert_eq!(left, -500.0);
        assert_eq!(toolbar.height(), 75);
    }

    #[test]
    fn test_interrupt_before_start_is_ignored() {
        let mut toolbar = toolbar();
        toolbar.dispatch_raw_delta(-20.0);
        toolbar.interrupt_handle().interrupt();

        // Interrupts issued before an animation starts do not affect it
        pollster::block_on(toolbar.process_snap(&SnapStrategy::default()));
        assert!(toolbar.is_collapsed());
    }
}
