//! Scroll strategies
//!
//! A strategy decides, for every scroll delta and fling velocity, how much the
//! header's height takes, how much its offset takes, and how much is left for
//! the content. Exactly one strategy is chosen when a scrollable region is
//! built; [`ScrollStrategy::create`] returns the matching
//! [`ScrollCoordinator`].
//!
//! | Strategy | Collapse order | Expand order | Offset |
//! |---|---|---|---|
//! | `EnterAlways` | header → offset → content | offset → header → content | yes |
//! | `EnterAlwaysCollapsed` | header → offset → content | offset → content → header | yes |
//! | `ExitUntilCollapsed` | header → content | content → header | no |

mod enter_always;
mod enter_always_collapsed;
mod exit_until_collapsed;

pub use enter_always::EnterAlways;
pub use enter_always_collapsed::EnterAlwaysCollapsed;
pub use exit_until_collapsed::ExitUntilCollapsed;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use furl_animation::{MonotonicTime, TimeSource};
use furl_core::events::event_types;
use furl_core::{GesturePhase, NestedScrollSource, Offset, PhaseMachine, Velocity};
use serde::{Deserialize, Serialize};

use crate::accumulator::OffsetAccumulator;
use crate::connection::NestedScrollConnection;
use crate::error::ToolbarError;
use crate::fling::FlingBehavior;
use crate::snap::SnapStrategy;
use crate::toolbar::ToolbarState;
use crate::velocity::VelocityTracker;

/// How the header and content share scroll motion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScrollStrategy {
    /// Header reappears on any expanding scroll, then slides fully off-screen
    #[default]
    EnterAlways,
    /// Like `EnterAlways`, but re-expands only once the content reaches its top
    EnterAlwaysCollapsed,
    /// Header collapses to its minimum height and stays on-screen
    ExitUntilCollapsed,
}

impl ScrollStrategy {
    pub const ALL: [ScrollStrategy; 3] = [
        ScrollStrategy::EnterAlways,
        ScrollStrategy::EnterAlwaysCollapsed,
        ScrollStrategy::ExitUntilCollapsed,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScrollStrategy::EnterAlways => "enter-always",
            ScrollStrategy::EnterAlwaysCollapsed => "enter-always-collapsed",
            ScrollStrategy::ExitUntilCollapsed => "exit-until-collapsed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScrollStrategy::EnterAlways => {
                "header shows on any upward scroll and slides off-screen once collapsed"
            }
            ScrollStrategy::EnterAlwaysCollapsed => {
                "header shows collapsed on upward scroll and expands once content reaches the top"
            }
            ScrollStrategy::ExitUntilCollapsed => {
                "header collapses to its minimum height and never leaves the screen"
            }
        }
    }

    /// Whether the strategy slides the header with an offset
    pub fn uses_offset(&self) -> bool {
        !matches!(self, ScrollStrategy::ExitUntilCollapsed)
    }

    /// Build the coordinator for this strategy
    pub fn create<T, F>(
        self,
        toolbar: T,
        flinger: F,
        snap: Option<SnapStrategy>,
    ) -> ScrollCoordinator<T, F>
    where
        T: ToolbarState,
        F: FlingBehavior,
    {
        self.create_with_time(toolbar, flinger, snap, Arc::new(MonotonicTime::new()))
    }

    /// Build the coordinator with an explicit time source for velocity tracking
    pub fn create_with_time<T, F>(
        self,
        toolbar: T,
        flinger: F,
        snap: Option<SnapStrategy>,
        time: Arc<dyn TimeSource>,
    ) -> ScrollCoordinator<T, F>
    where
        T: ToolbarState,
        F: FlingBehavior,
    {
        tracing::debug!("creating {} coordinator (snap: {})", self, snap.is_some());
        match self {
            ScrollStrategy::EnterAlways => {
                ScrollCoordinator::EnterAlways(EnterAlways::new(toolbar, flinger, snap, time))
            }
            ScrollStrategy::EnterAlwaysCollapsed => ScrollCoordinator::EnterAlwaysCollapsed(
                EnterAlwaysCollapsed::new(toolbar, flinger, snap, time),
            ),
            ScrollStrategy::ExitUntilCollapsed => ScrollCoordinator::ExitUntilCollapsed(
                ExitUntilCollapsed::new(toolbar, flinger, snap, time),
            ),
        }
    }
}

impl fmt::Display for ScrollStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScrollStrategy {
    type Err = ToolbarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScrollStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| ToolbarError::UnknownStrategy(s.to_string()))
    }
}

/// The coordinator of one header/content pair, selected once at construction
pub enum ScrollCoordinator<T, F> {
    EnterAlways(EnterAlways<T, F>),
    EnterAlwaysCollapsed(EnterAlwaysCollapsed<T, F>),
    ExitUntilCollapsed(ExitUntilCollapsed<T, F>),
}

impl<T: ToolbarState, F: FlingBehavior> ScrollCoordinator<T, F> {
    pub fn strategy(&self) -> ScrollStrategy {
        match self {
            ScrollCoordinator::EnterAlways(_) => ScrollStrategy::EnterAlways,
            ScrollCoordinator::EnterAlwaysCollapsed(_) => ScrollStrategy::EnterAlwaysCollapsed,
            ScrollCoordinator::ExitUntilCollapsed(_) => ScrollStrategy::ExitUntilCollapsed,
        }
    }

    pub fn toolbar(&self) -> &T {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.toolbar(),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.toolbar(),
            ScrollCoordinator::ExitUntilCollapsed(c) => c.toolbar(),
        }
    }

    pub fn toolbar_mut(&mut self) -> &mut T {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.toolbar_mut(),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.toolbar_mut(),
            ScrollCoordinator::ExitUntilCollapsed(c) => c.toolbar_mut(),
        }
    }

    /// Header offset; always 0 for strategies without one
    pub fn offset(&self) -> i32 {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.offset(),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.offset(),
            ScrollCoordinator::ExitUntilCollapsed(_) => 0,
        }
    }

    pub fn phase(&self) -> GesturePhase {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.phase(),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.phase(),
            ScrollCoordinator::ExitUntilCollapsed(c) => c.phase(),
        }
    }

    pub fn snap(&self) -> Option<&SnapStrategy> {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.snap(),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.snap(),
            ScrollCoordinator::ExitUntilCollapsed(c) => c.snap(),
        }
    }
}

impl<T: ToolbarState, F: FlingBehavior> NestedScrollConnection for ScrollCoordinator<T, F> {
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.on_pre_scroll(available, source),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.on_pre_scroll(available, source),
            ScrollCoordinator::ExitUntilCollapsed(c) => c.on_pre_scroll(available, source),
        }
    }

    fn on_post_scroll(
        &mut self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.on_post_scroll(consumed, available, source),
            ScrollCoordinator::EnterAlwaysCollapsed(c) => {
                c.on_post_scroll(consumed, available, source)
            }
            ScrollCoordinator::ExitUntilCollapsed(c) => {
                c.on_post_scroll(consumed, available, source)
            }
        }
    }

    async fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.on_pre_fling(available).await,
            ScrollCoordinator::EnterAlwaysCollapsed(c) => c.on_pre_fling(available).await,
            ScrollCoordinator::ExitUntilCollapsed(c) => c.on_pre_fling(available).await,
        }
    }

    async fn on_post_fling(&mut self, consumed: Velocity, available: Velocity) -> Velocity {
        match self {
            ScrollCoordinator::EnterAlways(c) => c.on_post_fling(consumed, available).await,
            ScrollCoordinator::EnterAlwaysCollapsed(c) => {
                c.on_post_fling(consumed, available).await
            }
            ScrollCoordinator::ExitUntilCollapsed(c) => c.on_post_fling(consumed, available).await,
        }
    }
}

/// Per-gesture bookkeeping shared by all strategies
#[derive(Debug)]
pub(crate) struct GestureState {
    pub(crate) tracker: VelocityTracker,
    pub(crate) phase: PhaseMachine<GesturePhase>,
}

impl GestureState {
    pub(crate) fn new(time: Arc<dyn TimeSource>) -> Self {
        Self {
            tracker: VelocityTracker::new(time),
            phase: PhaseMachine::new(GesturePhase::Idle),
        }
    }

    /// Track a pre-scroll delta, starting a new gesture on fresh user input.
    ///
    /// Animations still running at that point belong to a hook future the
    /// host has dropped or interrupted through the toolbar's handle, so only
    /// the velocity window is cleared here.
    pub(crate) fn on_pre_scroll(&mut self, source: NestedScrollSource, dy: f32) {
        let before = self.phase.current();
        if let Some(GesturePhase::Dragging) = self.phase.send(source.pre_scroll_event()) {
            self.tracker.reset();
            tracing::debug!("gesture started (was {:?})", before);
        }
        self.tracker.record_delta(dy);
    }

    pub(crate) fn on_pre_fling(&mut self) {
        self.phase.send(event_types::PRE_FLING);
    }

    pub(crate) fn on_post_fling(&mut self) {
        self.phase.send(event_types::POST_FLING);
    }

    pub(crate) fn settled(&mut self) {
        self.phase.send(event_types::SETTLED);
    }
}

/// Snap whichever dimension is away from rest: the offset if the header is
/// partly slid off-screen, its height otherwise.
pub(crate) async fn settle<T: ToolbarState>(
    toolbar: &mut T,
    snap: Option<&SnapStrategy>,
    offset: &mut i32,
    accumulator: &mut OffsetAccumulator,
) {
    let Some(snap) = snap else {
        return;
    };

    if *offset != 0 {
        toolbar.process_offset_snap(snap, offset).await;
        accumulator.reset();
    } else {
        toolbar.process_snap(snap).await;
    }
}
