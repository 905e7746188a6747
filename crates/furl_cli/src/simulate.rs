//! Gesture replay against a simulated content region
//!
//! Each scripted step is fed through the same nested protocol a UI host would
//! run: pre-scroll, content scroll, post-scroll for every delta, and
//! pre-fling, content fling, post-fling for every release. Content fling
//! frames go back through pre/post-scroll with the `Fling` source.

use anyhow::Result;
use furl_toolbar::{
    ConfiguredCoordinator, DecayFlingBehavior, FlingBehavior, FrameClock, GesturePhase,
    ManualTime, MonotonicTime, NestedScrollConnection, NestedScrollSource, Offset, ScrollScope,
    TimeSource, ToolbarConfig, ToolbarState, Velocity,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ContentConfig, Step};

/// Scrollable content beneath the header; position 0 is the top
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedContent {
    position: f32,
    extent: f32,
}

impl SimulatedContent {
    pub fn new(config: &ContentConfig) -> Self {
        Self {
            position: config.start.clamp(0.0, config.extent.max(0.0)),
            extent: config.extent.max(0.0),
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_at_top(&self) -> bool {
        self.position <= 0.0
    }
}

impl ScrollScope for SimulatedContent {
    // Negative deltas move further into the content
    fn scroll_by(&mut self, delta: f32) -> f32 {
        let next = (self.position - delta).clamp(0.0, self.extent);
        let consumed = self.position - next;
        self.position = next;
        consumed
    }
}

/// Run one delta through pre-scroll, the content, and post-scroll.
///
/// Returns the total consumed by the connection and the content together.
fn dispatch_scroll<N: NestedScrollConnection>(
    connection: &mut N,
    content: &mut SimulatedContent,
    delta: f32,
    source: NestedScrollSource,
) -> f32 {
    let available = Offset::vertical(delta);
    let pre = connection.on_pre_scroll(available, source);
    let left = available - pre;
    let scrolled = Offset::vertical(content.scroll_by(left.y));
    let post = connection.on_post_scroll(scrolled, left - scrolled, source);

    tracing::trace!(
        "{:?} {:.2}: pre {:.2}, content {:.2}, post {:.2}",
        source,
        delta,
        pre.y,
        scrolled.y,
        post.y
    );
    pre.y + scrolled.y + post.y
}

/// Content fling target: every frame is a nested scroll with source `Fling`
struct NestedFlingScope<'a, N> {
    connection: &'a mut N,
    content: &'a mut SimulatedContent,
}

impl<N: NestedScrollConnection> ScrollScope for NestedFlingScope<'_, N> {
    fn scroll_by(&mut self, delta: f32) -> f32 {
        dispatch_scroll(
            self.connection,
            self.content,
            delta,
            NestedScrollSource::Fling,
        )
    }
}

/// How simulated time passes
#[derive(Clone, Debug)]
pub enum Timeline {
    /// Instant replay; time only moves when the simulation says so
    Manual(ManualTime),
    /// Wall-clock pacing
    Realtime,
}

impl Timeline {
    fn time_source(&self) -> Arc<dyn TimeSource> {
        match self {
            Timeline::Manual(time) => Arc::new(time.clone()),
            Timeline::Realtime => Arc::new(MonotonicTime::new()),
        }
    }

    async fn advance(&self, ms: u64) {
        match self {
            Timeline::Manual(time) => time.advance_ms(ms),
            Timeline::Realtime => tokio::time::sleep(Duration::from_millis(ms)).await,
        }
    }
}

/// Header and content state after a step
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub step: usize,
    pub input: String,
    pub height: i32,
    pub offset: i32,
    pub content: f32,
    pub phase: GesturePhase,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:<22} {:>6} {:>7} {:>9.1}  {:?}",
            self.step, self.input, self.height, self.offset, self.content, self.phase
        )
    }
}

fn describe(step: &Step) -> String {
    match step {
        Step::Drag { dy, repeat: 1 } => format!("drag {:.1}", dy),
        Step::Drag { dy, repeat } => format!("drag {:.1} x{}", dy, repeat),
        Step::Fling { velocity } => format!("fling {:.0}", velocity),
        Step::Wait { ms } => format!("wait {}ms", ms),
    }
}

/// A coordinator, its content, and the clock driving both
pub struct Simulation<C: FrameClock> {
    coordinator: ConfiguredCoordinator<C>,
    content: SimulatedContent,
    content_fling: DecayFlingBehavior<C>,
    timeline: Timeline,
    /// Time between two drag events
    frame_ms: u64,
    frames: Vec<Frame>,
}

impl<C: FrameClock> Simulation<C> {
    pub fn new<M>(
        config: &ToolbarConfig,
        content: &ContentConfig,
        timeline: Timeline,
        mut make_clock: M,
    ) -> Result<Self>
    where
        M: FnMut(u32) -> C,
    {
        let coordinator = config.build_with_time(timeline.time_source(), &mut make_clock)?;
        let content_fling = DecayFlingBehavior::new(config.fling, make_clock(config.frame_rate));

        Ok(Self {
            coordinator,
            content: SimulatedContent::new(content),
            content_fling,
            timeline,
            frame_ms: (1000 / config.frame_rate.max(1)).max(1) as u64,
            frames: Vec::new(),
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Replay every step, recording a frame after each one
    pub async fn run(&mut self, steps: &[Step]) {
        for (index, step) in steps.iter().enumerate() {
            match *step {
                Step::Drag { dy, repeat } => {
                    for _ in 0..repeat {
                        self.drag(dy).await;
                    }
                }
                Step::Fling { velocity } => self.fling(velocity).await,
                Step::Wait { ms } => self.timeline.advance(ms).await,
            }
            self.record(index + 1, describe(step));
        }
    }

    async fn drag(&mut self, dy: f32) {
        self.timeline.advance(self.frame_ms).await;
        dispatch_scroll(
            &mut self.coordinator,
            &mut self.content,
            dy,
            NestedScrollSource::Drag,
        );
    }

    async fn fling(&mut self, velocity: f32) {
        let available = Velocity::vertical(velocity);
        let pre = self.coordinator.on_pre_fling(available).await;
        let remaining = available - pre;

        let mut scope = NestedFlingScope {
            connection: &mut self.coordinator,
            content: &mut self.content,
        };
        let left = self
            .content_fling
            .perform_fling(&mut scope, remaining.y)
            .await;

        let post = self
            .coordinator
            .on_post_fling(
                Velocity::vertical(remaining.y - left),
                Velocity::vertical(left),
            )
            .await;

        tracing::debug!(
            "fling {:.1}: header pre {:.1}, content left {:.1}, header post {:.1}, at top: {}",
            velocity,
            pre.y,
            left,
            post.y,
            self.content.is_at_top()
        );
    }

    fn record(&mut self, step: usize, input: String) {
        self.frames.push(Frame {
            step,
            input,
            height: self.coordinator.toolbar().height(),
            offset: self.coordinator.offset(),
            content: self.content.position(),
            phase: self.coordinator.phase(),
        });
    }
}
