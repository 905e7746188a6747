//! Toolbar configuration (furl.toml)
//!
//! ```toml
//! strategy = "enter-always"
//! min-height = 56
//! max-height = 200
//! frame-rate = 120
//!
//! [snap]
//! collapse-threshold = 0.5
//! duration-ms = 300
//! easing = "fast-out-slow-in"
//!
//! [fling]
//! friction = 1.0
//! velocity-threshold = 10.0
//! ```

use std::fs;
use std::path::Path;
use std::sync::Arc;

use furl_animation::{DecayConfig, FrameClock, MonotonicTime, TimeSource};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolbarError};
use crate::fling::DecayFlingBehavior;
use crate::snap::SnapStrategy;
use crate::strategy::{ScrollCoordinator, ScrollStrategy};
use crate::toolbar::CollapsingToolbarState;

/// Coordinator built from a [`ToolbarConfig`]
pub type ConfiguredCoordinator<C> =
    ScrollCoordinator<CollapsingToolbarState<C>, DecayFlingBehavior<C>>;

/// Everything needed to build a header/content coordinator
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolbarConfig {
    #[serde(default)]
    pub strategy: ScrollStrategy,
    pub min_height: i32,
    pub max_height: i32,
    /// Starting height; fully expanded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_height: Option<i32>,
    /// Frames per second for fling and snap animations
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap: Option<SnapStrategy>,
    #[serde(default)]
    pub fling: DecayConfig,
}

fn default_frame_rate() -> u32 {
    120
}

/// Finite and greater than zero; NaN fails
fn is_positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            strategy: ScrollStrategy::default(),
            min_height: 56,
            max_height: 200,
            initial_height: None,
            frame_rate: default_frame_rate(),
            snap: Some(SnapStrategy::default()),
            fling: DecayConfig::default(),
        }
    }
}

impl ToolbarConfig {
    pub fn new(strategy: ScrollStrategy, min_height: i32, max_height: i32) -> Self {
        Self {
            strategy,
            min_height,
            max_height,
            snap: None,
            ..Default::default()
        }
    }

    pub fn with_snap(mut self, snap: SnapStrategy) -> Self {
        self.snap = Some(snap);
        self
    }

    pub fn with_initial_height(mut self, height: i32) -> Self {
        self.initial_height = Some(height);
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ToolbarConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            "loaded {} config from {}",
            config.strategy,
            path.display()
        );
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_height < 0 || self.min_height > self.max_height {
            return Err(ToolbarError::InvalidBounds {
                min: self.min_height,
                max: self.max_height,
            });
        }
        if let Some(height) = self.initial_height {
            if !(self.min_height..=self.max_height).contains(&height) {
                return Err(ToolbarError::InvalidHeight {
                    height,
                    min: self.min_height,
                    max: self.max_height,
                });
            }
        }
        if self.frame_rate == 0 {
            return Err(ToolbarError::InvalidFrameRate(self.frame_rate));
        }
        if let Some(snap) = &self.snap {
            snap.validate()?;
        }
        if !is_positive(self.fling.friction) {
            return Err(ToolbarError::InvalidFriction(self.fling.friction));
        }
        if !is_positive(self.fling.velocity_threshold) {
            return Err(ToolbarError::InvalidFriction(self.fling.velocity_threshold));
        }
        Ok(())
    }

    /// Build a coordinator, tracking velocity against the monotonic clock.
    ///
    /// `make_clock` is called once for the header's animations and once for
    /// its fling, each time with the configured frame rate.
    pub fn build_with<C, M>(&self, make_clock: M) -> Result<ConfiguredCoordinator<C>>
    where
        C: FrameClock,
        M: FnMut(u32) -> C,
    {
        self.build_with_time(Arc::new(MonotonicTime::new()), make_clock)
    }

    pub fn build_with_time<C, M>(
        &self,
        time: Arc<dyn TimeSource>,
        mut make_clock: M,
    ) -> Result<ConfiguredCoordinator<C>>
    where
        C: FrameClock,
        M: FnMut(u32) -> C,
    {
        self.validate()?;

        let mut toolbar =
            CollapsingToolbarState::new(self.min_height, self.max_height, make_clock(self.frame_rate))?;
        if let Some(height) = self.initial_height {
            toolbar = toolbar.with_height(height)?;
        }
        let flinger = DecayFlingBehavior::new(self.fling, make_clock(self.frame_rate));

        Ok(self
            .strategy
            .create_with_time(toolbar, flinger, self.snap, time))
    }
}
