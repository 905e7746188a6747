//! Snap policy
//!
//! After a gesture settles, a header left half-way between collapsed and
//! expanded (or half slid off-screen) is animated to the nearer resting
//! position.

use furl_animation::Easing;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolbarError};

/// Where a snap should settle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapTarget {
    Collapsed,
    Expanded,
}

/// Policy for settling the header after a fling
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SnapStrategy {
    /// Visible fraction below which the header collapses instead of expanding
    pub collapse_threshold: f32,
    /// Snap animation length in milliseconds
    pub duration_ms: u32,
    pub easing: Easing,
}

impl Default for SnapStrategy {
    fn default() -> Self {
        Self {
            collapse_threshold: 0.5,
            duration_ms: 300,
            easing: Easing::FastOutSlowIn,
        }
    }
}

impl SnapStrategy {
    pub fn new(collapse_threshold: f32, duration_ms: u32) -> Result<Self> {
        let snap = Self {
            collapse_threshold,
            duration_ms,
            ..Default::default()
        };
        snap.validate()?;
        Ok(snap)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.collapse_threshold) {
            return Err(ToolbarError::InvalidThreshold(self.collapse_threshold));
        }
        if self.duration_ms == 0 {
            return Err(ToolbarError::InvalidDuration);
        }
        Ok(())
    }

    /// Decide a resting position from a visible fraction (0.0 to 1.0)
    pub fn target_for(&self, visible_fraction: f32) -> SnapTarget {
        if visible_fraction < self.collapse_threshold {
            SnapTarget::Collapsed
        } else {
            SnapTarget::Expanded
        }
    }
}
