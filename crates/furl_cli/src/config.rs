//! furl.toml and gesture script handling

use anyhow::{Context, Result};
use furl_toolbar::ToolbarConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Load the toolbar configuration from a file or a directory holding furl.toml
pub fn load_toolbar_config(path: &Path) -> Result<ToolbarConfig> {
    let config_path = if path.is_dir() {
        path.join("furl.toml")
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        anyhow::bail!(
            "No furl.toml found at {}. Run `furl init` to create one.",
            config_path.display()
        );
    }

    ToolbarConfig::load(&config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))
}

/// A scripted gesture replayed by `furl simulate`
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GestureScript {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// The scrollable region beneath the header
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ContentConfig {
    /// Total scroll range in pixels
    #[serde(default = "default_extent")]
    pub extent: f32,
    /// Initial scroll position (0 = at the top)
    #[serde(default)]
    pub start: f32,
}

fn default_extent() -> f32 {
    2000.0
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            extent: default_extent(),
            start: 0.0,
        }
    }
}

/// One scripted input
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Step {
    /// Finger drag; `dy < 0` collapses, repeated once per frame
    Drag {
        dy: f32,
        #[serde(default = "default_repeat")]
        repeat: u32,
    },
    /// Finger release with a velocity in pixels/second
    Fling { velocity: f32 },
    /// Idle time
    Wait { ms: u64 },
}

fn default_repeat() -> u32 {
    1
}

impl GestureScript {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let script: GestureScript = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if script.steps.is_empty() {
            anyhow::bail!("{} has no [[step]] entries", path.display());
        }
        if script.content.extent < 0.0 || !(0.0..=script.content.extent).contains(&script.content.start) {
            anyhow::bail!(
                "{}: content start {} outside 0..={}",
                path.display(),
                script.content.start,
                script.content.extent
            );
        }

        Ok(script)
    }

    /// Sample script: scroll down, fling, then pull back to the top
    pub fn sample() -> Self {
        Self {
            content: ContentConfig::default(),
            steps: vec![
                Step::Drag {
                    dy: -12.0,
                    repeat: 10,
                },
                Step::Fling { velocity: -1800.0 },
                Step::Wait { ms: 250 },
                Step::Drag {
                    dy: 20.0,
                    repeat: 8,
                },
                Step::Fling { velocity: 2400.0 },
            ],
        }
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize gesture script")
    }
}

/// Where `furl init` puts its files
pub fn init_paths(root: &Path) -> (PathBuf, PathBuf) {
    (root.join("furl.toml"), root.join("gestures").join("sample.toml"))
}
