//! `furl init` scaffolding

use anyhow::Result;
use furl_toolbar::ToolbarConfig;
use std::fs;
use std::path::Path;

use crate::config::{init_paths, GestureScript};

/// Write a default furl.toml and a sample gesture script under `root`
pub fn init_project(root: &Path, force: bool) -> Result<()> {
    let (config_path, script_path) = init_paths(root);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(dir) = script_path.parent() {
        fs::create_dir_all(dir)?;
    }

    let config = ToolbarConfig::default();
    fs::write(
        &config_path,
        format!(
            "# Collapsing toolbar configuration\n\
             # strategy: enter-always | enter-always-collapsed | exit-until-collapsed\n\n{}",
            config.to_toml()?
        ),
    )?;

    fs::write(
        &script_path,
        format!(
            "# Replay with: furl simulate --config {} --script {}\n\n{}",
            config_path.display(),
            script_path.display(),
            GestureScript::sample().to_toml()?
        ),
    )?;

    tracing::info!("Wrote {}", config_path.display());
    tracing::info!("Wrote {}", script_path.display());
    Ok(())
}
