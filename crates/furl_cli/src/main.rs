//! Furl CLI
//!
//! Replays scripted scroll gestures against a collapsing toolbar and prints
//! how the header height, header offset and content position evolve.
//!
//! - `furl strategies` lists the scroll strategies
//! - `furl init` writes a default furl.toml and a sample gesture script
//! - `furl simulate` replays a script

mod config;
mod project;
mod simulate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use furl_toolbar::{FixedStepClock, ManualTime, ScrollStrategy, TokioFrameClock, ToolbarConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{load_toolbar_config, GestureScript};
use crate::simulate::{Frame, Simulation, Timeline};

/// Collapsing toolbar gesture simulator
#[derive(Parser, Debug)]
#[command(name = "furl")]
#[command(about = "Replay scroll gestures against a collapsing toolbar")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the available scroll strategies
    Strategies,

    /// Write a default furl.toml and a sample gesture script
    Init {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing furl.toml
        #[arg(long)]
        force: bool,
    },

    /// Replay a gesture script
    Simulate {
        /// furl.toml, or a directory containing one
        #[arg(short, long, default_value = ".")]
        config: PathBuf,

        /// Gesture script to replay
        #[arg(short, long)]
        script: PathBuf,

        /// Override the configured strategy
        #[arg(long)]
        strategy: Option<ScrollStrategy>,

        /// Pace frames with the wall clock instead of replaying instantly
        #[arg(long)]
        realtime: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Strategies => {
            for strategy in ScrollStrategy::ALL {
                println!("{:<24} {}", strategy.name(), strategy.description());
            }
            Ok(())
        }
        Commands::Init { path, force } => project::init_project(&path, force),
        Commands::Simulate {
            config,
            script,
            strategy,
            realtime,
        } => {
            let mut toolbar = load_toolbar_config(&config)?;
            if let Some(strategy) = strategy {
                toolbar.strategy = strategy;
            }
            let script = GestureScript::load(&script)?;

            tracing::info!(
                "Simulating {} ({}..={} px, {} steps)",
                toolbar.strategy,
                toolbar.min_height,
                toolbar.max_height,
                script.steps.len()
            );

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()?;
            let frames = runtime.block_on(replay(&toolbar, &script, realtime))?;
            print_frames(&frames);
            Ok(())
        }
    }
}

async fn replay(config: &ToolbarConfig, script: &GestureScript, realtime: bool) -> Result<Vec<Frame>> {
    if realtime {
        let mut sim = Simulation::new(config, &script.content, Timeline::Realtime, TokioFrameClock::new)?;
        sim.run(&script.steps).await;
        return Ok(sim.frames().to_vec());
    }

    let time = ManualTime::new();
    let timeline = Timeline::Manual(time.clone());
    let mut sim = Simulation::new(config, &script.content, timeline, move |fps| {
        FixedStepClock::from_fps(fps).linked(time.clone())
    })?;
    sim.run(&script.steps).await;
    Ok(sim.frames().to_vec())
}

fn print_frames(frames: &[Frame]) {
    println!(
        "{:>4}  {:<22} {:>6} {:>7} {:>9}  phase",
        "step", "input", "height", "offset", "content"
    );
    for frame in frames {
        println!("{}", frame);
    }
}
