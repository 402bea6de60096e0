// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::print_stdout)]
//! psim CLI
//!
//! Builds, runs and scrubs `.psim` sandbox scenes from the terminal.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use psim_app_core::config::{ConfigError, ConfigService};
use psim_app_core::prefs::{SandboxPrefs, PREFS_KEY};
use psim_config_fs::FsConfigStore;
use psim_core::{World, STEPS_PER_SECOND};
use psim_scene_codec::{decode_world, encode_world};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod demo;
mod report;

use report::{FrameReport, ReportAdapter};

#[derive(Parser, Debug)]
#[command(author, version, about = "psim rigid-body sandbox")]
struct Args {
    /// Tracing filter (overrides RUST_LOG and saved preferences)
    #[arg(long, global = true)]
    log: Option<String>,
    /// Directory holding saved preferences (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Write the demonstration scene to a file
    Demo {
        /// Destination `.psim` file
        #[arg(long)]
        out: PathBuf,
    },
    /// Load a scene, simulate it and print the final state
    Run {
        /// Scene file (defaults to the last scene used)
        scene: Option<PathBuf>,
        /// Simulated seconds to advance
        #[arg(long, default_value_t = 1.0)]
        until: f32,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Simulate forward, then scrub back without recomputing
    Scrub {
        /// Scene file (defaults to the last scene used)
        scene: Option<PathBuf>,
        /// Simulated seconds to advance first
        #[arg(long)]
        until: f32,
        /// Time to scrub back to
        #[arg(long)]
        back_to: f32,
    },
    /// Decode a scene and print its canonical encoding
    Roundtrip {
        /// Scene file
        scene: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Config (best-effort)
    let config = open_config(args.config_dir.as_deref());
    let prefs: SandboxPrefs = config
        .as_ref()
        .ok()
        .and_then(|c| c.load(PREFS_KEY).ok().flatten())
        .unwrap_or_default();

    init_tracing(args.log.as_deref(), &prefs.log_filter)?;
    let config = match config {
        Ok(config) => Some(config),
        Err(err) => {
            warn!(%err, "preferences unavailable");
            None
        }
    };

    match args.cmd {
        Command::Demo { out } => {
            let world = demo::demo_world()?;
            fs::write(&out, encode_world(&world))
                .with_context(|| format!("writing {}", out.display()))?;
            info!(path = %out.display(), "demo scene written");
            println!("wrote {}", out.display());
        }
        Command::Run { scene, until, json } => {
            ensure!(
                until.is_finite() && until >= 0.0,
                "--until must be a finite time >= 0, got {until}"
            );
            let path = pick_scene(scene, &prefs)?;
            let mut world = load(&path)?;
            advance(&mut world, until, prefs.report_every_ms)?;
            let frame = present(&world);
            if json {
                println!("{}", serde_json::to_string_pretty(&frame)?);
            } else {
                println!("{}", frame.to_table());
            }
            remember(config.as_ref(), &path);
        }
        Command::Scrub {
            scene,
            until,
            back_to,
        } => {
            ensure!(
                until.is_finite() && until >= 0.0,
                "--until must be a finite time >= 0, got {until}"
            );
            ensure!(
                (0.0..=until).contains(&back_to),
                "--back-to must lie in [0, {until}], got {back_to}"
            );
            let path = pick_scene(scene, &prefs)?;
            let mut world = load(&path)?;
            advance(&mut world, until, prefs.report_every_ms)?;
            println!("{}", present(&world).to_table());
            world.time_jump(back_to)?;
            println!("{}", present(&world).to_table());
            println!("frontier {:.3}", world.frontier());
            remember(config.as_ref(), &path);
        }
        Command::Roundtrip { scene } => {
            let world = load(&scene)?;
            print!("{}", encode_world(&world));
        }
    }
    Ok(())
}

fn open_config(dir: Option<&Path>) -> Result<ConfigService<FsConfigStore>, ConfigError> {
    let store = match dir {
        Some(dir) => FsConfigStore::at(dir),
        None => FsConfigStore::new(),
    };
    store.map(ConfigService::new)
}

fn init_tracing(flag: Option<&str>, saved: &str) -> Result<()> {
    let filter = match flag {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(saved))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn pick_scene(scene: Option<PathBuf>, prefs: &SandboxPrefs) -> Result<PathBuf> {
    match scene.or_else(|| prefs.last_scene.clone()) {
        Some(path) => Ok(path),
        None => bail!("no scene given and no last scene remembered"),
    }
}

fn load(path: &Path) -> Result<World> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let world = decode_world(&text).with_context(|| format!("decoding {}", path.display()))?;
    info!(path = %path.display(), bodies = world.len(), "scene loaded");
    Ok(world)
}

/// Steps to `until`, logging progress every `every_ms` of simulated time.
fn advance(world: &mut World, until: f32, every_ms: u32) -> Result<()> {
    let end = (f64::from(until) * f64::from(STEPS_PER_SECOND)).round() as u64;
    let stride = u64::from(every_ms.max(1));
    let mut tick = 0;
    while tick < end {
        tick = (tick + stride).min(end);
        world.time_jump((tick as f64 / f64::from(STEPS_PER_SECOND)) as f32)?;
        info!(t = world.time(), "advanced");
    }
    Ok(())
}

fn present(world: &World) -> FrameReport {
    let mut adapter = ReportAdapter::new();
    world.present(&mut adapter);
    adapter.frame().clone()
}

fn remember(config: Option<&ConfigService<FsConfigStore>>, scene: &Path) {
    let Some(config) = config else {
        return;
    };
    let scene = fs::canonicalize(scene).unwrap_or_else(|_| scene.to_path_buf());
    if let Err(err) = config.update(PREFS_KEY, |p: &mut SandboxPrefs| {
        p.last_scene = Some(scene);
    }) {
        warn!(%err, "could not save preferences");
    }
}
