//! lumen - render a scene description to a PNG.

use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

use lumen_renderer::{load_scene, render, render_parallel};

/// Log levels accepted on the command line
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments
#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "A recursive Whitted ray tracer")]
struct Args {
    /// Scene description file (JSON)
    scene: PathBuf,

    /// Output image path
    #[arg(short, long, default_value = "output.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long, default_value = "400")]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "400")]
    height: u32,

    /// Render on a single thread instead of in parallel buckets
    #[arg(long)]
    serial: bool,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    let scene = load_scene(&args.scene)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;

    let start = Instant::now();
    let image = if args.serial {
        render(&scene, args.width, args.height)
    } else {
        let cancel = AtomicBool::new(false);
        render_parallel(&scene, args.width, args.height, &cancel)
    };
    log::info!(
        "Rendered {}x{} in {:.2?}",
        args.width,
        args.height,
        start.elapsed()
    );

    image
        .save_png(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    log::info!("Wrote {}", args.output.display());

    Ok(())
}
