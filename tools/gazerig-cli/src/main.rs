//! Gazerig CLI: procedural eye animation for character rigs.
//!
//! Usage:
//!   gazerig init                 Write a default config file (and rig)
//!   gazerig validate             Check config and rig eye bindings
//!   gazerig info                 Show the effective configuration
//!   gazerig script -o <PATH>     Generate a synthetic pointer script
//!   gazerig simulate [OPTIONS]   Run the headless frame loop

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use gazerig_common::config::AppConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "gazerig",
    about = "Procedural gaze and blink animation for character rigs",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to $XDG_CONFIG_HOME/gazerig/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Destination path (defaults to the standard location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also write the built-in character rig to this path
        #[arg(long)]
        rig: Option<PathBuf>,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Validate the config and a rig manifest
    Validate {
        /// Rig manifest (defaults to the built-in character)
        #[arg(long)]
        rig: Option<PathBuf>,
    },

    /// Show the effective configuration
    Info,

    /// Generate a synthetic sweep pointer script
    Script {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Script length in seconds
        #[arg(long, default_value = "10.0")]
        duration: f64,

        /// Surface width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Surface height in pixels
        #[arg(long)]
        height: Option<u32>,
    },

    /// Run the headless frame loop with a loaded character
    Simulate {
        /// Rig manifest (defaults to the built-in character)
        #[arg(long)]
        rig: Option<PathBuf>,

        /// Pointer script to replay (defaults to a synthetic sweep)
        #[arg(long)]
        pointer: Option<PathBuf>,

        /// Number of frames to render
        #[arg(long, conflicts_with = "duration")]
        frames: Option<u64>,

        /// Simulated time in seconds
        #[arg(long)]
        duration: Option<f64>,

        /// Target FPS
        #[arg(long)]
        fps: Option<u32>,

        /// Blink jitter seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write per-frame samples as JSONL
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pace frames against the wall clock
        #[arg(long)]
        realtime: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display())),
        None => Ok(AppConfig::load()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    gazerig_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Init { output, rig, force } => commands::init::run(output, rig, force),
        Commands::Validate { rig } => commands::validate::run(&config, rig),
        Commands::Info => commands::info::run(&config, cli.config),
        Commands::Script {
            output,
            duration,
            width,
            height,
        } => commands::script::run(&config, output, duration, width, height),
        Commands::Simulate {
            rig,
            pointer,
            frames,
            duration,
            fps,
            seed,
            output,
            realtime,
        } => {
            let args = commands::simulate::SimulateArgs {
                rig,
                pointer,
                frames,
                duration,
                fps,
                seed,
                output,
                realtime,
            };
            commands::simulate::run(&config, args).await
        }
    }
}
