//! Lapse CLI — Command-line interface for timelapse keyframe interpolation.
//!
//! Usage:
//!   lapse interpolate <DIR>    Fill in settings between keyframes
//!   lapse info <DIR>           Show frames, keyframes, and source size
//!   lapse resolutions          List output resolutions

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lapse_common::{config_file_path, AppConfig, LoggingConfig};
use lapse_model::ZoomRange;

mod commands;

#[derive(Parser)]
#[command(
    name = "lapse",
    about = "Interpolate RawTherapee keyframe settings across a timelapse",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write settings for every frame between keyframes
    Interpolate {
        /// Directory containing raw files and keyframe .pp3 sidecars
        dir: PathBuf,

        /// Print what would be written without touching any file
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, print frame records as JSON lines
        #[arg(long)]
        json: bool,

        /// Skip the timestamped backup of existing settings
        #[arg(long)]
        no_backup: bool,

        /// Leave keyframe sidecars untouched
        #[arg(long)]
        no_rewrite_keyframes: bool,

        /// Crop drift: center|top|bottom|top-to-bottom|bottom-to-top
        #[arg(long)]
        aspect_drift: Option<String>,

        /// Field of view range in percent, e.g. "100-70"
        #[arg(long)]
        zoom_level: Option<ZoomRange>,

        /// Zoom anchor: center|top|bottom
        #[arg(long)]
        zoom_anchor: Option<String>,

        /// Zoom easing: linear|ease-in|ease-out|ease-in-out|exponential
        #[arg(long)]
        zoom_easing: Option<String>,

        /// Output resolution: 1080p|2k|4k|5k|6k|8k
        #[arg(long)]
        output: Option<String>,

        /// Raw file extension, may be repeated (default: NEF)
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// Show sequence information
    Info {
        /// Directory containing raw files and .pp3 sidecars
        dir: PathBuf,

        /// Raw file extension, may be repeated (default: NEF)
        #[arg(long = "ext")]
        extensions: Vec<String>,
    },

    /// List available output resolutions
    Resolutions,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config warnings go through default logging until the config is read
    let startup = with_verbosity(LoggingConfig::default(), cli.verbose);
    let config = lapse_common::logging::with_logging(&startup, AppConfig::load);

    // Initialize logging
    let logging = with_verbosity(config.logging.clone(), cli.verbose);
    lapse_common::logging::init_logging(&logging);
    tracing::debug!(path = %config_file_path().display(), "Configuration loaded");

    match cli.command {
        Commands::Interpolate {
            dir,
            dry_run,
            json,
            no_backup,
            no_rewrite_keyframes,
            aspect_drift,
            zoom_level,
            zoom_anchor,
            zoom_easing,
            output,
            extensions,
        } => commands::interpolate::run(
            &config.defaults,
            commands::interpolate::InterpolateArgs {
                dir,
                dry_run,
                json,
                no_backup,
                no_rewrite_keyframes,
                aspect_drift,
                zoom_level,
                zoom_anchor,
                zoom_easing,
                output,
                extensions,
            },
        ),
        Commands::Info { dir, extensions } => {
            commands::info::run(dir, commands::extensions_or(&config.defaults, extensions))
        }
        Commands::Resolutions => commands::resolutions::run(),
    }
}

fn with_verbosity(mut logging: LoggingConfig, verbose: bool) -> LoggingConfig {
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}
