//! Geowire CLI - inspect and produce geowire payloads
//!
//! # Commands
//!
//! - `geowire info <file>` - Print the version tag and size
//! - `geowire dump <file> --kind <kind>` - Decode and print as JSON
//! - `geowire check <file> --kind <kind>` - Exit 0 if readable, 1 if corrupt,
//!   2 if written by a newer build
//! - `geowire sample <out> --kind <kind>` - Write a demonstration payload
//!
//! # Config
//!
//! ```toml
//! [limits]
//! max_block_len = 1048576
//! max_list_len = 65536
//! ```
//!
//! Logging follows `RUST_LOG`; `--verbose` switches the default to `debug`.

mod config;
mod inspect;
mod kind;
mod sample;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use config::CliConfig;

/// Geowire CLI - inspect and produce geowire payloads
#[derive(Parser)]
#[command(name = "geowire")]
#[command(about = "Inspect and produce geowire payloads")]
#[command(version)]
struct Cli {
    /// Log decoding details
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file with decode limits
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the leading version tag and payload size
    Info(inspect::InfoArgs),

    /// Decode a payload and print it as JSON
    Dump(inspect::DecodeArgs),

    /// Check whether a payload decodes with this build
    Check(inspect::DecodeArgs),

    /// Write a demonstration payload
    Sample(sample::SampleArgs),
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = CliConfig::load_or_default(cli.config.as_deref())?;
    tracing::debug!(limits = ?config.limits, "loaded config");

    match cli.command {
        Commands::Info(args) => inspect::info(args)?,
        Commands::Dump(args) => inspect::dump(args, config.limits)?,
        Commands::Check(args) => return Ok(inspect::check(args, config.limits)?.exit_code()),
        Commands::Sample(args) => sample::execute(args)?,
    }
    Ok(ExitCode::SUCCESS)
}
