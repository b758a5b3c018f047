//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses the CLI argument
//! - loads and validates the configuration
//! - hands off to the pipeline

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fringe` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    pipeline::run(&config)
}
