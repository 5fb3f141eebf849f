//! svgpatch - batch patcher for tutorial header SVGs.

mod arrows;
mod cli;
mod config;
mod logger;
mod overflow;
mod repair;
mod svg;
mod title;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::PatchConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = PatchConfig::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }
    debug!("config"; "root {}", config.root.display());

    let target = cli.command.target_dir();
    match &cli.command {
        Commands::Title => cli::title::run_title(&config).map(|_| ()),
        Commands::Overflow { .. } => cli::overflow::run_overflow(&config, target).map(|_| ()),
        Commands::Cleanup { .. } => cli::cleanup::run_cleanup(&config, target).map(|_| ()),
        Commands::Repair { .. } => cli::repair::run_repair(&config, target).map(|_| ()),
        Commands::Arrows { .. } => cli::arrows::run_arrows(&config, target).map(|_| ()),
    }
}
