//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Batch patcher for tutorial header SVGs
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: svgpatch.toml)
    #[arg(short = 'C', long, global = true, default_value = "svgpatch.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Project root (default: directory of the config file, else cwd)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Rewrite the main title of every tutorial header
    #[command(visible_alias = "t")]
    Title,

    /// Clip label text that overflows its background box
    #[command(visible_alias = "o")]
    Overflow {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Remove empty clipped groups and unused clip definitions
    #[command(visible_alias = "c")]
    Cleanup {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Repair broken text and group syntax in header SVGs
    #[command(visible_alias = "r")]
    Repair {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Snap diagram arrows to their boxes and redraw them orthogonally
    #[command(visible_alias = "a")]
    Arrows {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Directory argument shared by the tree-walking commands.
#[derive(clap::Args, Debug, Clone)]
pub struct TargetArgs {
    /// Directory to walk (default: the configured tutorials directory)
    #[arg(value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,
}

impl Commands {
    /// Directory argument of a tree-walking command.
    pub fn target_dir(&self) -> Option<&PathBuf> {
        match self {
            Self::Title => None,
            Self::Overflow { target }
            | Self::Cleanup { target }
            | Self::Repair { target }
            | Self::Arrows { target } => target.dir.as_ref(),
        }
    }
}
