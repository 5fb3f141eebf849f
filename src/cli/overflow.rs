//! `svgpatch overflow [DIR]`: clip overflowing label text.

use std::path::PathBuf;

use anyhow::Result;

use super::common::{BatchSummary, collect_files, is_svg, patch_each, resolve_target_dir};
use crate::config::PatchConfig;
use crate::logger::mark_ok;
use crate::overflow::fix_svg_overflow;

/// Inject clip paths into every SVG under the target directory.
pub fn run_overflow(config: &PatchConfig, dir: Option<&PathBuf>) -> Result<BatchSummary> {
    let root = resolve_target_dir(config, dir)?;
    let files = collect_files(&root, is_svg);
    println!("Found {} SVG files to process", files.len());

    let summary = patch_each(&files, config.dry_run, fix_svg_overflow, |path| {
        println!("{} Fixed: {}", mark_ok(), config.root_relative(path).display());
    });

    println!(
        "Processed {} files, fixed {} files",
        summary.processed, summary.changed
    );
    Ok(summary)
}
