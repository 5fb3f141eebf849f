//! `svgpatch arrows [DIR]`: reroute arrows in diagram SVGs.

use std::path::PathBuf;

use anyhow::Result;

use super::common::{BatchSummary, collect_files, patch_each, resolve_target_dir};
use crate::arrows::{fix_arrows, is_diagram};
use crate::config::PatchConfig;
use crate::logger::mark_ok;

/// Reroute arrows in every `diagram-*.svg` under the target directory.
pub fn run_arrows(config: &PatchConfig, dir: Option<&PathBuf>) -> Result<BatchSummary> {
    let root = resolve_target_dir(config, dir)?;
    let files = collect_files(&root, is_diagram);
    println!("Found {} diagram SVG files", files.len());

    let summary = patch_each(&files, config.dry_run, fix_arrows, |path| {
        println!("{} Fixed: {}", mark_ok(), config.root_relative(path).display());
    });

    println!("Fixed arrows in {} files", summary.changed);
    Ok(summary)
}
