//! `svgpatch repair [DIR]`: fix broken syntax in header SVGs.

use std::path::PathBuf;

use anyhow::Result;

use super::common::{BatchSummary, collect_files, patch_each, resolve_target_dir};
use crate::config::PatchConfig;
use crate::repair::{is_header, repair_file};

/// Repair every `header.svg` under the target directory.
pub fn run_repair(config: &PatchConfig, dir: Option<&PathBuf>) -> Result<BatchSummary> {
    let root = resolve_target_dir(config, dir)?;
    let files = collect_files(&root, is_header);

    let summary = patch_each(&files, config.dry_run, repair_file, |path| {
        println!("fixed: {}", config.root_relative(path).display());
    });

    println!("done. changed {}/{} files", summary.changed, summary.processed);
    Ok(summary)
}
