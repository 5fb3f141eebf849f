//! Common utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use jwalk::WalkDir;

use crate::config::PatchConfig;
use crate::logger::mark_err;

/// Resolve the directory a tree-walking command works on.
///
/// `dir` is taken relative to the project root; without it the configured
/// tutorials directory is used. A missing directory is fatal.
pub fn resolve_target_dir(config: &PatchConfig, dir: Option<&PathBuf>) -> Result<PathBuf> {
    let target = dir.map_or_else(|| config.tutorials_dir(), |d| config.root_join(d));
    if !target.is_dir() {
        bail!("Directory not found: {}", target.display());
    }
    Ok(target)
}

/// Collect files under `dir` accepted by `keep`, in sorted walk order.
pub fn collect_files(dir: &Path, keep: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort(true)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| keep(p.as_path()))
        .collect()
}

/// Whether `path` has an `.svg` extension.
pub fn is_svg(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "svg")
}

/// Counters for one pass over a file list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Files visited.
    pub processed: usize,
    /// Files whose content changed.
    pub changed: usize,
    /// Files that failed to read, transform or write.
    pub failed: usize,
}

/// Run `patch` on every file, reporting failures without stopping.
///
/// `patch` returns whether the file changed; `on_changed` is called for each
/// such file. Errors are printed to stderr and counted.
pub fn patch_each(
    files: &[PathBuf],
    dry_run: bool,
    patch: impl Fn(&Path, bool) -> Result<bool>,
    mut on_changed: impl FnMut(&Path),
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for path in files {
        summary.processed += 1;
        match patch(path.as_path(), dry_run) {
            Ok(true) => {
                summary.changed += 1;
                on_changed(path.as_path());
            }
            Ok(false) => {}
            Err(e) => {
                summary.failed += 1;
                eprintln!("{} Error processing {}: {:#}", mark_err(), path.display(), e);
            }
        }
    }
    summary
}
