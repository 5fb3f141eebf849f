//! `svgpatch cleanup [DIR]`: drop leftovers of earlier overflow runs.

use std::path::PathBuf;

use anyhow::Result;

use super::common::{BatchSummary, collect_files, is_svg, patch_each, resolve_target_dir};
use crate::config::PatchConfig;
use crate::overflow::cleanup::cleanup_svg;

/// Clean clip-path leftovers from every SVG under the target directory.
pub fn run_cleanup(config: &PatchConfig, dir: Option<&PathBuf>) -> Result<BatchSummary> {
    let root = resolve_target_dir(config, dir)?;
    let files = collect_files(&root, is_svg);

    let summary = patch_each(&files, config.dry_run, cleanup_svg, |path| {
        println!("Cleaned: {}", config.root_relative(path).display());
    });

    println!("Cleaned {} files", summary.changed);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cleanup_tree() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("static");
        fs::create_dir_all(&target).unwrap();
        let stale = "<svg>\n  <defs>\n    <clipPath id=\"clip-0\">\n      <rect/>\n    </clipPath>\n  </defs>\n  \
            <g clip-path=\"url(#clip-0)\">\n  </g>\n</svg>\n";
        fs::write(target.join("stale.svg"), stale).unwrap();
        fs::write(target.join("clean.svg"), "<svg>\n</svg>\n").unwrap();

        let config = PatchConfig::with_root(dir.path());
        let custom = PathBuf::from("static");
        let summary = run_cleanup(&config, Some(&custom)).unwrap();
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.changed, 1);

        let out = fs::read_to_string(target.join("stale.svg")).unwrap();
        assert!(!out.contains("clipPath"));
        assert!(!out.contains("clip-path"));

        assert_eq!(run_cleanup(&config, Some(&custom)).unwrap().changed, 0);
    }
}
