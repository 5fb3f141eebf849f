//! Tidy up after earlier overflow runs.
//!
//! Older runs left empty clipped wrappers behind and appended a fresh set of
//! `<clipPath>` definitions each time. This pass removes the empty wrappers,
//! keeps one definition per referenced id and drops the rest.

use anyhow::{Context, Result};
use regex::Regex;
use rustc_hash::FxHashSet;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use super::RE_EMPTY_CLIPPED;

static RE_CLIP_USE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"clip-path="url\(#([^"]+)\)""#).unwrap());

static RE_CLIP_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<clipPath\s+id="([^"]+)">[\s\S]*?</clipPath>"#).unwrap());

/// A definition with the indentation before it and whitespace after it.
static RE_CLIP_DEF_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[ \t]*<clipPath\s+id="[^"]+">[\s\S]*?</clipPath>\s*"#).unwrap()
});

static RE_EXTRA_BLANKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());

/// Remove empty clipped groups and unused or repeated `<clipPath>`s.
///
/// Returns `None` when nothing changes.
pub fn cleanup_clip_paths(svg: &str) -> Option<String> {
    let content = RE_EMPTY_CLIPPED.replace_all(svg, "");

    let used: FxHashSet<&str> = RE_CLIP_USE
        .captures_iter(&content)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();

    let mut seen = FxHashSet::default();
    let kept: Vec<String> = RE_CLIP_DEF
        .captures_iter(&content)
        .filter(|caps| {
            let id = &caps[1];
            used.contains(id) && seen.insert(id.to_string())
        })
        .map(|caps| format!("    {}", &caps[0]))
        .collect();

    let mut out = RE_CLIP_DEF_LINE.replace_all(&content, "").into_owned();
    if !kept.is_empty()
        && let Some(close) = out.find("</defs>")
    {
        let defs = format!("{}\n  </defs>", kept.join("\n"));
        out.replace_range(close..close + "</defs>".len(), &defs);
    }

    let out = RE_EXTRA_BLANKS.replace_all(&out, "\n\n").into_owned();
    (out != svg).then_some(out)
}

/// Clean up the SVG at `path`. Returns whether the file changed.
pub fn cleanup_svg(path: &Path, dry_run: bool) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let Some(cleaned) = cleanup_clip_paths(&content) else {
        return Ok(false);
    };

    if !dry_run {
        fs::write(path, cleaned).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overflow::inject_clip_paths;
    use tempfile::TempDir;

    const DIRTY: &str = "<svg>\n  <defs>\n    \
        <clipPath id=\"clip-0\">\n      <rect x=\"0\" y=\"0\" width=\"5\" height=\"5\"/>\n    </clipPath>\n    \
        <clipPath id=\"clip-1\">\n      <rect x=\"1\" y=\"1\" width=\"5\" height=\"5\"/>\n    </clipPath>\n    \
        <clipPath id=\"clip-0\">\n      <rect x=\"9\" y=\"9\" width=\"9\" height=\"9\"/>\n    </clipPath>\n  \
        </defs>\n  <g>\n    <rect x=\"0\" y=\"0\" width=\"5\" height=\"5\"/>\n    \
        <g clip-path=\"url(#clip-0)\">\n    <text>t</text>\n    </g>\n  </g>\n  \
        <g clip-path=\"url(#clip-1)\">\n  </g>\n</svg>\n";

    #[test]
    fn test_drops_empty_groups_and_unused_defs() {
        let out = cleanup_clip_paths(DIRTY).unwrap();
        assert!(!out.contains("url(#clip-1)"));
        assert!(!out.contains("id=\"clip-1\""));
        assert_eq!(out.matches("<clipPath id=\"clip-0\">").count(), 1);
        // The first definition of a repeated id wins.
        assert!(out.contains("<rect x=\"0\" y=\"0\" width=\"5\" height=\"5\"/>\n    </clipPath>"));
        assert!(!out.contains("x=\"9\""));
        assert!(out.contains("<text>t</text>"));
    }

    #[test]
    fn test_cleanup_idempotent() {
        let once = cleanup_clip_paths(DIRTY).unwrap();
        assert_eq!(cleanup_clip_paths(&once), None);
    }

    #[test]
    fn test_fresh_injection_is_already_clean() {
        let svg = "<svg>\n  \
            <g><rect x=\"1\" y=\"2\" width=\"3\" height=\"4\"/><text>a</text></g>\n</svg>\n";
        let injected = inject_clip_paths(svg).unwrap();
        assert_eq!(cleanup_clip_paths(&injected), None);
    }

    #[test]
    fn test_no_clip_paths_no_change() {
        assert_eq!(cleanup_clip_paths("<svg>\n  <rect/>\n</svg>"), None);
    }

    #[test]
    fn test_cleanup_svg_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.svg");
        fs::write(&path, DIRTY).unwrap();

        assert!(cleanup_svg(&path, false).unwrap());
        assert!(!cleanup_svg(&path, false).unwrap());
    }
}
