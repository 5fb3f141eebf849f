//! Syntax repair for generated header SVGs.
//!
//! Some generated headers came out with `<text>` nodes closed by a bare `>`
//! (`<text ...>Tutorial 02>`), stray `</text>` lines before the badge group
//! and attribute fragments trailing a closing tag. The repairs below are
//! narrow regex rewrites for exactly those shapes and are safe to re-run.
//!
//! A literal `>` inside a text node's content is read as a broken close tag;
//! the generator escapes it, so real headers never hit this.

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// File name the repair applies to.
pub const HEADER_FILE_NAME: &str = "header.svg";

/// `<text ...>CONTENT>` at the end of a line that closes a group.
static RE_OPEN_TEXT_BEFORE_GROUP_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<text\b[^>]*>)([^<]*?)>(\s*\r?\n\s*</g>)").unwrap()
});

/// `<text ...>CONTENT>` anywhere.
static RE_OPEN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(<text\b[^>]*>)([^<]*?)>").unwrap());

static RE_STRAY_TEXT_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*</text>\s*$").unwrap());

static RE_FONT_JUNK_BETWEEN_GROUP_ENDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</g>[^<]*apple-system[^<]*</g>").unwrap());

static RE_JUNK_AFTER_GROUP_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</g>[^\n<]+").unwrap());

static RE_JUNK_AFTER_TEXT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</text>[^\n<]+").unwrap());

static RE_JUNK_AFTER_SVG_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</svg>[^\n<]+").unwrap());

static RE_NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Apply every repair to `svg`, returning the repaired document.
pub fn repair_header(svg: &str) -> String {
    let s = RE_OPEN_TEXT_BEFORE_GROUP_END.replace_all(svg, "${1}${2}</text>${3}");

    let s = RE_OPEN_TEXT.replace_all(&s, |caps: &Captures<'_>| {
        let content = &caps[2];
        if content.trim().is_empty() {
            caps[0].to_string()
        } else {
            format!("{}{}</text>", &caps[1], content)
        }
    });

    let s = RE_FONT_JUNK_BETWEEN_GROUP_ENDS.replace_all(&s, "</g>\n  </g>");
    let s = RE_JUNK_AFTER_GROUP_END.replace_all(&s, "</g>");
    let s = RE_JUNK_AFTER_TEXT_END.replace_all(&s, "</text>");
    let s = RE_JUNK_AFTER_SVG_END.replace_all(&s, "</svg>");
    // Must follow junk stripping: `</text>junk` becomes a stray line.
    let s = RE_STRAY_TEXT_CLOSE.replace_all(&s, "");
    RE_NEWLINE_RUNS.replace_all(&s, "\n\n").into_owned()
}

/// Whether `path` names a header SVG.
pub fn is_header(path: &Path) -> bool {
    path.file_name().is_some_and(|name| name == HEADER_FILE_NAME)
}

/// Repair the header at `path`. Returns whether the file changed.
pub fn repair_file(path: &Path, dry_run: bool) -> Result<bool> {
    let before =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let after = repair_header(&before);
    if after == before {
        return Ok(false);
    }
    if !dry_run {
        fs::write(path, after).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_header_untouched() {
        let svg = "<svg>\n  <g>\n    <text x=\"1\">Tutorial 02</text>\n  </g>\n</svg>\n";
        assert_eq!(repair_header(svg), svg);
    }

    #[test]
    fn test_icon_text_before_group_end() {
        let svg = "<g>\n    <text font-size=\"48\">📊>\n  </g>";
        assert_eq!(
            repair_header(svg),
            "<g>\n    <text font-size=\"48\">📊</text>\n  </g>"
        );
    }

    #[test]
    fn test_inline_unterminated_text() {
        let svg = "<text x=\"0\">Tutorial 02>\n<text x=\"1\">Beginner>";
        assert_eq!(
            repair_header(svg),
            "<text x=\"0\">Tutorial 02</text>\n<text x=\"1\">Beginner</text>"
        );
    }

    #[test]
    fn test_empty_open_text_left_alone() {
        let svg = "<text x=\"0\">  >";
        assert_eq!(repair_header(svg), svg);
    }

    #[test]
    fn test_stray_close_line_removed() {
        let svg = "<text>a</text>\n  </text>\n<g transform=\"translate(600, 275)\"></g>";
        assert_eq!(
            repair_header(svg),
            "<text>a</text>\n\n<g transform=\"translate(600, 275)\"></g>"
        );
    }

    #[test]
    fn test_font_junk_between_group_ends() {
        let svg = "</g>, -apple-system, sans-serif\" font-size=\"16\">Linear Regression></g>";
        assert_eq!(repair_header(svg), "</g>\n  </g>");
    }

    #[test]
    fn test_junk_after_closing_tags() {
        let svg = "<text>a</text>garbage\n</g> more\n</svg>\" x";
        assert_eq!(repair_header(svg), "<text>a</text>\n</g>\n</svg>");
    }

    #[test]
    fn test_close_tag_left_alone_after_junk_is_removed() {
        let svg = "<g>\n</text>junk\n</g>";
        let once = repair_header(svg);
        assert_eq!(once, "<g>\n\n</g>");
        assert_eq!(repair_header(&once), once);
    }

    #[test]
    fn test_blank_runs_collapsed() {
        assert_eq!(repair_header("<a/>\n\n\n\n<b/>"), "<a/>\n\n<b/>");
    }

    #[test]
    fn test_repair_idempotent() {
        let svg = "<svg>\n<g>\n  <text x=\"0\">📊>\n  </g>\n  </text>\n<text y=\"2\">Beginner>\n</g>, -apple-system, sans-serif\">x></g>\n</svg>";
        let once = repair_header(svg);
        assert_eq!(repair_header(&once), once);
    }

    #[test]
    fn test_is_header() {
        assert!(is_header(Path::new("public/tutorials/a/header.svg")));
        assert!(!is_header(Path::new("public/tutorials/a/diagram.svg")));
    }
}
