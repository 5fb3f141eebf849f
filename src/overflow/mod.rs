//! Clip text that overflows its background box.
//!
//! Tutorial SVGs draw labels as `<g>` groups holding a background `<rect>`
//! and one or more `<text>` nodes. Long labels spill out of the box. This pass
//! gives each such group a `<clipPath>` matching the rect and moves the texts
//! into a `<g clip-path="url(#clip-N)">` wrapper right after the rect.
//!
//! - [`inject_clip_paths`]: the string transform
//! - [`fix_svg_overflow`]: read, transform, write one file
//! - [`cleanup`]: drop empty clipped groups and unused definitions
//!
//! Groups are matched non-greedily up to the first `</g>`, so a nested group
//! ends the outer match early. Any file that already references a `clip-N`
//! id is treated as processed and left alone.

pub mod cleanup;

use anyhow::{Context, Result};
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use crate::debug;
use crate::svg::{MarkerAnchor, TagAttrs};

static RE_SVG_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg[^>]*>").unwrap());

/// `<g ATTRS>INNER</g>`; a bare `<g>` has no attribute capture.
static RE_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<g(?:\s+([^>]*?))?>([\s\S]*?)</g>").unwrap());

static RE_RECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<rect\s+([^>]*?)/>").unwrap());

static RE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<text\b[^>]*>[\s\S]*?</text>").unwrap());

static RE_BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").unwrap());

/// A clipped wrapper with nothing left inside.
pub(crate) static RE_EMPTY_CLIPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<g\s+clip-path="url\(#[^"]+\)">\s*</g>"#).unwrap());

const DEFS_OPEN: &str = "<defs>";
const DEFS_CLOSE: &str = "</defs>";

/// Background box a group's texts are clipped to. Values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRect<'a> {
    pub x: &'a str,
    pub y: &'a str,
    pub width: &'a str,
    pub height: &'a str,
    /// Corner radius, `None` when absent or `0`.
    pub rx: Option<&'a str>,
}

impl<'a> ClipRect<'a> {
    /// Read the box from a rect's attribute section. `x`, `y`, `width` and
    /// `height` are required.
    pub fn from_attrs(attrs: &'a str) -> Option<Self> {
        let attrs = TagAttrs::parse(attrs);
        Some(Self {
            x: attrs.non_empty("x")?,
            y: attrs.non_empty("y")?,
            width: attrs.non_empty("width")?,
            height: attrs.non_empty("height")?,
            rx: attrs.non_empty("rx").filter(|rx| *rx != "0"),
        })
    }

    /// `<clipPath>` definition for this box, as placed inside `<defs>`.
    fn definition(&self, id: &str) -> String {
        let rx = self
            .rx
            .map(|rx| format!(" rx=\"{rx}\""))
            .unwrap_or_default();
        format!(
            "    <clipPath id=\"{id}\">\n      <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"{rx}/>\n    </clipPath>\n",
            self.x, self.y, self.width, self.height
        )
    }
}

/// A group selected for clipping.
#[derive(Debug)]
struct ClipGroup<'a> {
    id: String,
    span: Range<usize>,
    attrs: Option<&'a str>,
    inner: &'a str,
    rect: ClipRect<'a>,
}

impl ClipGroup<'_> {
    /// The replacement markup for the whole group.
    fn render(&self) -> String {
        let mut texts = Vec::new();
        let mut stripped = String::with_capacity(self.inner.len());
        let mut last = 0;
        for text in RE_TEXT.find_iter(self.inner) {
            stripped.push_str(&self.inner[last..text.start()]);
            texts.push(format!("    {}", text.as_str()));
            last = text.end();
        }
        stripped.push_str(&self.inner[last..]);
        let stripped = RE_BLANK_RUNS.replace_all(&stripped, "\n");

        let clipped = format!(
            "    <g clip-path=\"url(#{})\">\n{}\n    </g>",
            self.id,
            texts.join("\n")
        );

        let body = match RE_RECT.find(&stripped) {
            Some(rect) => format!(
                "{}\n{clipped}{}",
                &stripped[..rect.end()],
                &stripped[rect.end()..]
            ),
            None => stripped.into_owned(),
        };

        let open = match self.attrs {
            Some(attrs) => format!("<g {attrs}>"),
            None => "<g>".to_string(),
        };
        format!("{open}\n{body}\n  </g>")
    }
}

/// Wrap the texts of every rect+text group in a clip path.
///
/// Returns `None` when the document needs no change: it was processed
/// before, it has no eligible group, or there is no place for `<defs>`.
pub fn inject_clip_paths(svg: &str) -> Option<String> {
    if MarkerAnchor::ClipPathUse.is_present(svg) {
        return None;
    }

    let doc = ensure_defs(svg)?;
    let groups = find_clip_groups(&doc);
    if groups.is_empty() {
        return None;
    }

    let defs: String = groups
        .iter()
        .map(|group| group.rect.definition(&group.id))
        .collect();

    let mut out = doc.to_string();
    for group in groups.iter().rev() {
        out.replace_range(group.span.clone(), &group.render());
    }

    // Groups precede or follow </defs>; either way its position is found
    // after all group rewrites.
    let defs_close = out.find(DEFS_CLOSE)?;
    out.insert_str(defs_close, &format!("{defs}  "));
    trim_before(&mut out, defs_close);

    let out = RE_EMPTY_CLIPPED.replace_all(&out, "").into_owned();
    (out != svg).then_some(out)
}

/// Make sure `<defs>` exists, adding an empty one after the `<svg>` tag.
fn ensure_defs(svg: &str) -> Option<Cow<'_, str>> {
    if svg.contains(DEFS_OPEN) {
        return Some(Cow::Borrowed(svg));
    }
    let open = RE_SVG_OPEN.find(svg)?;
    let mut out = String::with_capacity(svg.len() + 24);
    out.push_str(&svg[..open.end()]);
    out.push_str("\n  <defs>\n  </defs>");
    out.push_str(&svg[open.end()..]);
    Some(Cow::Owned(out))
}

/// Remove the horizontal whitespace directly before byte `at`, so the
/// indentation that preceded `</defs>` is replaced by the inserted block.
fn trim_before(doc: &mut String, at: usize) {
    let start = doc[..at].trim_end_matches([' ', '\t']).len();
    doc.replace_range(start..at, "");
}

/// Collect eligible groups in document order and give them ids.
fn find_clip_groups(doc: &str) -> Vec<ClipGroup<'_>> {
    let mut groups = Vec::new();

    for caps in RE_GROUP.captures_iter(doc) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(2)) else {
            continue;
        };
        let attrs = caps.get(1).map(|m| m.as_str());
        let inner = inner.as_str();

        if !inner.contains("<rect") || !inner.contains("<text") {
            continue;
        }
        let clipped_attrs = attrs.is_some_and(|a| TagAttrs::parse(a).contains("clip-path"));
        if inner.contains("clip-path=") || clipped_attrs {
            continue;
        }

        let Some(rect_caps) = RE_RECT.captures(inner) else {
            debug!("overflow"; "group at byte {} has no self-closing rect", whole.start());
            continue;
        };
        let Some(rect) = rect_caps.get(1).and_then(|a| ClipRect::from_attrs(a.as_str())) else {
            debug!("overflow"; "group at byte {} has an incomplete rect", whole.start());
            continue;
        };
        if !RE_TEXT.is_match(inner) {
            continue;
        }

        groups.push(ClipGroup {
            id: format!("clip-{}", groups.len()),
            span: whole.range(),
            attrs,
            inner,
            rect,
        });
    }

    groups
}

/// Clip overflowing text in the SVG at `path`.
///
/// Returns whether the file changed. With `dry_run` nothing is written.
pub fn fix_svg_overflow(path: &Path, dry_run: bool) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let Some(fixed) = inject_clip_paths(&content) else {
        return Ok(false);
    };

    if !dry_run {
        fs::write(path, fixed).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(true)
}
