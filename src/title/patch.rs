//! Marker-anchored title patching for one header SVG.
//!
//! The `<text>` node right after `<!-- Main Title -->` is replaced (or
//! inserted when missing). Any further `<text>` blocks between the marker and
//! the badge group are duplicates from earlier broken runs and get dropped.
//!
//! Insertion and replacement produce the same bytes, so patching a patched
//! document yields it unchanged.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

use super::layout::{TITLE_CENTER_X, TitleLayout};
use crate::svg::MarkerAnchor;

/// A `<text>` block at the very start of the haystack (after whitespace),
/// plus the whitespace that follows it.
static RE_LEADING_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<text\b[\s\S]*?</text>\s*").unwrap());

/// Any `<text>` block plus trailing whitespace.
static RE_TEXT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<text\b[\s\S]*?</text>\s*").unwrap());

const FONT_STACK: &str =
    "system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif";
const FILL: &str = "#facc15";
const STROKE: &str = "#0f172a";

/// Baselines for the title block.
const Y_SINGLE: u32 = 170;
const Y_MULTILINE: u32 = 140;

/// Render the complete title `<text>` element, wrapped in the newlines and
/// indentation it occupies after the marker.
pub fn title_node(layout: &TitleLayout) -> String {
    let y = if layout.is_multiline {
        Y_MULTILINE
    } else {
        Y_SINGLE
    };
    format!(
        "\n  <text x=\"{x}\" y=\"{y}\" font-family=\"{FONT_STACK}\" font-size=\"{size}\" \
         font-weight=\"700\" fill=\"{FILL}\" text-anchor=\"middle\" stroke=\"{STROKE}\" \
         stroke-width=\"{stroke}\" paint-order=\"stroke fill\" stroke-linejoin=\"round\" \
         dominant-baseline=\"middle\">{markup}</text>\n",
        x = TITLE_CENTER_X,
        size = layout.font_size,
        stroke = layout.stroke_width,
        markup = layout.markup,
    )
}

/// Apply `layout` as the main title of `svg`.
///
/// Returns `None` when the document has no main-title marker. The returned
/// document may equal the input when it already carries this exact title.
pub fn apply_title(svg: &str, layout: &TitleLayout) -> Option<String> {
    let marker_end = MarkerAnchor::MainTitle.find_end(svg)?;
    let (head, after) = svg.split_at(marker_end);

    let rest = match RE_LEADING_TEXT.find(after) {
        Some(existing) => &after[existing.end()..],
        None => after.trim_start(),
    };

    let node = title_node(layout);
    let mut out = String::with_capacity(head.len() + node.len() + rest.len());
    out.push_str(head);
    out.push_str(&node);
    out.push_str(rest);

    Some(match drop_duplicate_titles(&out, marker_end) {
        Cow::Borrowed(_) => out,
        Cow::Owned(deduped) => deduped,
    })
}

/// Keep only the first `<text>` block between the main-title marker (ending
/// at `marker_end`) and the badge group; drop the others.
fn drop_duplicate_titles(svg: &str, marker_end: usize) -> Cow<'_, str> {
    let Some(badge_start) = MarkerAnchor::BadgeGroup.find_from(svg, marker_end) else {
        return Cow::Borrowed(svg);
    };

    let region = &svg[marker_end..badge_start];
    let Some(first) = RE_LEADING_TEXT.find(region) else {
        return Cow::Borrowed(svg);
    };

    let tail = &region[first.end()..];
    let cleaned = RE_TEXT_BLOCK.replace_all(tail, "");
    if let Cow::Borrowed(_) = cleaned {
        return Cow::Borrowed(svg);
    }

    let mut out = String::with_capacity(svg.len());
    out.push_str(&svg[..marker_end]);
    out.push_str(first.as_str());
    out.push_str(&cleaned);
    out.push_str(&svg[badge_start..]);
    Cow::Owned(out)
}
