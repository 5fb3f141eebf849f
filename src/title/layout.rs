//! Title text layout: one line or two, and at what size.
//!
//! The label is `AI Tutorial NN: <title>`. Short labels stay on one line.
//! Longer ones are wrapped greedily into two lines: the first line takes the
//! prefix plus as many whole words as fit the wrap budget, the second line
//! takes the rest. Lengths are counted in characters.

use serde::{Deserialize, Serialize};

use crate::svg::xml_escape;

/// Horizontal center shared by both title lines.
pub const TITLE_CENTER_X: u32 = 600;

/// Numeric knobs of the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutParams {
    /// Longest label that is still rendered on a single line.
    pub single_line_max: usize,
    /// Budget for the first line when wrapping.
    pub wrap_budget: usize,
    /// Wrapped lines longer than this switch to the small font.
    pub shrink_above: usize,
    /// Regular font size.
    pub font_size: u32,
    /// Font size for long wrapped titles.
    pub small_font_size: u32,
    /// Added to the font size to get the second line's `dy`.
    pub line_gap_pad: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            single_line_max: 48,
            wrap_budget: 44,
            shrink_above: 56,
            font_size: 32,
            small_font_size: 28,
            line_gap_pad: 14,
        }
    }
}

/// Computed rendering of a title.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleLayout {
    pub font_size: u32,
    pub stroke_width: f32,
    /// Children of the `<text>` element, already escaped.
    pub markup: String,
    pub is_multiline: bool,
}

/// Stroke width of the title outline.
const STROKE_WIDTH: f32 = 1.0;

/// `AI Tutorial NN` for the given order.
pub fn tutorial_prefix(order: u32) -> String {
    format!("AI Tutorial {order:02}")
}

/// Lay out the title of tutorial `order`.
pub fn layout_title(order: u32, title: &str, params: &LayoutParams) -> TitleLayout {
    let prefix = tutorial_prefix(order);

    let single = format!("{prefix}: {title}");
    if char_len(&single) <= params.single_line_max {
        return TitleLayout {
            font_size: params.font_size,
            stroke_width: STROKE_WIDTH,
            markup: xml_escape(&single).into_owned(),
            is_multiline: false,
        };
    }

    let (line1, line2) = wrap_two_lines(&prefix, title, params.wrap_budget);
    let longest = char_len(&line1).max(char_len(&line2));
    let font_size = if longest > params.shrink_above {
        params.small_font_size
    } else {
        params.font_size
    };

    if line2.is_empty() {
        return TitleLayout {
            font_size,
            stroke_width: STROKE_WIDTH,
            markup: xml_escape(&line1).into_owned(),
            is_multiline: false,
        };
    }

    let line_gap = font_size + params.line_gap_pad;
    let markup = format!(
        "<tspan x=\"{x}\" dy=\"0\">{l1}</tspan>\n    <tspan x=\"{x}\" dy=\"{line_gap}\">{l2}</tspan>",
        x = TITLE_CENTER_X,
        l1 = xml_escape(&line1),
        l2 = xml_escape(&line2),
    );

    TitleLayout {
        font_size,
        stroke_width: STROKE_WIDTH,
        markup,
        is_multiline: true,
    }
}

/// Greedy two-line wrap.
///
/// Line 1 is `"{prefix}: "` followed by words until the next word would push
/// it past `budget`; the first word is always placed. Line 2 holds the
/// remaining words and may be empty.
pub fn wrap_two_lines(prefix: &str, title: &str, budget: usize) -> (String, String) {
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.is_empty() {
        return (prefix.to_string(), String::new());
    }

    let mut line1 = format!("{prefix}:");
    let mut placed = 0;
    for word in &words {
        let candidate_len = char_len(&line1) + 1 + char_len(word);
        if candidate_len > budget && placed > 0 {
            break;
        }
        line1.push(' ');
        line1.push_str(word);
        placed += 1;
    }

    (line1, words[placed..].join(" "))
}

#[inline]
fn char_len(s: &str) -> usize {
    s.chars().count()
}
