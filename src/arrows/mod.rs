//! Reroute diagram arrows between boxes.
//!
//! Diagram SVGs draw boxes as `<rect>`s (often positioned by a parent
//! `<g transform="translate(x, y)">`) and arrows as `<path>` or `<line>`
//! elements carrying `marker-end`. Hand-placed arrows drift off their boxes.
//! This pass snaps each arrow's start to the nearest box bottom and its end to
//! the nearest box top, then redraws it with [`geometry::route`]:
//!
//! ```text
//!   ┌──────┐
//!   │  A   │
//!   └──┬───┘
//!      └────────┐     drop 4px, run across, drop to target
//!           ┌───▼──┐
//!           │  B   │
//!           └──────┘
//! ```
//!
//! Arrow `<line>`s become `<path>`s. Rerouted arrows are drawn dashed and
//! thin. Rects inside `<defs>`, backgrounds and gradient fills are not boxes.

pub mod geometry;

use anyhow::{Context, Result};
use regex::{Captures, Regex};
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use crate::debug;
use crate::svg::{TagAttrs, set_attr};
use geometry::{BoxRect, Point, nearest, route};

/// Opening, closing and self-closing `g`, `rect` and `defs` tags, in order.
static RE_BOX_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)(g|rect|defs)\b([^>]*?)(/?)>").unwrap());

static RE_TRANSLATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"translate\(\s*(-?[\d.]+)(?:\s*[,\s]\s*(-?[\d.]+))?\s*\)").unwrap()
});

static RE_PATH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<path\b([^>]*?)(/?)>").unwrap());

static RE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<line\b([^>]*?)\s*(?:/>|>\s*</line>)").unwrap());

/// Absolute `M`/`L` coordinates in path data.
static RE_PATH_POINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ML]\s*(-?[\d.]+)[\s,]+(-?[\d.]+)").unwrap());

/// Rects at least this wide or tall are backgrounds, not boxes.
const MAX_BOX_WIDTH: f64 = 500.0;
const MAX_BOX_HEIGHT: f64 = 300.0;

const DASH_ARRAY: &str = "1.5,1.5";
const STROKE_WIDTH: &str = "0.5";
const OPACITY: &str = "0.8";

/// Reroute every arrow in `svg`.
///
/// Returns `None` when nothing changes, including when the diagram has fewer
/// than two boxes.
pub fn reroute_arrows(svg: &str) -> Option<String> {
    let boxes = collect_boxes(svg);
    if boxes.len() < 2 {
        return None;
    }

    let mut rerouted = 0usize;
    let paths = RE_PATH.replace_all(svg, |caps: &Captures<'_>| {
        match reroute_path(&caps[1], &boxes) {
            Some(attrs) => {
                rerouted += 1;
                format!("<path{attrs}{}>", &caps[2])
            }
            None => caps[0].to_string(),
        }
    });
    let out = RE_LINE.replace_all(&paths, |caps: &Captures<'_>| {
        match line_to_path(&caps[1], &boxes) {
            Some(path) => {
                rerouted += 1;
                path
            }
            None => caps[0].to_string(),
        }
    });

    debug!("arrows"; "{} boxes, {} arrows rerouted", boxes.len(), rerouted);
    let out = out.into_owned();
    (out != svg).then_some(out)
}

/// Reroute the arrows of the SVG at `path`. Returns whether the file changed.
pub fn fix_arrows(path: &Path, dry_run: bool) -> Result<bool> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let Some(fixed) = reroute_arrows(&content) else {
        return Ok(false);
    };

    if !dry_run {
        fs::write(path, fixed).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(true)
}

/// Whether `path` names a diagram (`diagram-*.svg`).
pub fn is_diagram(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("diagram-") && name.ends_with(".svg"))
}

/// Boxes in document order, translated by their enclosing groups.
fn collect_boxes(svg: &str) -> Vec<BoxRect> {
    let mut boxes = Vec::new();
    let mut offsets: Vec<Point> = Vec::new();
    let mut defs_depth = 0usize;

    for caps in RE_BOX_TAG.captures_iter(svg) {
        let closing = !caps[1].is_empty();
        let self_closing = !caps[4].is_empty();
        let attrs = &caps[3];

        match (&caps[2], closing) {
            ("defs", false) if !self_closing => defs_depth += 1,
            ("defs", true) => defs_depth = defs_depth.saturating_sub(1),
            ("g", false) if !self_closing => {
                let parent = offsets.last().copied().unwrap_or(Point::new(0.0, 0.0));
                let local = translation(attrs);
                offsets.push(Point::new(parent.x + local.x, parent.y + local.y));
            }
            ("g", true) => {
                offsets.pop();
            }
            ("rect", false) if defs_depth == 0 => {
                let offset = offsets.last().copied().unwrap_or(Point::new(0.0, 0.0));
                if let Some(b) = box_from_attrs(attrs, offset) {
                    boxes.push(b);
                }
            }
            _ => {}
        }
    }
    boxes
}

/// Offset of a group's `translate(x[, y])`, zero when absent.
fn translation(attrs: &str) -> Point {
    let parsed = TagAttrs::parse(attrs)
        .get("transform")
        .and_then(|t| RE_TRANSLATE.captures(t))
        .and_then(|caps| {
            let x = caps[1].parse().ok()?;
            let y = match caps.get(2) {
                Some(y) => y.as_str().parse().ok()?,
                None => 0.0,
            };
            Some(Point::new(x, y))
        });
    parsed.unwrap_or(Point::new(0.0, 0.0))
}

fn box_from_attrs(attrs: &str, offset: Point) -> Option<BoxRect> {
    let attrs = TagAttrs::parse(attrs);
    let number = |name: &str| -> Option<f64> {
        match attrs.non_empty(name) {
            Some(v) => v.parse().ok(),
            None => Some(0.0),
        }
    };

    let (x, y) = (number("x")?, number("y")?);
    let (width, height) = (number("width")?, number("height")?);
    if width <= 0.0 || height <= 0.0 || width > MAX_BOX_WIDTH || height > MAX_BOX_HEIGHT {
        return None;
    }
    if attrs.get("fill").is_some_and(|fill| fill.contains("url(")) {
        return None;
    }

    Some(BoxRect {
        x: x + offset.x,
        y: y + offset.y,
        width,
        height,
    })
}

/// First and last absolute point of path data.
fn endpoints(d: &str) -> Option<(Point, Point)> {
    let mut points = RE_PATH_POINT.captures_iter(d).filter_map(|caps| {
        Some(Point::new(caps[1].parse().ok()?, caps[2].parse().ok()?))
    });
    let first = points.next()?;
    let last = points.last()?;
    Some((first, last))
}

/// Route between the boxes nearest to `start` and `end`; `None` when both
/// ends snap to the same box.
fn route_between(boxes: &[BoxRect], start: Point, end: Point) -> Option<String> {
    let source = nearest(boxes, start, BoxRect::center_bottom)?;
    let target = nearest(boxes, end, BoxRect::center_top)?;
    if source == target {
        return None;
    }
    Some(route(boxes[source], boxes[target]))
}

fn arrow_style(attrs: &str) -> String {
    let attrs = set_attr(attrs, "stroke-dasharray", DASH_ARRAY);
    let attrs = set_attr(&attrs, "stroke-width", STROKE_WIDTH);
    if TagAttrs::parse(&attrs).contains("opacity") {
        attrs
    } else {
        set_attr(&attrs, "opacity", OPACITY)
    }
}

/// New attribute section for an arrow `<path>`, `None` for other paths.
fn reroute_path(attrs: &str, boxes: &[BoxRect]) -> Option<String> {
    let parsed = TagAttrs::parse(attrs);
    if !parsed.contains("marker-end") {
        return None;
    }
    let (start, end) = endpoints(parsed.get("d")?)?;
    let d = route_between(boxes, start, end)?;
    Some(arrow_style(&set_attr(attrs, "d", &d)))
}

/// Replacement `<path>` for an arrow `<line>`, `None` for other lines.
fn line_to_path(attrs: &str, boxes: &[BoxRect]) -> Option<String> {
    let parsed = TagAttrs::parse(attrs);
    if !parsed.contains("marker-end") {
        return None;
    }
    let coord = |name: &str| -> Option<f64> {
        match parsed.non_empty(name) {
            Some(v) => v.parse().ok(),
            None => Some(0.0),
        }
    };
    let start = Point::new(coord("x1")?, coord("y1")?);
    let end = Point::new(coord("x2")?, coord("y2")?);
    let d = route_between(boxes, start, end)?;

    let mut rest = format!(" d=\"{d}\"");
    for (name, value) in parsed.iter() {
        if !matches!(name, "x1" | "y1" | "x2" | "y2") {
            rest.push_str(&format!(" {name}=\"{value}\""));
        }
    }
    if !parsed.contains("fill") {
        rest = set_attr(&rest, "fill", "none");
    }
    Some(format!("<path{}/>", arrow_style(&rest)))
}
