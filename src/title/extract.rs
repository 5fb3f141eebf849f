//! Tutorial metadata extraction from the tutorials page source.
//!
//! The page keeps its tutorials as object literals shaped like
//!
//! ```text
//! { slug: 'ai-tutorial-01-introduction', title: 'Introduction to ML', ..., order: 1, }
//! ```
//!
//! and this module pulls `slug`, `title` and `order` out with one regex.
//! Field order within an object must be slug, title, order. Quoted values are
//! taken verbatim, so an escaped apostrophe ends the value early.

use regex::Regex;
use std::sync::LazyLock;

use crate::debug;

static RE_TUTORIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"slug:\s*'([^']+)'\s*,[\s\S]*?title:\s*'([^']+)'\s*,[\s\S]*?order:\s*(\d+)\s*,",
    )
    .unwrap()
});

/// One tutorial as listed on the tutorials page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialRecord {
    /// URL-safe identifier, also the asset directory name.
    pub slug: String,
    /// Human-readable heading.
    pub title: String,
    /// 1-based display position.
    pub order: u32,
}

/// Extract every tutorial record from `source`, in match order.
///
/// Matches never overlap. A match whose `order` does not fit in `u32` is
/// dropped. An empty result means the page format changed; callers treat it
/// as fatal.
pub fn extract_tutorials(source: &str) -> Vec<TutorialRecord> {
    RE_TUTORIAL
        .captures_iter(source)
        .filter_map(|caps| {
            let slug = &caps[1];
            let order = match caps[3].parse::<u32>() {
                Ok(order) => order,
                Err(e) => {
                    debug!("extract"; "dropping `{}`: bad order `{}` ({})", slug, &caps[3], e);
                    return None;
                }
            };
            Some(TutorialRecord {
                slug: slug.to_string(),
                title: caps[2].to_string(),
                order,
            })
        })
        .collect()
}
