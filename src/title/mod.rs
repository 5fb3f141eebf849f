//! Tutorial header titles.
//!
//! - [`extract`]: `{slug, title, order}` records from the tutorials page
//! - [`layout`]: one/two-line layout of `AI Tutorial NN: <title>`
//! - [`patch`]: marker-anchored replacement of the title `<text>` node
//!
//! # Flow
//!
//! ```text
//! app/tutorials/page.tsx ──► extract ──► TutorialRecord*
//!                                             │
//!                       layout(order, title) ◄┘
//!                                │
//!  public/tutorials/<slug>/header.svg ──► patch ──► written if changed
//! ```

pub mod extract;
pub mod layout;
pub mod patch;

pub use extract::{TutorialRecord, extract_tutorials};
pub use layout::{LayoutParams, layout_title};
pub use patch::apply_title;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::repair::HEADER_FILE_NAME;

/// Conditions that abort a title run before any file is touched.
#[derive(Debug, Error)]
pub enum TitleError {
    #[error("Not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Not found: {}", .0.display())]
    TutorialsDirMissing(PathBuf),

    #[error("Failed to parse tutorials from {}", .0.display())]
    NoRecords(PathBuf),
}

/// What happened to one tutorial's header. `Unchanged` and `NoMarker` are
/// both reported as skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleOutcome {
    /// Header rewritten.
    Changed,
    /// Header already carries this title.
    Unchanged,
    /// Header has no main-title marker; left as is.
    NoMarker,
    /// No header at the conventional path.
    Missing,
}

/// Conventional header location for a slug.
pub fn header_path(tutorials_dir: &Path, slug: &str) -> PathBuf {
    tutorials_dir.join(slug).join(HEADER_FILE_NAME)
}

/// Read the tutorials page and extract its records.
///
/// Fails when the page is missing or yields no records.
pub fn load_tutorials(page: &Path) -> Result<Vec<TutorialRecord>> {
    if !page.is_file() {
        return Err(TitleError::SourceMissing(page.to_path_buf()).into());
    }
    let source =
        fs::read_to_string(page).with_context(|| format!("failed to read {}", page.display()))?;
    let records = extract_tutorials(&source);
    if records.is_empty() {
        return Err(TitleError::NoRecords(page.to_path_buf()).into());
    }
    Ok(records)
}

/// Title the header at `path` for `record`.
///
/// With `dry_run` the outcome is computed but nothing is written.
pub fn title_header(
    path: &Path,
    record: &TutorialRecord,
    params: &LayoutParams,
    dry_run: bool,
) -> Result<TitleOutcome> {
    if !path.is_file() {
        return Ok(TitleOutcome::Missing);
    }

    let before =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let layout = layout_title(record.order, &record.title, params);
    let Some(after) = apply_title(&before, &layout) else {
        return Ok(TitleOutcome::NoMarker);
    };

    if after == before {
        return Ok(TitleOutcome::Unchanged);
    }
    if !dry_run {
        fs::write(path, after).with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(TitleOutcome::Changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(slug: &str, title: &str, order: u32) -> TutorialRecord {
        TutorialRecord {
            slug: slug.into(),
            title: title.into(),
            order,
        }
    }

    #[test]
    fn test_header_path() {
        assert_eq!(
            header_path(Path::new("public/tutorials"), "ai-tutorial-01"),
            PathBuf::from("public/tutorials/ai-tutorial-01/header.svg")
        );
    }

    #[test]
    fn test_load_tutorials_missing_page() {
        let dir = TempDir::new().unwrap();
        let err = load_tutorials(&dir.path().join("page.tsx")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TitleError>(),
            Some(TitleError::SourceMissing(_))
        ));
    }

    #[test]
    fn test_load_tutorials_no_records() {
        let dir = TempDir::new().unwrap();
        let page = dir.path().join("page.tsx");
        fs::write(&page, "export default function Page() {}").unwrap();
        let err = load_tutorials(&page).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TitleError>(),
            Some(TitleError::NoRecords(_))
        ));
        assert!(err.to_string().contains("Failed to parse tutorials"));
    }

    #[test]
    fn test_title_header_outcomes() {
        let dir = TempDir::new().unwrap();
        let params = LayoutParams::default();
        let rec = record("a", "Linear Regression", 2);

        let path = dir.path().join("header.svg");
        assert_eq!(
            title_header(&path, &rec, &params, false).unwrap(),
            TitleOutcome::Missing
        );

        fs::write(&path, "<svg>\n  <!-- Main Title -->\n</svg>").unwrap();
        assert_eq!(
            title_header(&path, &rec, &params, false).unwrap(),
            TitleOutcome::Changed
        );
        assert_eq!(
            title_header(&path, &rec, &params, false).unwrap(),
            TitleOutcome::Unchanged
        );
    }

    #[test]
    fn test_title_header_no_marker_left_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.svg");
        let original = "<svg>\n  <text>No marker here</text>\n</svg>\n";
        fs::write(&path, original).unwrap();

        let outcome =
            title_header(&path, &record("a", "A", 1), &LayoutParams::default(), false).unwrap();
        assert_eq!(outcome, TitleOutcome::NoMarker);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_title_header_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("header.svg");
        let original = "<svg>\n  <!-- Main Title -->\n</svg>";
        fs::write(&path, original).unwrap();

        let outcome =
            title_header(&path, &record("a", "A", 1), &LayoutParams::default(), true).unwrap();
        assert_eq!(outcome, TitleOutcome::Changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
