//! `svgpatch title`: rewrite each tutorial header's main title.

use anyhow::Result;

use crate::config::PatchConfig;
use crate::logger::mark_err;
use crate::title::{TitleError, TitleOutcome, header_path, load_tutorials, title_header};
use crate::utils::plural_count;
use crate::{debug, log};

/// Counts reported by the title pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TitleSummary {
    pub titled: usize,
    pub skipped: usize,
    pub missing: usize,
    pub failed: usize,
}

/// Title every header listed on the tutorials page.
///
/// Fails before touching any file when the tutorials directory or page is
/// missing or the page yields no records.
pub fn run_title(config: &PatchConfig) -> Result<TitleSummary> {
    let tutorials_dir = config.tutorials_dir();
    if !tutorials_dir.is_dir() {
        return Err(TitleError::TutorialsDirMissing(tutorials_dir).into());
    }
    let records = load_tutorials(&config.tutorials_page())?;
    debug!(
        "title";
        "{} on {}",
        plural_count(records.len(), "tutorial"),
        config.paths.tutorials_page.display()
    );

    let mut summary = TitleSummary::default();
    for record in &records {
        let path = header_path(&tutorials_dir, &record.slug);
        match title_header(&path, record, &config.title, config.dry_run) {
            Ok(TitleOutcome::Changed) => {
                summary.titled += 1;
                println!("titled: {}", config.root_relative(&path).display());
            }
            Ok(TitleOutcome::Missing) => {
                summary.missing += 1;
                debug!("title"; "no header for {}", record.slug);
            }
            Ok(outcome) => {
                summary.skipped += 1;
                if outcome == TitleOutcome::NoMarker {
                    debug!("title"; "no title marker in {}", config.root_relative(&path).display());
                }
            }
            Err(e) => {
                summary.failed += 1;
                eprintln!("{} Error processing {}: {:#}", mark_err(), path.display(), e);
            }
        }
    }

    let mut line = format!(
        "done. titled {} files, skipped {}, missing {}",
        summary.titled, summary.skipped, summary.missing
    );
    if summary.failed > 0 {
        line.push_str(&format!(", failed {}", summary.failed));
    }
    println!("{line}");
    if config.dry_run {
        log!("dry-run"; "{} left unwritten", plural_count(summary.titled, "header"));
    }

    Ok(summary)
}
