//! Logging utilities with colored output.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro for output that only appears with `--verbose`
//! - `mark_ok` / `mark_err` for the per-file result symbols
//!
//! # Example
//!
//! ```ignore
//! log!("overflow"; "scanning {} files", count);
//! debug!("title"; "no marker in {}", path.display());
//! ```

use owo_colors::{OwoColorize, Stream};
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
///
/// # Usage
/// ```ignore
/// debug!("module"; "debug info: {}", value);
/// ```
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let module_lower = module.to_ascii_lowercase();
    let prefix = colorize_prefix(module, &module_lower);

    let mut stdout = stdout().lock();
    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "error" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_red().bold().to_string())
            .to_string(),
        "warning" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_magenta().bold().to_string())
            .to_string(),
        "config" => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_blue().bold().to_string())
            .to_string(),
        _ => prefix
            .if_supports_color(Stream::Stdout, |p| p.bright_yellow().bold().to_string())
            .to_string(),
    }
}

/// Success symbol (✓, green when stdout supports color).
pub fn mark_ok() -> String {
    "✓"
        .if_supports_color(Stream::Stdout, |s| s.green().to_string())
        .to_string()
}

/// Failure symbol (✗, red when stderr supports color).
pub fn mark_err() -> String {
    "✗"
        .if_supports_color(Stream::Stderr, |s| s.red().to_string())
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_flag_roundtrip() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }

    #[test]
    fn test_prefix_contains_module_name() {
        owo_colors::set_override(false);
        assert_eq!(colorize_prefix("title", "title"), "[title]");
        assert_eq!(colorize_prefix("Error", "error"), "[Error]");
    }

    #[test]
    fn test_marks_without_color() {
        owo_colors::set_override(false);
        assert_eq!(mark_ok(), "✓");
        assert_eq!(mark_err(), "✗");
    }
}
