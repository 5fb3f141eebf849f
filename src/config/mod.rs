//! Patcher configuration from `svgpatch.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── error      # ConfigError, ConfigDiagnostics
//! ├── section    # [paths]
//! ├── util       # config file lookup
//! └── mod.rs     # PatchConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section   | Purpose                                           |
//! |-----------|---------------------------------------------------|
//! | `[paths]` | Tutorials page source and tutorial asset tree     |
//! | `[title]` | Title layout knobs (line budgets, font sizes)     |
//!
//! The file is optional; every field has a default.

mod error;
mod section;
mod util;

pub use error::{ConfigDiagnostics, ConfigError};
pub use section::PathsConfig;

use util::find_config_file;

use crate::{cli::Cli, log, title::LayoutParams};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing svgpatch.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Absolute path of the loaded config file, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root; relative paths resolve against it (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Compute and report without writing (internal use only)
    #[serde(skip)]
    pub dry_run: bool,

    /// Input locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Title layout
    #[serde(default)]
    pub title: LayoutParams,
}

impl PatchConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// The config file is searched upward from the cwd. The project root is
    /// `--root` when given, else the config file's directory, else the cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let search_from = cli.root.as_ref().map_or_else(|| cwd.clone(), |r| cwd.join(r));
        let config_path = find_config_file(&cli.config, &search_from);

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        let root = match (&cli.root, &config_path) {
            (Some(root), _) => cwd.join(root),
            (None, Some(path)) => path.parent().map_or_else(|| cwd.clone(), Path::to_path_buf),
            (None, None) => cwd,
        };

        config.config_path = config_path;
        config.root = root;
        config.dry_run = cli.dry_run;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Load configuration from file path, warning about unknown fields.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("in {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path<'_>| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();
        let t = &self.title;

        for (field, value) in [
            ("title.single_line_max", t.single_line_max),
            ("title.wrap_budget", t.wrap_budget),
            ("title.shrink_above", t.shrink_above),
        ] {
            if value == 0 {
                diag.error(field, "must be greater than 0");
            }
        }
        for (field, value) in [
            ("title.font_size", t.font_size),
            ("title.small_font_size", t.small_font_size),
        ] {
            if value == 0 {
                diag.error(field, "must be greater than 0");
            }
        }
        if t.small_font_size > t.font_size {
            diag.error(
                "title.small_font_size",
                format!("must not exceed `title.font_size` ({})", t.font_size),
            );
        }

        diag.into_result()
    }

    /// Join a path with the root directory.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }

    /// Absolute path of the tutorials page source.
    pub fn tutorials_page(&self) -> PathBuf {
        self.root_join(&self.paths.tutorials_page)
    }

    /// Absolute path of the tutorial asset tree.
    pub fn tutorials_dir(&self) -> PathBuf {
        self.root_join(&self.paths.tutorials_dir)
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<PatchConfig, ConfigError> {
        PatchConfig::parse_with_ignored(content).map(|(config, _)| config)
    }

    #[test]
    fn test_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config.paths, PathsConfig::default());
        assert_eq!(config.title, LayoutParams::default());
        assert_eq!(config.title.single_line_max, 48);
        assert_eq!(config.title.wrap_budget, 44);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_override() {
        let config = parse(
            r#"
            [paths]
            tutorials_dir = "static/tutorials"

            [title]
            wrap_budget = 40
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.tutorials_dir, PathBuf::from("static/tutorials"));
        assert_eq!(
            config.paths.tutorials_page,
            PathsConfig::default().tutorials_page
        );
        assert_eq!(config.title.wrap_budget, 40);
        assert_eq!(config.title.font_size, 32);
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (_, ignored) = PatchConfig::parse_with_ignored(
            r#"
            [title]
            colour = "red"
            [extra]
            x = 1
            "#,
        )
        .unwrap();
        assert!(ignored.contains(&"title.colour".to_string()));
        assert!(ignored.contains(&"extra".to_string()));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            parse("[title\nfont_size = 1"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_validation_rejects_bad_sizes() {
        let config = parse(
            r#"
            [title]
            font_size = 20
            small_font_size = 24
            wrap_budget = 0
            "#,
        )
        .unwrap();
        let msg = config.validate().unwrap_err().to_string();
        assert!(msg.contains("title.wrap_budget"));
        assert!(msg.contains("title.small_font_size"));
    }

    #[test]
    fn test_resolved_paths() {
        let config = PatchConfig::with_root("/site");
        assert_eq!(
            config.tutorials_page(),
            PathBuf::from("/site/app/tutorials/page.tsx")
        );
        assert_eq!(config.tutorials_dir(), PathBuf::from("/site/public/tutorials"));
        assert_eq!(
            config.root_relative(Path::new("/site/public/tutorials/a/header.svg")),
            Path::new("public/tutorials/a/header.svg")
        );
        assert_eq!(
            config.root_relative(Path::new("/elsewhere/x.svg")),
            Path::new("/elsewhere/x.svg")
        );
    }
}
