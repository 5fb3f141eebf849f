//! `[paths]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [paths]
//! tutorials_page = "app/tutorials/page.tsx"   # source of slug/title/order
//! tutorials_dir = "public/tutorials"          # tree of tutorial SVGs
//! ```
//!
//! Both paths are relative to the project root.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Page source listing the tutorials.
    pub tutorials_page: PathBuf,

    /// Root of the tutorial asset tree.
    pub tutorials_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            tutorials_page: ["app", "tutorials", "page.tsx"].iter().collect(),
            tutorials_dir: ["public", "tutorials"].iter().collect(),
        }
    }
}
