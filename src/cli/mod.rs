//! Command-line interface module.

mod args;
pub mod arrows;
pub mod cleanup;
pub mod common;
pub mod overflow;
pub mod repair;
pub mod title;

pub use args::{Cli, Commands};
