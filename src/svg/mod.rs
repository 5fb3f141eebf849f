//! String-level SVG helpers shared by the batch passes.
//!
//! Nothing here builds a DOM. Every pass patches the markup in place so that
//! the bytes it does not touch stay exactly as the asset generator wrote them.
//!
//! - [`marker`]: sentinel substrings that anchor the patches (`MarkerAnchor`)
//! - [`escape`]: XML text escaping
//! - [`attrs`]: attribute lookup and in-place edits on a single start tag

pub mod attrs;
pub mod escape;
pub mod marker;

pub use attrs::{TagAttrs, set_attr};
pub use escape::xml_escape;
pub use marker::MarkerAnchor;
