//! Offset to element path
//!
//! Forward direction of the locator:
//! - Resolver: deepest element enclosing a byte offset, with its ancestry
//! - Sibling: 1-based index among same-named siblings
//! - Segments: skip filtering and name-attribute lookup per path entry

pub mod element;
pub mod resolver;
pub mod segments;
pub mod sibling;

pub use element::{ElementNode, ElementPath};
pub use resolver::{element_path_at, resolve_path};
pub use segments::{compute_segments, PathSegment, SkipSet};
pub use sibling::sibling_index;
