//! Element nodes and the tolerant ancestry stack
//!
//! Every consumer of the tag stream (path resolution, sibling counting,
//! path matching) replays it with the same nesting policy, kept here:
//!
//! - a closing tag pops only when it names the innermost open element;
//!   any other closer is ignored, so a stray `</X>` is a no-op
//! - open elements that are never closed stay open to the end of input

use crate::core::attributes::Attributes;
use crate::core::tag::{TagKind, TagOccurrence};

/// An element started by an open or self-closing tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode<'a> {
    pub name: &'a str,
    pub attributes: Attributes<'a>,
    pub start_offset: usize,
    /// End of the element's markup, when known. Self-closing elements end
    /// with their tag; open elements are left unresolved.
    pub end_offset: Option<usize>,
    pub start_line: usize,
    pub start_column: usize,
}

impl<'a> ElementNode<'a> {
    pub fn from_tag(tag: &TagOccurrence<'a>) -> Self {
        Self {
            name: tag.name,
            attributes: tag.attributes.clone(),
            start_offset: tag.offset,
            end_offset: (tag.kind == TagKind::SelfClosing).then(|| tag.end()),
            start_line: tag.line,
            start_column: tag.column,
        }
    }
}

/// Elements from the outermost ancestor down to a target element
pub type ElementPath<'a> = Vec<ElementNode<'a>>;

/// Anything that can sit on an ancestry stack
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for ElementNode<'_> {
    fn name(&self) -> &str {
        self.name
    }
}

impl Named for &str {
    fn name(&self) -> &str {
        self
    }
}

/// Stack of currently open elements
#[derive(Debug, Clone)]
pub struct AncestryStack<T> {
    entries: Vec<T>,
}

impl<T> Default for AncestryStack<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T: Named> AncestryStack<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Apply a closing tag: pops and returns the innermost entry only when
    /// its name equals `name`
    pub fn close(&mut self, name: &str) -> Option<T> {
        match self.entries.last() {
            Some(top) if top.name() == name => self.entries.pop(),
            _ => None,
        }
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_mut(&mut self) -> Option<&mut T> {
        self.entries.last_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<T> {
        self.entries
    }
}
