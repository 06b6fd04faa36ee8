//! Tag occurrences
//!
//! One entry per tag the scanner recognizes, in document order.

use super::attributes::Attributes;

/// How a tag participates in nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<name ...>`
    Open,
    /// `</name>`
    Close,
    /// `<name .../>`
    SelfClosing,
}

/// A single tag as it appears in the source text
///
/// All string fields borrow from the scanned input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOccurrence<'a> {
    /// Element name, including any `prefix:`
    pub name: &'a str,
    /// Attributes parsed from the tag's attribute region
    pub attributes: Attributes<'a>,
    /// Byte offset of the opening `<`
    pub offset: usize,
    /// Zero-based line of `offset`
    pub line: usize,
    /// Zero-based byte column of `offset`
    pub column: usize,
    /// Full tag text from `<` to `>` inclusive
    pub raw: &'a str,
    pub kind: TagKind,
}

impl<'a> TagOccurrence<'a> {
    /// Offset one past the closing `>`
    #[inline]
    pub fn end(&self) -> usize {
        self.offset + self.raw.len()
    }

    /// True when `offset` lies within the tag markup.
    ///
    /// The end is inclusive, so a cursor sitting right after `>` still
    /// counts as inside the tag.
    #[inline]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset <= self.end()
    }

    /// Open or self-closing, i.e. the tag starts an element
    #[inline]
    pub fn starts_element(&self) -> bool {
        self.kind != TagKind::Close
    }
}
