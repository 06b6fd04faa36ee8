//! XPath Matching
//!
//! Walks the tag stream to find the element a parsed XPath identifies.
//! Nesting follows the same tolerant stack as path resolution, and each
//! open element keeps per-name child counts so sibling indexes are known
//! without rescanning.

use std::collections::HashMap;

use tracing::debug;

use super::parser::ParsedSegment;
use crate::core::scanner::TagScanner;
use crate::core::tag::{TagKind, TagOccurrence};
use crate::path::element::{AncestryStack, Named};

/// Position of a matched element's start tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// Byte offset of the `<`
    pub offset: usize,
    /// Zero-based line
    pub line: usize,
    /// Zero-based byte column
    pub column: usize,
}

impl Location {
    fn of(tag: &TagOccurrence<'_>) -> Self {
        Self {
            offset: tag.offset,
            line: tag.line,
            column: tag.column,
        }
    }
}

/// An open element with the running counts of its children by name
struct Frame<'a> {
    name: &'a str,
    children: HashMap<&'a str, usize>,
}

impl Named for Frame<'_> {
    fn name(&self) -> &str {
        self.name
    }
}

/// Find the element addressed by `segments` in `text`
pub fn find_in_text<S: AsRef<str>>(text: &str, segments: &[ParsedSegment], name_attributes: &[S]) -> Option<Location> {
    find_element(TagScanner::new(text), segments, name_attributes)
}

/// Find the element addressed by `segments` in a tag stream.
///
/// The first segment must match a top-level element and every later one a
/// direct child of the previous match. A step with a name compares the
/// element's name (first non-blank of `name_attributes`); a step with an
/// index compares its position among same-named siblings; a bare step takes
/// the first same-named sibling. When the remaining steps fail inside one
/// candidate, later candidates are still tried. The final step may match a
/// self-closing element. Returns `None` for an empty path or no match.
pub fn find_element<'a, I, S>(tags: I, segments: &[ParsedSegment], name_attributes: &[S]) -> Option<Location>
where
    I: IntoIterator<Item = TagOccurrence<'a>>,
    S: AsRef<str>,
{
    if segments.is_empty() {
        return None;
    }

    let mut stack: AncestryStack<Frame<'a>> = AncestryStack::new();
    let mut top_level: HashMap<&'a str, usize> = HashMap::new();
    // Stack depth at which each matched segment's element sits
    let mut matched: Vec<usize> = Vec::with_capacity(segments.len());

    for tag in tags {
        match tag.kind {
            TagKind::Close => {
                if stack.close(tag.name).is_some() {
                    while matched.last().is_some_and(|&depth| depth >= stack.depth()) {
                        matched.pop();
                    }
                }
            }
            TagKind::Open | TagKind::SelfClosing => {
                let depth = stack.depth();
                let siblings = match stack.top_mut() {
                    Some(frame) => &mut frame.children,
                    None => &mut top_level,
                };
                let count = siblings.entry(tag.name).or_insert(0);
                *count += 1;
                let sibling_index = *count;

                let expected_depth = matched.last().map_or(0, |&d| d + 1);
                if depth == expected_depth {
                    let segment = &segments[matched.len()];
                    if tag.name == segment.tag && accepts(segment, &tag, sibling_index, name_attributes) {
                        if matched.len() + 1 == segments.len() {
                            let location = Location::of(&tag);
                            debug!(offset = location.offset, line = location.line, "matched XPath");
                            return Some(location);
                        }
                        if tag.kind == TagKind::Open {
                            matched.push(depth);
                        }
                    }
                }

                if tag.kind == TagKind::Open {
                    stack.push(Frame {
                        name: tag.name,
                        children: HashMap::new(),
                    });
                }
            }
        }
    }

    debug!(steps = segments.len(), "no element matched XPath");
    None
}

fn accepts<S: AsRef<str>>(segment: &ParsedSegment, tag: &TagOccurrence<'_>, sibling_index: usize, name_attributes: &[S]) -> bool {
    if let Some(name) = &segment.name {
        tag.attributes.first_non_blank(name_attributes) == Some(name.as_str())
    } else if let Some(index) = segment.index {
        sibling_index == index
    } else {
        sibling_index == 1
    }
}
