//! Element Path Resolution
//!
//! Replays the tag stream to find the deepest element enclosing a byte
//! offset, returning its full ancestry.

use tracing::{debug, trace};

use super::element::{AncestryStack, ElementNode, ElementPath};
use crate::core::scanner::TagScanner;
use crate::core::tag::{TagKind, TagOccurrence};

/// Find the element path at `offset` in `text`
pub fn resolve_path(text: &str, offset: usize) -> ElementPath<'_> {
    element_path_at(TagScanner::new(text), offset)
}

/// Find the element path at `offset` from a tag stream.
///
/// A tag whose markup contains `offset` (end inclusive) yields its
/// ancestry plus itself; later matches replace earlier ones so the
/// innermost tag wins. Otherwise the offset sits in element content and
/// the elements open at that point are returned, down to the deepest one
/// starting at or before `offset`. Returns an empty path when neither
/// applies.
pub fn element_path_at<'a, I>(tags: I, offset: usize) -> ElementPath<'a>
where
    I: IntoIterator<Item = TagOccurrence<'a>>,
{
    let mut stack: AncestryStack<ElementNode<'a>> = AncestryStack::new();
    let mut candidate: Option<ElementPath<'a>> = None;
    let mut open_at_offset: Option<ElementPath<'a>> = None;

    for tag in tags {
        // Nothing starting after the offset can contain it.
        if tag.offset > offset {
            break;
        }
        if open_at_offset.is_none() && tag.end() >= offset {
            open_at_offset = Some(stack.as_slice().to_vec());
        }

        match tag.kind {
            TagKind::Close => {
                stack.close(tag.name);
            }
            TagKind::SelfClosing => {
                if tag.contains(offset) {
                    trace!(name = tag.name, offset = tag.offset, "offset inside self-closing tag");
                    candidate = Some(with_leaf(&stack, ElementNode::from_tag(&tag)));
                }
            }
            TagKind::Open => {
                let node = ElementNode::from_tag(&tag);
                if tag.contains(offset) {
                    trace!(name = tag.name, offset = tag.offset, "offset inside open tag");
                    candidate = Some(with_leaf(&stack, node.clone()));
                }
                stack.push(node);
            }
        }
    }

    let path = candidate.unwrap_or_else(|| {
        let mut open = open_at_offset.unwrap_or_else(|| stack.into_vec());
        match open.iter().rposition(|node| node.start_offset <= offset) {
            Some(deepest) => open.truncate(deepest + 1),
            None => open.clear(),
        }
        open
    });

    debug!(
        offset,
        depth = path.len(),
        path = %path.iter().map(|n| n.name).collect::<Vec<_>>().join(" > "),
        "resolved element path"
    );
    path
}

fn with_leaf<'a>(stack: &AncestryStack<ElementNode<'a>>, leaf: ElementNode<'a>) -> ElementPath<'a> {
    let mut path = Vec::with_capacity(stack.depth() + 1);
    path.extend_from_slice(stack.as_slice());
    path.push(leaf);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str, offset: usize) -> Vec<&str> {
        resolve_path(text, offset).into_iter().map(|n| n.name).collect()
    }

    fn at(text: &str, needle: &str) -> usize {
        text.find(needle).expect("needle present")
    }

    const DOC: &str = "<Project>\n  <EntityDefs>\n    <EntityDef name=\"Doc\">\n      <Attributes>\n        <Attribute name=\"Id\"/>\n        <Attribute name=\"TurnoverName\"/>\n      </Attributes>\n    </EntityDef>\n  </EntityDefs>\n</Project>";

    #[test]
    fn test_inside_self_closing_tag() {
        let offset = at(DOC, "TurnoverName");
        assert_eq!(
            names(DOC, offset),
            vec!["Project", "EntityDefs", "EntityDef", "Attributes", "Attribute"]
        );
        let path = resolve_path(DOC, offset);
        assert_eq!(path[4].attributes.get("name"), Some("TurnoverName"));
    }

    #[test]
    fn test_inside_open_tag() {
        let offset = at(DOC, "EntityDef name") + 3;
        assert_eq!(names(DOC, offset), vec!["Project", "EntityDefs", "EntityDef"]);
    }

    #[test]
    fn test_in_content_between_tags() {
        let text = "<root><a>some text</a><b></b></root>";
        assert_eq!(names(text, at(text, "text")), vec!["root", "a"]);
    }

    #[test]
    fn test_in_content_after_closed_child() {
        let text = "<root><a></a>  tail  </root>";
        assert_eq!(names(text, at(text, "tail")), vec!["root"]);
    }

    #[test]
    fn test_inside_closing_tag_keeps_element() {
        let text = "<root><a>x</a></root>";
        assert_eq!(names(text, at(text, "</a>") + 2), vec!["root", "a"]);
    }

    #[test]
    fn test_boundary_after_gt_is_inside_tag() {
        // Offset right after `<a>` still belongs to the tag itself.
        let text = "<root><a>x</a></root>";
        let path = resolve_path(text, at(text, "<a>") + 3);
        assert_eq!(path.last().map(|n| n.start_offset), Some(6));
    }

    #[test]
    fn test_adjacent_tags_innermost_wins() {
        // Offset 6 is both the end of `<root>` and the start of `<a>`.
        let text = "<root><a/></root>";
        assert_eq!(names(text, 6), vec!["root", "a"]);
    }

    #[test]
    fn test_unclosed_elements_stay_open() {
        let text = "<html><body><p>para";
        assert_eq!(names(text, text.len()), vec!["html", "body", "p"]);
    }

    #[test]
    fn test_unmatched_close_is_ignored() {
        let text = "<root></X><a/></root>";
        assert_eq!(names(text, at(text, "<a/>") + 1), vec!["root", "a"]);
    }

    #[test]
    fn test_no_element() {
        assert!(resolve_path("plain text", 3).is_empty());
        assert!(resolve_path("", 0).is_empty());
        let text = "before <root></root>";
        assert!(resolve_path(text, 2).is_empty());
        assert!(resolve_path("<a></a> after", 10).is_empty());
    }

    #[test]
    fn test_path_offsets_strictly_increase() {
        let path = resolve_path(DOC, at(DOC, "TurnoverName"));
        assert!(path.windows(2).all(|w| w[0].start_offset < w[1].start_offset));
    }
}
