//! Sibling Index Calculation
//!
//! Computes the 1-based position of an element among same-named siblings
//! under its parent, the `[n]` of an indexed XPath step.

use super::element::{AncestryStack, ElementNode};
use super::segments::SkipSet;
use crate::core::scanner::scan_tags_from;
use crate::core::tag::TagKind;

/// Index of `path[target_index]` among same-named children of its parent.
///
/// Rescans `text` over the parent's span, from the parent's start tag to
/// its matching closer (or the element's recorded end, or end of input).
/// Elements named in `skip` are never counted. The root, an out-of-range
/// index, and a target that cannot be found inside its parent all yield 1.
pub fn sibling_index(text: &str, path: &[ElementNode<'_>], target_index: usize, skip: &SkipSet) -> usize {
    if target_index == 0 {
        return 1;
    }
    let (Some(parent), Some(target)) = (path.get(target_index - 1), path.get(target_index)) else {
        return 1;
    };

    let mut nested: AncestryStack<&str> = AncestryStack::new();
    let mut count = 0;

    for tag in scan_tags_from(text, parent.start_offset) {
        if tag.offset == parent.start_offset {
            continue;
        }
        if parent.end_offset.is_some_and(|end| tag.offset >= end) {
            break;
        }

        match tag.kind {
            TagKind::Close => {
                if nested.is_empty() {
                    if tag.name == parent.name {
                        break;
                    }
                } else {
                    nested.close(tag.name);
                }
            }
            TagKind::Open | TagKind::SelfClosing => {
                if nested.is_empty() && tag.name == target.name && !skip.contains(tag.name) {
                    count += 1;
                    if tag.offset == target.start_offset {
                        return count;
                    }
                }
                if tag.kind == TagKind::Open {
                    nested.push(tag.name);
                }
            }
        }
    }

    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::resolver::resolve_path;

    fn index_at(text: &str, offset: usize, skip: &SkipSet) -> Vec<usize> {
        let path = resolve_path(text, offset);
        (0..path.len()).map(|i| sibling_index(text, &path, i, skip)).collect()
    }

    fn nth(text: &str, needle: &str, n: usize) -> usize {
        text.match_indices(needle).nth(n).map(|(i, _)| i).expect("needle present") + 1
    }

    #[test]
    fn test_self_closing_siblings() {
        let text = "<root><a/><b/><a/><a/></root>";
        assert_eq!(index_at(text, nth(text, "<a/>", 2), &SkipSet::new()), vec![1, 3]);
    }

    #[test]
    fn test_open_siblings() {
        let text = "<root><a>1</a><a>2</a><b></b><a>3</a></root>";
        assert_eq!(index_at(text, nth(text, "<a>", 1), &SkipSet::new()), vec![1, 2]);
        assert_eq!(index_at(text, nth(text, "<a>", 2), &SkipSet::new()), vec![1, 3]);
    }

    #[test]
    fn test_nested_same_name_not_counted() {
        let text = "<root><a><a/><a/></a><a/></root>";
        // The last <a/> is the second direct child named `a`.
        assert_eq!(index_at(text, nth(text, "<a/>", 2), &SkipSet::new()), vec![1, 2]);
        // Inside the first <a>, the second nested <a/> is index 2.
        assert_eq!(index_at(text, nth(text, "<a/>", 1), &SkipSet::new()), vec![1, 1, 2]);
    }

    #[test]
    fn test_counting_stops_at_parent_close() {
        let text = "<root><p><x/></p><p><x/><x/></p></root>";
        assert_eq!(index_at(text, nth(text, "<x/>", 2), &SkipSet::new()), vec![1, 2, 2]);
    }

    #[test]
    fn test_unmatched_close_does_not_disturb_counts() {
        let text = "<root><a/></X><a/></root>";
        assert_eq!(index_at(text, nth(text, "<a/>", 1), &SkipSet::new()), vec![1, 2]);
    }

    #[test]
    fn test_skipped_elements_are_not_counted() {
        let text = "<root><item/><item/></root>";
        let skip: SkipSet = ["item"].into_iter().collect();
        let path = resolve_path(text, nth(text, "<item/>", 1));
        assert_eq!(sibling_index(text, &path, 1, &skip), 1);
        assert_eq!(sibling_index(text, &path, 1, &SkipSet::new()), 2);
    }

    #[test]
    fn test_root_and_out_of_range() {
        let text = "<root><a/></root>";
        let path = resolve_path(text, 7);
        assert_eq!(sibling_index(text, &path, 0, &SkipSet::new()), 1);
        assert_eq!(sibling_index(text, &path, 9, &SkipSet::new()), 1);
        assert_eq!(sibling_index(text, &[], 1, &SkipSet::new()), 1);
    }

    #[test]
    fn test_indexes_always_positive() {
        let text = "<a><b><c/><c/></b><b><c/></b></a>";
        for offset in 0..=text.len() {
            assert!(index_at(text, offset, &SkipSet::new()).iter().all(|&i| i >= 1));
        }
    }
}
