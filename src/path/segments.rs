//! Path segments
//!
//! Turns a resolved element path into the `(tag, index, name)` segments the
//! formatters render, applying element skipping and name-attribute lookup.

use std::collections::HashSet;

use tracing::debug;

use super::element::ElementNode;
use super::sibling::sibling_index;

/// One rendered step of an XPath
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSegment {
    pub tag: String,
    /// 1-based index among same-named siblings
    pub index: usize,
    /// Value of the first configured name attribute that is present and non-blank
    pub name_attr: Option<String>,
}

impl PathSegment {
    pub fn new(tag: impl Into<String>, index: usize) -> Self {
        Self {
            tag: tag.into(),
            index: index.max(1),
            name_attr: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_attr = Some(name.into());
        self
    }
}

/// Tag names excluded from path output and sibling counts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet(HashSet<String>);

impl SkipSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.0.insert(name.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SkipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for SkipSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Build segments for every element of `path` not named in `skip`.
///
/// `name_attributes` lists the attributes to try, in order, for each
/// segment's name; an empty list means no segment carries a name.
pub fn compute_segments<S: AsRef<str>>(
    text: &str,
    path: &[ElementNode<'_>],
    skip: &SkipSet,
    name_attributes: &[S],
) -> Vec<PathSegment> {
    let segments: Vec<PathSegment> = path
        .iter()
        .enumerate()
        .filter(|(_, element)| !skip.contains(element.name))
        .map(|(i, element)| PathSegment {
            tag: element.name.to_string(),
            index: sibling_index(text, path, i, skip),
            name_attr: element
                .attributes
                .first_non_blank(name_attributes)
                .map(str::to_string),
        })
        .collect();

    debug!(
        elements = path.len(),
        segments = segments.len(),
        skipped = path.len() - segments.len(),
        "computed path segments"
    );
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::resolver::resolve_path;

    const XSD: &str = r#"<xs:schema>
  <xs:complexType name="Order">
    <xs:sequence>
      <xs:element name="id"/>
      <xs:element name="total"/>
    </xs:sequence>
  </xs:complexType>
</xs:schema>"#;

    #[test]
    fn test_segments_with_names() {
        let offset = XSD.find("total").unwrap();
        let path = resolve_path(XSD, offset);
        let segments = compute_segments(XSD, &path, &SkipSet::new(), &["name"]);
        assert_eq!(
            segments,
            vec![
                PathSegment::new("xs:schema", 1),
                PathSegment::new("xs:complexType", 1).with_name("Order"),
                PathSegment::new("xs:sequence", 1),
                PathSegment::new("xs:element", 2).with_name("total"),
            ]
        );
    }

    #[test]
    fn test_skipped_elements_are_dropped() {
        let offset = XSD.find("total").unwrap();
        let path = resolve_path(XSD, offset);
        let skip: SkipSet = ["xs:sequence"].into_iter().collect();
        let segments = compute_segments(XSD, &path, &skip, &["name"]);
        let tags: Vec<_> = segments.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["xs:schema", "xs:complexType", "xs:element"]);
        assert_eq!(segments[2].index, 2);
    }

    #[test]
    fn test_name_attribute_order() {
        let text = r#"<root><item id="7" label="Seven" name=" "/></root>"#;
        let path = resolve_path(text, 8);
        let names = |attrs: &[&str]| compute_segments(text, &path, &SkipSet::new(), attrs)[1].name_attr.clone();
        assert_eq!(names(&["name", "label", "id"]), Some("Seven".to_string()));
        assert_eq!(names(&["id", "label"]), Some("7".to_string()));
        assert_eq!(names(&["name"]), None);
        assert_eq!(names(&[]), None);
    }

    #[test]
    fn test_skip_set_collects_and_extends() {
        let mut skip: SkipSet = vec!["a".to_string(), "b".to_string()].into_iter().collect();
        skip.extend(["b", "c"]);
        assert_eq!(skip.len(), 3);
        assert!(skip.contains("c"));
        assert!(!skip.contains("d"));
    }
}
