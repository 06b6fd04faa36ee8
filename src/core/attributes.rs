//! Attribute Extraction
//!
//! Parses the attribute region of a tag (the text between the element name
//! and `>` / `/>`) into an ordered name -> value mapping.
//!
//! Parsing is tolerant: values may be double-quoted, single-quoted or bare,
//! a missing value is the empty string, and fragments that do not form a
//! `name = value` pair are skipped without error. Entities are not decoded.

/// Ordered attribute mapping borrowed from the source text
///
/// Insertion order is kept; a repeated name overwrites the earlier value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes<'a> {
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Attributes<'a> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Set `name` to `value`, replacing any earlier value
    pub fn insert(&mut self, name: &'a str, value: &'a str) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get the value of an attribute by exact name
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.entries.iter().copied()
    }

    /// First candidate attribute holding a non-blank value
    ///
    /// Candidates are consulted in order. Values consisting only of
    /// whitespace count as absent.
    pub fn first_non_blank<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&'a str> {
        candidates
            .iter()
            .filter_map(|name| self.get(name.as_ref()))
            .find(|value| !value.trim().is_empty())
    }
}

/// Parse attributes from the raw attribute region of a tag
pub fn parse_attributes(input: &str) -> Attributes<'_> {
    let bytes = input.as_bytes();
    let mut attrs = Attributes::new();
    let mut pos = 0;

    while pos < bytes.len() {
        if !is_name_start_char(bytes[pos]) {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < bytes.len() && is_name_char(bytes[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        // A failed pair resumes at `pos`: every name starting inside the one
        // just read would end at the same place and fail the same way.
        let mut cursor = skip_whitespace(bytes, pos);
        if cursor >= bytes.len() || bytes[cursor] != b'=' {
            continue;
        }
        cursor = skip_whitespace(bytes, cursor + 1);

        let (value, next) = read_value(input, cursor);
        attrs.insert(name, value);
        pos = next;
    }

    attrs
}

/// Read a quoted or bare value starting at `pos`.
///
/// Returns the value and the position after it. An unterminated quote falls
/// back to a bare value that includes the quote character.
fn read_value(input: &str, pos: usize) -> (&str, usize) {
    let bytes = input.as_bytes();

    if let Some(&quote) = bytes.get(pos) {
        if quote == b'"' || quote == b'\'' {
            if let Some(len) = memchr::memchr(quote, &bytes[pos + 1..]) {
                let value_start = pos + 1;
                let value_end = value_start + len;
                return (&input[value_start..value_end], value_end + 1);
            }
        }
    }

    let mut end = pos;
    while end < bytes.len() && !is_whitespace(bytes[end]) && bytes[end] != b'>' {
        end += 1;
    }
    (&input[pos..end], end)
}

#[inline]
fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_whitespace(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Check if byte can start a name
#[inline]
pub(crate) fn is_name_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_')
}

/// Check if byte is valid inside a name
#[inline]
pub(crate) fn is_name_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b':')
}

/// Check if byte is whitespace
#[inline]
pub(crate) fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0B' | b'\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_attributes() {
        let attrs = parse_attributes("id=\"test\" class=\"foo\"");
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("id"), Some("test"));
        assert_eq!(attrs.get("class"), Some("foo"));
    }

    #[test]
    fn test_single_quoted() {
        let attrs = parse_attributes("id='it \"works\"'");
        assert_eq!(attrs.get("id"), Some("it \"works\""));
    }

    #[test]
    fn test_bare_and_missing_values() {
        let attrs = parse_attributes("width=100 height= depth=3");
        assert_eq!(attrs.get("width"), Some("100"));
        // Whitespace after `=` is skipped, so the next fragment is the value.
        assert_eq!(attrs.get("height"), Some("depth=3"));
        assert_eq!(attrs.get("depth"), None);

        assert_eq!(parse_attributes("a=").get("a"), Some(""));
        assert_eq!(parse_attributes("id=\"x\" a=  ").get("a"), Some(""));
        assert_eq!(parse_attributes("a=>").get("a"), Some(""));
    }

    #[test]
    fn test_whitespace_around_equals() {
        let attrs = parse_attributes("  id  =  \"test\"  ");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("id"), Some("test"));
    }

    #[test]
    fn test_boolean_fragments_skipped() {
        let attrs = parse_attributes("disabled name=\"x\" checked");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("name"), Some("x"));
        assert_eq!(attrs.get("disabled"), None);
    }

    #[test]
    fn test_last_duplicate_wins_keeps_order() {
        let attrs = parse_attributes("a=\"1\" b=\"2\" a=\"3\"");
        let pairs: Vec<_> = attrs.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_namespaced_names() {
        let attrs = parse_attributes("xmlns:xs=\"http://www.w3.org/2001/XMLSchema\" xml.lang=en");
        assert_eq!(attrs.get("xmlns:xs"), Some("http://www.w3.org/2001/XMLSchema"));
        assert_eq!(attrs.get("xml.lang"), Some("en"));
    }

    #[test]
    fn test_unterminated_quote_is_bare() {
        let attrs = parse_attributes("title=\"open ended");
        assert_eq!(attrs.get("title"), Some("\"open"));
    }

    #[test]
    fn test_name_after_garbage() {
        let attrs = parse_attributes("9lives=\"no\" ==  $ok='yes'");
        assert_eq!(attrs.get("lives"), Some("no"));
        assert_eq!(attrs.get("ok"), Some("yes"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_attributes("").is_empty());
    }

    #[test]
    fn test_first_non_blank() {
        let attrs = parse_attributes("name=\"\" id=\"  \" label=\"MyLabel\" key=\"k\"");
        assert_eq!(attrs.first_non_blank(&["name", "id", "label"]), Some("MyLabel"));
        assert_eq!(attrs.first_non_blank(&["key", "label"]), Some("k"));
        assert_eq!(attrs.first_non_blank(&["missing"]), None);
        assert_eq!(attrs.first_non_blank::<&str>(&[]), None);
    }
}
