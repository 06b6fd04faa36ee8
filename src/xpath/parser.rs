//! XPath Parser
//!
//! Parses the simple location paths produced by the formatters back into
//! step descriptors. Only three step shapes are understood:
//!
//! ```text
//! Tag[@name='value']   Tag[@name="value"]   -> tag + name
//! Tag[N]                                    -> tag + index
//! anything else                             -> tag (the whole step)
//! ```
//!
//! Inside a quoted name, a doubled quote stands for one quote character.

/// One step of a parsed XPath
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSegment {
    pub tag: String,
    /// Required 1-based sibling index
    pub index: Option<usize>,
    /// Required name attribute value
    pub name: Option<String>,
}

impl ParsedSegment {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn indexed(tag: impl Into<String>, index: usize) -> Self {
        Self {
            tag: tag.into(),
            index: Some(index),
            name: None,
        }
    }

    pub fn named(tag: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            index: None,
            name: Some(name.into()),
        }
    }
}

/// Parse an XPath string into its steps.
///
/// Surrounding whitespace and a leading `/` are ignored and empty steps are
/// dropped, so an empty or all-slash input yields an empty list.
pub fn parse_xpath(xpath: &str) -> Vec<ParsedSegment> {
    let trimmed = xpath.trim();
    let body = trimmed.strip_prefix('/').unwrap_or(trimmed);

    body.split('/')
        .filter(|step| !step.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(step: &str) -> ParsedSegment {
    if let Some((tag, name)) = parse_name_predicate(step) {
        return ParsedSegment::named(tag, name);
    }
    if let Some((tag, index)) = parse_index_predicate(step) {
        return ParsedSegment::indexed(tag, index);
    }
    ParsedSegment::tag(step)
}

/// Split `Tag[inner]` into `("Tag", "inner")`
fn split_predicate(step: &str) -> Option<(&str, &str)> {
    let open = step.find('[')?;
    let tag = &step[..open];
    if tag.is_empty() {
        return None;
    }
    let inner = step[open + 1..].strip_suffix(']')?;
    Some((tag, inner))
}

/// `Tag[ @name = 'value' ]`, with `name` matched case-insensitively
fn parse_name_predicate(step: &str) -> Option<(&str, String)> {
    let (tag, inner) = split_predicate(step)?;

    let rest = inner.trim_start().strip_prefix('@')?;
    let keyword = rest.get(..4)?;
    if !keyword.eq_ignore_ascii_case("name") {
        return None;
    }
    let rest = rest[4..].trim_start().strip_prefix('=')?.trim_start();

    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let (value, tail) = read_quoted(&rest[1..], quote)?;
    if value.is_empty() || !tail.trim().is_empty() {
        return None;
    }
    Some((tag, value))
}

/// Read up to the closing `quote`, unescaping doubled quotes.
///
/// Returns the value and the text after the closing quote.
fn read_quoted(input: &str, quote: char) -> Option<(String, &str)> {
    let mut value = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != quote {
            value.push(c);
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next == quote) {
            chars.next();
            value.push(quote);
            continue;
        }
        return Some((value, &input[i + c.len_utf8()..]));
    }
    None
}

/// `Tag[N]` with N a decimal integer
fn parse_index_predicate(step: &str) -> Option<(&str, usize)> {
    let (tag, inner) = split_predicate(step)?;
    if inner.is_empty() || !inner.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((tag, inner.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_steps() {
        assert_eq!(
            parse_xpath("/Project/EntityDefs/EntityDef[2]/Attributes/Attribute[@name='Foo']"),
            vec![
                ParsedSegment::tag("Project"),
                ParsedSegment::tag("EntityDefs"),
                ParsedSegment::indexed("EntityDef", 2),
                ParsedSegment::tag("Attributes"),
                ParsedSegment::named("Attribute", "Foo"),
            ]
        );
    }

    #[test]
    fn test_leading_slash_and_whitespace() {
        assert_eq!(parse_xpath("  a/b[1] "), vec![ParsedSegment::tag("a"), ParsedSegment::indexed("b", 1)]);
        assert_eq!(parse_xpath("//a//b"), vec![ParsedSegment::tag("a"), ParsedSegment::tag("b")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_xpath("").is_empty());
        assert!(parse_xpath("   ").is_empty());
        assert!(parse_xpath("/").is_empty());
        assert!(parse_xpath("///").is_empty());
    }

    #[test]
    fn test_name_predicate_variants() {
        assert_eq!(parse_xpath("x[@name=\"Bar\"]"), vec![ParsedSegment::named("x", "Bar")]);
        assert_eq!(parse_xpath("x[ @NAME = 'Bar' ]"), vec![ParsedSegment::named("x", "Bar")]);
        assert_eq!(parse_xpath("x[@name='O''Brien']"), vec![ParsedSegment::named("x", "O'Brien")]);
        assert_eq!(parse_xpath("x[@name=\"it's\"]"), vec![ParsedSegment::named("x", "it's")]);
        assert_eq!(parse_xpath("xs:element[@name='a]b']"), vec![ParsedSegment::named("xs:element", "a]b")]);
    }

    #[test]
    fn test_malformed_predicates_keep_whole_step() {
        for step in ["x[@name='']", "x[@name=Bar]", "x[@id='1']", "x[1", "x[-1]", "x[]", "[1]", "x[1]y", "x[@name='a' b]"] {
            assert_eq!(parse_xpath(step), vec![ParsedSegment::tag(step)], "step {step}");
        }
    }

    #[test]
    fn test_index_overflow_keeps_whole_step() {
        let step = "x[99999999999999999999999999]";
        assert_eq!(parse_xpath(step), vec![ParsedSegment::tag(step)]);
    }

    #[test]
    fn test_full_format_output_parses() {
        assert_eq!(
            parse_xpath("/Project[1]/EntityDefs[1]/EntityDef[1]/Attributes[1]/Attribute[2]"),
            vec![
                ParsedSegment::indexed("Project", 1),
                ParsedSegment::indexed("EntityDefs", 1),
                ParsedSegment::indexed("EntityDef", 1),
                ParsedSegment::indexed("Attributes", 1),
                ParsedSegment::indexed("Attribute", 2),
            ]
        );
    }
}
