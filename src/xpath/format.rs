//! XPath Formatting
//!
//! Renders path segments in one of several notations:
//!
//! | Format        | Segment                                   | Joined by |
//! |---------------|-------------------------------------------|-----------|
//! | full          | `/tag[i]`                                 | nothing   |
//! | compact       | `/tag`, `[i]` only when i > 1             | nothing   |
//! | namesOnly     | `/tag`                                    | nothing   |
//! | namedFull     | `/tag[@name='n']`, else as full           | nothing   |
//! | namedCompact  | `/tag[@name='n']`, else as compact        | nothing   |
//! | breadcrumb    | `tag` or `tag (n)`                        | ` > `     |
//! | custom        | template with `${tag}` `${index}` `${name}` | nothing |

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::QueryError;
use crate::path::PathSegment;

/// Output notation for a computed path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum XPathFormat {
    #[default]
    Full,
    Compact,
    #[serde(alias = "names_only")]
    NamesOnly,
    #[serde(alias = "named_full")]
    NamedFull,
    #[serde(alias = "named_compact")]
    NamedCompact,
    Breadcrumb,
    Custom,
}

impl XPathFormat {
    pub const ALL: [XPathFormat; 7] = [
        XPathFormat::Full,
        XPathFormat::Compact,
        XPathFormat::NamesOnly,
        XPathFormat::NamedFull,
        XPathFormat::NamedCompact,
        XPathFormat::Breadcrumb,
        XPathFormat::Custom,
    ];

    /// Settings key of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            XPathFormat::Full => "full",
            XPathFormat::Compact => "compact",
            XPathFormat::NamesOnly => "namesOnly",
            XPathFormat::NamedFull => "namedFull",
            XPathFormat::NamedCompact => "namedCompact",
            XPathFormat::Breadcrumb => "breadcrumb",
            XPathFormat::Custom => "custom",
        }
    }
}

impl fmt::Display for XPathFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for XPathFormat {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.chars().filter(|c| *c != '_').collect();
        XPathFormat::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| QueryError::UnknownFormat(s.to_string()))
    }
}

/// Per-call formatting options
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions<'t> {
    /// Template for [`XPathFormat::Custom`]
    pub template: Option<&'t str>,
    /// Render only the name value for segments that carry one
    /// (named and breadcrumb formats)
    pub name_only: bool,
}

/// Render `segments` in `format`.
///
/// Returns `None` only for the custom format without a template.
pub fn format_segments(segments: &[PathSegment], format: XPathFormat, options: &FormatOptions<'_>) -> Option<String> {
    let name_only = options.name_only;
    let rendered: String = match format {
        XPathFormat::Full => segments.iter().map(full_step).collect(),
        XPathFormat::Compact => segments.iter().map(compact_step).collect(),
        XPathFormat::NamesOnly => segments.iter().map(|seg| format!("/{}", seg.tag)).collect(),
        XPathFormat::NamedFull => segments
            .iter()
            .map(|seg| named_step(seg, name_only).unwrap_or_else(|| full_step(seg)))
            .collect(),
        XPathFormat::NamedCompact => segments
            .iter()
            .map(|seg| named_step(seg, name_only).unwrap_or_else(|| compact_step(seg)))
            .collect(),
        XPathFormat::Breadcrumb => segments
            .iter()
            .map(|seg| match (&seg.name_attr, name_only) {
                (Some(name), true) => name.clone(),
                (Some(name), false) => format!("{} ({})", seg.tag, name),
                (None, _) => seg.tag.clone(),
            })
            .collect::<Vec<_>>()
            .join(" > "),
        XPathFormat::Custom => {
            let template = options.template?;
            segments.iter().map(|seg| apply_template(template, seg)).collect()
        }
    };
    Some(rendered)
}

fn full_step(seg: &PathSegment) -> String {
    format!("/{}[{}]", seg.tag, seg.index)
}

fn compact_step(seg: &PathSegment) -> String {
    if seg.index > 1 {
        format!("/{}[{}]", seg.tag, seg.index)
    } else {
        format!("/{}", seg.tag)
    }
}

fn named_step(seg: &PathSegment, name_only: bool) -> Option<String> {
    let name = seg.name_attr.as_deref()?;
    Some(if name_only {
        format!("/{}", name)
    } else {
        format!("/{}[@name='{}']", seg.tag, escape_literal(name))
    })
}

/// Double single quotes for use inside a `'...'` XPath literal
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Substitute `${tag}`, `${index}` and `${name}` in one pass.
///
/// Substituted values are not rescanned. Unknown placeholders are kept
/// verbatim; a missing name becomes the empty string.
fn apply_template(template: &str, seg: &PathSegment) -> String {
    let mut out = String::with_capacity(template.len() + seg.tag.len());
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(close) = after.find('}') else {
            rest = &rest[start..];
            break;
        };
        // A `${` left open before another one is literal text.
        if let Some(inner) = after[..close].find("${") {
            out.push_str("${");
            out.push_str(&after[..inner]);
            rest = &after[inner..];
            continue;
        }
        match &after[..close] {
            "tag" => out.push_str(&seg.tag),
            "index" => out.push_str(&seg.index.to_string()),
            "name" => out.push_str(seg.name_attr.as_deref().unwrap_or("")),
            other => {
                out.push_str("${");
                out.push_str(other);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
