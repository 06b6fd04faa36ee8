//! XPath Surface
//!
//! Both directions between element paths and XPath text:
//! - Format: segments to one of the supported notations
//! - Parser: simple location paths back to step descriptors
//! - Matcher: step descriptors to the element's position in a document

pub mod format;
pub mod matcher;
pub mod parser;

pub use format::{escape_literal, format_segments, FormatOptions, XPathFormat};
pub use matcher::{find_element, find_in_text, Location};
pub use parser::{parse_xpath, ParsedSegment};
