//! Core tag scanning primitives
//!
//! - Scanner: memchr-driven tag tokenizer and line/column tracking
//! - Attributes: tolerant attribute region parsing
//! - Tag: the tag occurrence data model

pub mod attributes;
pub mod scanner;
pub mod tag;

pub use attributes::Attributes;
pub use scanner::{scan_tags, scan_tags_from, LineIndex, TagScanner};
pub use tag::{TagKind, TagOccurrence};
