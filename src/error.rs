//! Query errors
//!
//! The scanning and matching core reports absence with `Option` and empty
//! paths. Query orchestration turns those into these variants so the host
//! can show a message.

use thiserror::Error;

use crate::xpath::XPathFormat;

#[derive(Debug, Error)]
pub enum QueryError {
    /// No element encloses the requested offset
    #[error("unable to compute XPath for the current selection")]
    NoElement,

    /// None of several offsets produced a path
    #[error("unable to compute XPath for any selection")]
    NoResults,

    #[error("invalid or empty XPath")]
    InvalidXPath,

    #[error("no element matching the specified XPath was found")]
    NotFound,

    #[error("no custom format template configured")]
    MissingTemplate,

    #[error("XPath format '{0}' is disabled")]
    FormatDisabled(XPathFormat),

    #[error("unknown XPath format: {0}")]
    UnknownFormat(String),

    #[error("invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// Serializing multi-cursor output failed
    #[error("failed to encode results: {0}")]
    Encode(serde_json::Error),

    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

pub type QueryResult<T> = Result<T, QueryError>;
