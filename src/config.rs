//! Query settings
//!
//! Loaded from the JSON document the host passes with each call. Every key
//! is optional.

use std::collections::HashMap;
use std::path::Path;

use glob::Pattern;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{QueryError, QueryResult};
use crate::path::SkipSet;
use crate::xpath::{FormatOptions, XPathFormat};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Format used when a call does not name one
    pub format: XPathFormat,
    /// Templates for the custom format; only the first is used
    pub custom_format_templates: Vec<String>,
    /// Attributes tried in order for a segment's name
    pub name_attributes: Vec<String>,
    pub name_only: bool,
    pub enable_element_skipping: bool,
    pub skip_rules: Vec<SkipRule>,
    /// Formats mapped to `false` are refused
    pub enable_formats: HashMap<String, bool>,
    pub multicursor_format: MulticursorFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: XPathFormat::default(),
            custom_format_templates: Vec::new(),
            name_attributes: vec!["name".to_string()],
            name_only: false,
            enable_element_skipping: false,
            skip_rules: Vec::new(),
            enable_formats: HashMap::new(),
            multicursor_format: MulticursorFormat::default(),
        }
    }
}

/// Tags to drop from paths for documents whose path matches `file_pattern`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkipRule {
    pub file_pattern: String,
    #[serde(default)]
    pub elements_to_skip: Vec<String>,
}

/// How the results of a several-offset query are joined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MulticursorFormat {
    /// One result per line
    #[default]
    Lines,
    /// Pretty-printed JSON array
    Json,
}

impl Settings {
    /// Parse settings JSON; blank input gives the defaults
    pub fn from_json(json: &str) -> QueryResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn format_options(&self) -> FormatOptions<'_> {
        FormatOptions {
            template: self.custom_format_templates.first().map(String::as_str),
            name_only: self.name_only,
        }
    }

    /// Refuse a format explicitly disabled in `enableFormats`.
    /// The custom format is always allowed.
    pub fn ensure_enabled(&self, format: XPathFormat) -> QueryResult<()> {
        if format != XPathFormat::Custom && self.enable_formats.get(format.as_str()) == Some(&false) {
            return Err(QueryError::FormatDisabled(format));
        }
        Ok(())
    }

    /// Tags to skip for the document at `document_path`.
    ///
    /// Empty unless skipping is enabled in settings or forced by the caller.
    /// Rules with an invalid pattern are ignored.
    pub fn skip_elements_for(&self, document_path: Option<&Path>, force: bool) -> SkipSet {
        let mut skip = SkipSet::new();
        if !(force || self.enable_element_skipping) {
            return skip;
        }
        let Some(path) = document_path else {
            return skip;
        };

        for rule in &self.skip_rules {
            match Pattern::new(&rule.file_pattern) {
                Ok(pattern) if pattern.matches_path(path) => {
                    skip.extend(rule.elements_to_skip.iter().map(String::as_str));
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(pattern = %rule.file_pattern, error = %err, "invalid skip rule file pattern");
                }
            }
        }

        debug!(path = %path.display(), skipped = skip.len(), "resolved skip set");
        skip
    }
}
