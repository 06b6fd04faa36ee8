//! Query Orchestration
//!
//! Ties settings to the core for one document:
//! - forward: offsets to formatted XPaths (one or several cursors)
//! - reverse: an XPath to the position of its element
//!
//! Absent results become [`QueryError`] variants here; the layers below
//! only report absence.

use tracing::debug;

use crate::config::{MulticursorFormat, Settings};
use crate::error::{QueryError, QueryResult};
use crate::path::{compute_segments, resolve_path, PathSegment, SkipSet};
use crate::xpath::{find_in_text, format_segments, parse_xpath, Location, XPathFormat};

/// Settings, output format and skip set shared by the queries of one call
#[derive(Debug, Clone)]
pub struct QueryContext<'s> {
    settings: &'s Settings,
    format: XPathFormat,
    skip: SkipSet,
}

impl<'s> QueryContext<'s> {
    /// `format` falls back to the settings default. Fails when the format is
    /// disabled, or is custom with no template configured.
    pub fn new(settings: &'s Settings, format: Option<XPathFormat>, skip: SkipSet) -> QueryResult<Self> {
        let format = format.unwrap_or(settings.format);
        settings.ensure_enabled(format)?;
        if format == XPathFormat::Custom && settings.custom_format_templates.is_empty() {
            return Err(QueryError::MissingTemplate);
        }
        Ok(Self { settings, format, skip })
    }

    pub fn format(&self) -> XPathFormat {
        self.format
    }

    pub fn settings(&self) -> &Settings {
        self.settings
    }

    /// Segments of the element at `offset`, empty when there is none
    pub fn segments_at(&self, text: &str, offset: usize) -> Vec<PathSegment> {
        let path = resolve_path(text, offset);
        compute_segments(text, &path, &self.skip, &self.settings.name_attributes)
    }

    /// XPath of the element at `offset` in the context's format
    pub fn xpath_at(&self, text: &str, offset: usize) -> Option<String> {
        let path = resolve_path(text, offset);
        if path.is_empty() {
            return None;
        }
        let segments = compute_segments(text, &path, &self.skip, &self.settings.name_attributes);
        format_segments(&segments, self.format, &self.settings.format_options())
    }

    /// XPaths for several cursors, joined per `multicursorFormat`.
    ///
    /// Offsets with no element, or whose every element is skipped, are
    /// dropped.
    pub fn xpaths_at(&self, text: &str, offsets: &[usize]) -> QueryResult<String> {
        let results: Vec<String> = offsets
            .iter()
            .filter_map(|&offset| self.xpath_at(text, offset))
            .filter(|xpath| !xpath.is_empty())
            .collect();
        debug!(cursors = offsets.len(), results = results.len(), format = %self.format, "computed XPaths");
        join_results(&results, self.settings.multicursor_format)
    }
}

/// Combine per-cursor results: one is returned as-is, several are joined
pub fn join_results(results: &[String], multicursor: MulticursorFormat) -> QueryResult<String> {
    match results {
        [] => Err(QueryError::NoResults),
        [single] => Ok(single.clone()),
        _ => match multicursor {
            MulticursorFormat::Lines => Ok(results.join("\n")),
            MulticursorFormat::Json => serde_json::to_string_pretty(results).map_err(QueryError::Encode),
        },
    }
}

/// Raw segments of the element at `offset`.
///
/// Independent of any output format, so `enableFormats` does not apply.
pub fn segments_at(text: &str, offset: usize, settings: &Settings, skip: &SkipSet) -> QueryResult<Vec<PathSegment>> {
    let path = resolve_path(text, offset);
    if path.is_empty() {
        return Err(QueryError::NoElement);
    }
    Ok(compute_segments(text, &path, skip, &settings.name_attributes))
}

/// Position of the element `xpath` addresses in `text`
pub fn locate(text: &str, xpath: &str, settings: &Settings) -> QueryResult<Location> {
    let parsed = parse_xpath(xpath);
    if parsed.is_empty() {
        return Err(QueryError::InvalidXPath);
    }
    find_in_text(text, &parsed, &settings.name_attributes).ok_or(QueryError::NotFound)
}
