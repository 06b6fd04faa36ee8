//! RustyXPath - XPath computation for XML-like text
//!
//! Forward: a byte offset in a document to the XPath of the element there,
//! in one of several notations. Reverse: an XPath back to the position of
//! the element it names. Documents may be malformed; scanning is tolerant
//! and every operation is a pure function of its inputs.
//!
//! Layers:
//! - core: tag scanning, attributes, line/column index
//! - path: offset to element ancestry, sibling indexes, segments
//! - xpath: formatting, parsing and matching of XPath strings
//! - strategy: settings-driven queries, single, multi-cursor and parallel

use std::path::Path;

use rustler::{Binary, Encoder, Env, Term};

pub mod config;
pub mod core;
pub mod error;
pub mod path;
pub mod strategy;
mod term;
pub mod xpath;

use config::Settings;
use error::{QueryError, QueryResult};
use path::PathSegment;
use strategy::QueryContext;
use term::{
    error_to_term, location_to_term, ok_tuple, optional_strings_to_term, parsed_segments_to_term,
    segments_to_term, str_to_binary, tags_to_term,
};
use xpath::XPathFormat;

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Argument Decoding
// ============================================================================

fn decode_text<'b>(input: &'b Binary<'_>) -> QueryResult<&'b str> {
    Ok(std::str::from_utf8(input.as_slice())?)
}

fn decode_format(format: Option<&str>) -> QueryResult<Option<XPathFormat>> {
    format.map(str::parse::<XPathFormat>).transpose()
}

/// Encode `{:ok, term}` or `{:error, message}`
fn reply<'a>(env: Env<'a>, result: QueryResult<Term<'a>>) -> Term<'a> {
    match result {
        Ok(value) => ok_tuple(env, value),
        Err(err) => error_to_term(env, &err),
    }
}

// ============================================================================
// Tag Scanning
// ============================================================================

/// Scan a document into its tag occurrences
#[rustler::nif]
fn scan_tags<'a>(env: Env<'a>, input: Binary<'a>) -> Term<'a> {
    let result = decode_text(&input).map(|text| tags_to_term(env, &core::scan_tags(text)));
    reply(env, result)
}

/// Convert a zero-based (line, column) pair to a byte offset
#[rustler::nif]
fn offset_at<'a>(env: Env<'a>, input: Binary<'a>, line: usize, column: usize) -> Term<'a> {
    let result = decode_text(&input).map(|text| core::LineIndex::new(text).offset_at(line, column).encode(env));
    reply(env, result)
}

// ============================================================================
// Forward: Offset to XPath
// ============================================================================

/// XPaths at one or more offsets, joined per the multi-cursor setting
#[rustler::nif]
fn xpath_at<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    offsets: Vec<usize>,
    format: Option<&str>,
    settings_json: &str,
    document_path: Option<&str>,
    force_skipping: bool,
) -> Term<'a> {
    let result = joined_xpaths(&input, &offsets, format, settings_json, document_path, force_skipping)
        .map(|output| str_to_binary(env, &output));
    reply(env, result)
}

fn joined_xpaths(
    input: &Binary<'_>,
    offsets: &[usize],
    format: Option<&str>,
    settings_json: &str,
    document_path: Option<&str>,
    force_skipping: bool,
) -> QueryResult<String> {
    let text = decode_text(input)?;
    let settings = Settings::from_json(settings_json)?;
    let skip = settings.skip_elements_for(document_path.map(Path::new), force_skipping);
    let ctx = QueryContext::new(&settings, decode_format(format)?, skip)?;
    ctx.xpaths_at(text, offsets)
}

/// XPath per offset, computed across the Rayon pool; nil where none exists
#[rustler::nif(schedule = "DirtyCpu")]
fn xpath_at_parallel<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    offsets: Vec<usize>,
    format: Option<&str>,
    settings_json: &str,
    document_path: Option<&str>,
) -> Term<'a> {
    let result = parallel_xpaths(&input, &offsets, format, settings_json, document_path)
        .map(|results| optional_strings_to_term(env, &results));
    reply(env, result)
}

fn parallel_xpaths(
    input: &Binary<'_>,
    offsets: &[usize],
    format: Option<&str>,
    settings_json: &str,
    document_path: Option<&str>,
) -> QueryResult<Vec<Option<String>>> {
    let text = decode_text(input)?;
    let settings = Settings::from_json(settings_json)?;
    let skip = settings.skip_elements_for(document_path.map(Path::new), false);
    let ctx = QueryContext::new(&settings, decode_format(format)?, skip)?;
    Ok(strategy::xpaths_parallel(&ctx, text, offsets))
}

/// Raw `{tag, index, name}` segments at an offset
#[rustler::nif]
fn segments_at<'a>(
    env: Env<'a>,
    input: Binary<'a>,
    offset: usize,
    settings_json: &str,
    document_path: Option<&str>,
) -> Term<'a> {
    let result = segments_for(&input, offset, settings_json, document_path)
        .map(|segments| segments_to_term(env, &segments));
    reply(env, result)
}

fn segments_for(
    input: &Binary<'_>,
    offset: usize,
    settings_json: &str,
    document_path: Option<&str>,
) -> QueryResult<Vec<PathSegment>> {
    let text = decode_text(input)?;
    let settings = Settings::from_json(settings_json)?;
    let skip = settings.skip_elements_for(document_path.map(Path::new), false);
    strategy::segments_at(text, offset, &settings, &skip)
}

// ============================================================================
// Reverse: XPath to Position
// ============================================================================

/// Parse an XPath into `{tag, index, name}` steps
#[rustler::nif]
fn parse_xpath<'a>(env: Env<'a>, xpath: &str) -> Term<'a> {
    let parsed = xpath::parse_xpath(xpath);
    if parsed.is_empty() {
        return error_to_term(env, &QueryError::InvalidXPath);
    }
    ok_tuple(env, parsed_segments_to_term(env, &parsed))
}

/// Find the start tag of the element an XPath names
#[rustler::nif]
fn locate<'a>(env: Env<'a>, input: Binary<'a>, xpath: &str, settings_json: &str) -> Term<'a> {
    let result = decode_text(&input)
        .and_then(|text| strategy::locate(text, xpath, &Settings::from_json(settings_json)?))
        .map(|location| location_to_term(env, location));
    reply(env, result)
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.RustyXPath.Native");
