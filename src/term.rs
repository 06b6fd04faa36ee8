//! Elixir Term Conversion Utilities
//!
//! Converts tags, segments and query results to Elixir terms.

use rustler::{Encoder, Env, NewBinary, Term};

use crate::core::{TagKind, TagOccurrence};
use crate::error::QueryError;
use crate::path::PathSegment;
use crate::xpath::{Location, ParsedSegment};

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    ok,
    error,
    open,
    close,
    self_closing,
}

/// `{:ok, value}`
pub fn ok_tuple<'a>(env: Env<'a>, value: Term<'a>) -> Term<'a> {
    (ok(), value).encode(env)
}

/// `{:error, message}`
pub fn error_to_term<'a>(env: Env<'a>, err: &QueryError) -> Term<'a> {
    (error(), str_to_binary(env, &err.to_string())).encode(env)
}

fn kind_atom(kind: TagKind) -> rustler::Atom {
    match kind {
        TagKind::Open => open(),
        TagKind::Close => close(),
        TagKind::SelfClosing => self_closing(),
    }
}

/// Convert tag occurrences to a list of
/// `{kind, name, [{attr, value}], offset, line, column}`
pub fn tags_to_term<'a>(env: Env<'a>, tags: &[TagOccurrence<'_>]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for tag in tags.iter().rev() {
        let mut attrs = Term::list_new_empty(env);
        let entries: Vec<_> = tag.attributes.iter().collect();
        for (name, value) in entries.into_iter().rev() {
            let tuple = (str_to_binary(env, name), str_to_binary(env, value));
            attrs = attrs.list_prepend(tuple.encode(env));
        }
        let tag_term = (
            kind_atom(tag.kind),
            str_to_binary(env, tag.name),
            attrs,
            tag.offset,
            tag.line,
            tag.column,
        )
            .encode(env);
        list = list.list_prepend(tag_term);
    }
    list
}

/// Convert path segments to a list of `{tag, index, name | nil}`
pub fn segments_to_term<'a>(env: Env<'a>, segments: &[PathSegment]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for seg in segments.iter().rev() {
        let tuple = (
            str_to_binary(env, &seg.tag),
            seg.index,
            optional_binary(env, seg.name_attr.as_deref()),
        );
        list = list.list_prepend(tuple.encode(env));
    }
    list
}

/// Convert parsed XPath steps to a list of `{tag, index | nil, name | nil}`
pub fn parsed_segments_to_term<'a>(env: Env<'a>, segments: &[ParsedSegment]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for seg in segments.iter().rev() {
        let tuple = (
            str_to_binary(env, &seg.tag),
            seg.index.encode(env),
            optional_binary(env, seg.name.as_deref()),
        );
        list = list.list_prepend(tuple.encode(env));
    }
    list
}

/// Convert per-offset results to a list of binaries and nils
pub fn optional_strings_to_term<'a>(env: Env<'a>, results: &[Option<String>]) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for result in results.iter().rev() {
        list = list.list_prepend(optional_binary(env, result.as_deref()));
    }
    list
}

/// `{offset, line, column}`
pub fn location_to_term<'a>(env: Env<'a>, location: Location) -> Term<'a> {
    (location.offset, location.line, location.column).encode(env)
}

fn optional_binary<'a>(env: Env<'a>, value: Option<&str>) -> Term<'a> {
    match value {
        Some(s) => str_to_binary(env, s),
        None => rustler::types::atom::nil().encode(env),
    }
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    let bytes = s.as_bytes();
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
