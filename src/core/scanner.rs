//! Tag stream scanning using memchr
//!
//! Turns raw markup into the ordered sequence of [`TagOccurrence`]s.
//! Recognition is lexical and tolerant:
//!
//! ```text
//! '<' ws* '/'? ws* Name (attribute region) '/'? '>'
//! ```
//!
//! Comments, CDATA, processing instructions and doctypes are not special
//! cased, so tag-like text inside them is reported like any other tag.
//! Each `<` is tried exactly once and a match always ends at the first
//! following `>`, which keeps the scan linear in the input length.

use memchr::{memchr, memchr_iter};

use super::attributes::{is_name_char, is_name_start_char, is_whitespace, parse_attributes};
use super::tag::{TagKind, TagOccurrence};

/// Byte cursor over the input with memchr-backed searches
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Skip whitespace characters
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && is_whitespace(self.input[self.pos]) {
            self.pos += 1;
        }
    }

    /// Advance while `pred` holds, returning the number of bytes consumed
    #[inline]
    pub fn skip_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.pos;
        while self.pos < self.input.len() && pred(self.input[self.pos]) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Find next '<' (tag start) using SIMD
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        if self.pos >= self.input.len() {
            return None;
        }
        memchr(b'<', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next '>' (tag end) using SIMD
    ///
    /// Quotes are not honored: a `>` inside an attribute value ends the tag.
    #[inline]
    pub fn find_tag_end(&self) -> Option<usize> {
        if self.pos >= self.input.len() {
            return None;
        }
        memchr(b'>', &self.input[self.pos..]).map(|i| self.pos + i)
    }
}

/// Incremental line/column tracking for monotonically increasing offsets
#[derive(Debug, Clone, Default)]
struct LineTracker {
    line: usize,
    line_start: usize,
    scanned: usize,
}

impl LineTracker {
    /// Line and column of `offset`, counting only newlines strictly before it
    fn locate(&mut self, input: &[u8], offset: usize) -> (usize, usize) {
        if offset > self.scanned {
            for nl in memchr_iter(b'\n', &input[self.scanned..offset]) {
                self.line += 1;
                self.line_start = self.scanned + nl + 1;
            }
            self.scanned = offset;
        }
        (self.line, offset - self.line_start)
    }
}

/// Iterator over the tags of a document, in document order
pub struct TagScanner<'a> {
    text: &'a str,
    scanner: Scanner<'a>,
    lines: LineTracker,
    done: bool,
}

impl<'a> TagScanner<'a> {
    /// Scan from the beginning of `text`
    pub fn new(text: &'a str) -> Self {
        Self::starting_at(text, 0)
    }

    /// Scan from byte offset `start`, reporting offsets and lines relative
    /// to the whole text
    pub fn starting_at(text: &'a str, start: usize) -> Self {
        let mut scanner = Scanner::new(text.as_bytes());
        scanner.set_position(start.min(text.len()));
        Self {
            text,
            scanner,
            lines: LineTracker::default(),
            done: false,
        }
    }

    /// Try to read a tag whose `<` sits at `lt`.
    ///
    /// Returns `None` when no tag starts there; the caller resumes the search
    /// after `lt`. Sets `done` when no `>` remains, since no later tag can
    /// match either.
    fn read_tag(&mut self, lt: usize) -> Option<TagOccurrence<'a>> {
        let s = &mut self.scanner;
        s.set_position(lt + 1);
        s.skip_whitespace();

        let closing = s.peek() == Some(b'/');
        if closing {
            s.advance(1);
            s.skip_whitespace();
        }

        match s.peek() {
            Some(b) if is_name_start_char(b) => {}
            _ => return None,
        }
        let name_start = s.position();
        s.skip_while(is_name_char);
        let name_end = s.position();

        let Some(gt) = s.find_tag_end() else {
            self.done = true;
            return None;
        };

        let region = &self.text[name_end..gt];
        let (region, trailing_slash) = match region.strip_suffix('/') {
            Some(rest) => (rest, true),
            None => (region, false),
        };
        let attr_src = region.trim_matches(|c: char| c.is_ascii() && is_whitespace(c as u8));

        let kind = if closing {
            TagKind::Close
        } else if trailing_slash {
            TagKind::SelfClosing
        } else {
            TagKind::Open
        };

        let (line, column) = self.lines.locate(self.text.as_bytes(), lt);
        self.scanner.set_position(gt + 1);

        Some(TagOccurrence {
            name: &self.text[name_start..name_end],
            attributes: parse_attributes(attr_src),
            offset: lt,
            line,
            column,
            raw: &self.text[lt..=gt],
            kind,
        })
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = TagOccurrence<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let Some(lt) = self.scanner.find_tag_start() else {
                self.done = true;
                break;
            };
            if let Some(tag) = self.read_tag(lt) {
                return Some(tag);
            }
            if !self.done {
                self.scanner.set_position(lt + 1);
            }
        }
        None
    }
}

/// Scan every tag in `text`
pub fn scan_tags(text: &str) -> Vec<TagOccurrence<'_>> {
    TagScanner::new(text).collect()
}

/// Scan the tags at or after byte offset `start`
pub fn scan_tags_from(text: &str, start: usize) -> TagScanner<'_> {
    TagScanner::starting_at(text, start)
}

/// Random-access conversion between byte offsets and (line, column)
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = Vec::with_capacity(64);
        line_starts.push(0);
        line_starts.extend(memchr_iter(b'\n', text.as_bytes()).map(|nl| nl + 1));
        Self {
            line_starts,
            len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Zero-based (line, column) of a byte offset, clamped to the text
    pub fn location(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        (line, offset - self.line_starts[line])
    }

    /// Byte offset of a zero-based (line, column).
    ///
    /// Lines past the end map to the end of the text; columns past the end
    /// of a line clamp to the line's last position before its newline.
    pub fn offset_at(&self, line: usize, column: usize) -> usize {
        let Some(&start) = self.line_starts.get(line) else {
            return self.len;
        };
        let line_end = match self.line_starts.get(line + 1) {
            Some(&next) => next - 1,
            None => self.len,
        };
        start.saturating_add(column).min(line_end)
    }
}
