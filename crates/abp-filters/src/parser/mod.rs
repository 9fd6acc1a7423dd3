//! Line classification and extraction
//!
//! A line is trimmed and routed by its first and last characters:
//!
//! - empty: [`Line::EmptyLine`]
//! - `!...`: comment or metadata
//! - `%...%`: instruction (only `%include ...%` is known)
//! - `[...]`: header
//! - anything else: blocking or hiding filter
//!
//! Every record produced here is checked to render back to its input.

mod comment;
mod filter;
mod header;
mod hiding;
mod instruction;

use log::{debug, error, trace};

use crate::error::ParseError;
use crate::types::Line;

/// Route taken by a trimmed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Empty,
    Comment,
    Instruction,
    Header,
    Filter,
}

fn classify(content: &str) -> Route {
    if content.is_empty() {
        Route::Empty
    } else if content.starts_with('!') {
        Route::Comment
    } else if content.starts_with('%') && content.ends_with('%') {
        Route::Instruction
    } else if content.starts_with('[') && content.ends_with(']') {
        Route::Header
    } else {
        Route::Filter
    }
}

/// Parse one line of a filter list.
///
/// Leading and trailing whitespace is ignored. Filter records keep the
/// trimmed text as their `expression`.
pub fn parse_line(line_text: &str) -> Result<Line, ParseError> {
    let content = line_text.trim();
    let route = classify(content);
    trace!("classified {:?} as {:?}", content, route);

    let parsed = match route {
        Route::Empty => Ok(Line::EmptyLine),
        Route::Comment => Ok(comment::parse_comment(content)),
        Route::Instruction => instruction::parse_instruction(content),
        Route::Header => header::parse_header(content),
        Route::Filter => filter::parse_filter(content),
    };

    let line = match parsed {
        Ok(line) => line,
        Err(err) => {
            debug!("{err}");
            return Err(err);
        }
    };

    verify_round_trip(content, &line)?;
    Ok(line)
}

/// Check that `line` renders back to `content`, ignoring whitespace.
fn verify_round_trip(content: &str, line: &Line) -> Result<(), ParseError> {
    let rendered = line.render();
    let matches = strip_whitespace(&rendered) == strip_whitespace(content);
    if !matches {
        error!("round-trip mismatch: {:?} rendered as {:?}", content, rendered);
    }
    debug_assert!(matches, "{content:?} rendered as {rendered:?}");
    if matches {
        return Ok(());
    }

    Err(ParseError::InternalConsistency {
        text: content.to_string(),
        rendered,
    })
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `\w` in filter grammars: Unicode alphanumerics and underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Word characters plus `-`, used for option, tag and attribute names.
fn is_name_char(c: char) -> bool {
    is_word_char(c) || c == '-'
}

/// Length in bytes of the leading run of `text` matching `pred`.
fn leading_len(text: &str, pred: impl Fn(char) -> bool) -> usize {
    text.find(|c: char| !pred(c)).unwrap_or(text.len())
}

/// Strip an ASCII case-insensitive prefix.
fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}
