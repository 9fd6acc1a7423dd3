//! `%instruction%` lines

use crate::error::ParseError;
use crate::types::{Include, Line};

pub(super) fn parse_instruction(text: &str) -> Result<Line, ParseError> {
    match parse_include_target(text) {
        Some(target) => Ok(Line::Include(Include {
            target: target.to_string(),
        })),
        None => Err(ParseError::UnrecognizedInstruction { text: text.to_string() }),
    }
}

/// `%include <target>%`; at least one whitespace character after `include`,
/// then a non-empty target.
fn parse_include_target(text: &str) -> Option<&str> {
    let body = text.strip_prefix("%include")?.strip_suffix('%')?;
    if !body.starts_with(char::is_whitespace) {
        return None;
    }
    let target = body.trim_start();
    if !target.is_empty() {
        return Some(target);
    }

    // All whitespace: the separator takes all but the last character.
    let (last, _) = body.char_indices().last()?;
    if last == 0 {
        return None;
    }
    Some(&body[last..])
}
