//! `[Adblock Plus x.y]` header lines

use crate::error::ParseError;
use crate::types::{Header, Line};

use super::strip_prefix_ignore_case;

pub(super) fn parse_header(text: &str) -> Result<Line, ParseError> {
    let inner = &text[1..text.len() - 1];
    if !is_header_version(inner) {
        return Err(ParseError::MalformedHeader { text: text.to_string() });
    }
    Ok(Line::Header(Header {
        version: inner.to_string(),
    }))
}

/// `Adblock` or `Adblock Plus <digits and dots>`, case-insensitive.
fn is_header_version(inner: &str) -> bool {
    let Some(rest) = strip_prefix_ignore_case(inner, "adblock") else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }

    let Some(rest) = strip_prefix_ignore_case(rest.trim_start(), "plus") else {
        return false;
    };
    let version = rest.trim_start();
    !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit() || b == b'.')
}
