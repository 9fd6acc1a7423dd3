//! `!` comment and `! Key: value` metadata lines

use crate::types::{Comment, Line, Metadata, METADATA_KEYS};

use super::{is_word_char, leading_len};

pub(super) fn parse_comment(text: &str) -> Line {
    match parse_metadata(text) {
        Some(metadata) => Line::Metadata(metadata),
        None => Line::Comment(Comment {
            text: text[1..].trim().to_string(),
        }),
    }
}

/// `!`, spaces, key, spaces, `:`, spaces, value. Only known keys are metadata.
fn parse_metadata(text: &str) -> Option<Metadata> {
    let rest = text.strip_prefix('!')?.trim_start();

    let key_len = leading_len(rest, is_word_char);
    if key_len == 0 {
        return None;
    }
    let (key, rest) = rest.split_at(key_len);
    if !METADATA_KEYS.contains(&key) {
        return None;
    }

    let value = rest.trim_start().strip_prefix(':')?.trim_start();

    Some(Metadata {
        key: key.to_string(),
        value: value.to_string(),
    })
}
