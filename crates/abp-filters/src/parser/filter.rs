//! Filter dispatch and blocking filters

use std::collections::BTreeMap;

use crate::types::{BlockingFilter, Line, OptionValue};

use super::hiding::parse_hiding_filter;
use super::{is_name_char, leading_len};
use crate::error::ParseError;

/// Options whose values are `|` separated lists.
const LIST_OPTIONS: [&str; 2] = ["domain", "sitekey"];

pub(super) fn parse_filter(text: &str) -> Result<Line, ParseError> {
    if text.contains('#') {
        if let Some(result) = parse_hiding_filter(text) {
            return result.map(Line::HidingFilter);
        }
    }
    Ok(Line::BlockingFilter(parse_blocking_filter(text)))
}

fn parse_blocking_filter(expression: &str) -> BlockingFilter {
    let (is_exception, text) = match expression.strip_prefix("@@") {
        Some(rest) => (true, rest),
        None => (false, expression),
    };

    let (pattern, options) = match split_options(text) {
        Some((pattern, options_text)) => (pattern, parse_options(options_text)),
        None => (text, BTreeMap::new()),
    };

    BlockingFilter {
        expression: expression.to_string(),
        is_exception,
        options,
        pattern: pattern.to_string(),
    }
}

/// Split at the leftmost `$` that is followed by a well-formed option list
/// running to the end of the text.
fn split_options(text: &str) -> Option<(&str, &str)> {
    text.match_indices('$')
        .map(|(pos, _)| (&text[..pos], &text[pos + 1..]))
        .find(|(_, options_text)| is_option_list(options_text))
}

/// `option(,option)*` where option is `~?name(=value)?`.
fn is_option_list(text: &str) -> bool {
    let mut rest = text;
    loop {
        rest = rest.strip_prefix('~').unwrap_or(rest);

        let name_len = leading_len(rest, is_name_char);
        if name_len == 0 {
            return false;
        }
        rest = &rest[name_len..];

        if let Some(value) = rest.strip_prefix('=') {
            let value_len = leading_len(value, |c| c != ',' && !c.is_whitespace());
            if value_len == 0 {
                return false;
            }
            rest = &value[value_len..];
        }

        match rest.strip_prefix(',') {
            Some(next) => rest = next,
            None => return rest.is_empty(),
        }
    }
}

/// Parse a comma separated option list. Later options overwrite earlier ones.
fn parse_options(text: &str) -> BTreeMap<String, OptionValue> {
    let mut options = BTreeMap::new();

    for option in text.split(',') {
        let (name, value) = if let Some((name, value)) = option.split_once('=') {
            (name, OptionValue::Value(value.to_string()))
        } else if let Some(name) = option.strip_prefix('~') {
            (name, OptionValue::Flag(false))
        } else {
            (option, OptionValue::Flag(true))
        };

        let value = if LIST_OPTIONS.contains(&name) {
            // A bare `domain` or `~domain` has no value; its token text is split.
            let raw = match &value {
                OptionValue::Value(raw) => raw.as_str(),
                _ => option,
            };
            OptionValue::List(raw.split('|').map(str::to_string).collect())
        } else {
            value
        };

        options.insert(name.to_string(), value);
    }

    options
}
