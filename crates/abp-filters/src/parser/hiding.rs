//! Element hiding filters
//!
//! Two forms are recognized after the optional domain list:
//!
//! - `domains##selector` / `domains#@#selector` with a CSS selector
//! - `domains#tag(attr)(attr=value)...`, the legacy attribute syntax, which is
//!   converted to an equivalent CSS selector

use crate::error::ParseError;
use crate::types::HidingFilter;

use super::{is_name_char, leading_len};

/// Characters that can't appear in the domain list.
const DOMAIN_EXCLUDED: [char; 6] = ['/', '*', '|', '@', '"', '!'];

/// One `(name)` or `(name<op>value)` rule of a legacy hiding filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AttrRule<'a> {
    name: &'a str,
    /// Operator (`=`, `^=`, `*=` or `$=`) and value.
    constraint: Option<(&'a str, &'a str)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Body<'a> {
    Css(&'a str),
    Legacy { tag: &'a str, rules: Vec<AttrRule<'a>> },
}

/// Returns `None` if `text` isn't a hiding filter at all, in which case it is
/// parsed as a blocking filter instead.
pub(super) fn parse_hiding_filter(text: &str) -> Option<Result<HidingFilter, ParseError>> {
    for (pos, _) in text.match_indices('#') {
        let domain_list = &text[..pos];
        if domain_list.contains(DOMAIN_EXCLUDED) {
            // Every later `#` has this prefix too.
            return None;
        }

        let rest = &text[pos + 1..];
        let (is_exception, rest) = match rest.strip_prefix('@') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };

        let Some(body) = parse_body(rest) else {
            continue;
        };

        let selector = match body {
            Body::Css(selector) => selector.to_string(),
            Body::Legacy { tag, rules } => match legacy_selector(text, tag, &rules) {
                Ok(selector) => selector,
                Err(err) => return Some(Err(err)),
            },
        };

        return Some(Ok(HidingFilter {
            expression: text.to_string(),
            is_exception,
            selector,
            domains: domain_list
                .split(',')
                .filter(|domain| !domain.is_empty())
                .map(str::to_string)
                .collect(),
        }));
    }
    None
}

fn parse_body(text: &str) -> Option<Body<'_>> {
    if let Some(body) = parse_legacy(text) {
        return Some(body);
    }
    let selector = text.strip_prefix('#')?;
    if selector.is_empty() || selector.contains(['{', '}']) {
        return None;
    }
    Some(Body::Css(selector))
}

/// `tag` or `*`, followed by zero or more attribute rules, to the end of `text`.
fn parse_legacy(text: &str) -> Option<Body<'_>> {
    let tag_len = if text.starts_with('*') {
        1
    } else {
        leading_len(text, is_name_char)
    };
    if tag_len == 0 {
        return None;
    }
    let (tag, mut rest) = text.split_at(tag_len);

    let mut rules = Vec::new();
    while !rest.is_empty() {
        let (rule, next) = parse_attr_rule(rest)?;
        rules.push(rule);
        rest = next;
    }

    Some(Body::Legacy { tag, rules })
}

/// `(name)`, `(name=value)`, `(name^=value)`, `(name*=value)` or `(name$=value)`.
fn parse_attr_rule(text: &str) -> Option<(AttrRule<'_>, &str)> {
    let rest = text.strip_prefix('(')?;

    let name_len = leading_len(rest, is_name_char);
    if name_len == 0 {
        return None;
    }
    let (name, rest) = rest.split_at(name_len);

    if let Some(rest) = rest.strip_prefix(')') {
        return Some((AttrRule { name, constraint: None }, rest));
    }

    let op_len = match rest.as_bytes() {
        [b'=', ..] => 1,
        [b'^' | b'*' | b'$', b'=', ..] => 2,
        _ => return None,
    };
    let (op, rest) = rest.split_at(op_len);

    let value_len = leading_len(rest, |c| !matches!(c, '(' | ')' | '"'));
    let (value, rest) = rest.split_at(value_len);
    let rest = rest.strip_prefix(')')?;

    Some((
        AttrRule {
            name,
            constraint: Some((op, value)),
        },
        rest,
    ))
}

/// Convert a legacy filter to a CSS selector.
///
/// A bare `(name)` rule matches an element whose class or id is `name`, so
/// it produces two alternatives. At most one bare rule is allowed.
fn legacy_selector(text: &str, tag: &str, rules: &[AttrRule<'_>]) -> Result<String, ParseError> {
    let tag = if tag == "*" { "" } else { tag };

    let mut constraints = String::new();
    let mut class_or_id = None;

    for rule in rules {
        match rule.constraint {
            Some((op, value)) => constraints.push_str(&format!("[{}{}\"{}\"]", rule.name, op, value)),
            None if class_or_id.is_some() => {
                return Err(ParseError::DuplicateIdentifier { text: text.to_string() });
            }
            None => class_or_id = Some(rule.name),
        }
    }

    if let Some(id) = class_or_id {
        return Ok(format!("{tag}.{id}{constraints},{tag}#{id}{constraints}"));
    }
    if tag.is_empty() && constraints.is_empty() {
        return Err(ParseError::MatchesEverything { text: text.to_string() });
    }
    Ok(format!("{tag}{constraints}"))
}
