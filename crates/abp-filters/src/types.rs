//! Parsed line records
//!
//! Every line of a filter list parses into exactly one [`Line`] variant. Each
//! record can be rendered back to filter list text with [`Line::render`].

use std::collections::BTreeMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keys recognized in `! Key: value` comment lines.
pub const METADATA_KEYS: [&str; 6] = ["Homepage", "Title", "Expires", "Checksum", "Redirect", "Version"];

// =============================================================================
// Line kinds
// =============================================================================

/// Filter subtype of a [`LineKind::Filter`] line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Request blocking filter (`||example.com^$script`)
    Blocking,
    /// Element hiding filter (`example.com##.ad`)
    Hiding,
}

impl FilterType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Hiding => "hiding",
        }
    }
}

/// Discriminant of a parsed [`Line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Header,
    EmptyLine,
    Comment,
    Metadata,
    Include,
    Filter(FilterType),
}

impl LineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::EmptyLine => "emptyline",
            Self::Comment => "comment",
            Self::Metadata => "metadata",
            Self::Include => "include",
            Self::Filter(_) => "filter",
        }
    }

    pub fn filter_type(self) -> Option<FilterType> {
        match self {
            Self::Filter(filter_type) => Some(filter_type),
            _ => None,
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Filter(filter_type) => write!(f, "{} filter", filter_type.as_str()),
            other => f.write_str(other.as_str()),
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// `[Adblock Plus 2.0]`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Header {
    /// Text between the brackets, exactly as written.
    pub version: String,
}

/// `! free text`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Comment {
    pub text: String,
}

/// `! Title: My list`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Metadata {
    /// One of [`METADATA_KEYS`].
    pub key: String,
    pub value: String,
}

/// `%include other/list.txt%`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Include {
    pub target: String,
}

/// Value of a single `$option` on a blocking filter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OptionValue {
    /// `image` (true) or `~image` (false)
    Flag(bool),
    /// `csp=script-src 'none'`, `rewrite=abp-resource:blank-js`
    Value(String),
    /// `domain=a.com|~b.com`, `sitekey=abc|def`
    List(Vec<String>),
}

impl OptionValue {
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Request blocking filter, optionally an exception (`@@`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BlockingFilter {
    /// The filter text as it appeared in the list (trimmed).
    pub expression: String,
    pub is_exception: bool,
    pub options: BTreeMap<String, OptionValue>,
    /// Match pattern with the `@@` prefix and `$options` suffix removed.
    pub pattern: String,
}

/// Element hiding filter, optionally an exception (`#@#`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HidingFilter {
    /// The filter text as it appeared in the list (trimmed).
    pub expression: String,
    pub is_exception: bool,
    /// CSS selector; legacy `tag(attr=value)` rules are converted.
    pub selector: String,
    /// Domains the filter is scoped to, in list order. Empty means everywhere.
    pub domains: Vec<String>,
}

/// One parsed line of a filter list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Line {
    Header(Header),
    EmptyLine,
    Comment(Comment),
    Metadata(Metadata),
    Include(Include),
    BlockingFilter(BlockingFilter),
    HidingFilter(HidingFilter),
}

impl Line {
    pub fn kind(&self) -> LineKind {
        match self {
            Self::Header(_) => LineKind::Header,
            Self::EmptyLine => LineKind::EmptyLine,
            Self::Comment(_) => LineKind::Comment,
            Self::Metadata(_) => LineKind::Metadata,
            Self::Include(_) => LineKind::Include,
            Self::BlockingFilter(_) => LineKind::Filter(FilterType::Blocking),
            Self::HidingFilter(_) => LineKind::Filter(FilterType::Hiding),
        }
    }

    pub fn is_filter(&self) -> bool {
        matches!(self, Self::BlockingFilter(_) | Self::HidingFilter(_))
    }

    /// Render the record back to filter list text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

// =============================================================================
// Rendering
// =============================================================================

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.version)
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "! {}", self.text)
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "! {}: {}", self.key, self.value)
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "%include {}%", self.target)
    }
}

impl fmt::Display for BlockingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl fmt::Display for HidingFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(header) => fmt::Display::fmt(header, f),
            Self::EmptyLine => Ok(()),
            Self::Comment(comment) => fmt::Display::fmt(comment, f),
            Self::Metadata(metadata) => fmt::Display::fmt(metadata, f),
            Self::Include(include) => fmt::Display::fmt(include, f),
            Self::BlockingFilter(filter) => fmt::Display::fmt(filter, f),
            Self::HidingFilter(filter) => fmt::Display::fmt(filter, f),
        }
    }
}
