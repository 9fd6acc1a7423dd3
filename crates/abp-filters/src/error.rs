//! Parse errors

/// Error returned when a filter list line can't be parsed.
///
/// Every variant carries the offending (trimmed) line text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed header in \"{text}\"")]
    MalformedHeader { text: String },
    #[error("Unrecognized instruction in \"{text}\"")]
    UnrecognizedInstruction { text: String },
    #[error("Duplicate id in attribute rules in \"{text}\"")]
    DuplicateIdentifier { text: String },
    #[error("Filter matches everything in \"{text}\"")]
    MatchesEverything { text: String },
    /// The parsed record does not render back to its input. This is a bug in
    /// the parser, not in the filter list.
    #[error("Rendered text does not match input in \"{text}\": rendered as \"{rendered}\"")]
    InternalConsistency { text: String, rendered: String },
}

impl ParseError {
    /// The line text that failed to parse.
    pub fn text(&self) -> &str {
        match self {
            Self::MalformedHeader { text }
            | Self::UnrecognizedInstruction { text }
            | Self::DuplicateIdentifier { text }
            | Self::MatchesEverything { text }
            | Self::InternalConsistency { text, .. } => text,
        }
    }

    /// Short description of what went wrong.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MalformedHeader { .. } => "Malformed header",
            Self::UnrecognizedInstruction { .. } => "Unrecognized instruction",
            Self::DuplicateIdentifier { .. } => "Duplicate id in attribute rules",
            Self::MatchesEverything { .. } => "Filter matches everything",
            Self::InternalConsistency { .. } => "Rendered text does not match input",
        }
    }

    /// Fatal errors indicate a parser bug; the rest of the list should not be trusted.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InternalConsistency { .. })
    }
}
