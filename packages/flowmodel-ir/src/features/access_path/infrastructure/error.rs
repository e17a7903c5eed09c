//! Access path parse errors

use thiserror::Error;

/// Malformed access path text
///
/// `offset` is the byte offset into the parsed text where the problem starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid access path at offset {offset}: {reason}")]
pub struct ParseError {
    pub reason: ParseErrorReason,
    pub offset: usize,
}

impl ParseError {
    pub fn new(reason: ParseErrorReason, offset: usize) -> Self {
        Self { reason, offset }
    }

    /// Same error with the offset moved by `base` (for embedding in a line)
    pub fn shifted(mut self, base: usize) -> Self {
        self.offset += base;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorReason {
    #[error("empty access path")]
    Empty,

    #[error("empty segment")]
    EmptySegment,

    #[error("unknown segment `{0}`")]
    UnknownSegment(String),

    #[error("segment `{0}` requires a bracketed argument")]
    MissingArgument(String),

    #[error("segment `{0}` does not take an argument")]
    UnexpectedArgument(String),

    #[error("unterminated `[`")]
    UnterminatedBracket,

    #[error("invalid argument index `{0}`")]
    InvalidArgumentIndex(String),

    #[error("synthetic field `{0}` must be qualified by its declaring type")]
    UnqualifiedField(String),

    #[error("`{0}` may only appear as the first segment")]
    MisplacedAnchor(String),

    #[error("path must start with an argument or the return value, found `{0}`")]
    MissingAnchor(String),

    #[error("unexpected character `{0}`")]
    UnexpectedChar(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::new(ParseErrorReason::UnknownSegment("Field".into()), 12);
        assert_eq!(
            err.to_string(),
            "invalid access path at offset 12: unknown segment `Field`"
        );
    }

    #[test]
    fn test_shifted() {
        let err = ParseError::new(ParseErrorReason::Empty, 0).shifted(40);
        assert_eq!(err.offset, 40);
    }
}
