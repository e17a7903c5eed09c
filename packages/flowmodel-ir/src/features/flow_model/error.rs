//! Ingestion errors
//!
//! - `LineError`: the line is malformed (always carries a column offset)
//! - `ValidationError`: the line parses but describes an impossible model
//!
//! Both abort ingestion of that one line only.

use crate::features::access_path::ParseError;
use std::fmt;
use thiserror::Error;

/// Column of a model line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineField {
    Line,
    Tag,
    Package,
    Type,
    Subtypes,
    Name,
    Signature,
    Input,
    Output,
    Path,
    Kind,
    Label,
    Category,
    Provenance,
}

impl fmt::Display for LineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Line => "line",
            Self::Tag => "tag",
            Self::Package => "package",
            Self::Type => "type",
            Self::Subtypes => "subtypes",
            Self::Name => "name",
            Self::Signature => "signature",
            Self::Input => "input",
            Self::Output => "output",
            Self::Path => "path",
            Self::Kind => "kind",
            Self::Label => "label",
            Self::Category => "category",
            Self::Provenance => "provenance",
        };
        f.write_str(name)
    }
}

/// Malformed model line
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} at column {column}: {reason}")]
pub struct LineError {
    pub field: LineField,
    /// Byte offset into the line
    pub column: usize,
    pub reason: LineErrorReason,
}

impl LineError {
    pub fn new(field: LineField, column: usize, reason: LineErrorReason) -> Self {
        Self {
            field,
            column,
            reason,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineErrorReason {
    #[error("empty line")]
    EmptyLine,

    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: &'static str, found: usize },

    #[error("unknown model tag `{0}`")]
    UnknownTag(String),

    #[error("expected `true` or `false`, found `{0}`")]
    InvalidBool(String),

    #[error("invalid signature `{0}`")]
    InvalidSignature(String),

    #[error(transparent)]
    AccessPath(ParseError),

    #[error("`{0}` is not a flow kind; expected `value` or `taint`")]
    InvalidKind(String),

    #[error("unknown neutral category `{0}`")]
    InvalidCategory(String),

    #[error("field must not be empty")]
    EmptyField,

    #[error("summary lines without provenance are not accepted")]
    LegacyLine,
}

/// Structurally valid line describing an invalid model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("argument index {index} out of range for signature {signature} (arity {arity})")]
    ArgumentOutOfRange {
        index: u32,
        arity: usize,
        signature: String,
    },

    #[error("`ReturnValue` cannot be the input of a summary")]
    ReturnValueAsInput,

    #[error("value flow from `{input}` to `{output}` wraps the value into a container; use taint")]
    IncompatibleValueShape { input: String, output: String },

    #[error("summary kind `none` is reserved for neutral models")]
    NeutralKindInSummary,

    #[error("`{subject}` is already modeled as {existing}")]
    NeutralConflict {
        subject: String,
        existing: &'static str,
    },
}

/// Line rejected at ingestion
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("parse error: {0}")]
    Parse(#[from] LineError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl IngestError {
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
