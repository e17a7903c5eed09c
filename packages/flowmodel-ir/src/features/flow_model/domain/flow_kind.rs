//! Flow kinds and their composition
//!
//! - `value`: output is the input, or an unmodified projection of it
//! - `taint`: output is derived from the input
//! - `none`: no flow crosses the member (neutral models only)

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlowKind {
    Value,
    Taint,
    None,
}

/// Chaining through a neutral member
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowCompositionError {
    #[error("cannot compose {upstream} with {downstream}: a neutral member has no flow edge")]
    NeutralOperand {
        upstream: FlowKind,
        downstream: FlowKind,
    },

    #[error("cannot compose an empty chain")]
    EmptyChain,
}

impl FlowKind {
    /// Parse a kind label (`value`, `taint`, `none`)
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "value" => Some(Self::Value),
            "taint" => Some(Self::Taint),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Taint => "taint",
            Self::None => "none",
        }
    }

    /// Whether aliasing reasoning may treat output and input as equal
    pub fn preserves_value(&self) -> bool {
        matches!(self, Self::Value)
    }

    /// Kind of the edge obtained by feeding this summary's output into
    /// `downstream`'s input.
    ///
    /// `value ∘ value = value`, any `taint` yields `taint`, and `none` on
    /// either side is an error.
    pub fn compose(self, downstream: FlowKind) -> Result<FlowKind, FlowCompositionError> {
        match (self, downstream) {
            (Self::None, _) | (_, Self::None) => Err(FlowCompositionError::NeutralOperand {
                upstream: self,
                downstream,
            }),
            (Self::Value, Self::Value) => Ok(Self::Value),
            _ => Ok(Self::Taint),
        }
    }
}

/// Compose a whole chain left to right
pub fn compose_chain<I>(kinds: I) -> Result<FlowKind, FlowCompositionError>
where
    I: IntoIterator<Item = FlowKind>,
{
    let mut kinds = kinds.into_iter();
    let first = kinds.next().ok_or(FlowCompositionError::EmptyChain)?;
    if first == FlowKind::None {
        return Err(FlowCompositionError::NeutralOperand {
            upstream: FlowKind::None,
            downstream: FlowKind::None,
        });
    }
    kinds.try_fold(first, FlowKind::compose)
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
