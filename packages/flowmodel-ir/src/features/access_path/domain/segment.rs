//! Access path segments
//!
//! A segment is either an *anchor* (the argument, receiver or return value a
//! flow edge attaches to) or a *content* refinement that narrows into the
//! value at the anchor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of an access path
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "segment", rename_all = "snake_case")]
pub enum AccessPathSegment {
    /// `Argument[n]`, n >= 0
    ArgumentIndex(u32),

    /// `Argument[-1]`: the receiver
    Qualifier,

    /// `Argument[this]`: the receiver in the "this" position
    ThisReference,

    /// `ReturnValue`
    ReturnValue,

    /// `Element`: collection or array element
    Element,

    /// `SyntheticField[owner.name]`
    ///
    /// `owner` is always the declaring type of the field.
    SyntheticField { owner: String, name: String },

    /// `MapKey`
    MapKey,

    /// `MapValue`
    MapValue,
}

impl AccessPathSegment {
    /// Build a synthetic field segment from its declaring type and name
    pub fn synthetic_field(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self::SyntheticField {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Anchors may only appear as the first segment of a path
    pub fn is_anchor(&self) -> bool {
        matches!(
            self,
            Self::ArgumentIndex(_) | Self::Qualifier | Self::ThisReference | Self::ReturnValue
        )
    }

    /// `Argument[-1]` or `Argument[this]`
    pub fn is_receiver(&self) -> bool {
        matches!(self, Self::Qualifier | Self::ThisReference)
    }

    /// Collection-shaped content (`Element`, `MapKey`, `MapValue`)
    ///
    /// Synthetic fields are content but not containers.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Element | Self::MapKey | Self::MapValue)
    }

    /// Declaring type and field name, if this is a synthetic field
    pub fn as_synthetic_field(&self) -> Option<(&str, &str)> {
        match self {
            Self::SyntheticField { owner, name } => Some((owner.as_str(), name.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for AccessPathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentIndex(n) => write!(f, "Argument[{}]", n),
            Self::Qualifier => f.write_str("Argument[-1]"),
            Self::ThisReference => f.write_str("Argument[this]"),
            Self::ReturnValue => f.write_str("ReturnValue"),
            Self::Element => f.write_str("Element"),
            Self::SyntheticField { owner, name } => write!(f, "SyntheticField[{}.{}]", owner, name),
            Self::MapKey => f.write_str("MapKey"),
            Self::MapValue => f.write_str("MapValue"),
        }
    }
}
