//! Provenance tags (`manual`, `df-generated`, `ai-generated`, `df-lifted`, ...)

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a model was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProvenanceKind {
    Manual,
    Generated,
    Lifted,
}

/// Free-form provenance tag, kept verbatim for lossless serialization
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Provenance {
    tag: String,
}

impl Provenance {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    pub fn manual() -> Self {
        Self::new("manual")
    }

    pub fn df_generated() -> Self {
        Self::new("df-generated")
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn kind(&self) -> ProvenanceKind {
        if self.tag.contains("lifted") {
            ProvenanceKind::Lifted
        } else if self.tag.contains("manual") {
            ProvenanceKind::Manual
        } else {
            ProvenanceKind::Generated
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
