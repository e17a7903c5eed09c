//! Lifting output
//!
//! - `LiftedModel`: an interface-level summary or neutral, provenance `lifted`
//! - `SpuriousCandidate`: a unanimous shape naming implementation-private state
//! - `LiftResult`: everything produced for one interface member

use super::shape::Shape;
use crate::features::flow_model::{
    AnnotatedRecord, Expectation, LineTag, MemberKey, ModelRecord, NeutralRecord, Provenance,
    SummaryRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum LiftedModel {
    Summary(SummaryRecord),
    Neutral(NeutralRecord),
}

impl LiftedModel {
    pub fn interface_key(&self) -> &MemberKey {
        match self {
            Self::Summary(r) => &r.subject,
            Self::Neutral(r) => &r.subject,
        }
    }

    pub fn as_summary(&self) -> Option<&SummaryRecord> {
        match self {
            Self::Summary(r) => Some(r),
            Self::Neutral(_) => None,
        }
    }

    pub fn is_neutral(&self) -> bool {
        matches!(self, Self::Neutral(_))
    }

    /// Annotated model line, `summary=` or `neutral=`
    pub fn to_annotated(&self) -> AnnotatedRecord {
        let (tag, record) = match self {
            Self::Summary(r) => (LineTag::Summary, ModelRecord::Summary(r.clone())),
            Self::Neutral(r) => (LineTag::Neutral, ModelRecord::Neutral(r.clone())),
        };
        AnnotatedRecord {
            tag: Some(tag),
            expectation: Expectation::Expected,
            record,
        }
    }
}

impl fmt::Display for LiftedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary(r) => r.fmt(f),
            Self::Neutral(r) => r.fmt(f),
        }
    }
}

/// Diagnostic for a shape withheld by the soundness filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpuriousCandidate {
    pub interface_key: MemberKey,
    pub shape: Shape,
    pub provenance: Provenance,
    /// Field owners declared by only some of the implementers
    pub private_owners: BTreeSet<String>,
    /// Implementers whose observations produced the shape
    pub implementers: BTreeSet<String>,
}

impl SpuriousCandidate {
    /// The summary that would have been lifted
    pub fn would_be(&self) -> SummaryRecord {
        self.shape
            .to_summary(self.interface_key.clone(), self.provenance.clone())
    }

    /// `SPURIOUS-contentbased-summary=` line
    pub fn to_annotated(&self) -> AnnotatedRecord {
        AnnotatedRecord {
            tag: Some(LineTag::ContentbasedSummary),
            expectation: Expectation::Spurious,
            record: ModelRecord::Summary(self.would_be()),
        }
    }
}

impl fmt::Display for SpuriousCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_annotated().fmt(f)
    }
}

impl SpuriousCandidate {
    /// The `SPURIOUS-` line followed by a `# private owners:` comment
    pub fn report(&self) -> SpuriousReport<'_> {
        SpuriousReport(self)
    }
}

/// Two-line rendering of a spurious candidate, see [`SpuriousCandidate::report`]
#[derive(Debug, Clone, Copy)]
pub struct SpuriousReport<'a>(&'a SpuriousCandidate);

impl fmt::Display for SpuriousReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let owners: Vec<&str> = self.0.private_owners.iter().map(String::as_str).collect();
        writeln!(f, "{}", self.0)?;
        write!(f, "# private owners: {}", owners.join(", "))
    }
}

/// Outcome of lifting one interface member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftResult {
    pub lifted: BTreeSet<LiftedModel>,
    pub spurious: BTreeSet<SpuriousCandidate>,
    /// In-unit implementers not observed yet; non-empty means lifting deferred
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub pending: BTreeSet<String>,
}

impl LiftResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn deferred(pending: BTreeSet<String>) -> Self {
        Self {
            pending,
            ..Self::default()
        }
    }

    pub fn is_deferred(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.lifted.is_empty() && self.spurious.is_empty() && self.pending.is_empty()
    }
}
