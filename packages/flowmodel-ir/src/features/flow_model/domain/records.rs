//! Model records
//!
//! - `SummaryRecord`: flow edge between two access paths of a member
//! - `NeutralRecord`: the member has no flow edges
//! - `EndpointRecord`: a library source or sink
//!
//! Every record renders back to its model line through `Display`.

use super::flow_kind::FlowKind;
use super::member_key::MemberKey;
use super::provenance::Provenance;
use crate::features::access_path::AccessPath;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Summary
// ============================================================================

/// `package;type;subtypes;name;signature;ext;input;output;kind;provenance`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub subject: MemberKey,

    /// Reserved extension column, usually empty
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ext: String,

    pub input: AccessPath,
    pub output: AccessPath,
    pub kind: FlowKind,
    pub provenance: Provenance,
}

impl SummaryRecord {
    pub fn new(
        subject: MemberKey,
        input: AccessPath,
        output: AccessPath,
        kind: FlowKind,
        provenance: Provenance,
    ) -> Self {
        Self {
            subject,
            ext: String::new(),
            input,
            output,
            kind,
            provenance,
        }
    }

    /// `(input, output)` pair identifying the edge regardless of kind
    pub fn edge(&self) -> (&AccessPath, &AccessPath) {
        (&self.input, &self.output)
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{};{};{};{};{}",
            self.subject.package,
            self.subject.type_name,
            self.subject.subtypes,
            self.subject.name,
            self.subject.signature_text(),
            self.ext,
            self.input,
            self.output,
            self.kind,
            self.provenance
        )
    }
}

// ============================================================================
// Neutral
// ============================================================================

/// Which kind of model a neutral declaration suppresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeutralCategory {
    /// Flow-free: no summary edges
    Summary,
    Source,
    Sink,
}

impl NeutralCategory {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "summary" => Some(Self::Summary),
            "source" => Some(Self::Source),
            "sink" => Some(Self::Sink),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Source => "source",
            Self::Sink => "sink",
        }
    }
}

/// `package;type;name;signature;category[;provenance]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NeutralRecord {
    pub subject: MemberKey,
    pub category: NeutralCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provenance: Option<Provenance>,
}

impl NeutralRecord {
    /// Flow-free declaration for `subject`
    pub fn summary(subject: MemberKey) -> Self {
        Self {
            subject,
            category: NeutralCategory::Summary,
            provenance: None,
        }
    }

    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = Some(provenance);
        self
    }

    /// Only flow-free neutrals are exclusive with summaries
    pub fn is_flow_neutral(&self) -> bool {
        self.category == NeutralCategory::Summary
    }
}

impl fmt::Display for NeutralRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{}",
            self.subject.package,
            self.subject.type_name,
            self.subject.name,
            self.subject.signature_text(),
            self.category.as_str()
        )?;
        if let Some(provenance) = &self.provenance {
            write!(f, ";{}", provenance)?;
        }
        Ok(())
    }
}

// ============================================================================
// Sources and sinks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointRole {
    Source,
    Sink,
}

impl EndpointRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Sink => "sink",
        }
    }
}

/// `package;type;subtypes;name;signature;ext;path;label;provenance`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub role: EndpointRole,
    pub subject: MemberKey,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub ext: String,
    pub path: AccessPath,
    /// e.g. `html-injection`, `remote`
    pub label: String,
    pub provenance: Provenance,
}

impl fmt::Display for EndpointRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{};{};{};{};{};{};{};{};{}",
            self.subject.package,
            self.subject.type_name,
            self.subject.subtypes,
            self.subject.name,
            self.subject.signature_text(),
            self.ext,
            self.path,
            self.label,
            self.provenance
        )
    }
}

// ============================================================================
// Ingested record
// ============================================================================

/// Any record produced by ingesting one model line
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "lowercase")]
pub enum ModelRecord {
    Summary(SummaryRecord),
    Neutral(NeutralRecord),
    Endpoint(EndpointRecord),
}

impl ModelRecord {
    pub fn subject(&self) -> &MemberKey {
        match self {
            Self::Summary(r) => &r.subject,
            Self::Neutral(r) => &r.subject,
            Self::Endpoint(r) => &r.subject,
        }
    }

    /// Annotation tag for this record (`summary`, `neutral`, `source`, `sink`)
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Summary(_) => "summary",
            Self::Neutral(_) => "neutral",
            Self::Endpoint(r) => r.role.as_str(),
        }
    }

    pub fn as_summary(&self) -> Option<&SummaryRecord> {
        match self {
            Self::Summary(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_neutral(&self) -> Option<&NeutralRecord> {
        match self {
            Self::Neutral(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for ModelRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Summary(r) => r.fmt(f),
            Self::Neutral(r) => r.fmt(f),
            Self::Endpoint(r) => r.fmt(f),
        }
    }
}

// ============================================================================
// Annotated lines (`summary=...`, `SPURIOUS-neutral=...`)
// ============================================================================

/// Expectation marker carried by annotated lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    Expected,
    /// `SPURIOUS-`: produced but should not be
    Spurious,
    /// `MISSING-`: should be produced but is not
    Missing,
}

impl Expectation {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Expected => "",
            Self::Spurious => "SPURIOUS-",
            Self::Missing => "MISSING-",
        }
    }
}

/// Tag of an annotated line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineTag {
    Summary,
    ContentbasedSummary,
    Neutral,
    Source,
    Sink,
}

impl LineTag {
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "summary" => Some(Self::Summary),
            "contentbased-summary" => Some(Self::ContentbasedSummary),
            "neutral" => Some(Self::Neutral),
            "source" => Some(Self::Source),
            "sink" => Some(Self::Sink),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::ContentbasedSummary => "contentbased-summary",
            Self::Neutral => "neutral",
            Self::Source => "source",
            Self::Sink => "sink",
        }
    }
}

/// A parsed line together with its annotation, if it had one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedRecord {
    pub tag: Option<LineTag>,
    pub expectation: Expectation,
    pub record: ModelRecord,
}

impl fmt::Display for AnnotatedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = self.tag {
            write!(f, "{}{}=", self.expectation.prefix(), tag.as_str())?;
        }
        write!(f, "{}", self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_model::domain::member_key::Signature;

    fn strategy_key() -> MemberKey {
        MemberKey::new("p", "MultipleImpls$Strategy", "doSomething")
            .with_subtypes(true)
            .with_signature(Signature::new(["String"]))
    }

    #[test]
    fn test_summary_display() {
        let record = SummaryRecord::new(
            strategy_key(),
            AccessPath::argument(0),
            AccessPath::return_value(),
            FlowKind::Taint,
            Provenance::df_generated(),
        );
        assert_eq!(
            record.to_string(),
            "p;MultipleImpls$Strategy;true;doSomething;(String);;Argument[0];ReturnValue;taint;df-generated"
        );
    }

    #[test]
    fn test_neutral_display() {
        let key = MemberKey::new("p", "MultipleImpls$Strat3", "call")
            .with_signature(Signature::new(Vec::<String>::new()));
        let neutral = NeutralRecord::summary(key.clone());
        assert_eq!(neutral.to_string(), "p;MultipleImpls$Strat3;call;();summary");
        let neutral = neutral.with_provenance(Provenance::df_generated());
        assert_eq!(
            neutral.to_string(),
            "p;MultipleImpls$Strat3;call;();summary;df-generated"
        );
        assert!(neutral.is_flow_neutral());
    }

    #[test]
    fn test_annotated_display() {
        let key = MemberKey::new("Sinks", "NewSinks", "Sink")
            .with_signature(Signature::new(["System.Object"]));
        let annotated = AnnotatedRecord {
            tag: Some(LineTag::Neutral),
            expectation: Expectation::Spurious,
            record: ModelRecord::Neutral(NeutralRecord::summary(key)),
        };
        assert_eq!(
            annotated.to_string(),
            "SPURIOUS-neutral=Sinks;NewSinks;Sink;(System.Object);summary"
        );
    }

    #[test]
    fn test_model_record_accessors() {
        let record = ModelRecord::Neutral(NeutralRecord::summary(strategy_key()));
        assert_eq!(record.tag(), "neutral");
        assert!(record.as_summary().is_none());
        assert!(record.as_neutral().is_some());
        assert_eq!(record.subject(), &strategy_key());
    }
}
