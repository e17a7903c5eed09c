//! Pipeline result types

use crate::features::flow_model::{MemberKey, ModelRecord};
use crate::features::lifting::LiftResult;
use serde::Serialize;

/// A line (or observation) that did not make it into the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedLine {
    /// Input file or implementing type the line came from
    pub source: String,
    /// 1-based line number, `None` for whole-observation rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
    pub line: String,
    pub reason: String,
}

impl RejectedLine {
    pub fn new(
        source: impl Into<String>,
        line_number: Option<usize>,
        line: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self {
            source: source.into(),
            line_number,
            line: line.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestedLine {
    pub line_number: usize,
    pub record: ModelRecord,
}

/// Outcome of `ModelPipeline::ingest_batch`, in input order
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub accepted: Vec<IngestedLine>,
    pub rejected: Vec<RejectedLine>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceReport {
    pub interface: MemberKey,
    #[serde(flatten)]
    pub result: LiftResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub interfaces: usize,
    pub implementations: usize,
    pub lines: usize,
    pub rejected: usize,
    pub lifted: usize,
    pub spurious: usize,
    pub deferred: usize,
}

/// Outcome of `ModelPipeline::run`, sorted by interface member
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub interfaces: Vec<InterfaceReport>,
    pub rejected: Vec<RejectedLine>,
    pub stats: PipelineStats,
}

impl PipelineReport {
    pub fn result_for(&self, interface: &MemberKey) -> Option<&LiftResult> {
        self.interfaces
            .binary_search_by(|report| report.interface.cmp(interface))
            .ok()
            .map(|index| &self.interfaces[index].result)
    }
}
