// Flow model: summary / neutral / endpoint records and flow semantics
//
// Hexagonal Architecture:
// - domain: MemberKey, FlowKind (value/taint/none + composition), records
// - infrastructure: textual line codec and ingestion-time validation
// - error: LineError / ValidationError / IngestError

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{
    compose_chain, AnnotatedRecord, EndpointRecord, EndpointRole, Expectation,
    FlowCompositionError, FlowKind, LineTag, MemberKey, ModelRecord, NeutralCategory,
    NeutralRecord, Provenance, ProvenanceKind, Signature, SummaryRecord,
};
pub use error::{IngestError, LineError, LineErrorReason, LineField, ValidationError};
pub use infrastructure::{parse_member_key, LineCodec, RecordValidator};
