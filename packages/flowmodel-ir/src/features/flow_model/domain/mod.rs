//! Flow model domain types

mod flow_kind;
mod member_key;
mod provenance;
mod records;

pub use flow_kind::{compose_chain, FlowCompositionError, FlowKind};
pub use member_key::{MemberKey, Signature};
pub use provenance::{Provenance, ProvenanceKind};
pub use records::{
    AnnotatedRecord, EndpointRecord, EndpointRole, Expectation, LineTag, ModelRecord,
    NeutralCategory, NeutralRecord, SummaryRecord,
};
