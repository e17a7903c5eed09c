//! Model Pipeline
//!
//! ```text
//! model lines ──par──▶ ingest (codec + neutral registry)
//!
//! per interface (par):
//!   implementations ──par──▶ parse ──▶ ObservationStore
//!                     ── barrier ──▶ LiftingEngine ──▶ InterfaceReport
//! ```
//!
//! Interfaces are independent: lifting one interface may run while another
//! is still collecting.

pub mod orchestrator;
pub mod request;
pub mod result;

pub use orchestrator::ModelPipeline;
pub use request::{
    ImplementationWork, InterfaceDecl, InterfaceWork, LiftRequest, ObservationDecl, TypeDecl,
    UnitDecl,
};
pub use result::{
    IngestReport, IngestedLine, InterfaceReport, PipelineReport, PipelineStats, RejectedLine,
};
