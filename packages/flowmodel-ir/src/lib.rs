/*
 * Flowmodel IR - Library Flow-Model Compiler
 *
 * Feature-First Hexagonal Architecture:
 * - features/    : Vertical slices (access_path → flow_model → observation → lifting)
 * - pipeline/    : Concurrent ingest / collect / lift orchestration
 * - api/         : Host-engine facade (ingest, register_observation, lift)
 * - config/      : Presets, stage configs, YAML I/O
 *
 * Data flow:
 *   model lines → access paths → summary records → observation store
 *     → lifting engine → lifted models | spurious candidates
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::should_implement_trait)] // from_str naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Feature modules (access paths, records, store, hierarchy, lifting)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

/// Host-engine facade
pub mod api;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use api::ModelCompiler;
pub use errors::{FlowModelError, Result};
pub use features::access_path::{AccessPath, AccessPathSegment, ParseError};
pub use features::flow_model::{
    FlowKind, IngestError, MemberKey, ModelRecord, NeutralRecord, Provenance, SummaryRecord,
};
pub use features::hierarchy::{ClassHierarchy, InMemoryClassHierarchy};
pub use features::lifting::{LiftResult, LiftedModel, LiftingEngine, SpuriousCandidate};
pub use features::neutral::NeutralModelResolver;
pub use features::observation::{Observation, ObservationEntry, ObservationStore};
pub use pipeline::{ModelPipeline, PipelineReport};
