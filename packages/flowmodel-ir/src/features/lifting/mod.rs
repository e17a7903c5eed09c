// Lifting: generalize per-implementation observations to the interface
//
// Hexagonal Architecture:
// - domain: Shape, LiftedModel, SpuriousCandidate, LiftResult
// - infrastructure: LiftingEngine (unanimity), SoundnessFilter (field owners)

pub mod domain;
pub mod infrastructure;

pub use domain::{LiftResult, LiftedModel, Shape, SpuriousCandidate, SpuriousReport};
pub use infrastructure::{LiftingEngine, SoundnessFilter};
