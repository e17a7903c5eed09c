//! Lifting domain types

mod result;
mod shape;

pub use result::{LiftResult, LiftedModel, SpuriousCandidate, SpuriousReport};
pub use shape::Shape;
