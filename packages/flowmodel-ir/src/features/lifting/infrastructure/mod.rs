mod engine;
mod soundness;

pub use engine::LiftingEngine;
pub use soundness::SoundnessFilter;
