//! Host-Engine API
//!
//! `ModelCompiler` is the surface a static-analysis engine talks to:
//! ingest model lines, register per-implementation observations, lift.

pub mod compiler;

pub use compiler::ModelCompiler;
