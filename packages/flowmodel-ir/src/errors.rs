//! Error types for flowmodel-ir
//!
//! Provides unified error handling across the crate. Every variant is scoped
//! to one record, one observation or one config document; nothing here
//! aborts processing of unrelated subjects.

use thiserror::Error;

use crate::config::ConfigError;
use crate::features::flow_model::{FlowCompositionError, IngestError};
use crate::features::observation::StoreError;

/// Main error type for flowmodel-ir operations
#[derive(Debug, Error)]
pub enum FlowModelError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Model line rejected at ingestion (parse or validation)
    #[error("Ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Observation rejected by the store
    #[error("Observation error: {0}")]
    Store(#[from] StoreError),

    /// Flow kinds that cannot be chained
    #[error("Composition error: {0}")]
    Composition(#[from] FlowCompositionError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Worker pool could not be built
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Malformed request document
    #[error("Invalid request: {0}")]
    Request(String),
}

impl FlowModelError {
    /// Create a request error
    pub fn request(msg: impl Into<String>) -> Self {
        FlowModelError::Request(msg.into())
    }
}

/// Result type alias for flowmodel operations
pub type Result<T> = std::result::Result<T, FlowModelError>;
