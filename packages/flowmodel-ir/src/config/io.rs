//! Configuration I/O (YAML)
//!
//! Defines YAML schema types. Loading and export live on `ModelConfig`.

use super::stage_configs::{IngestConfig, LiftingConfig, ParallelConfig};
use serde::{Deserialize, Serialize};

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    /// Base preset
    #[serde(default = "default_preset")]
    pub preset: String,

    /// Fine-grained overrides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<ConfigOverrides>,
}

fn default_preset() -> String {
    super::Preset::default().to_string()
}

/// Configuration overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest: Option<IngestConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifting: Option<LiftingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<ParallelConfig>,
}
