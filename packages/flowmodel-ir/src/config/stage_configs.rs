//! Stage configurations
//!
//! One struct per pipeline stage:
//! - `IngestConfig`: model line parsing and validation
//! - `LiftingConfig`: interface lifting
//! - `ParallelConfig`: rayon worker pool

use super::error::{ConfigError, ConfigResult};
use super::preset::Preset;
use serde::{Deserialize, Serialize};

// ============================================================================
// Ingest
// ============================================================================

/// Ingestion configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Reject argument indices beyond the erased signature's arity
    pub validate_arity: bool,

    /// Reject `value` summaries that wrap a value into a container
    pub enforce_value_shape: bool,

    /// Accept 9-field summary lines without provenance (read as `manual`)
    pub accept_legacy_lines: bool,
}

impl IngestConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Strict => Self {
                validate_arity: true,
                enforce_value_shape: true,
                accept_legacy_lines: false,
            },
            Preset::Balanced => Self {
                validate_arity: true,
                enforce_value_shape: true,
                accept_legacy_lines: true,
            },
            Preset::Permissive => Self {
                validate_arity: false,
                enforce_value_shape: false,
                accept_legacy_lines: true,
            },
        }
    }

    /// Builder: Set validate_arity
    pub fn validate_arity(mut self, v: bool) -> Self {
        self.validate_arity = v;
        self
    }

    /// Builder: Set enforce_value_shape
    pub fn enforce_value_shape(mut self, v: bool) -> Self {
        self.enforce_value_shape = v;
        self
    }

    /// Builder: Set accept_legacy_lines
    pub fn accept_legacy_lines(mut self, v: bool) -> Self {
        self.accept_legacy_lines = v;
        self
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Lifting
// ============================================================================

/// Lifting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiftingConfig {
    /// Provenance tag of lifted models (must contain `lifted`)
    pub provenance_tag: String,

    /// Lift a neutral when every implementer is neutral
    pub lift_neutrals: bool,

    /// Collect spurious candidates in the result
    pub report_spurious: bool,

    /// Let unobserved in-unit implementers veto lifting instead of deferring it
    pub treat_missing_as_neutral: bool,
}

impl LiftingConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.provenance_tag.trim().is_empty() {
            return Err(ConfigError::Validation(
                "provenance_tag must not be empty".to_string(),
            ));
        }
        if self.provenance_tag.contains(';') {
            return Err(ConfigError::Validation(format!(
                "provenance_tag must not contain ';', got '{}'",
                self.provenance_tag
            )));
        }
        if !self.provenance_tag.contains("lifted") {
            return Err(ConfigError::Validation(format!(
                "provenance_tag must contain 'lifted' so lifted models stay recognizable, got '{}'",
                self.provenance_tag
            )));
        }
        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Strict | Preset::Balanced => Self {
                provenance_tag: "df-lifted".to_string(),
                lift_neutrals: true,
                report_spurious: true,
                treat_missing_as_neutral: true,
            },
            Preset::Permissive => Self {
                provenance_tag: "df-lifted".to_string(),
                lift_neutrals: true,
                report_spurious: true,
                treat_missing_as_neutral: false,
            },
        }
    }

    /// Builder: Set provenance_tag
    pub fn provenance_tag(mut self, v: impl Into<String>) -> Self {
        self.provenance_tag = v.into();
        self
    }

    /// Builder: Set lift_neutrals
    pub fn lift_neutrals(mut self, v: bool) -> Self {
        self.lift_neutrals = v;
        self
    }

    /// Builder: Set report_spurious
    pub fn report_spurious(mut self, v: bool) -> Self {
        self.report_spurious = v;
        self
    }

    /// Builder: Set treat_missing_as_neutral
    pub fn treat_missing_as_neutral(mut self, v: bool) -> Self {
        self.treat_missing_as_neutral = v;
        self
    }
}

impl Default for LiftingConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}

// ============================================================================
// Parallel
// ============================================================================

/// Parallel processing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Minimum lines per rayon task when ingesting (1..=10000)
    pub min_batch_size: usize,
}

impl ParallelConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "0 uses the rayon default",
            ));
        }

        if self.min_batch_size < 1 || self.min_batch_size > 10000 {
            return Err(ConfigError::range_with_hint(
                "min_batch_size",
                self.min_batch_size,
                1,
                10000,
                "lines handed to one ingest task",
            ));
        }

        Ok(())
    }

    /// Get preset configuration
    pub fn from_preset(_preset: Preset) -> Self {
        Self {
            num_workers: 0, // Auto
            min_batch_size: 64,
        }
    }

    /// Worker count with 0 resolved to the number of CPUs
    pub fn effective_workers(&self) -> usize {
        if self.num_workers == 0 {
            num_cpus::get()
        } else {
            self.num_workers
        }
    }

    /// Builder: Set num_workers
    pub fn num_workers(mut self, v: usize) -> Self {
        self.num_workers = v;
        self
    }

    /// Builder: Set min_batch_size
    pub fn min_batch_size(mut self, v: usize) -> Self {
        self.min_batch_size = v;
        self
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Balanced)
    }
}
