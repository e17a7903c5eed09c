//! Configuration System
//!
//! Three levels, from simplest to most explicit:
//! - Level 1: Preset (`strict`, `balanced`, `permissive`)
//! - Level 2: Stage override through builder closures
//! - Level 3: Versioned YAML document
//!
//! # Examples
//!
//! ```rust,ignore
//! use flowmodel_ir::config::{ModelConfig, Preset};
//!
//! // Level 1
//! let config = ModelConfig::preset(Preset::Strict).build()?;
//!
//! // Level 2
//! let config = ModelConfig::preset(Preset::Balanced)
//!     .lifting(|c| c.report_spurious(false))
//!     .build()?;
//!
//! // Level 3
//! let config = ModelConfig::from_yaml("models.yaml")?;
//! ```

pub mod error;
pub mod io;
pub mod model_config;
pub mod preset;
pub mod stage_configs;
pub mod validation;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigExportV1, ConfigOverrides};
pub use model_config::{ModelConfig, ValidatedConfig};
pub use preset::Preset;
pub use stage_configs::{IngestConfig, LiftingConfig, ParallelConfig};
pub use validation::Validatable;
