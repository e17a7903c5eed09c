//! Configuration validation
//!
//! Stage configs validate themselves; `ModelConfig::build` runs every
//! `Validatable` before handing out a `ValidatedConfig`.

use super::error::ConfigResult;
use super::stage_configs::{IngestConfig, LiftingConfig, ParallelConfig};

/// Trait for validatable configuration objects
pub trait Validatable {
    /// Validate the configuration
    ///
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Get the configuration name for error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}

impl Validatable for IngestConfig {
    fn validate(&self) -> ConfigResult<()> {
        IngestConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "ingest"
    }
}

impl Validatable for LiftingConfig {
    fn validate(&self) -> ConfigResult<()> {
        LiftingConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "lifting"
    }
}

impl Validatable for ParallelConfig {
    fn validate(&self) -> ConfigResult<()> {
        ParallelConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "parallel"
    }
}

impl<T: Validatable> Validatable for Option<T> {
    fn validate(&self) -> ConfigResult<()> {
        match self {
            Some(config) => config.validate(),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check<V: Validatable>(config: &V) -> ConfigResult<()> {
        config.validate()
    }

    #[test]
    fn test_stage_configs_validate() {
        assert!(check(&IngestConfig::default()).is_ok());
        assert!(check(&LiftingConfig::default()).is_ok());
        assert!(check(&ParallelConfig::default()).is_ok());
        assert!(check(&ParallelConfig::default().num_workers(1000)).is_err());
    }

    #[test]
    fn test_option_validates_inner() {
        let none: Option<LiftingConfig> = None;
        assert!(check(&none).is_ok());
        assert!(check(&Some(LiftingConfig::default().provenance_tag("manual"))).is_err());
    }

    #[test]
    fn test_config_names() {
        assert_eq!(LiftingConfig::default().config_name(), "lifting");
        assert_eq!(ParallelConfig::default().config_name(), "parallel");
    }
}
