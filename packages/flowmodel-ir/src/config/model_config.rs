//! Model compiler configuration (builder)
//!
//! ```rust,ignore
//! use flowmodel_ir::config::{ModelConfig, Preset};
//!
//! let config = ModelConfig::preset(Preset::Strict)
//!     .lifting(|c| c.provenance_tag("ai-lifted"))
//!     .build()?;
//! ```

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigExportV1, ConfigOverrides};
use super::preset::Preset;
use super::stage_configs::{IngestConfig, LiftingConfig, ParallelConfig};
use super::validation::Validatable;
use std::path::Path;

const SUPPORTED_VERSIONS: [u32; 1] = [1];

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Base preset
    pub(crate) preset: Preset,

    /// Stage-specific overrides
    pub(crate) ingest: Option<IngestConfig>,
    pub(crate) lifting: Option<LiftingConfig>,
    pub(crate) parallel: Option<ParallelConfig>,
}

impl ModelConfig {
    /// Create from preset
    pub fn preset(preset: Preset) -> Self {
        Self {
            preset,
            ingest: None,
            lifting: None,
            parallel: None,
        }
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    /// Override ingest stage
    pub fn ingest<F>(mut self, f: F) -> Self
    where
        F: FnOnce(IngestConfig) -> IngestConfig,
    {
        let base = self
            .ingest
            .take()
            .unwrap_or_else(|| IngestConfig::from_preset(self.preset));
        self.ingest = Some(f(base));
        self
    }

    /// Override lifting stage
    pub fn lifting<F>(mut self, f: F) -> Self
    where
        F: FnOnce(LiftingConfig) -> LiftingConfig,
    {
        let base = self
            .lifting
            .take()
            .unwrap_or_else(|| LiftingConfig::from_preset(self.preset));
        self.lifting = Some(f(base));
        self
    }

    /// Override parallel settings
    pub fn parallel<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ParallelConfig) -> ParallelConfig,
    {
        let base = self
            .parallel
            .take()
            .unwrap_or_else(|| ParallelConfig::from_preset(self.preset));
        self.parallel = Some(f(base));
        self
    }

    /// Build and validate
    pub fn build(self) -> ConfigResult<ValidatedConfig> {
        self.ingest.validate()?;
        self.lifting.validate()?;
        self.parallel.validate()?;
        Ok(ValidatedConfig(self))
    }

    /// Load from YAML text (v1 schema)
    pub fn from_yaml_str(content: &str) -> ConfigResult<ValidatedConfig> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset: Preset = export.preset.parse()?;

        let mut config = Self::preset(preset);
        if let Some(overrides) = export.overrides {
            config.ingest = overrides.ingest;
            config.lifting = overrides.lifting;
            config.parallel = overrides.parallel;
        }

        config.build()
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<ValidatedConfig> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "loading model config");
        Self::from_yaml_str(&content)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let overrides = ConfigOverrides {
            ingest: self.ingest.clone(),
            lifting: self.lifting.clone(),
            parallel: self.parallel.clone(),
        };
        let export = ConfigExportV1 {
            version: Some(1),
            preset: self.preset.to_string(),
            overrides: Some(overrides),
        };

        Ok(serde_yaml::to_string(&export)?)
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

/// Validated configuration (immutable, safe to use)
#[derive(Debug, Clone)]
pub struct ValidatedConfig(ModelConfig);

impl ValidatedConfig {
    pub fn into_inner(self) -> ModelConfig {
        self.0
    }

    pub fn as_inner(&self) -> &ModelConfig {
        &self.0
    }

    pub fn preset(&self) -> Preset {
        self.0.preset
    }

    /// Effective ingest config (override or preset default)
    pub fn ingest(&self) -> IngestConfig {
        self.0
            .ingest
            .clone()
            .unwrap_or_else(|| IngestConfig::from_preset(self.0.preset))
    }

    /// Effective lifting config (override or preset default)
    pub fn lifting(&self) -> LiftingConfig {
        self.0
            .lifting
            .clone()
            .unwrap_or_else(|| LiftingConfig::from_preset(self.0.preset))
    }

    /// Effective parallel config (override or preset default)
    pub fn parallel(&self) -> ParallelConfig {
        self.0
            .parallel
            .clone()
            .unwrap_or_else(|| ParallelConfig::from_preset(self.0.preset))
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        self.0.to_yaml()
    }
}

impl Default for ValidatedConfig {
    fn default() -> Self {
        Self(ModelConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_defaults() {
        let config = ModelConfig::preset(Preset::Permissive).build().unwrap();
        assert_eq!(config.preset(), Preset::Permissive);
        assert!(!config.ingest().validate_arity);
        assert!(!config.lifting().treat_missing_as_neutral);
    }

    #[test]
    fn test_closure_override_starts_from_preset() {
        let config = ModelConfig::preset(Preset::Strict)
            .ingest(|c| c.accept_legacy_lines(true))
            .build()
            .unwrap();
        let ingest = config.ingest();
        assert!(ingest.accept_legacy_lines);
        assert!(ingest.validate_arity);
    }

    #[test]
    fn test_closure_overrides_accumulate() {
        let config = ModelConfig::preset(Preset::Balanced)
            .lifting(|c| c.provenance_tag("ai-lifted"))
            .lifting(|c| c.report_spurious(false))
            .build()
            .unwrap();
        assert_eq!(config.lifting().provenance_tag, "ai-lifted");
        assert!(!config.lifting().report_spurious);
    }

    #[test]
    fn test_build_rejects_invalid_stage() {
        let result = ModelConfig::preset(Preset::Balanced)
            .parallel(|c| c.num_workers(1000))
            .build();
        assert!(matches!(result, Err(ConfigError::Range { .. })));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = ModelConfig::preset(Preset::Strict)
            .lifting(|c| c.provenance_tag("team-lifted"))
            .build()
            .unwrap();
        let reloaded = ModelConfig::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(reloaded.preset(), Preset::Strict);
        assert_eq!(reloaded.lifting(), config.lifting());
        assert_eq!(reloaded.ingest(), config.ingest());
    }
}
