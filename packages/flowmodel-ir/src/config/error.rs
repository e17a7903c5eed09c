//! Model configuration errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Numeric setting outside its accepted bounds
    #[error("`{field}` = {value} is outside {min}..={max} ({hint})")]
    Range {
        field: String,
        value: String,
        min: String,
        max: String,
        hint: String,
    },

    #[error("model config has no `version` key; schema v1 files start with `version: 1`")]
    MissingVersion,

    #[error("model config schema v{found} is not supported (known: {})", versions(supported))]
    UnsupportedVersion { found: u32, supported: Vec<u32> },

    #[error("no preset named `{0}` (expected strict, balanced or permissive)")]
    UnknownPreset(String),

    #[error("cannot read model config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Field value rejected by a stage validator
    #[error("invalid model config: {0}")]
    Validation(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

fn versions(supported: &[u32]) -> String {
    supported
        .iter()
        .map(|v| format!("v{v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConfigError {
    /// Range error with a remedy shown after the bounds
    pub fn range_with_hint(
        field: impl Into<String>,
        value: impl ToString,
        min: impl ToString,
        max: impl ToString,
        hint: impl Into<String>,
    ) -> Self {
        Self::Range {
            field: field.into(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
            hint: hint.into(),
        }
    }
}
