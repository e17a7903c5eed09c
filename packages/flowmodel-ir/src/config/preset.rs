//! Preset configurations
//!
//! Presets provide complete default configurations for common use cases.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Configuration preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Curated model packs: every ingestion check on
    ///
    /// - Ingest: arity + value shape enforced, legacy 9-field lines rejected
    /// - Lifting: unobserved implementers count as neutral, spurious reported
    Strict,

    /// Default: every check on, legacy lines accepted
    Balanced,

    /// Generated or partial corpora
    ///
    /// - Ingest: arity and value-shape checks off
    /// - Lifting: waits for every implementer to be observed
    Permissive,
}

impl FromStr for Preset {
    type Err = ConfigError;

    /// Case-insensitive preset name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "balanced" => Ok(Self::Balanced),
            "permissive" => Ok(Self::Permissive),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl Preset {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Balanced => "balanced",
            Self::Permissive => "permissive",
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Balanced
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_parsing() {
        assert_eq!("strict".parse::<Preset>().unwrap(), Preset::Strict);
        assert_eq!("STRICT".parse::<Preset>().unwrap(), Preset::Strict);
        assert_eq!("balanced".parse::<Preset>().unwrap(), Preset::Balanced);
        assert_eq!("permissive".parse::<Preset>().unwrap(), Preset::Permissive);
        assert!(matches!(
            "fast".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(name)) if name == "fast"
        ));
    }

    #[test]
    fn test_preset_display() {
        assert_eq!(Preset::Strict.to_string(), "strict");
        assert_eq!(Preset::Permissive.to_string(), "permissive");
    }

    #[test]
    fn test_default_preset() {
        assert_eq!(Preset::default(), Preset::Balanced);
    }
}
