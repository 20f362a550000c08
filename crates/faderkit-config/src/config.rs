//! The top-level config file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::feel::FeelConfig;
use crate::theme::ThemeTokens;
use crate::validation::{Checks, ValidationResult};

/// Everything a faderkit host can configure.
///
/// Every table and field is optional; an empty file is the default config.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FaderkitConfig {
    /// Design tokens.
    pub theme: ThemeTokens,
    /// Interaction constants.
    pub feel: FeelConfig,
}

impl FaderkitConfig {
    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml_str(&content)
    }

    /// Load a config file, treating a missing file as the default config.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match Self::load(path) {
            Err(e) if e.is_not_found() => Ok(Self::default()),
            other => other,
        }
    }

    /// Parse and validate a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Check every value against its allowed range.
    pub fn validate(&self) -> ValidationResult<()> {
        let mut checks = Checks::new();
        self.theme.check(&mut checks);
        self.feel.check(&mut checks);
        checks.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn empty_file_is_default() {
        assert_eq!(FaderkitConfig::from_toml_str("").unwrap(), FaderkitConfig::default());
    }

    #[test]
    fn default_validates() {
        assert!(FaderkitConfig::default().validate().is_ok());
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = FaderkitConfig::default();
        config.feel.sensitivity = 0.008;
        config.theme.corner_radius = 6;
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("[theme]"));
        assert!(text.contains("accent = \"#64b4ff\""));
        assert_eq!(FaderkitConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn invalid_values_are_rejected_after_parsing() {
        let toml = "[feel]\nsensitivity = 5.0\nfine_factor = 0.0";
        let err = FaderkitConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Validation(ValidationError::Multiple(ref errors)) if errors.len() == 2
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = FaderkitConfig::from_toml_str("[feel\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
