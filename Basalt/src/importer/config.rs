//! Importer configuration
//!
//! A flat group of string options, as found in a plugin configuration file:
//!
//! ```toml
//! format = "Bc3RGBA"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the option selecting the transcoding target
pub const FORMAT_OPTION: &str = "format";

/// String-valued importer options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImporterConfig {
    values: BTreeMap<String, String>,
}

impl ImporterConfig {
    /// Configuration with the `format` option present but empty
    #[must_use]
    pub fn new() -> Self {
        let mut config = Self::default();
        config.set_value(FORMAT_OPTION, "");
        config
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        config.values.entry(FORMAT_OPTION.to_string()).or_default();
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref()).map_err(|source| Error::FileRead {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Value of an option, `None` if it was never set
    #[must_use]
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// The `format` option, empty when unset
    #[must_use]
    pub fn format(&self) -> &str {
        self.value(FORMAT_OPTION).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_format_is_empty() {
        let config = ImporterConfig::new();
        assert_eq!(config.value(FORMAT_OPTION), Some(""));
        assert_eq!(config.format(), "");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ImporterConfig::from_toml_str("format = \"Bc3RGBA\"\n").unwrap();
        assert_eq!(config.format(), "Bc3RGBA");

        let text = config.to_toml_string().unwrap();
        assert_eq!(ImporterConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_format_key_is_seeded() {
        let config = ImporterConfig::from_toml_str("").unwrap();
        assert_eq!(config.value(FORMAT_OPTION), Some(""));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ImporterConfig::from_toml_str("format = "),
            Err(Error::ConfigParse(_))
        ));
    }
}
