//! Configuration file support for rmdfm CLI
//!
//! Loads settings from `_rmdfm.toml` configuration file.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name (following R Markdown's `_output.yml` convention)
pub const CONFIG_FILE_NAME: &str = "_rmdfm.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str = "https://raw.githubusercontent.com/eitsupi/rmd-frontmatter/main/crates/rmd-frontmatter-cli/schema/rmdfm.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// JSON output configuration
    #[serde(skip_serializing_if = "OutputConfig::is_empty")]
    pub output: OutputConfig,
    /// Editing configuration
    #[serde(skip_serializing_if = "EditConfig::is_empty")]
    pub edit: EditConfig,
}

/// JSON output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pretty: Option<bool>,
}

impl OutputConfig {
    fn is_empty(&self) -> bool {
        self.pretty.is_none()
    }
}

/// Editing configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct EditConfig {
    /// Write the updated record back to the input file instead of stdout (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_place: Option<bool>,
}

impl EditConfig {
    fn is_empty(&self) -> bool {
        self.in_place.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `_rmdfm.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Whether to pretty-print JSON output
    pub fn pretty(&self) -> bool {
        self.output.pretty.unwrap_or(true)
    }

    /// Whether `set` writes back to its input file
    pub fn in_place(&self) -> bool {
        self.edit.in_place.unwrap_or(false)
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration with common defaults for init command
    pub fn sample() -> Self {
        Config {
            output: OutputConfig { pretty: Some(true) },
            edit: EditConfig {
                in_place: Some(false),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.output.pretty.is_none());
        assert!(config.edit.in_place.is_none());
        assert!(config.pretty());
        assert!(!config.in_place());
    }

    #[test]
    fn test_parse_output_section() {
        let config: Config = toml::from_str(
            r#"
            [output]
            pretty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.output.pretty, Some(false));
        assert!(!config.pretty());
    }

    #[test]
    fn test_parse_edit_section() {
        let config: Config = toml::from_str(
            r#"
            [edit]
            in_place = true
            "#,
        )
        .unwrap();

        assert_eq!(config.edit.in_place, Some(true));
        assert!(config.in_place());
        // Other sections should be default
        assert!(config.output.pretty.is_none());
    }

    #[test]
    fn test_parse_unknown_section_is_ignored() {
        let config: Config = toml::from_str(
            r#"
            [links]
            unresolved_url = "https://example.com"
            "#,
        )
        .unwrap();
        assert!(config.pretty());
    }

    #[test]
    fn test_parse_wrong_type() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [output]
            pretty = "yes"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from_dir(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "[output]\npretty = false\n").unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap().unwrap();
        assert_eq!(config.output.pretty, Some(false));
    }

    #[test]
    fn test_serialize_empty_config() {
        let config = Config::default();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        // Empty config should have minimal content
        assert!(!toml.contains("[output]"));
    }

    #[test]
    fn test_serialize_sample_config() {
        let config = Config::sample();
        let toml = config.to_toml_with_schema().unwrap();
        assert!(toml.starts_with("#:schema"));
        assert!(toml.contains("[output]"));
        assert!(toml.contains("pretty = true"));
        assert!(toml.contains("in_place = false"));
    }

    #[test]
    fn test_json_schema_generation() {
        let schema = Config::json_schema_string().unwrap();
        assert!(schema.contains("\"title\""));
        assert!(schema.contains("OutputConfig"));
    }

    #[test]
    fn test_roundtrip() {
        let config = Config::sample();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.output.pretty, parsed.output.pretty);
        assert_eq!(config.edit.in_place, parsed.edit.in_place);
    }
}
