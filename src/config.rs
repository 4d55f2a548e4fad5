//! Configuration file support for fleet-inventory.
//!
//! Provides YAML-based configuration through `fleet-inventory.config.yml`
//! files, including data structures, file loading, and validation.

use anyhow::{bail, Context};
use fleet_inventory::adapters::outbound::memory::IdStrategy;
use fleet_inventory::application::dto::OutputFormat;
use fleet_inventory::shared::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const CONFIG_FILENAME: &str = "fleet-inventory.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<OutputFormat>,
    /// Seed file loaded instead of the demo fleet
    pub data: Option<PathBuf>,
    pub recent_days: Option<u32>,
    pub id_strategy: Option<IdStrategy>,
    pub api_base_url: Option<String>,
    pub token_path: Option<PathBuf>,
    pub login_route: Option<String>,
    pub fail_on_critical: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax and that format is markdown|json and id_strategy is sequential|uuid.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(days) = config.recent_days {
        if !(1..=365).contains(&days) {
            bail!(
                "Invalid config: recent_days must be between 1 and 365, got {}.\n\n\
                 💡 Hint: Use 7 for a one-week window.",
                days
            );
        }
    }

    if let Some(ref url) = config.api_base_url {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!(
                "Invalid config: api_base_url must start with http:// or https://, got '{}'.\n\n\
                 💡 Hint: For example \"https://api.example.com\".",
                url
            );
        }
    }

    if let Some(ref route) = config.login_route {
        if !route.starts_with('/') {
            bail!(
                "Invalid config: login_route must be an absolute path, got '{}'.\n\n\
                 💡 Hint: For example \"/login\".",
                route
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        warn!("Unknown config field '{}' will be ignored", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, content).unwrap();
        config_path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
format: json
data: fleet.json
recent_days: 14
id_strategy: uuid
api_base_url: https://inventory.example.com
token_path: /tmp/token
login_route: /signin
fail_on_critical: true
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.format, Some(OutputFormat::Json));
        assert_eq!(config.data, Some(PathBuf::from("fleet.json")));
        assert_eq!(config.recent_days, Some(14));
        assert_eq!(config.id_strategy, Some(IdStrategy::Uuid));
        assert_eq!(
            config.api_base_url.as_deref(),
            Some("https://inventory.example.com")
        );
        assert_eq!(config.token_path, Some(PathBuf::from("/tmp/token")));
        assert_eq!(config.login_route.as_deref(), Some("/signin"));
        assert_eq!(config.fail_on_critical, Some(true));
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_discover_config_found() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "format: markdown\n").unwrap();

        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.format, Some(OutputFormat::Markdown));
    }

    #[test]
    fn test_discover_config_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config_from_path(Path::new("/nonexistent/config.yml"));
        let err = format!("{}", result.unwrap_err());
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_parse_error() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "invalid: yaml: [[[broken");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_format_value_fails_to_parse() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "format: cyclonedx\n");
        assert!(load_config_from_path(&config_path).is_err());
    }

    #[test]
    fn test_recent_days_out_of_range() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "recent_days: 0\n");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("recent_days must be between 1 and 365"));
    }

    #[test]
    fn test_api_base_url_must_be_http() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "api_base_url: ftp://example.com\n");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("api_base_url must start with http"));
    }

    #[test]
    fn test_login_route_must_be_absolute() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, "login_route: login\n");

        let err = format!("{}", load_config_from_path(&config_path).unwrap_err());
        assert!(err.contains("login_route must be an absolute path"));
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(
            &dir,
            r#"
format: json
check_cve: true
exclude_packages: [pip]
"#,
        );

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.unknown_fields.len(), 2);
        assert!(config.unknown_fields.contains_key("check_cve"));
        assert!(config.unknown_fields.contains_key("exclude_packages"));
    }

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();
        assert!(config.format.is_none());
        assert!(config.data.is_none());
        assert!(config.recent_days.is_none());
        assert!(config.fail_on_critical.is_none());
        assert!(config.unknown_fields.is_empty());
    }
}
