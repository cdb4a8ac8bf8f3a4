//! Token Config
//!
//! The theme configuration consumed by the grammar codec, plus the small loader
//! that finds and parses it once per session.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::token::error::{ConfigError, ConfigResult, IoContext};

/// Config file looked up in the project directory when no override is given
pub const DEFAULT_CONFIG_FILE: &str = "tokens.config.json";

/// Theme configuration, read-only once loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme key -> token name -> value, e.g. `color -> blue -> #00f`
    pub theme: BTreeMap<String, BTreeMap<String, String>>,
    /// Responsive variant name -> human readable description, e.g. `md -> @media (min-width: 700px)`
    pub responsive: BTreeMap<String, String>,
    /// Selector variant name -> selector template, e.g. `hover -> &:hover`
    pub selectors: BTreeMap<String, String>,
}

impl Config {
    pub fn has_responsive(&self, name: &str) -> bool {
        self.responsive.contains_key(name)
    }

    pub fn has_selector(&self, name: &str) -> bool {
        self.selectors.contains_key(name)
    }

    /// Look up the value of `token` under `theme_key`
    pub fn theme_value(&self, theme_key: &str, token: &str) -> Option<&str> {
        self.theme
            .get(theme_key)
            .and_then(|tokens| tokens.get(token))
            .map(String::as_str)
    }
}

/// Resolve the config path for a project directory.
///
/// A relative override is taken relative to `directory`.
pub fn config_path_for(directory: &Path, override_path: Option<&Path>) -> PathBuf {
    match override_path {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => directory.join(path),
        None => directory.join(DEFAULT_CONFIG_FILE),
    }
}

pub fn file_exists(path: &Path) -> bool {
    path.is_file()
}

/// Read and parse the config at `path`. YAML is used for `.yaml`/`.yml`, JSON otherwise.
pub fn load_config_at(path: &Path) -> ConfigResult<Config> {
    if !file_exists(path) {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)
        .with_io_context(&format!("Failed to read config file {}", path.display()))?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let config = if is_yaml {
        serde_yaml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_config_path_defaults_to_project_file() {
        let path = config_path_for(Path::new("/project"), None);
        assert_eq!(path, PathBuf::from("/project").join(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_relative_override_is_joined_to_directory() {
        let path = config_path_for(Path::new("/project"), Some(Path::new(".config/theme.yaml")));
        assert_eq!(path, PathBuf::from("/project/.config/theme.yaml"));
    }

    #[test]
    fn test_load_json_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(
            &path,
            r##"{
                "theme": { "color": { "blue": "#00f" } },
                "responsive": { "md": "@media (min-width: 700px)" },
                "selectors": { "hover": "&:hover" }
            }"##,
        )
        .unwrap();

        let config = load_config_at(&path).unwrap();
        assert_eq!(config.theme_value("color", "blue"), Some("#00f"));
        assert!(config.has_responsive("md"));
        assert!(config.has_selector("hover"));
    }

    #[test]
    fn test_load_yaml_config_with_missing_sections() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tokens.yaml");
        fs::write(&path, "theme:\n  space:\n    \"1\": 0.25rem\n").unwrap();

        let config = load_config_at(&path).unwrap();
        assert_eq!(config.theme_value("space", "1"), Some("0.25rem"));
        assert!(config.responsive.is_empty());
        assert!(config.selectors.is_empty());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(!file_exists(&path));
        assert!(matches!(load_config_at(&path), Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_config_at(&path), Err(ConfigError::Json { .. })));
    }
}
