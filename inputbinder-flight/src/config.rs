//! Configuration loading and parsing

use anyhow::{Context, Result};
use inputbinder_core::BinderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub bindings: BindingsConfig,
    #[serde(default)]
    pub binder: BinderConfig,
    #[serde(default)]
    pub trim: TrimConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the bindings file lives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BindingsConfig {
    /// Directory the application is installed in
    #[serde(default)]
    pub mod_root: PathBuf,
    /// File name of the bindings file inside `mod_root`
    #[serde(default = "default_bindings_file")]
    pub file: String,
}

fn default_bindings_file() -> String {
    "input.json".to_string()
}

impl Default for BindingsConfig {
    fn default() -> Self {
        Self {
            mod_root: PathBuf::new(),
            file: default_bindings_file(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrimConfig {
    /// Trim is clamped to [-limit, limit]
    #[serde(default = "default_trim_limit")]
    pub limit: f32,
}

fn default_trim_limit() -> f32 {
    1.0
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            limit: default_trim_limit(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub verbose: u8,
    #[serde(default)]
    pub quiet: bool,
}

impl AppConfig {
    /// Configuration rooted at `mod_root`, everything else defaulted
    pub fn with_mod_root(mod_root: impl Into<PathBuf>) -> Self {
        Self {
            bindings: BindingsConfig {
                mod_root: mod_root.into(),
                ..BindingsConfig::default()
            },
            ..Self::default()
        }
    }

    /// Full path of the bindings file
    pub fn bindings_path(&self) -> PathBuf {
        self.bindings.mod_root.join(&self.bindings.file)
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    if config.bindings.file.is_empty() {
        anyhow::bail!("Config file {:?} names an empty bindings file", path);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [bindings]
            mod_root = "GameData/Inputbinder"

            [binder]
            disallowed_patterns = ["Gamepad"]
            persist_baseline = false

            [trim]
            limit = 0.5

            [logging]
            verbose = 2
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.bindings.file, "input.json");
        assert_eq!(
            config.bindings_path(),
            Path::new("GameData/Inputbinder").join("input.json")
        );
        assert_eq!(config.binder.disallowed_patterns, vec!["Gamepad".to_string()]);
        assert!(!config.binder.persist_baseline);
        assert!(config.binder.pretty);
        assert_eq!(config.trim.limit, 0.5);
        assert_eq!(config.logging.verbose, 2);
        assert!(!config.logging.quiet);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.bindings_path(), PathBuf::from("input.json"));
        assert!(config.binder.is_disallowed("<Gamepad>/leftStick/x"));
        assert_eq!(config.trim.limit, 1.0);
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputbinder.toml");
        fs::write(&path, "[bindings]\nfile = \"controls.json\"\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.bindings.file, "controls.json");

        fs::write(&path, "[bindings]\nfile = \"\"\n").unwrap();
        assert!(load_config(&path).is_err());

        let missing = load_config(&dir.path().join("missing.toml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));
    }
}
