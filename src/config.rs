use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use std::fs;
use crate::error::ConfigError;
use crate::paths::default_drive_prefix;
use crate::sources::filesystem::DEFAULT_CAP;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct GeneralConfig {
    #[serde(default = "default_drive_prefix")]
    pub drive_prefix: String,
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Directory that bare names are listed against.
    #[serde(default)]
    pub base_dir: Option<String>,
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

fn default_separator() -> char { std::path::MAIN_SEPARATOR }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            drive_prefix: default_drive_prefix(),
            separator: default_separator(),
            base_dir: None,
            history_file: None,
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_cap")]
    pub cap: usize,
    /// Regexes matched against child names; matches are never listed.
    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_cap() -> usize { DEFAULT_CAP }

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            cap: default_cap(),
            exclude: Vec::new(),
        }
    }
}

pub fn config_path() -> PathBuf {
    match ProjectDirs::from("org", "quickrun", "quickrun") {
        Some(dirs) => dirs.config_dir().join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// A missing file gives the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.scan.cap, 20);
        assert!(config.scan.exclude.is_empty());
        assert!(config.general.base_dir.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
drive_prefix = "D:"
separator = "\\"
base_dir = "D:\\Users\\me"

[scan]
exclude = ["^\\$"]
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.drive_prefix, "D:");
        assert_eq!(config.general.separator, '\\');
        assert_eq!(config.general.base_dir.as_deref(), Some("D:\\Users\\me"));
        assert_eq!(config.scan.cap, 20);
        assert_eq!(config.scan.exclude, vec!["^\\$".to_string()]);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[scan\ncap = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }
}
