use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Which modifier arms the cycle hotkey and whose release commits it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModifierKey {
    #[default]
    Alt,
    Control,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Modifier half of the cycle combo (the trigger key is fixed to the
    /// backtick position).
    pub modifier: ModifierKey,
    /// When set, minimized windows drop out of cycling entirely: they are
    /// pruned from MRU lists and never picked up as candidates.
    pub ignore_minimized_windows: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            modifier: ModifierKey::Alt,
            ignore_minimized_windows: false,
        }
    }
}

impl Config {
    /// `<config_dir>/wincycle/wincycle.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("wincycle").join("wincycle.toml"))
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }

    /// Like `load`, but a missing file quietly falls back to the defaults.
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Self::load(path)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parses_a_full_config() {
        let file = write_config("modifier = \"control\"\nignore_minimized_windows = true\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.modifier, ModifierKey::Control);
        assert!(config.ignore_minimized_windows);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let file = write_config("ignore_minimized_windows = true\n");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.modifier, ModifierKey::Alt);
        assert!(config.ignore_minimized_windows);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("modifier = \"hyper\"\n");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn error_messages_name_the_offending_path() {
        let file = write_config("modifier = \"hyper\"\n");
        let parse = Config::load(file.path()).unwrap_err();
        assert!(parse.to_string().contains(&file.path().display().to_string()));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let read = Config::load(&missing).unwrap_err();
        assert!(read.to_string().contains(&missing.display().to_string()));
    }

    #[test]
    fn modifier_string_forms_match_the_config_forms() {
        assert_eq!("alt".parse::<ModifierKey>().unwrap(), ModifierKey::Alt);
        assert_eq!("control".parse::<ModifierKey>().unwrap(), ModifierKey::Control);
        assert_eq!(ModifierKey::Control.to_string(), "control");
    }
}
