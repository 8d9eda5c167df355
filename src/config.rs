//! Layered settings for the `fpath` tool.
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - `.fpath/settings.toml`, found by walking up from the working directory
//! - environment variables
//!
//! # Environment Variables
//!
//! Variables are prefixed with `FPATH_` and use double underscores to
//! separate nested levels:
//! - `FPATH_KV__SEPARATOR=:` sets `kv.separator`
//! - `FPATH_WATCH__RECURSIVE=false` sets `watch.recursive`
//! - `FPATH_LOGGING__DEFAULT=debug` sets `logging.default`

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kv::LoadOptions;
use crate::watcher::WatchOptions;

/// Directory holding the settings file.
pub const CONFIG_DIR: &str = ".fpath";
/// Settings file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "settings.toml";

const ENV_PREFIX: &str = "FPATH_";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration file already exists at {0}. Use --force to overwrite")]
    AlreadyExists(PathBuf),
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Defaults for loading key-value files
    #[serde(default)]
    pub kv: KvConfig,

    #[serde(default)]
    pub watch: WatchConfig,
}

/// Log levels: a default plus per-target overrides.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,

    #[serde(default)]
    pub modules: IndexMap<String, String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KvConfig {
    #[serde(default = "default_separator")]
    pub separator: String,

    #[serde(default)]
    pub unquote: bool,

    #[serde(default)]
    pub expand_vars: bool,

    /// Export loaded pairs into the process environment
    #[serde(default)]
    pub set_env: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WatchConfig {
    #[serde(default = "default_true")]
    pub recursive: bool,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_version() -> u32 {
    1
}
fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator() -> String {
    "=".to_string()
}
fn default_true() -> bool {
    true
}
fn default_channel_capacity() -> usize {
    WatchOptions::default().channel_capacity
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            logging: LoggingConfig::default(),
            kv: KvConfig::default(),
            watch: WatchConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: IndexMap::new(),
        }
    }
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            unquote: false,
            expand_vars: false,
            set_env: false,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            recursive: default_true(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl From<&KvConfig> for LoadOptions {
    fn from(kv: &KvConfig) -> Self {
        LoadOptions::new(kv.separator.clone())
            .unquote(kv.unquote)
            .expand_vars(kv.expand_vars)
            .set_env(kv.set_env)
    }
}

impl From<&WatchConfig> for WatchOptions {
    fn from(watch: &WatchConfig) -> Self {
        WatchOptions {
            recursive: watch.recursive,
            channel_capacity: watch.channel_capacity,
        }
    }
}

impl Settings {
    /// Load configuration from all sources, starting the file search in the
    /// working directory.
    pub fn load() -> Result<Self, Box<figment::Error>> {
        match std::env::current_dir() {
            Ok(dir) => Self::load_in(&dir),
            Err(_) => Self::load_from(Path::new(CONFIG_DIR).join(CONFIG_FILE)),
        }
    }

    /// Load configuration, searching for the settings file from `dir` up.
    pub fn load_in(dir: &Path) -> Result<Self, Box<figment::Error>> {
        let config_path =
            Self::find_config(dir).unwrap_or_else(|| dir.join(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file. A missing file leaves the
    /// defaults in place; environment variables still apply.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(env_provider())
            .extract()
            .map_err(Box::new)
    }

    /// Settings file in the nearest ancestor of `start` that has a
    /// [`CONFIG_DIR`] directory.
    pub fn find_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|ancestor| ancestor.join(CONFIG_DIR))
            .find(|dir| dir.is_dir())
            .map(|dir| dir.join(CONFIG_FILE))
    }

    /// Save current configuration to file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write default settings to `.fpath/settings.toml` under `dir`.
    pub fn init_config_file(dir: &Path, force: bool) -> Result<PathBuf, ConfigError> {
        let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILE);
        if !force && config_path.exists() {
            return Err(ConfigError::AlreadyExists(config_path));
        }
        Settings::default().save(&config_path)?;
        crate::log_event!("config", "created", "{}", config_path.display());
        Ok(config_path)
    }
}

/// `FPATH_A__B` -> `a.b`
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX).map(|key| key.as_str().to_lowercase().replace("__", ".").into())
}
