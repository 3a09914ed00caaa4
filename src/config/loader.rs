//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags (applied by the binary)
//! 2. Environment variables
//! 3. `.compose-setup.toml` in the working directory (or `--config`)
//! 4. `~/.config/compose-setup/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::constants;
use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub block: BlockConfig,
    pub license: LicenseConfig,
}

/// Input and output file locations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub public_key: PathBuf,
    pub compose_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            public_key: PathBuf::from(constants::DEFAULT_KEY_PATH),
            compose_file: PathBuf::from(constants::DEFAULT_COMPOSE_PATH),
        }
    }
}

/// Marker strings used to locate and clear the embedded key block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Key name identifying the anchor line.
    pub marker: String,
    /// Block-scalar indicator that must share the anchor line.
    pub indicator: String,
    /// Indentation prefix of the key body lines.
    pub indent: String,
    pub begin_marker: String,
    pub end_marker: String,
    /// Placeholder left in the block by the compose template.
    pub placeholder: String,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            marker: constants::KEY_MARKER.to_string(),
            indicator: constants::BLOCK_INDICATOR.to_string(),
            indent: constants::KEY_INDENT.to_string(),
            begin_marker: constants::PEM_BEGIN.to_string(),
            end_marker: constants::PEM_END.to_string(),
            placeholder: constants::KEY_PLACEHOLDER.to_string(),
        }
    }
}

/// License placeholder handling.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LicenseConfig {
    pub placeholder: String,
    pub activation_marker: String,
    pub portal_url: String,
    /// License key to substitute without prompting.
    pub key: Option<String>,
}

impl std::fmt::Debug for LicenseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LicenseConfig")
            .field("placeholder", &self.placeholder)
            .field("activation_marker", &self.activation_marker)
            .field("portal_url", &self.portal_url)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for LicenseConfig {
    fn default() -> Self {
        Self {
            placeholder: constants::LICENSE_PLACEHOLDER.to_string(),
            activation_marker: constants::ACTIVATION_MARKER.to_string(),
            portal_url: constants::LICENSE_PORTAL_URL.to_string(),
            key: None,
        }
    }
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// `local` overrides the working-directory config file location; when
    /// given explicitly it must exist.
    pub fn load(work_dir: &Path, local: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                tracing::debug!(path = %global_path.display(), "loading global config");
                config.merge(Self::load_file(&global_path)?);
            }
        }

        match local {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading explicit config");
                config.merge(Self::load_file(path)?);
            }
            None => {
                let local_path = work_dir.join(constants::CONFIG_FILENAME);
                if local_path.exists() {
                    tracing::debug!(path = %local_path.display(), "loading local config");
                    config.merge(Self::load_file(&local_path)?);
                }
            }
        }

        config.apply_env_vars(env);

        Ok(config)
    }

    /// Load a config from a specific file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other wins for non-default values).
    fn merge(&mut self, other: Config) {
        let default_paths = PathsConfig::default();
        if other.paths.public_key != default_paths.public_key {
            self.paths.public_key = other.paths.public_key;
        }
        if other.paths.compose_file != default_paths.compose_file {
            self.paths.compose_file = other.paths.compose_file;
        }

        let default_block = BlockConfig::default();
        if other.block.marker != default_block.marker {
            self.block.marker = other.block.marker;
        }
        if other.block.indicator != default_block.indicator {
            self.block.indicator = other.block.indicator;
        }
        if other.block.indent != default_block.indent {
            self.block.indent = other.block.indent;
        }
        if other.block.begin_marker != default_block.begin_marker {
            self.block.begin_marker = other.block.begin_marker;
        }
        if other.block.end_marker != default_block.end_marker {
            self.block.end_marker = other.block.end_marker;
        }
        if other.block.placeholder != default_block.placeholder {
            self.block.placeholder = other.block.placeholder;
        }

        let default_license = LicenseConfig::default();
        if other.license.placeholder != default_license.placeholder {
            self.license.placeholder = other.license.placeholder;
        }
        if other.license.activation_marker != default_license.activation_marker {
            self.license.activation_marker = other.license.activation_marker;
        }
        if other.license.portal_url != default_license.portal_url {
            self.license.portal_url = other.license.portal_url;
        }
        if other.license.key.is_some() {
            self.license.key = other.license.key;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(val) = env.non_empty(constants::ENV_KEY_FILE) {
            self.paths.public_key = PathBuf::from(val);
        }
        if let Some(val) = env.non_empty(constants::ENV_COMPOSE_FILE) {
            self.paths.compose_file = PathBuf::from(val);
        }
        if let Some(val) = env.non_empty(constants::ENV_LICENSE_KEY) {
            self.license.key = Some(val);
        }
    }
}
