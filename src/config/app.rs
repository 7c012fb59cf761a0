use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::defaults::*;
use crate::consts::{CONFIG_DIR_NAME, CONFIG_ENV_VAR, CONFIG_FILE_NAME, VAULT_FILE_NAME};
use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub vault: VaultConfig,
    pub keys: KeysConfig,
    pub browser: BrowserConfig,
    pub form: FormConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VaultConfig {
    /// Defaults to `vault.json` next to the executable
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    /// The `key` field of the vault file
    Vault,
    /// An environment variable named by `env_var`
    Env,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub source: KeySource,
    pub env_var: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub poll_interval_ms: u64,
}

/// Element locators and timeouts of the survey page
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormConfig {
    pub survey_url: String,
    pub username_field_id: String,
    pub password_field_id: String,
    pub login_submit_xpath: String,
    pub secondary_auth_frame_id: String,
    pub secondary_auth_confirm_xpath: String,
    pub approval_answer_id: String,
    pub status_answer_id: String,
    pub next_button_id: String,
    pub approval_timeout_secs: u64,
    pub status_timeout_secs: u64,
}

impl Default for KeysConfig {
    fn default() -> Self {
        default_keys()
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        default_browser()
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        default_form()
    }
}

impl BrowserConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl FormConfig {
    pub fn approval_timeout(&self) -> Duration {
        Duration::from_secs(self.approval_timeout_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }
}

impl Config {
    /// Load from the first config file found, or fall back to defaults
    ///
    /// An `explicit` path (from `--config`) or one named by
    /// `DAILY_HEALTH_CHECK_CONFIG` must exist. The implicit locations are
    /// only used when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_config_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => {
                debug!("no config file found, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut conf: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Relative vault paths are relative to the config file
        if let (Some(vault), Some(dir)) = (conf.vault.path.as_mut(), path.parent()) {
            if vault.is_relative() {
                *vault = dir.join(&*vault);
            }
        }

        debug!(path = %path.display(), "loaded config");
        Ok(conf)
    }

    /// Where `vault.json` lives for this installation
    pub fn vault_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.vault.path {
            Some(path) => Ok(path.clone()),
            None => install_dir()
                .map(|dir| dir.join(VAULT_FILE_NAME))
                .map_err(ConfigError::NoVaultLocation),
        }
    }
}

/// Config lookup order: explicit path, env var, next to the executable,
/// then the user config directory
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }

    let beside_exe = install_dir().ok().map(|dir| dir.join(CONFIG_FILE_NAME));
    let user_dir = dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));

    [beside_exe, user_dir]
        .into_iter()
        .flatten()
        .find(|candidate| candidate.is_file())
}
