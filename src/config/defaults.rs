use std::path::PathBuf;

use crate::config::app::{BrowserConfig, FormConfig, KeySource, KeysConfig};
use crate::consts::*;

/// Directory holding the running executable
pub fn install_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}

pub fn default_keys() -> KeysConfig {
    KeysConfig {
        source: KeySource::Vault,
        env_var: DEFAULT_KEY_ENV_VAR.into(),
    }
}

pub fn default_browser() -> BrowserConfig {
    BrowserConfig {
        webdriver_url: DEFAULT_WEBDRIVER_URL.into(),
        headless: true,
        poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
    }
}

pub fn default_form() -> FormConfig {
    FormConfig {
        survey_url: DEFAULT_SURVEY_URL.into(),
        username_field_id: USERNAME_FIELD_ID.into(),
        password_field_id: PASSWORD_FIELD_ID.into(),
        login_submit_xpath: LOGIN_SUBMIT_XPATH.into(),
        secondary_auth_frame_id: SECONDARY_AUTH_FRAME_ID.into(),
        secondary_auth_confirm_xpath: SECONDARY_AUTH_CONFIRM_XPATH.into(),
        approval_answer_id: APPROVAL_ANSWER_ID.into(),
        status_answer_id: STATUS_ANSWER_ID.into(),
        next_button_id: NEXT_BUTTON_ID.into(),
        approval_timeout_secs: APPROVAL_TIMEOUT_SECS,
        status_timeout_secs: STATUS_TIMEOUT_SECS,
    }
}
