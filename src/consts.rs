//! Shared constants: file names, environment variables and the default
//! survey profile

use std::time::Duration;

/// File name of the vault, resolved next to the installed executable
pub const VAULT_FILE_NAME: &str = "vault.json";

/// File name of the optional config next to the executable
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Sub-directory of the user config dir searched for `config.toml`
pub const CONFIG_DIR_NAME: &str = "daily-health-check";

/// Points at an explicit config file
pub const CONFIG_ENV_VAR: &str = "DAILY_HEALTH_CHECK_CONFIG";

/// Holds the vault key when `[keys] source = "env"`
pub const DEFAULT_KEY_ENV_VAR: &str = "DAILY_HEALTH_CHECK_KEY";

/// Number of hex characters shown for a key fingerprint
pub const KEY_FINGERPRINT_HEX_LEN: usize = 16;

/// chromedriver's default listen address
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub const DEFAULT_SURVEY_URL: &str =
    "https://yalesurvey.ca1.qualtrics.com/jfe/form/SV_eFnltn7gS5xctc9?Type=checkin";

// Institutional login page
pub const USERNAME_FIELD_ID: &str = "username";
pub const PASSWORD_FIELD_ID: &str = "password";
pub const LOGIN_SUBMIT_XPATH: &str = r#"//*[@id="fm1"]/fieldset/input[4]"#;

// Secondary authentication frame
pub const SECONDARY_AUTH_FRAME_ID: &str = "duo_iframe";
pub const SECONDARY_AUTH_CONFIRM_XPATH: &str =
    r#"//*[@id="auth_methods"]/fieldset[1]/div[1]/button"#;

// Survey questions
pub const APPROVAL_ANSWER_ID: &str = "QID1-3-label";
pub const STATUS_ANSWER_ID: &str = "QID19-2-label";
pub const NEXT_BUTTON_ID: &str = "NextButton";

/// How long the push notification may stay unanswered
pub const APPROVAL_TIMEOUT_SECS: u64 = 63;

/// The status question normally renders right after the first page
pub const STATUS_TIMEOUT_SECS: u64 = 3;
