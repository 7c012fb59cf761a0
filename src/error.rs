// src/error.rs
//! Public error types for the entire crate
//!
//! Vault and config errors are fatal for an invocation. Automation errors
//! only ever fail the current user's attempt.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::automation::Step;

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("vault I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vault file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("vault already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("vault key is not a valid Fernet key")]
    InvalidKey,

    #[error("vault key environment variable {var} is not set")]
    MissingKey { var: String },

    #[error("user index {index} is out of range (vault has {len} user(s))")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("could not decrypt the password of user {name:?} (wrong key or tampered vault)")]
    Decryption { name: String },

    #[error("decrypted password of user {name:?} is not valid UTF-8")]
    NotUtf8 { name: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot locate the vault: {0}")]
    NoVaultLocation(#[source] std::io::Error),
}

/// What went wrong while talking to the browser
#[derive(Error, Debug)]
pub enum AutomationError {
    #[error("browser driver error: {0}")]
    Driver(String),

    #[error("element {0} not found")]
    ElementNotFound(String),

    #[error("timed out after {timeout:?} waiting for {locator}")]
    Timeout { locator: String, timeout: Duration },
}

/// A failed attempt for one user: the step that broke and why
#[derive(Error, Debug)]
#[error("{step}: {source}")]
pub struct StepFailure {
    pub step: Step,
    #[source]
    pub source: AutomationError,
}

impl StepFailure {
    pub fn new(step: Step, source: AutomationError) -> Self {
        Self { step, source }
    }
}

/// Failure of a whole subcommand
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

pub type VaultResult<T> = std::result::Result<T, VaultError>;
pub type AutomationResult<T> = std::result::Result<T, AutomationError>;
