// src/lib.rs
//! daily-health-check: submits the daily health check survey for a small
//! list of registered users
//!
//! - Credential vault: `vault.json` with Fernet-encrypted passwords
//! - Key providers: key from the vault file or from the environment
//! - Browser automation behind a trait, WebDriver (thirtyfour) backend
//! - Sequential batch runner with per-user failure isolation

pub mod aliases;
pub mod automation;
pub mod cli;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod error;
pub mod key_ops;
pub mod runner;
pub mod vault;

// Re-export everything users need at the crate root
pub use aliases::{LoginPassword, VaultKeyText};
pub use config::Config;
pub use error::{AutomationError, CommandError, ConfigError, StepFailure, VaultError};
pub use runner::{run_batch, BatchReport};
pub use vault::{Credential, CredentialRecord, Vault, VaultDocument};
