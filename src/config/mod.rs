//! Configuration system for daily-health-check
//!
//! Optional TOML file, every field defaulted. Loaded explicitly by the
//! entry point and passed down; there is no global config.

pub use app::{
    resolve_config_path, BrowserConfig, Config, FormConfig, KeySource, KeysConfig, VaultConfig,
};

mod app;
mod defaults;
