//! daily-health-check: register users and run their daily health check

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use daily_health_check::automation::{SurveyProfile, WebDriverAutomation};
use daily_health_check::cli::{execute, Cli};
use daily_health_check::key_ops::provider_from_config;
use daily_health_check::{Config, Vault};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let vault_path = match cli.vault {
        Some(path) => path,
        None => config.vault_path()?,
    };
    debug!(vault = %vault_path.display(), "resolved vault");

    let vault = Vault::new(vault_path, provider_from_config(&config.keys));
    let automation = WebDriverAutomation::from_config(&config.browser);
    let survey = SurveyProfile::from(&config.form);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &vault, &automation, &survey, &mut out)
        .with_context(|| format!("vault {}", vault.path().display()))?;

    Ok(())
}

/// Logs go to stderr; stdout carries only the user-facing lines
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init()
        .ok();
}
