//! Command-line surface and dispatch
//!
//! [`Cli`] is parsed in `main`; [`execute`] runs one parsed subcommand
//! against an explicit vault, automation backend and output stream.

use std::io::Write;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::aliases::LoginPassword;
use crate::automation::{PageAutomation, SurveyProfile};
use crate::error::CommandError;
use crate::key_ops::key_fingerprint;
use crate::runner::run_batch;
use crate::vault::Vault;

#[derive(Parser)]
#[command(name = "daily-health-check", version)]
#[command(about = "Submit the daily health check for registered users", long_about = None)]
pub struct Cli {
    /// Config file (default: config.toml next to the executable)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Vault file, overriding the configured location
    #[arg(long, global = true, value_name = "PATH")]
    pub vault: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add a user to the daily health check list
    AddUser {
        /// User's full name
        #[arg(long)]
        name: String,

        /// User's login id
        #[arg(long)]
        username: String,

        /// User's login password
        #[arg(long)]
        password: String,
    },

    /// Run the daily health check for every user, or a single one
    #[command(
        after_help = "Needs chromedriver running at the configured [browser] webdriver_url \
                      (default http://localhost:9515), e.g. `chromedriver --port=9515`."
    )]
    Run {
        /// Zero-based position of the user in the vault
        #[arg(long, value_name = "N")]
        index: Option<usize>,
    },

    /// Create an empty vault with a new key
    Init,

    /// List registered users with their index
    ListUsers,
}

/// Run one subcommand
///
/// Vault errors abort before any browser is started. Individual check
/// failures during `run` are reported on `out` and are not errors.
pub fn execute<A, W>(
    command: Command,
    vault: &Vault,
    automation: &A,
    survey: &SurveyProfile,
    out: &mut W,
) -> Result<(), CommandError>
where
    A: PageAutomation,
    W: Write,
{
    match command {
        Command::AddUser {
            name,
            username,
            password,
        } => {
            let password = LoginPassword::new(password);
            vault.register(&name, &username, &password)?;
            writeln!(
                out,
                "Added user \"{username}\" to the daily health check list."
            )?;
        }
        Command::Run { index } => {
            let credentials = vault.load_for_run(index)?;
            run_batch(automation, survey, &credentials, out)?;
        }
        Command::Init => {
            let key = vault.init()?;
            writeln!(
                out,
                "Created vault at {} (key fingerprint {}).",
                vault.path().display(),
                key_fingerprint(&key)
            )?;
        }
        Command::ListUsers => {
            let records = vault.records()?;
            if records.is_empty() {
                writeln!(out, "No users registered.")?;
            }
            for (index, record) in records.iter().enumerate() {
                writeln!(out, "{index}: {} ({})", record.name, record.username)?;
            }
        }
    }
    Ok(())
}
