//! Runs the check for a batch of users, one after the other
//!
//! Output format (stdout):
//!
//! ```text
//!
//! Performing daily health check for user: Ada Lovelace
//! Success!
//!
//! Performing daily health check for user: Grace Hopper
//!   waiting for approval: timed out after 63s waiting for #QID1-3-label
//! Failed.
//!
//! ```

use std::io::{self, Write};

use tracing::{info, warn};

use crate::automation::{run_check, PageAutomation, SurveyProfile};
use crate::error::StepFailure;
use crate::vault::Credential;

#[derive(Debug)]
pub struct UserOutcome {
    pub name: String,
    pub result: Result<(), StepFailure>,
}

impl UserOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// One outcome per user, in the order they were attempted
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<UserOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Attempt every credential in order
///
/// A failed attempt is reported and the batch moves on; only writing to
/// `out` can abort it.
pub fn run_batch<A, W>(
    automation: &A,
    survey: &SurveyProfile,
    credentials: &[Credential],
    out: &mut W,
) -> io::Result<BatchReport>
where
    A: PageAutomation,
    W: Write,
{
    let mut report = BatchReport::default();

    for credential in credentials {
        writeln!(out)?;
        writeln!(
            out,
            "Performing daily health check for user: {}",
            credential.name
        )?;
        out.flush()?;

        let result = run_check(automation, survey, credential);
        match &result {
            Ok(()) => {
                info!(user = %credential.username, "check succeeded");
                writeln!(out, "Success!")?;
            }
            Err(failure) => {
                warn!(user = %credential.username, error = %failure, "check failed");
                writeln!(out, "  {failure}")?;
                writeln!(out, "Failed.")?;
            }
        }

        report.outcomes.push(UserOutcome {
            name: credential.name.clone(),
            result,
        });
    }

    writeln!(out)?;
    out.flush()?;
    Ok(report)
}
