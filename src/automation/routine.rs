//! The scripted check: log in, wait for the push approval, answer the survey
//!
//! A straight line of page interactions. Any failure ends the attempt and
//! the browser is closed on every path out.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::{Locator, PageAutomation, PageSession, Step};
use crate::config::FormConfig;
use crate::error::{AutomationError, StepFailure};
use crate::vault::Credential;

/// Where everything lives on the survey and login pages
#[derive(Debug, Clone)]
pub struct SurveyProfile {
    pub survey_url: String,
    pub username_field: Locator,
    pub password_field: Locator,
    pub login_submit: Locator,
    pub secondary_auth_frame: Locator,
    pub secondary_auth_confirm: Locator,
    pub approval_answer: Locator,
    pub status_answer: Locator,
    pub next_button: Locator,
    pub approval_timeout: Duration,
    pub status_timeout: Duration,
}

impl From<&FormConfig> for SurveyProfile {
    fn from(form: &FormConfig) -> Self {
        Self {
            survey_url: form.survey_url.clone(),
            username_field: Locator::id(&form.username_field_id),
            password_field: Locator::id(&form.password_field_id),
            login_submit: Locator::xpath(&form.login_submit_xpath),
            secondary_auth_frame: Locator::id(&form.secondary_auth_frame_id),
            secondary_auth_confirm: Locator::xpath(&form.secondary_auth_confirm_xpath),
            approval_answer: Locator::id(&form.approval_answer_id),
            status_answer: Locator::id(&form.status_answer_id),
            next_button: Locator::id(&form.next_button_id),
            approval_timeout: form.approval_timeout(),
            status_timeout: form.status_timeout(),
        }
    }
}

impl Default for SurveyProfile {
    fn default() -> Self {
        Self::from(&FormConfig::default())
    }
}

/// Run the whole check for one user
///
/// Opens a session, drives it, and always closes it before returning.
pub fn run_check<A: PageAutomation>(
    automation: &A,
    survey: &SurveyProfile,
    credential: &Credential,
) -> Result<(), StepFailure> {
    let session = automation
        .open_session()
        .map_err(failed_at(Step::LaunchBrowser))?;

    let mut guard = SessionGuard::new(session);
    let outcome = drive(guard.session_mut(), survey, credential);
    guard.close();
    outcome
}

fn drive<S: PageSession>(
    session: &mut S,
    survey: &SurveyProfile,
    credential: &Credential,
) -> Result<(), StepFailure> {
    info!(user = %credential.username, "opening survey");
    session
        .navigate(&survey.survey_url)
        .map_err(failed_at(Step::OpenSurvey))?;

    // Institutional login page
    let login = failed_at(Step::SubmitLogin);
    session
        .type_into(&survey.username_field, &credential.username)
        .map_err(&login)?;
    session
        .type_into(&survey.password_field, credential.password.expose_secret())
        .map_err(&login)?;
    session.click(&survey.login_submit).map_err(&login)?;

    // Not every login asks for a second factor
    let second = failed_at(Step::SecondaryAuth);
    if session
        .is_present(&survey.secondary_auth_frame)
        .map_err(&second)?
    {
        debug!("secondary authentication frame present");
        session
            .enter_frame(&survey.secondary_auth_frame)
            .map_err(&second)?;
        session
            .click(&survey.secondary_auth_confirm)
            .map_err(&second)?;
        session.leave_frame().map_err(&second)?;
    }

    info!(
        user = %credential.username,
        timeout = ?survey.approval_timeout,
        "waiting for push approval"
    );
    let approval = failed_at(Step::AwaitApproval);
    session
        .wait_for(&survey.approval_answer, survey.approval_timeout)
        .map_err(&approval)?;
    session.click(&survey.approval_answer).map_err(&approval)?;
    session.click(&survey.next_button).map_err(&approval)?;

    let status = failed_at(Step::AnswerStatus);
    session
        .wait_for(&survey.status_answer, survey.status_timeout)
        .map_err(&status)?;
    session.click(&survey.status_answer).map_err(&status)?;
    session.click(&survey.next_button).map_err(&status)?;

    info!(user = %credential.username, "survey submitted");
    Ok(())
}

fn failed_at(step: Step) -> impl Fn(AutomationError) -> StepFailure {
    move |source| StepFailure::new(step, source)
}

/// Closes the session exactly once, including when unwinding
struct SessionGuard<S: PageSession> {
    session: S,
    closed: bool,
}

impl<S: PageSession> SessionGuard<S> {
    fn new(session: S) -> Self {
        Self {
            session,
            closed: false,
        }
    }

    fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.session.close() {
            warn!(error = %err, "failed to close browser session");
        }
    }
}

impl<S: PageSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.close();
    }
}
