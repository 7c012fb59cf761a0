//! Browser automation for one user's health check
//!
//! [`routine::run_check`] is written against the [`PageAutomation`] and
//! [`PageSession`] traits. [`webdriver::WebDriverAutomation`] drives a
//! real Chrome through a WebDriver endpoint; tests substitute a fake.

use std::fmt;
use std::time::Duration;

use crate::error::AutomationResult;

pub mod routine;
pub mod webdriver;

pub use routine::{run_check, SurveyProfile};
pub use webdriver::WebDriverAutomation;

/// How an element on the page is found
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Id(String),
    XPath(String),
}

impl Locator {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn xpath(xpath: impl Into<String>) -> Self {
        Self::XPath(xpath.into())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{id}"),
            Locator::XPath(xpath) => write!(f, "xpath {xpath}"),
        }
    }
}

/// The stages of one check, used to say where an attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    LaunchBrowser,
    OpenSurvey,
    SubmitLogin,
    SecondaryAuth,
    AwaitApproval,
    AnswerStatus,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Step::LaunchBrowser => "launching browser",
            Step::OpenSurvey => "opening survey",
            Step::SubmitLogin => "submitting login",
            Step::SecondaryAuth => "secondary authentication",
            Step::AwaitApproval => "waiting for approval",
            Step::AnswerStatus => "answering status question",
        };
        f.write_str(label)
    }
}

/// Starts browser sessions
pub trait PageAutomation {
    type Session: PageSession;

    fn open_session(&self) -> AutomationResult<Self::Session>;
}

/// One live browser session
///
/// `close` must be safe to call after any other method has failed.
pub trait PageSession {
    fn navigate(&mut self, url: &str) -> AutomationResult<()>;

    fn type_into(&mut self, locator: &Locator, text: &str) -> AutomationResult<()>;

    fn click(&mut self, locator: &Locator) -> AutomationResult<()>;

    /// Probe without waiting; absence is `Ok(false)`, not an error
    fn is_present(&mut self, locator: &Locator) -> AutomationResult<bool>;

    fn enter_frame(&mut self, locator: &Locator) -> AutomationResult<()>;

    /// Back to the top-level document
    fn leave_frame(&mut self) -> AutomationResult<()>;

    /// Poll until the element exists; `Timeout` once `timeout` has elapsed
    fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> AutomationResult<()>;

    fn close(&mut self) -> AutomationResult<()>;
}
