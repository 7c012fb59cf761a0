// tests/routine_tests.rs
//! The scripted check against a fake browser

use std::time::Duration;

use daily_health_check::automation::{
    run_check, Locator, Step, SurveyProfile, WebDriverAutomation,
};
use daily_health_check::config::BrowserConfig;
use daily_health_check::error::AutomationError;

mod common;
mod support;
use support::{credential, Call, FakeAutomation};

fn survey() -> SurveyProfile {
    SurveyProfile::default()
}

#[test]
fn test_happy_path_without_secondary_auth() {
    common::setup();
    let fake = FakeAutomation::new();
    let survey = survey();

    run_check(&fake, &survey, &credential("Ada", "ada123", "secret!")).unwrap();

    let next = Locator::id("NextButton");
    assert_eq!(
        fake.calls(),
        vec![
            Call::Open,
            Call::Navigate(survey.survey_url.clone()),
            Call::Type(Locator::id("username"), "ada123".into()),
            Call::Type(Locator::id("password"), "secret!".into()),
            Call::Click(Locator::xpath(r#"//*[@id="fm1"]/fieldset/input[4]"#)),
            Call::Probe(Locator::id("duo_iframe")),
            Call::Wait(Locator::id("QID1-3-label"), Duration::from_secs(63)),
            Call::Click(Locator::id("QID1-3-label")),
            Call::Click(next.clone()),
            Call::Wait(Locator::id("QID19-2-label"), Duration::from_secs(3)),
            Call::Click(Locator::id("QID19-2-label")),
            Call::Click(next),
            Call::Close,
        ]
    );
}

#[test]
fn test_secondary_auth_frame_is_confirmed_when_present() {
    let fake = FakeAutomation::new().with_present(Locator::id("duo_iframe"));

    run_check(&fake, &survey(), &credential("Ada", "ada123", "secret!")).unwrap();

    let calls = fake.calls();
    let probe = calls
        .iter()
        .position(|c| *c == Call::Probe(Locator::id("duo_iframe")))
        .unwrap();
    assert_eq!(
        calls[probe + 1..probe + 4],
        [
            Call::EnterFrame(Locator::id("duo_iframe")),
            Call::Click(Locator::xpath(
                r#"//*[@id="auth_methods"]/fieldset[1]/div[1]/button"#
            )),
            Call::LeaveFrame,
        ]
    );
    assert_eq!(fake.count(&Call::Close), 1);
}

#[test]
fn test_approval_timeout_fails_and_still_closes_browser() {
    let fake = FakeAutomation::new().never_approving("ada123");

    let failure = run_check(&fake, &survey(), &credential("Ada", "ada123", "secret!"))
        .unwrap_err();

    assert_eq!(failure.step, Step::AwaitApproval);
    assert!(matches!(
        failure.source,
        AutomationError::Timeout { ref timeout, .. } if *timeout == Duration::from_secs(63)
    ));
    assert_eq!(fake.calls().last(), Some(&Call::Close));
    assert_eq!(fake.count(&Call::Close), 1);
    assert_eq!(fake.count(&Call::Click(Locator::id("NextButton"))), 0);
}

#[test]
fn test_missing_login_field_fails_at_login() {
    let fake = FakeAutomation::new().with_missing(Locator::id("password"));

    let failure = run_check(&fake, &survey(), &credential("Ada", "ada123", "secret!"))
        .unwrap_err();

    assert_eq!(failure.step, Step::SubmitLogin);
    assert!(matches!(
        failure.source,
        AutomationError::ElementNotFound(_)
    ));
    assert_eq!(fake.calls().last(), Some(&Call::Close));
}

#[test]
fn test_status_question_missing_fails_at_status_step() {
    let fake = FakeAutomation::new().with_missing(Locator::id("QID19-2-label"));

    let failure = run_check(&fake, &survey(), &credential("Ada", "ada123", "secret!"))
        .unwrap_err();

    assert_eq!(failure.step, Step::AnswerStatus);
    assert_eq!(failure.to_string().split(':').next(), Some("answering status question"));
    assert_eq!(fake.count(&Call::Close), 1);
}

#[test]
fn test_launch_failure_reports_launch_step() {
    let fake = FakeAutomation {
        fail_launch: true,
        ..FakeAutomation::new()
    };

    let failure = run_check(&fake, &survey(), &credential("Ada", "ada123", "secret!"))
        .unwrap_err();

    assert_eq!(failure.step, Step::LaunchBrowser);
    assert!(fake.calls().is_empty());
}

#[test]
fn test_unreachable_chromedriver_fails_at_launch() {
    let browser = BrowserConfig {
        webdriver_url: "http://127.0.0.1:1".into(),
        ..BrowserConfig::default()
    };
    let automation = WebDriverAutomation::from_config(&browser);

    let failure = run_check(&automation, &survey(), &credential("Ada", "ada123", "secret!"))
        .unwrap_err();

    assert_eq!(failure.step, Step::LaunchBrowser);
    assert!(failure.to_string().contains("no chromedriver session at http://127.0.0.1:1"));
}

#[test]
fn test_close_failure_does_not_change_a_successful_outcome() {
    let fake = FakeAutomation {
        fail_close: true,
        ..FakeAutomation::new()
    };

    assert!(run_check(&fake, &survey(), &credential("Ada", "ada123", "secret!")).is_ok());
    assert_eq!(fake.count(&Call::Close), 1);
}

#[test]
fn test_profile_follows_form_config() {
    let mut form = daily_health_check::config::FormConfig::default();
    form.survey_url = "https://example.test/form".into();
    form.approval_timeout_secs = 5;
    form.next_button_id = "Continue".into();

    let fake = FakeAutomation::new();
    let survey = SurveyProfile::from(&form);
    run_check(&fake, &survey, &credential("Ada", "ada123", "secret!")).unwrap();

    let calls = fake.calls();
    assert_eq!(calls[1], Call::Navigate("https://example.test/form".into()));
    assert!(calls.contains(&Call::Wait(
        Locator::id("QID1-3-label"),
        Duration::from_secs(5)
    )));
    assert_eq!(fake.count(&Call::Click(Locator::id("Continue"))), 2);
}
