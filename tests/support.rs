// tests/support.rs
//! Test fixtures: temporary vaults and a scripted fake browser
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use daily_health_check::automation::{Locator, PageAutomation, PageSession};
use daily_health_check::crypto::generate_key;
use daily_health_check::error::{AutomationError, AutomationResult};
use daily_health_check::{Credential, LoginPassword, Vault, VaultDocument};
use tempfile::TempDir;

/// A vault file inside its own temp directory
pub struct TestVault {
    pub dir: TempDir,
    pub vault: Vault,
}

impl TestVault {
    /// `{"key": <fresh key>, "users": []}`, written the way an operator would
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("vault.json");
        let document = VaultDocument {
            key: generate_key().expose_secret().clone(),
            users: Vec::new(),
            extra: serde_json::Map::new(),
        };
        std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap())
            .expect("write vault");

        Self {
            vault: Vault::with_embedded_key(&path),
            dir,
        }
    }

    pub fn with_users(users: &[(&str, &str, &str)]) -> Self {
        let test_vault = Self::empty();
        for (name, username, password) in users {
            test_vault
                .vault
                .register(name, username, &LoginPassword::new(password.to_string()))
                .expect("register user");
        }
        test_vault
    }

    pub fn path(&self) -> PathBuf {
        self.vault.path().to_path_buf()
    }

    pub fn document(&self) -> VaultDocument {
        self.vault.load_document().expect("load vault")
    }
}

pub fn credential(name: &str, username: &str, password: &str) -> Credential {
    Credential {
        name: name.into(),
        username: username.into(),
        password: LoginPassword::new::<String>(password.into()),
    }
}

/// Everything the routine asked the browser to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open,
    Navigate(String),
    Type(Locator, String),
    Click(Locator),
    Probe(Locator),
    EnterFrame(Locator),
    LeaveFrame,
    Wait(Locator, Duration),
    Close,
}

/// Scripted stand-in for a browser
///
/// Every element exists and every wait succeeds unless listed in
/// `missing`. Probes only find elements listed in `present`. Users in
/// `unapproved` never get their push approved, so every wait in their
/// session times out.
#[derive(Clone, Default)]
pub struct FakeAutomation {
    pub calls: Rc<RefCell<Vec<Call>>>,
    pub present: HashSet<Locator>,
    pub missing: HashSet<Locator>,
    pub unapproved: HashSet<String>,
    pub fail_launch: bool,
    pub fail_close: bool,
}

impl FakeAutomation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_present(mut self, locator: Locator) -> Self {
        self.present.insert(locator);
        self
    }

    pub fn with_missing(mut self, locator: Locator) -> Self {
        self.missing.insert(locator);
        self
    }

    pub fn never_approving(mut self, username: &str) -> Self {
        self.unapproved.insert(username.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.borrow().iter().filter(|c| *c == call).count()
    }

    /// Text typed into any field, in order
    pub fn typed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Type(_, text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }
}

impl PageAutomation for FakeAutomation {
    type Session = FakeSession;

    fn open_session(&self) -> AutomationResult<FakeSession> {
        if self.fail_launch {
            return Err(AutomationError::Driver("chromedriver not reachable".into()));
        }
        self.calls.borrow_mut().push(Call::Open);
        Ok(FakeSession {
            script: self.clone(),
            login: None,
        })
    }
}

pub struct FakeSession {
    script: FakeAutomation,
    login: Option<String>,
}

impl FakeSession {
    fn record(&self, call: Call) {
        self.script.calls.borrow_mut().push(call);
    }

    fn check(&self, locator: &Locator) -> AutomationResult<()> {
        if self.script.missing.contains(locator) {
            Err(AutomationError::ElementNotFound(locator.to_string()))
        } else {
            Ok(())
        }
    }
}

impl PageSession for FakeSession {
    fn navigate(&mut self, url: &str) -> AutomationResult<()> {
        self.record(Call::Navigate(url.into()));
        Ok(())
    }

    fn type_into(&mut self, locator: &Locator, text: &str) -> AutomationResult<()> {
        self.record(Call::Type(locator.clone(), text.into()));
        self.check(locator)?;
        // The username is the first thing typed
        if self.login.is_none() {
            self.login = Some(text.into());
        }
        Ok(())
    }

    fn click(&mut self, locator: &Locator) -> AutomationResult<()> {
        self.record(Call::Click(locator.clone()));
        self.check(locator)
    }

    fn is_present(&mut self, locator: &Locator) -> AutomationResult<bool> {
        self.record(Call::Probe(locator.clone()));
        Ok(self.script.present.contains(locator))
    }

    fn enter_frame(&mut self, locator: &Locator) -> AutomationResult<()> {
        self.record(Call::EnterFrame(locator.clone()));
        self.check(locator)
    }

    fn leave_frame(&mut self) -> AutomationResult<()> {
        self.record(Call::LeaveFrame);
        Ok(())
    }

    fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> AutomationResult<()> {
        self.record(Call::Wait(locator.clone(), timeout));
        let unapproved = self
            .login
            .as_ref()
            .is_some_and(|user| self.script.unapproved.contains(user));
        if unapproved || self.script.missing.contains(locator) {
            return Err(AutomationError::Timeout {
                locator: locator.to_string(),
                timeout,
            });
        }
        Ok(())
    }

    fn close(&mut self) -> AutomationResult<()> {
        self.record(Call::Close);
        if self.script.fail_close {
            return Err(AutomationError::Driver("session already gone".into()));
        }
        Ok(())
    }
}
