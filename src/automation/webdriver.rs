//! [`PageAutomation`] backed by a WebDriver endpoint (chromedriver)
//!
//! thirtyfour is async; each session owns a current-thread tokio runtime
//! and blocks on it, so callers stay synchronous and sequential.

use std::time::Duration;

use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use super::{Locator, PageAutomation, PageSession};
use crate::config::BrowserConfig;
use crate::error::{AutomationError, AutomationResult};

/// Launches Chrome sessions through `webdriver_url`
#[derive(Debug, Clone)]
pub struct WebDriverAutomation {
    webdriver_url: String,
    headless: bool,
    poll_interval: Duration,
}

impl WebDriverAutomation {
    pub fn from_config(browser: &BrowserConfig) -> Self {
        Self {
            webdriver_url: browser.webdriver_url.clone(),
            headless: browser.headless,
            poll_interval: browser.poll_interval(),
        }
    }
}

impl PageAutomation for WebDriverAutomation {
    type Session = WebDriverSession;

    fn open_session(&self) -> AutomationResult<WebDriverSession> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AutomationError::Driver(format!("tokio runtime: {e}")))?;

        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.add_arg("--headless").map_err(driver_error)?;
        }

        debug!(url = %self.webdriver_url, headless = self.headless, "starting browser session");
        let driver = runtime
            .block_on(WebDriver::new(self.webdriver_url.as_str(), caps))
            .map_err(|e| {
                AutomationError::Driver(format!(
                    "no chromedriver session at {}: {e}",
                    self.webdriver_url
                ))
            })?;

        Ok(WebDriverSession {
            runtime,
            driver: Some(driver),
            poll_interval: self.poll_interval,
        })
    }
}

pub struct WebDriverSession {
    runtime: Runtime,
    driver: Option<WebDriver>,
    poll_interval: Duration,
}

impl WebDriverSession {
    fn driver(&self) -> AutomationResult<&WebDriver> {
        self.driver
            .as_ref()
            .ok_or_else(|| AutomationError::Driver("browser session already closed".into()))
    }

    fn find(&self, locator: &Locator) -> AutomationResult<WebElement> {
        let driver = self.driver()?;
        let found = self
            .runtime
            .block_on(driver.find_all(by(locator)))
            .map_err(driver_error)?;
        found
            .into_iter()
            .next()
            .ok_or_else(|| AutomationError::ElementNotFound(locator.to_string()))
    }
}

impl PageSession for WebDriverSession {
    fn navigate(&mut self, url: &str) -> AutomationResult<()> {
        let driver = self.driver()?;
        self.runtime.block_on(driver.goto(url)).map_err(driver_error)
    }

    fn type_into(&mut self, locator: &Locator, text: &str) -> AutomationResult<()> {
        let element = self.find(locator)?;
        self.runtime
            .block_on(element.send_keys(text))
            .map_err(driver_error)
    }

    fn click(&mut self, locator: &Locator) -> AutomationResult<()> {
        let element = self.find(locator)?;
        self.runtime.block_on(element.click()).map_err(driver_error)
    }

    fn is_present(&mut self, locator: &Locator) -> AutomationResult<bool> {
        let driver = self.driver()?;
        let found = self
            .runtime
            .block_on(driver.find_all(by(locator)))
            .map_err(driver_error)?;
        debug!(%locator, present = !found.is_empty(), "probed element");
        Ok(!found.is_empty())
    }

    fn enter_frame(&mut self, locator: &Locator) -> AutomationResult<()> {
        let frame = self.find(locator)?;
        self.runtime
            .block_on(frame.enter_frame())
            .map_err(driver_error)
    }

    fn leave_frame(&mut self) -> AutomationResult<()> {
        let driver = self.driver()?;
        self.runtime
            .block_on(driver.enter_default_frame())
            .map_err(driver_error)
    }

    fn wait_for(&mut self, locator: &Locator, timeout: Duration) -> AutomationResult<()> {
        let driver = self.driver()?;
        let appeared = self
            .runtime
            .block_on(
                driver
                    .query(by(locator))
                    .wait(timeout, self.poll_interval)
                    .exists(),
            )
            .map_err(driver_error)?;

        if appeared {
            Ok(())
        } else {
            Err(AutomationError::Timeout {
                locator: locator.to_string(),
                timeout,
            })
        }
    }

    fn close(&mut self) -> AutomationResult<()> {
        match self.driver.take() {
            Some(driver) => {
                debug!("quitting browser session");
                self.runtime.block_on(driver.quit()).map_err(driver_error)
            }
            None => Ok(()),
        }
    }
}

fn by(locator: &Locator) -> By {
    match locator {
        Locator::Id(id) => By::Id(id.as_str()),
        Locator::XPath(xpath) => By::XPath(xpath.as_str()),
    }
}

fn driver_error(err: WebDriverError) -> AutomationError {
    AutomationError::Driver(err.to_string())
}
