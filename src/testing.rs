//! Recording action-runner for exercising stories without a browser.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::runner::{ActionRunner, Locator, StoryError};

/// One recorded runner call, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    WaitForNavigate,
    WaitForElement(Locator),
    ScrollIntoView(Locator),
    Click(Locator),
    ExecuteScript(String),
    EvaluateScript(String),
    Wait(Duration),
    RepeatScroll(u32),
    WaitForDocumentReady,
    Login {
        account: String,
        credentials_file: PathBuf,
    },
}

/// `ActionRunner` that records every call and succeeds, unless armed to
/// fail a specific element wait or the next navigation wait.
#[derive(Default)]
pub struct RecordingRunner {
    pub actions: Vec<Action>,
    evaluate_result: bool,
    failing_element: Option<Locator>,
    failing_navigation: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the result every `evaluate_script` call returns (defaults to
    /// false, i.e. "element absent").
    pub fn evaluate_returns(&mut self, result: bool) {
        self.evaluate_result = result;
    }

    /// Make the element wait for `locator` expire with `ElementNotFound`.
    pub fn fail_element_wait_on(&mut self, locator: Locator) {
        self.failing_element = Some(locator);
    }

    /// Make every navigation wait expire with `NavigationTimeout`.
    pub fn fail_navigation(&mut self) {
        self.failing_navigation = true;
    }

    /// Locators clicked, in order.
    pub fn clicks(&self) -> Vec<Locator> {
        self.actions
            .iter()
            .filter_map(|action| match action {
                Action::Click(locator) => Some(locator.clone()),
                _ => None,
            })
            .collect()
    }
}

impl ActionRunner for RecordingRunner {
    fn wait_for_navigate(&mut self) -> Result<(), StoryError> {
        self.actions.push(Action::WaitForNavigate);
        if self.failing_navigation {
            return Err(StoryError::NavigationTimeout);
        }
        Ok(())
    }

    fn wait_for_element(
        &mut self,
        locator: &Locator,
        _timeout: Duration,
    ) -> Result<(), StoryError> {
        self.actions.push(Action::WaitForElement(locator.clone()));
        if self.failing_element.as_ref() == Some(locator) {
            return Err(StoryError::element_not_found(locator));
        }
        Ok(())
    }

    fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), StoryError> {
        self.actions.push(Action::ScrollIntoView(locator.clone()));
        Ok(())
    }

    fn click(&mut self, locator: &Locator) -> Result<(), StoryError> {
        self.actions.push(Action::Click(locator.clone()));
        Ok(())
    }

    fn execute_script(&mut self, script: &str) -> Result<(), StoryError> {
        self.actions.push(Action::ExecuteScript(script.to_string()));
        Ok(())
    }

    fn evaluate_script(&mut self, script: &str) -> Result<bool, StoryError> {
        self.actions.push(Action::EvaluateScript(script.to_string()));
        Ok(self.evaluate_result)
    }

    fn wait(&mut self, duration: Duration) -> Result<(), StoryError> {
        self.actions.push(Action::Wait(duration));
        Ok(())
    }

    fn repeat_scroll(&mut self, repeat_count: u32) -> Result<(), StoryError> {
        self.actions.push(Action::RepeatScroll(repeat_count));
        Ok(())
    }

    fn wait_for_document_ready(&mut self) -> Result<(), StoryError> {
        self.actions.push(Action::WaitForDocumentReady);
        Ok(())
    }

    fn login(&mut self, account: &str, credentials_file: &Path) -> Result<(), StoryError> {
        self.actions.push(Action::Login {
            account: account.to_string(),
            credentials_file: credentials_file.to_path_buf(),
        });
        Ok(())
    }
}
