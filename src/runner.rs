use std::fmt;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

/// Points at an element on the current page.
///
/// Stories address repeated content ("the nth headline") by index into the
/// matches of a CSS selector; one-off controls (a close button, a save
/// button) by plain selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    /// First match of a CSS selector.
    Css(&'static str),
    /// Nth match of a CSS selector, zero-based.
    Nth {
        selector: &'static str,
        index: usize,
    },
}

impl Locator {
    pub fn nth(selector: &'static str, index: usize) -> Self {
        Locator::Nth { selector, index }
    }

    /// JavaScript expression resolving to the element, for runners that
    /// drive a real browser.
    pub fn element_function(&self) -> String {
        match self {
            Locator::Css(selector) => {
                format!("document.querySelector(\"{}\")", selector)
            }
            Locator::Nth { selector, index } => {
                format!("document.querySelectorAll(\"{}\")[{}]", selector, index)
            }
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => f.write_str(selector),
            Locator::Nth { selector, index } => write!(f, "{}[{}]", selector, index),
        }
    }
}

/// The only failures a story can surface. Both are terminal for the run;
/// the driver marks the story failed and moves on. Optional UI that may be
/// absent is probed with `evaluate_script`, never waited on.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("element not found: {locator}")]
    ElementNotFound { locator: String },
    #[error("navigation timed out")]
    NavigationTimeout,
}

impl StoryError {
    pub fn element_not_found(locator: &Locator) -> Self {
        StoryError::ElementNotFound {
            locator: locator.to_string(),
        }
    }
}

/// The external automation collaborator a story drives.
///
/// Every call is synchronous: it returns once the browser has completed the
/// action. Stories issue one action at a time and never overlap steps.
pub trait ActionRunner {
    /// Block until the pending page navigation finishes.
    fn wait_for_navigate(&mut self) -> Result<(), StoryError>;

    /// Block until the element exists, up to `timeout`.
    fn wait_for_element(&mut self, locator: &Locator, timeout: Duration)
        -> Result<(), StoryError>;

    /// Scroll the element into the viewport, only if not already visible.
    fn scroll_into_view(&mut self, locator: &Locator) -> Result<(), StoryError>;

    fn click(&mut self, locator: &Locator) -> Result<(), StoryError>;

    /// Run a script for its side effect.
    fn execute_script(&mut self, script: &str) -> Result<(), StoryError>;

    /// Run a script and interpret the result as a boolean, for probing
    /// optional UI.
    fn evaluate_script(&mut self, script: &str) -> Result<bool, StoryError>;

    fn wait(&mut self, duration: Duration) -> Result<(), StoryError>;

    /// Browser-driven scroll repeated `repeat_count` additional times.
    fn repeat_scroll(&mut self, repeat_count: u32) -> Result<(), StoryError>;

    /// Block until document.readyState is complete.
    fn wait_for_document_ready(&mut self) -> Result<(), StoryError>;

    /// Credential-based login for `account`, reading secrets from
    /// `credentials_file`.
    fn login(&mut self, account: &str, credentials_file: &Path) -> Result<(), StoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_locator_renders_query_selector() {
        let loc = Locator::Css(".close");
        assert_eq!(loc.element_function(), "document.querySelector(\".close\")");
        assert_eq!(loc.to_string(), ".close");
    }

    #[test]
    fn nth_locator_renders_indexed_query_selector_all() {
        let loc = Locator::nth(".story-heading > a", 3);
        assert_eq!(
            loc.element_function(),
            "document.querySelectorAll(\".story-heading > a\")[3]"
        );
        assert_eq!(loc.to_string(), ".story-heading > a[3]");
    }

    #[test]
    fn element_not_found_names_the_locator() {
        let err = StoryError::element_not_found(&Locator::nth(".photo", 2));
        assert_eq!(err.to_string(), "element not found: .photo[2]");
    }
}
