pub mod config;
pub mod platforms;
pub mod runner;
pub mod stories;
pub mod story;
pub mod testing;
pub mod utils;

pub use platforms::{Environment, Os, Platform, PlatformSet};
pub use runner::{ActionRunner, Locator, StoryError};
pub use story::{MediaParams, NewsParams, RunContext, Story, StoryKind};
