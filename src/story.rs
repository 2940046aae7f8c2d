use std::path::PathBuf;
use std::time::Duration;

use crate::config;
use crate::platforms::{DisablePredicate, Environment, PlatformSet};
use crate::runner::{ActionRunner, Locator, StoryError};
use crate::utils::log_info;

/// One-shot step run before the browsing loop: dismiss an interstitial,
/// perform a login. Must be idempotent; element absence is a normal branch.
pub type PreLoadHook = fn(&mut dyn ActionRunner, &RunContext) -> Result<(), StoryError>;

/// Extra scripted interaction appended to viewing a media item. Receives the
/// index of the item currently on screen.
pub type ItemHook = fn(&mut dyn ActionRunner, usize) -> Result<(), StoryError>;

/// Per-run settings supplied by the driver.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub credentials_path: PathBuf,
}

impl Default for RunContext {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from(config::DEFAULT_CREDENTIALS_PATH),
        }
    }
}

/// Knobs for a news-style read loop: open an item, read it, go back, scroll
/// the listing, repeat.
#[derive(Debug, Clone, Copy)]
pub struct NewsParams {
    pub items_to_visit: usize,
    pub item_read_time: Duration,
    pub item_scroll_repeat: u32,
    pub main_page_scroll_repeat: u32,
}

impl NewsParams {
    pub const DEFAULT: Self = Self {
        items_to_visit: 4,
        item_read_time: Duration::from_secs(3),
        item_scroll_repeat: 2,
        main_page_scroll_repeat: 0,
    };
}

/// Knobs for a media paging loop: open an item, view it, advance.
#[derive(Clone, Copy)]
pub struct MediaParams {
    pub items_to_visit: usize,
    pub item_view_time: Duration,
    pub item_selector_index: usize,
    pub increment_index: bool,
    pub view_hook: Option<ItemHook>,
}

impl MediaParams {
    pub const DEFAULT: Self = Self {
        items_to_visit: 15,
        item_view_time: Duration::from_secs(3),
        item_selector_index: 0,
        increment_index: false,
        view_hook: None,
    };
}

#[derive(Clone, Copy)]
pub enum StoryKind {
    News(NewsParams),
    Media(MediaParams),
}

impl StoryKind {
    pub fn label(&self) -> &'static str {
        match self {
            StoryKind::News(_) => "news",
            StoryKind::Media(_) => "media",
        }
    }
}

/// A scripted browsing scenario for one site.
///
/// Stories are immutable static records; all run state lives on the stack of
/// `run`. The driver navigates the browser to `url`, waits for the load, and
/// then calls `run` exactly once.
pub struct Story {
    /// Result-aggregation key; platform variants of a site share it.
    pub name: &'static str,
    pub url: &'static str,
    /// CSS selector matching the repeated "next content" elements.
    pub item_selector: &'static str,
    /// In-site navigation does not trigger full page loads, so navigation
    /// waits are skipped after clicks.
    pub single_page_app: bool,
    pub platforms: PlatformSet,
    /// Exceptional runtime exclusion on top of the platform set.
    pub disabled_when: Option<DisablePredicate>,
    pub kind: StoryKind,
    pub pre_load: Option<PreLoadHook>,
}

impl Story {
    /// Whether the driver may schedule this story in `env`.
    pub fn enabled_in(&self, env: &Environment) -> bool {
        self.platforms.supports(env.platform)
            && !self.disabled_when.map_or(false, |disabled| disabled(env))
    }

    /// Document-loaded lifecycle entry: runs the pre-load hook once, then
    /// the browsing loop. Called by the driver after the initial load of
    /// `url` completes.
    pub fn run(
        &self,
        runner: &mut dyn ActionRunner,
        ctx: &RunContext,
    ) -> Result<(), StoryError> {
        log_info(&format!("Running story: {}", self.name));
        if let Some(hook) = self.pre_load {
            hook(runner, ctx)?;
        }
        match self.kind {
            StoryKind::News(params) => self.browse_news(runner, &params),
            StoryKind::Media(params) => self.browse_media(runner, &params),
        }
    }

    // --- Navigation primitives shared by both loops ---

    fn wait_for_navigation(&self, runner: &mut dyn ActionRunner) -> Result<(), StoryError> {
        if !self.single_page_app {
            runner.wait_for_navigate()?;
        }
        Ok(())
    }

    fn navigate_to_item(
        &self,
        runner: &mut dyn ActionRunner,
        index: usize,
    ) -> Result<(), StoryError> {
        let item = Locator::nth(self.item_selector, index);
        runner.wait_for_element(&item, config::ELEMENT_WAIT_TIMEOUT)?;
        runner.scroll_into_view(&item)?;
        self.click_link(runner, &item)
    }

    fn click_link(
        &self,
        runner: &mut dyn ActionRunner,
        locator: &Locator,
    ) -> Result<(), StoryError> {
        runner.wait_for_element(locator, config::ELEMENT_WAIT_TIMEOUT)?;
        runner.click(locator)?;
        self.wait_for_navigation(runner)
    }

    fn navigate_back(&self, runner: &mut dyn ActionRunner) -> Result<(), StoryError> {
        runner.execute_script("window.history.back()")?;
        self.wait_for_navigation(runner)
    }

    // --- News read loop ---

    fn browse_news(
        &self,
        runner: &mut dyn ActionRunner,
        params: &NewsParams,
    ) -> Result<(), StoryError> {
        for index in 0..params.items_to_visit {
            log_info(&format!(
                "{}: reading item {}/{}",
                self.name,
                index + 1,
                params.items_to_visit
            ));
            self.navigate_to_item(runner, index)?;
            self.read_news_item(runner, params)?;
            self.navigate_back(runner)?;
            self.scroll_main_page(runner, params)?;
        }
        Ok(())
    }

    fn read_news_item(
        &self,
        runner: &mut dyn ActionRunner,
        params: &NewsParams,
    ) -> Result<(), StoryError> {
        runner.wait_for_document_ready()?;
        runner.wait(params.item_read_time / 2)?;
        runner.repeat_scroll(params.item_scroll_repeat)?;
        runner.wait(params.item_read_time / 2)
    }

    fn scroll_main_page(
        &self,
        runner: &mut dyn ActionRunner,
        params: &NewsParams,
    ) -> Result<(), StoryError> {
        runner.wait_for_document_ready()?;
        runner.repeat_scroll(params.main_page_scroll_repeat)
    }

    // --- Media paging loop ---

    fn browse_media(
        &self,
        runner: &mut dyn ActionRunner,
        params: &MediaParams,
    ) -> Result<(), StoryError> {
        let mut index = params.item_selector_index;
        for visited in 0..params.items_to_visit {
            log_info(&format!(
                "{}: viewing item {}/{}",
                self.name,
                visited + 1,
                params.items_to_visit
            ));
            self.navigate_to_item(runner, index)?;
            self.view_media_item(runner, params, index)?;
            if params.increment_index {
                index += 1;
            }
        }
        Ok(())
    }

    fn view_media_item(
        &self,
        runner: &mut dyn ActionRunner,
        params: &MediaParams,
        index: usize,
    ) -> Result<(), StoryError> {
        runner.wait_for_document_ready()?;
        runner.wait(params.item_view_time)?;
        if let Some(hook) = params.view_hook {
            hook(runner, index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Action, RecordingRunner};

    fn news_story(items: usize, spa: bool) -> Story {
        Story {
            name: "browse:news:test",
            url: "https://news.example.com",
            item_selector: ".headline > a",
            single_page_app: spa,
            platforms: PlatformSet::All,
            disabled_when: None,
            kind: StoryKind::News(NewsParams {
                items_to_visit: items,
                ..NewsParams::DEFAULT
            }),
            pre_load: None,
        }
    }

    fn media_story(items: usize, start: usize, increment: bool) -> Story {
        Story {
            name: "browse:media:test",
            url: "https://media.example.com",
            item_selector: ".thumb",
            single_page_app: true,
            platforms: PlatformSet::All,
            disabled_when: None,
            kind: StoryKind::Media(MediaParams {
                items_to_visit: items,
                item_selector_index: start,
                increment_index: increment,
                ..MediaParams::DEFAULT
            }),
            pre_load: None,
        }
    }

    fn item_waits(runner: &RecordingRunner) -> Vec<Locator> {
        runner
            .actions
            .iter()
            .filter_map(|a| match a {
                Action::ScrollIntoView(loc) => Some(loc.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn news_loop_full_action_sequence_for_two_items() {
        let story = news_story(2, false);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();

        let half_read = NewsParams::DEFAULT.item_read_time / 2;
        let mut expected = Vec::new();
        for i in 0..2 {
            let item = Locator::nth(".headline > a", i);
            // navigate to item
            expected.push(Action::WaitForElement(item.clone()));
            expected.push(Action::ScrollIntoView(item.clone()));
            expected.push(Action::WaitForElement(item.clone()));
            expected.push(Action::Click(item));
            expected.push(Action::WaitForNavigate);
            // read it
            expected.push(Action::WaitForDocumentReady);
            expected.push(Action::Wait(half_read));
            expected.push(Action::RepeatScroll(2));
            expected.push(Action::Wait(half_read));
            // back to the listing, scroll it
            expected.push(Action::ExecuteScript("window.history.back()".to_string()));
            expected.push(Action::WaitForNavigate);
            expected.push(Action::WaitForDocumentReady);
            expected.push(Action::RepeatScroll(0));
        }
        assert_eq!(runner.actions, expected);
    }

    #[test]
    fn news_loop_pairs_each_visit_with_one_back() {
        let story = news_story(4, false);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();

        let visits = item_waits(&runner).len();
        let backs = runner
            .actions
            .iter()
            .filter(|a| matches!(a, Action::ExecuteScript(s) if s == "window.history.back()"))
            .count();
        assert_eq!(visits, 4);
        assert_eq!(backs, 4);
    }

    #[test]
    fn single_page_app_never_waits_for_navigation() {
        let story = news_story(3, true);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();
        assert!(!runner.actions.contains(&Action::WaitForNavigate));
    }

    #[test]
    fn full_reload_story_waits_after_every_click_and_back() {
        let story = news_story(3, false);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();
        let waits = runner
            .actions
            .iter()
            .filter(|a| matches!(a, Action::WaitForNavigate))
            .count();
        // one per item click, one per back
        assert_eq!(waits, 6);
    }

    #[test]
    fn fixed_index_media_story_reuses_the_same_index() {
        let story = media_story(5, 3, false);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();
        let visited = item_waits(&runner);
        assert_eq!(visited.len(), 5);
        for loc in visited {
            assert_eq!(loc, Locator::nth(".thumb", 3));
        }
    }

    #[test]
    fn incrementing_media_story_visits_consecutive_indices() {
        let story = media_story(3, 0, true);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();
        let visited = item_waits(&runner);
        assert_eq!(
            visited,
            vec![
                Locator::nth(".thumb", 0),
                Locator::nth(".thumb", 1),
                Locator::nth(".thumb", 2),
            ]
        );
    }

    #[test]
    fn view_hook_runs_once_per_item_after_the_view_wait() {
        fn mark(runner: &mut dyn ActionRunner, index: usize) -> Result<(), StoryError> {
            runner.execute_script(&format!("hook({})", index))
        }
        let mut story = media_story(2, 0, true);
        if let StoryKind::Media(ref mut params) = story.kind {
            params.view_hook = Some(mark);
        }
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();
        let hooks: Vec<_> = runner
            .actions
            .iter()
            .filter_map(|a| match a {
                Action::ExecuteScript(s) => Some(s.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(hooks, vec!["hook(0)".to_string(), "hook(1)".to_string()]);
    }

    #[test]
    fn pre_load_hook_runs_before_the_loop() {
        fn hook(runner: &mut dyn ActionRunner, _ctx: &RunContext) -> Result<(), StoryError> {
            runner.execute_script("pre-load")
        }
        let mut story = news_story(1, true);
        story.pre_load = Some(hook);
        let mut runner = RecordingRunner::new();
        story.run(&mut runner, &RunContext::default()).unwrap();
        assert_eq!(
            runner.actions[0],
            Action::ExecuteScript("pre-load".to_string())
        );
    }

    #[test]
    fn element_not_found_aborts_the_run() {
        let story = news_story(4, false);
        let mut runner = RecordingRunner::new();
        runner.fail_element_wait_on(Locator::nth(".headline > a", 1));
        let err = story.run(&mut runner, &RunContext::default()).unwrap_err();
        assert!(matches!(err, StoryError::ElementNotFound { .. }));
        // the first item completed, the second died on its element wait
        assert_eq!(item_waits(&runner).len(), 1);
    }

    #[test]
    fn navigation_timeout_aborts_the_run() {
        let story = news_story(2, false);
        let mut runner = RecordingRunner::new();
        runner.fail_navigation();
        let err = story.run(&mut runner, &RunContext::default()).unwrap_err();
        assert!(matches!(err, StoryError::NavigationTimeout));
    }

    #[test]
    fn disabled_predicate_overrides_platform_set() {
        use crate::platforms::{Os, Platform};
        fn on_mac(env: &Environment) -> bool {
            matches!(env.os, Os::Mac)
        }
        let mut story = news_story(1, false);
        story.disabled_when = Some(on_mac);
        let mac = Environment::new(Platform::Desktop, Os::Mac);
        let linux = Environment::new(Platform::Desktop, Os::Linux);
        assert!(!story.enabled_in(&mac));
        assert!(story.enabled_in(&linux));
    }
}
