//! Media browsing stories: load a page showing a photo or video, click
//! through to the next item, repeat.

use crate::config::{ELEMENT_WAIT_TIMEOUT, SETTLE_WAIT};
use crate::platforms::{Environment, Os, PlatformSet};
use crate::runner::{ActionRunner, Locator, StoryError};
use crate::story::{MediaParams, RunContext, Story, StoryKind};

fn disabled_on_linux_and_windows(env: &Environment) -> bool {
    matches!(env.os, Os::Linux | Os::Windows)
}

inventory::submit! {
    Story {
        name: "browse:media:imgur",
        url: "http://imgur.com/gallery/5UlBN",
        item_selector: ".Navbar-customAction",
        single_page_app: true,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:media:imgur",
        url: "http://imgur.com/gallery/5UlBN",
        item_selector: ".navNext",
        single_page_app: true,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:media:youtube",
        url: "https://m.youtube.com/watch?v=QGfhS1hfTWw&autoplay=false",
        item_selector: "._mhgb > a",
        single_page_app: true,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams {
            item_selector_index: 3,
            ..MediaParams::DEFAULT
        }),
        pre_load: None,
    }
}

// A longer view time allows videos to load and play.
inventory::submit! {
    Story {
        name: "browse:media:youtube",
        url: "https://www.youtube.com/watch?v=QGfhS1hfTWw&autoplay=false",
        item_selector: ".yt-uix-simple-thumb-related",
        single_page_app: true,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: Some(disabled_on_linux_and_windows),
        kind: StoryKind::Media(MediaParams {
            item_view_time: std::time::Duration::from_secs(5),
            items_to_visit: 8,
            item_selector_index: 3,
            ..MediaParams::DEFAULT
        }),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:media:facebook_photos",
        url: "https://m.facebook.com/rihanna/photos/a.207477806675.138795.10092511675/10153911739606676/?type=3&source=54&ref=page_internal",
        item_selector: "._57-r.touchable",
        single_page_app: true,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams::DEFAULT),
        pre_load: None,
    }
}

// Recording does not work: the page gets stuck in the theater viewer.
inventory::submit! {
    Story {
        name: "browse:media:facebook_photos",
        url: "https://www.facebook.com/rihanna/photos/a.207477806675.138795.10092511675/10153911739606676/?type=3&theater",
        item_selector: ".snowliftPager.next",
        single_page_app: true,
        platforms: PlatformSet::None,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams::DEFAULT),
        pre_load: None,
    }
}

// --- Tumblr ---

pub const TUMBLR_LIGHTBOX_IMAGE: &str = "#tumblr_lightbox_center_image";

fn open_lightbox_image(runner: &mut dyn ActionRunner, _index: usize) -> Result<(), StoryError> {
    runner.click(&Locator::Css(TUMBLR_LIGHTBOX_IMAGE))?;
    runner.wait(SETTLE_WAIT)
}

inventory::submit! {
    Story {
        name: "browse:media:tumblr",
        url: "https://tumblr.com/search/gifs",
        item_selector: ".photo",
        single_page_app: true,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams {
            items_to_visit: 8,
            increment_index: true,
            view_hook: Some(open_lightbox_image),
            ..MediaParams::DEFAULT
        }),
        pre_load: None,
    }
}

// --- Pinterest ---

pub const PINTEREST_ACCOUNT: &str = "googletest";
pub const PINTEREST_SAVE_BUTTON: &str =
    ".Button.Module.ShowModalButton.btn.hasIcon.hasText.isBrioFlat.medium.primary.primaryOnHover.repin.pinActionBarButton.isBrioFlat.rounded";
pub const PINTEREST_BOARD_PICKER: &str = ".nameAndIcons";
pub const PINTEREST_CLOSE_OVERLAY: &str = ".Button.borderless.close.visible";

// A real user does not pin every post; which items get pinned is a plain
// predicate so the cadence can change without touching the loop.
fn should_pin(index: usize) -> bool {
    index % 2 == 0
}

fn log_in_to_pinterest(runner: &mut dyn ActionRunner, ctx: &RunContext) -> Result<(), StoryError> {
    runner.login(PINTEREST_ACCOUNT, &ctx.credentials_path)
}

fn pin_selected_items(runner: &mut dyn ActionRunner, index: usize) -> Result<(), StoryError> {
    if should_pin(index) {
        runner.click(&Locator::Css(PINTEREST_SAVE_BUTTON))?;
        runner.wait(SETTLE_WAIT)?;
        let board = Locator::Css(PINTEREST_BOARD_PICKER);
        runner.wait_for_element(&board, ELEMENT_WAIT_TIMEOUT)?;
        runner.click(&board)?;
        runner.wait(SETTLE_WAIT)?;
    }
    runner.click(&Locator::Css(PINTEREST_CLOSE_OVERLAY))?;
    runner.wait(SETTLE_WAIT)
}

inventory::submit! {
    Story {
        name: "browse:media:pinterest",
        url: "https://pinterest.com",
        item_selector: ".pinImageDim",
        single_page_app: true,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: None,
        kind: StoryKind::Media(MediaParams {
            items_to_visit: 8,
            increment_index: true,
            view_hook: Some(pin_selected_items),
            ..MediaParams::DEFAULT
        }),
        pre_load: Some(log_in_to_pinterest),
    }
}
