//! News and social-feed browsing stories: open an item from the listing,
//! read it, go back, scroll the listing, repeat.

use crate::platforms::{Environment, Os, PlatformSet};
use crate::runner::{ActionRunner, Locator, StoryError};
use crate::story::{NewsParams, RunContext, Story, StoryKind};

fn disabled_on_android_and_windows(env: &Environment) -> bool {
    matches!(env.os, Os::Android | Os::Windows)
}

fn disabled_on_mac(env: &Environment) -> bool {
    matches!(env.os, Os::Mac)
}

fn disabled_on_windows_and_mac(env: &Environment) -> bool {
    matches!(env.os, Os::Windows | Os::Mac)
}

fn disabled_on_low_end_devices(env: &Environment) -> bool {
    env.low_end_device
}

fn hackernews_disabled(env: &Environment) -> bool {
    matches!(env.os, Os::Windows | Os::Linux)
        || env.os_version_is("yosemite")
        || env.os_version_is("elcapitan")
}

// Capped item count: visiting more causes OOM on constrained bots.
inventory::submit! {
    Story {
        name: "browse:news:cnn",
        url: "http://edition.cnn.com/",
        item_selector: ".cd__content > h3 > a",
        single_page_app: false,
        platforms: PlatformSet::All,
        disabled_when: Some(disabled_on_android_and_windows),
        kind: StoryKind::News(NewsParams {
            items_to_visit: 2,
            ..NewsParams::DEFAULT
        }),
        pre_load: None,
    }
}

// Scroll further than usual so the feed fetches enough items.
inventory::submit! {
    Story {
        name: "browse:social:facebook",
        url: "https://www.facebook.com/rihanna",
        item_selector: "article ._5msj",
        single_page_app: false,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams {
            main_page_scroll_repeat: 1,
            ..NewsParams::DEFAULT
        }),
        pre_load: None,
    }
}

// Replay does not work for the desktop site, so it runs nowhere.
inventory::submit! {
    Story {
        name: "browse:social:facebook",
        url: "https://www.facebook.com/rihanna",
        item_selector: "._4-eo",
        single_page_app: true,
        platforms: PlatformSet::None,
        disabled_when: None,
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:news:flipboard",
        url: "https://flipboard.com/explore",
        item_selector: ".grad-top",
        single_page_app: true,
        platforms: PlatformSet::MobileOnly,
        disabled_when: Some(disabled_on_low_end_devices),
        kind: StoryKind::News(NewsParams {
            item_scroll_repeat: 4,
            ..NewsParams::DEFAULT
        }),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:news:flipboard",
        url: "https://flipboard.com/explore",
        item_selector: ".cover-image",
        single_page_app: true,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: Some(disabled_on_mac),
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:news:hackernews",
        url: "https://news.ycombinator.com",
        item_selector: ".athing .title > a",
        single_page_app: false,
        platforms: PlatformSet::All,
        disabled_when: Some(hackernews_disabled),
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

// Capped item count: visiting more causes OOM.
inventory::submit! {
    Story {
        name: "browse:news:nytimes",
        url: "http://mobile.nytimes.com",
        item_selector: ".sfgAsset-link",
        single_page_app: false,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams {
            items_to_visit: 2,
            ..NewsParams::DEFAULT
        }),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:news:nytimes",
        url: "http://www.nytimes.com",
        item_selector: ".story-heading > a",
        single_page_app: false,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

// Desktop qq.com opens items in a separate tab, where back does not work.
inventory::submit! {
    Story {
        name: "browse:news:qq",
        url: "http://news.qq.com",
        item_selector: ".list .full a",
        single_page_app: false,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:news:reddit",
        url: "https://www.reddit.com/r/news/top/?sort=top&t=week",
        item_selector: ".thing .title > a",
        single_page_app: false,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: Some(disabled_on_mac),
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:news:reddit",
        url: "https://www.reddit.com/r/news/top/?sort=top&t=week",
        item_selector: ".PostHeader__post-title-line",
        single_page_app: true,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:social:twitter",
        url: "https://www.twitter.com/nasa",
        item_selector: ".Tweet-text",
        single_page_app: false,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

inventory::submit! {
    Story {
        name: "browse:social:twitter",
        url: "https://www.twitter.com/nasa",
        item_selector: ".tweet-text",
        single_page_app: true,
        platforms: PlatformSet::DesktopOnly,
        disabled_when: Some(disabled_on_windows_and_mac),
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: None,
    }
}

// --- Washington Post (progressive web app) ---

pub const WASHINGTON_POST_CLOSE_BUTTON: &str = ".close";

// Some tablets show the "send link to phone" popup without a close button;
// the popup is transparent there, so running with it open is fine.
fn dismiss_send_to_phone_popup(
    runner: &mut dyn ActionRunner,
    _ctx: &RunContext,
) -> Result<(), StoryError> {
    let probe = format!(
        "!!document.querySelector(\"{}\")",
        WASHINGTON_POST_CLOSE_BUTTON
    );
    if runner.evaluate_script(&probe)? {
        runner.click(&Locator::Css(WASHINGTON_POST_CLOSE_BUTTON))?;
    }
    Ok(())
}

inventory::submit! {
    Story {
        name: "browse:news:washingtonpost",
        url: "https://www.washingtonpost.com/pwa",
        item_selector: ".hed > a",
        single_page_app: true,
        platforms: PlatformSet::MobileOnly,
        disabled_when: None,
        kind: StoryKind::News(NewsParams::DEFAULT),
        pre_load: Some(dismiss_send_to_phone_popup),
    }
}
