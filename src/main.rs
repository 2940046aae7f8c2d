use std::env;
use std::process;
use std::str::FromStr;

use anyhow::{bail, Result};
use colored::*;

use storybench::stories;
use storybench::story::{Story, StoryKind};
use storybench::utils::{log_error, log_info};
use storybench::{Environment, Os, Platform};

fn main() {
    if let Err(e) = run() {
        log_error(&format!("{}", e));
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut platform: Option<Platform> = None;
    let mut os: Option<Os> = None;
    let mut os_version: Option<String> = None;
    let mut low_end = false;
    let mut show: Option<String> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--platform" => {
                let value = next_value(&mut iter, "--platform")?;
                platform = Some(Platform::from_str(value).map_err(anyhow::Error::msg)?);
            }
            "--os" => {
                let value = next_value(&mut iter, "--os")?;
                os = Some(Os::from_str(value).map_err(anyhow::Error::msg)?);
            }
            "--os-version" => {
                os_version = Some(next_value(&mut iter, "--os-version")?.to_string());
            }
            "--low-end" => low_end = true,
            "show" => {
                show = Some(next_value(&mut iter, "show")?.to_string());
            }
            other => bail!("unknown argument: {}", other),
        }
    }

    if let Some(name) = show {
        return show_story(&name);
    }

    let filter = build_environment(platform, os, os_version, low_end);
    let stories: Vec<&Story> = stories::catalog()
        .into_iter()
        .filter(|story| filter.as_ref().map_or(true, |env| story.enabled_in(env)))
        .collect();

    for story in &stories {
        print_summary(story);
    }
    log_info(&format!("{} stories listed.", stories.len()));
    Ok(())
}

fn next_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a String> {
    match iter.next() {
        Some(value) => Ok(value),
        None => bail!("{} requires a value", flag),
    }
}

// Flags only partially describe an environment; fill in the usual pairing
// (mobile runs on android, desktop defaults to linux).
fn build_environment(
    platform: Option<Platform>,
    os: Option<Os>,
    os_version: Option<String>,
    low_end: bool,
) -> Option<Environment> {
    if platform.is_none() && os.is_none() && os_version.is_none() && !low_end {
        return None;
    }
    let platform = platform.unwrap_or(match os {
        Some(Os::Android) => Platform::Mobile,
        _ => Platform::Desktop,
    });
    let os = os.unwrap_or(match platform {
        Platform::Mobile => Os::Android,
        Platform::Desktop => Os::Linux,
    });
    Some(Environment {
        platform,
        os,
        os_version,
        low_end_device: low_end,
    })
}

fn print_summary(story: &Story) {
    let spa = if story.single_page_app { " [spa]" } else { "" };
    println!(
        "{} ({}, platforms: {}){}",
        story.name.bold(),
        story.kind.label(),
        story.platforms,
        spa
    );
    println!("    {}", story.url);
}

fn show_story(name: &str) -> Result<()> {
    let matches: Vec<&Story> = stories::catalog()
        .into_iter()
        .filter(|story| story.name == name)
        .collect();
    if matches.is_empty() {
        bail!("no story named {}", name);
    }
    for story in matches {
        print_summary(story);
        println!("    item selector: {}", story.item_selector);
        match story.kind {
            StoryKind::News(params) => {
                println!(
                    "    items to visit: {}, read time: {:?}, item scroll repeat: {}, main page scroll repeat: {}",
                    params.items_to_visit,
                    params.item_read_time,
                    params.item_scroll_repeat,
                    params.main_page_scroll_repeat
                );
            }
            StoryKind::Media(params) => {
                println!(
                    "    items to visit: {}, view time: {:?}, start index: {}, incrementing: {}",
                    params.items_to_visit,
                    params.item_view_time,
                    params.item_selector_index,
                    params.increment_index
                );
            }
        }
    }
    Ok(())
}
