//! The per-site story catalog.
//!
//! Each site registers its story with `inventory::submit!` next to its
//! definition; the driver enumerates them through [`catalog`].

pub mod media;
pub mod news;

use crate::story::Story;

inventory::collect!(Story);

/// All registered stories, sorted by name then URL for stable listings.
pub fn catalog() -> Vec<&'static Story> {
    let mut stories: Vec<&'static Story> = inventory::iter::<Story>.into_iter().collect();
    stories.sort_by_key(|story| (story.name, story.url));
    stories
}
