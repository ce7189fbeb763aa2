//! String helpers shared by the page parsers
//!
//! This module provides the small pure functions the parsers lean on:
//! - Slug extraction from absolute origin URLs
//! - Title normalization for anime and episode pages
//! - Episode number extraction from link labels
//!
//! None of these fail. When a pattern does not match they degrade to an
//! empty string (slugs) or to the unmodified input (labels).
//!
//! # Examples
//!
//! ```
//! use otakudesu_scraper::helpers::{extract_entity_slug, extract_genre_slug};
//!
//! assert_eq!(extract_entity_slug("https://otakudesu.best/anime/foo-bar/"), "foo-bar");
//! assert_eq!(extract_entity_slug("https://otakudesu.best/other/x/"), "");
//! assert_eq!(extract_genre_slug("https://otakudesu.best/genres/action/"), "action");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static ENTITY_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(?:anime|episode)/([^/]+)/?").expect("entity slug pattern"));
static GENRE_SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/genres/([^/]+)/?").expect("genre slug pattern"));
static EPISODE_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\s*\(Episode\s*\d+\s*[-–]\s*\d+\)\s*").expect("episode range pattern")
});
static SUB_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\s*(Subtitle Indonesia|Sub Indo))+$").expect("subtitle suffix pattern")
});
static EPISODE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Episode\s*(\d+)").expect("episode number pattern"));
static EPISODE_TAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*Episode\s*\d+.*$").expect("episode tail pattern"));

/// Extract the anime or episode slug from a URL
pub fn extract_entity_slug(url: &str) -> String {
    capture_first(&ENTITY_SLUG_RE, url)
}

/// Extract the genre slug from a URL
pub fn extract_genre_slug(url: &str) -> String {
    capture_first(&GENRE_SLUG_RE, url)
}

fn capture_first(re: &Regex, haystack: &str) -> String {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Normalize an anime detail title.
///
/// Removes a parenthesised episode range first, then any run of trailing
/// "Subtitle Indonesia" / "Sub Indo" suffixes.
pub fn normalize_anime_title(raw: &str) -> String {
    let title = raw.trim();
    let title = EPISODE_RANGE_RE.replace(title, "");
    let title = SUB_SUFFIX_RE.replace(&title, "");
    title.trim().to_string()
}

/// Episode number from a link label, or the whole label when it has none
pub fn extract_episode_number(label: &str) -> String {
    match EPISODE_NUMBER_RE.captures(label).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().to_string(),
        None => label.to_string(),
    }
}

/// Anime title derived from an episode page title ("X Episode 8 Sub Indo" -> "X")
pub fn anime_title_from_episode(title: &str) -> String {
    EPISODE_TAIL_RE.replace(title, "").trim().to_string()
}

/// Treat empty strings as absent
pub fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
