//! Thin query layer over `scraper`
//!
//! Every lookup is scoped to an `ElementRef`; use [`root`] to get one for a
//! whole document. Missing elements and attributes read as empty strings so
//! parsers can apply their own "required field" rules.

use scraper::{ElementRef, Html, Selector};

/// Compile a selector written in this crate.
///
/// Only ever called with string literals, all of which are covered by the
/// parser tests.
pub fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}

pub fn root(document: &Html) -> ElementRef<'_> {
    document.root_element()
}

/// Text of an element, trimmed
pub fn own_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Concatenated text of every match, trimmed
pub fn text_all(scope: ElementRef<'_>, css: &str) -> String {
    let selector = sel(css);
    scope
        .select(&selector)
        .map(|e| e.text().collect::<String>())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Text of the first match, trimmed
pub fn text_first(scope: ElementRef<'_>, css: &str) -> String {
    let selector = sel(css);
    scope.select(&selector).next().map(own_text).unwrap_or_default()
}

/// Attribute of the first match, or empty when either is missing
pub fn attr_first(scope: ElementRef<'_>, css: &str, attr: &str) -> String {
    let selector = sel(css);
    scope
        .select(&selector)
        .next()
        .and_then(|e| e.value().attr(attr))
        .unwrap_or_default()
        .to_string()
}

/// First element matching `css` whose text contains `needle`
pub fn find_containing<'a>(scope: ElementRef<'a>, css: &str, needle: &str) -> Option<ElementRef<'a>> {
    let selector = sel(css);
    let found = scope
        .select(&selector)
        .find(|e| e.text().collect::<String>().contains(needle));
    found
}

/// Matches of `css` that contain no other match.
///
/// Container lists such as `.venz ul li, .rapi .detpost` can match both a
/// wrapper and the cards inside it; each inner card is kept and the wrapper
/// is skipped.
pub fn select_innermost<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let selector = sel(css);
    let matches: Vec<ElementRef<'a>> = scope
        .select(&selector)
        .filter(|e| {
            !e.descendants()
                .skip(1)
                .filter_map(ElementRef::wrap)
                .any(|d| selector.matches(&d))
        })
        .collect();
    matches
}

/// Try `text_all` for each selector in order; first non-empty wins
pub fn text_by_priority(scope: ElementRef<'_>, selectors: &[&str]) -> String {
    selectors
        .iter()
        .map(|css| text_all(scope, css))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Try `text_first` for each selector in order; first non-empty wins
pub fn first_text_by_priority(scope: ElementRef<'_>, selectors: &[&str]) -> String {
    selectors
        .iter()
        .map(|css| text_first(scope, css))
        .find(|t| !t.is_empty())
        .unwrap_or_default()
}

/// Try each `(selector, attribute)` pair in order; first non-empty wins
pub fn attr_by_priority(scope: ElementRef<'_>, strategies: &[(&str, &str)]) -> String {
    strategies
        .iter()
        .map(|(css, attr)| attr_first(scope, css, attr))
        .find(|v| !v.is_empty())
        .unwrap_or_default()
}
