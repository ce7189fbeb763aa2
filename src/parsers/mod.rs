//! Page parsers
//!
//! Each parser is a pure function from a parsed origin page to a response
//! record. Card parsers drop list items lacking a title or a recognised
//! detail link instead of failing; detail parsers report `NotFound` only
//! when the page title is missing.

pub mod anime_detail;
pub mod anime_list;
pub mod episode;
pub mod genres;
pub mod home;
pub mod listing;
pub mod schedule;
pub mod search;

use crate::models::{DownloadLink, DownloadSection};
use crate::dom::{own_text, sel};
use scraper::ElementRef;

/// Group `li` rows into resolution sections.
///
/// The resolution comes from the row's `strong` text; every `a` with both a
/// label and an href becomes a link. Sections without a resolution or
/// without links are dropped.
pub(crate) fn parse_download_sections(scope: ElementRef<'_>, rows_css: &str) -> Vec<DownloadSection> {
    let row_selector = sel(rows_css);
    let strong_selector = sel("strong");
    let link_selector = sel("a");

    let mut sections = Vec::new();
    for row in scope.select(&row_selector) {
        let resolution = row
            .select(&strong_selector)
            .map(|e| e.text().collect::<String>())
            .collect::<String>()
            .trim()
            .to_string();

        let links: Vec<DownloadLink> = row
            .select(&link_selector)
            .filter_map(|a| {
                let provider = own_text(a);
                let url = a.value().attr("href").unwrap_or_default().to_string();
                (!provider.is_empty() && !url.is_empty()).then_some(DownloadLink { provider, url })
            })
            .collect();

        if !resolution.is_empty() && !links.is_empty() {
            sections.push(DownloadSection { resolution, links });
        }
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_sections_without_links_are_dropped() {
        let html = r#"<div class="download"><ul>
            <li><strong>Mp4 360p</strong> <a href="https://dl/a">ODFiles</a> <a href="https://dl/b">Pdrain</a></li>
            <li><strong>Mp4 480p</strong> <a href="">Broken</a> <a href="https://dl/c"></a></li>
            <li><a href="https://dl/d">NoResolution</a></li>
        </ul></div>"#;
        let doc = Html::parse_document(html);
        let sections = parse_download_sections(doc.root_element(), ".download ul li");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].resolution, "Mp4 360p");
        assert_eq!(sections[0].links.len(), 2);
        assert_eq!(sections[0].links[1].provider, "Pdrain");
        assert!(sections.iter().all(|s| !s.links.is_empty()));
    }
}
