use crate::dom::{own_text, root, sel, text_all};
use crate::helpers::extract_entity_slug;
use crate::models::{AnimeListItem, AnimeListResponse};
use scraper::Html;
use std::collections::BTreeMap;

/// Bucket used when a section has no readable index letter
const FALLBACK_BUCKET: &str = "#";

/// A–Z index page, grouped by the letter shown above each section
pub fn parse_anime_list(document: &Html) -> AnimeListResponse {
    let section_selector = sel(".bariskelom");
    let link_selector = sel(".jdlbar ul li a");

    let mut list: BTreeMap<String, Vec<AnimeListItem>> = BTreeMap::new();

    for section in root(document).select(&section_selector) {
        let mut letter = text_all(section, ".barispenz a").to_uppercase();
        if letter.is_empty() {
            letter = FALLBACK_BUCKET.to_string();
        }
        let bucket = list.entry(letter).or_default();

        for link in section.select(&link_selector) {
            let title = own_text(link);
            let href = link.value().attr("href").unwrap_or_default();
            if title.is_empty() || href.is_empty() {
                continue;
            }
            let slug = extract_entity_slug(href);
            if slug.is_empty() {
                continue;
            }
            bucket.push(AnimeListItem { title, slug });
        }
    }

    log::debug!("Anime list: {} buckets", list.len());
    AnimeListResponse { list }
}
