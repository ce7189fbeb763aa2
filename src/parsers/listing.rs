use crate::dom::{attr_by_priority, root, select_innermost, text_all, text_by_priority};
use crate::helpers::extract_entity_slug;
use crate::models::{AnimeCard, ListingResponse};
use crate::pagination::{parse_pagination, DEFAULT_ITEMS_PER_PAGE};
use scraper::{ElementRef, Html};

/// Which paginated catalog a listing page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Ongoing,
    Complete,
}

impl ListingKind {
    pub fn path(&self) -> &'static str {
        match self {
            ListingKind::Ongoing => "ongoing-anime",
            ListingKind::Complete => "complete-anime",
        }
    }
}

const CONTAINERS: &str = ".venz ul li, .rapi .detpost";
const TITLE_SELECTORS: &[&str] = &[".jdlflm", ".judul-anime"];
const LINK_SELECTORS: &[(&str, &str)] = &[(".thumb a", "href"), ("a", "href")];
const POSTER_SELECTORS: &[(&str, &str)] = &[
    (".thumbz img", "src"),
    ("img", "src"),
    (".thumbz img", "data-src"),
    ("img", "data-src"),
];

/// Ongoing or complete listing page
pub fn parse_listing(document: &Html, kind: ListingKind) -> ListingResponse {
    let anime: Vec<AnimeCard> = select_innermost(root(document), CONTAINERS)
        .into_iter()
        .filter_map(|item| parse_listing_card(item, kind))
        .collect();

    log::debug!("{:?} listing: {} cards", kind, anime.len());

    ListingResponse {
        anime,
        pagination: parse_pagination(document, DEFAULT_ITEMS_PER_PAGE),
    }
}

fn parse_listing_card(item: ElementRef<'_>, kind: ListingKind) -> Option<AnimeCard> {
    let title = text_by_priority(item, TITLE_SELECTORS);
    let link = attr_by_priority(item, LINK_SELECTORS);
    if title.is_empty() || !link.contains("/anime/") {
        return None;
    }
    let slug = extract_entity_slug(&link);
    if slug.is_empty() {
        return None;
    }

    let mut card = AnimeCard {
        title,
        slug,
        poster: attr_by_priority(item, POSTER_SELECTORS),
        release_date: Some(text_all(item, ".newnime")),
        ..AnimeCard::default()
    };

    match kind {
        ListingKind::Ongoing => {
            card.episode = Some(text_all(item, ".epz").replace("Episode", "").trim().to_string());
            card.release_day = Some(text_all(item, ".epztipe"));
        }
        ListingKind::Complete => {
            card.total_episode = Some(text_all(item, ".epz"));
            card.rating = Some(text_all(item, ".epztipe"));
        }
    }
    Some(card)
}
