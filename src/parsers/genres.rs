use crate::dom::{attr_by_priority, attr_first, first_text_by_priority, own_text, root, sel, select_innermost, text_all};
use crate::helpers::{extract_entity_slug, extract_genre_slug};
use crate::models::{AnimeCard, Genre, GenreAnimeResponse};
use crate::pagination::{parse_pagination, DEFAULT_ITEMS_PER_PAGE};
use scraper::{ElementRef, Html};

const CARD_CONTAINERS: &str = ".col-anime, .col-md-4, .venz li, .page .col-6";
const TITLE_SELECTORS: &[&str] = &[".col-anime-title a", ".jdlflm", ".judul-anime", "h3", "h4"];
const POSTER_SELECTORS: &[(&str, &str)] = &[("img", "src"), ("img", "data-src")];

/// Genre index page
pub fn parse_genre_list(document: &Html) -> Vec<Genre> {
    let link_selector = sel(".genres li a");
    let genres: Vec<Genre> = root(document)
        .select(&link_selector)
        .filter_map(|a| {
            let name = own_text(a);
            let slug = extract_genre_slug(a.value().attr("href").unwrap_or_default());
            (!name.is_empty() && !slug.is_empty()).then_some(Genre { name, slug })
        })
        .collect();

    log::debug!("Genre list: {} genres", genres.len());
    genres
}

/// Listing of anime within one genre; `genre` is echoed back as given
pub fn parse_genre_anime(document: &Html, genre: &str) -> GenreAnimeResponse {
    let anime: Vec<AnimeCard> = select_innermost(root(document), CARD_CONTAINERS)
        .into_iter()
        .filter_map(parse_genre_card)
        .collect();

    log::debug!("Genre {}: {} cards", genre, anime.len());

    GenreAnimeResponse {
        genre: genre.to_string(),
        anime,
        pagination: parse_pagination(document, DEFAULT_ITEMS_PER_PAGE),
    }
}

fn parse_genre_card(item: ElementRef<'_>) -> Option<AnimeCard> {
    let title = first_text_by_priority(item, TITLE_SELECTORS);
    let link = attr_first(item, "a", "href");
    if title.is_empty() || !link.contains("/anime/") {
        return None;
    }
    let slug = extract_entity_slug(&link);
    if slug.is_empty() {
        return None;
    }
    Some(AnimeCard {
        title,
        slug,
        poster: attr_by_priority(item, POSTER_SELECTORS),
        rating: Some(text_all(item, ".col-anime-rating, .epztipe")),
        ..AnimeCard::default()
    })
}
