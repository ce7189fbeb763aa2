use crate::dom::{attr_first, root, sel, text_all};
use crate::helpers::{extract_entity_slug, non_empty};
use crate::models::AnimeCard;
use scraper::{ElementRef, Html};

/// Search results page (`.chivsrc` list)
pub fn parse_search(document: &Html) -> Vec<AnimeCard> {
    let item_selector = sel(".chivsrc li");
    let anime: Vec<AnimeCard> = root(document)
        .select(&item_selector)
        .filter_map(parse_search_card)
        .collect();

    log::debug!("Search: {} results", anime.len());
    anime
}

fn parse_search_card(item: ElementRef<'_>) -> Option<AnimeCard> {
    let title = text_all(item, "h2 a");
    let link = attr_first(item, "h2 a", "href");
    if title.is_empty() || !link.contains("/anime/") {
        return None;
    }
    let slug = extract_entity_slug(&link);
    if slug.is_empty() {
        return None;
    }

    // The last `.set` row mentioning Rating wins
    let set_selector = sel(".set");
    let rating = item
        .select(&set_selector)
        .map(|e| e.text().collect::<String>())
        .filter(|text| text.contains("Rating"))
        .last()
        .map(|text| text.replace("Rating :", "").trim().to_string())
        .and_then(non_empty);

    Some(AnimeCard {
        title,
        slug,
        poster: attr_first(item, "img", "src"),
        rating,
        ..AnimeCard::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let html = r#"<ul class="chivsrc">
            <li>
                <img src="https://img/naruto.jpg">
                <h2><a href="https://otakudesu.best/anime/naruto-sub-indo/">Naruto Subtitle Indonesia</a></h2>
                <div class="set"><b>Genres</b> : Action, Adventure</div>
                <div class="set"><b>Status</b> : Completed</div>
                <div class="set"><b>Rating</b> : 7.99</div>
            </li>
            <li>
                <h2><a href="https://otakudesu.best/anime/boruto-sub-indo/">Boruto</a></h2>
                <div class="set"><b>Rating</b> : </div>
            </li>
            <li><h2><a href="https://otakudesu.best/episode/naruto-episode-1/">Wrong kind</a></h2></li>
            <li><h2><a href="https://otakudesu.best/anime/untitled/"></a></h2></li>
        </ul>"#;
        let results = parse_search(&Html::parse_document(html));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].slug, "naruto-sub-indo");
        assert_eq!(results[0].poster, "https://img/naruto.jpg");
        assert_eq!(results[0].rating.as_deref(), Some("7.99"));
        assert_eq!(results[1].rating, None);
        assert!(results.iter().all(|c| !c.title.is_empty() && !c.slug.is_empty()));
    }

    #[test]
    fn test_no_results() {
        let results = parse_search(&Html::parse_document(r#"<ul class="chivsrc"></ul>"#));
        assert!(results.is_empty());
    }
}
