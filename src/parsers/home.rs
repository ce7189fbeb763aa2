use crate::dom::{attr_first, root, sel, text_all};
use crate::helpers::extract_entity_slug;
use crate::models::{AnimeCard, HomeResponse};
use scraper::{ElementRef, Html};

/// Home page: the first `.venz ul` lists ongoing shows, the last one
/// completed shows.
pub fn parse_home(document: &Html) -> HomeResponse {
    let list_selector = sel(".venz ul");
    let lists: Vec<ElementRef<'_>> = root(document).select(&list_selector).collect();

    let ongoing = lists
        .first()
        .map(|ul| parse_cards(*ul, ongoing_card))
        .unwrap_or_default();
    let complete = lists
        .last()
        .map(|ul| parse_cards(*ul, complete_card))
        .unwrap_or_default();

    log::debug!(
        "Home: {} ongoing, {} complete",
        ongoing.len(),
        complete.len()
    );
    HomeResponse { ongoing, complete }
}

fn parse_cards(list: ElementRef<'_>, build: fn(ElementRef<'_>) -> Option<AnimeCard>) -> Vec<AnimeCard> {
    let item_selector = sel("li");
    list.select(&item_selector).filter_map(build).collect()
}

/// Title, link and poster shared by both columns; `None` without title or link
fn card_base(item: ElementRef<'_>) -> Option<AnimeCard> {
    let title = text_all(item, ".jdlflm");
    let link = attr_first(item, ".thumb a", "href");
    if title.is_empty() || link.is_empty() {
        return None;
    }
    let slug = extract_entity_slug(&link);
    if slug.is_empty() {
        return None;
    }
    Some(AnimeCard {
        title,
        slug,
        poster: attr_first(item, ".thumbz img", "src"),
        ..AnimeCard::default()
    })
}

fn ongoing_card(item: ElementRef<'_>) -> Option<AnimeCard> {
    let mut card = card_base(item)?;
    card.episode = Some(text_all(item, ".epz").replace("Episode", "").trim().to_string());
    card.release_day = Some(text_all(item, ".epztipe"));
    card.release_date = Some(text_all(item, ".newnime"));
    Some(card)
}

fn complete_card(item: ElementRef<'_>) -> Option<AnimeCard> {
    let mut card = card_base(item)?;
    card.total_episode = Some(text_all(item, ".epz"));
    card.rating = Some(text_all(item, ".epztipe"));
    card.release_date = Some(text_all(item, ".newnime"));
    Some(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"<html><body>
        <div class="venz"><ul>
            <li><div class="detpost">
                <div class="epz"><i class="fa"></i> Episode 8</div>
                <div class="epztipe"><i class="fa"></i>Minggu</div>
                <div class="newnime">12 Okt</div>
                <div class="thumb"><a href="https://otakudesu.best/anime/onpm-s3-sub-indo/">
                    <div class="thumbz"><img src="https://img/onpm.jpg"><h2 class="jdlflm">One Punch Man Season 3</h2></div>
                </a></div>
            </div></li>
            <li><div class="detpost">
                <div class="thumb"><a href="https://otakudesu.best/anime/no-title/"></a></div>
            </div></li>
        </ul></div>
        <div class="venz"><ul>
            <li><div class="detpost">
                <div class="epz">24 Episode</div>
                <div class="epztipe">8.71</div>
                <div class="newnime">29 Sep</div>
                <div class="thumb"><a href="https://otakudesu.best/anime/frieren-sub-indo/">
                    <div class="thumbz"><img src="https://img/frieren.jpg"><h2 class="jdlflm">Frieren</h2></div>
                </a></div>
            </div></li>
            <li><div class="detpost"><h2 class="jdlflm">No Link</h2></div></li>
        </ul></div>
    </body></html>"#;

    #[test]
    fn test_parse_home_columns() {
        let home = parse_home(&Html::parse_document(HOME));
        assert_eq!(home.ongoing.len(), 1);
        assert_eq!(home.complete.len(), 1);

        let ongoing = &home.ongoing[0];
        assert_eq!(ongoing.title, "One Punch Man Season 3");
        assert_eq!(ongoing.slug, "onpm-s3-sub-indo");
        assert_eq!(ongoing.poster, "https://img/onpm.jpg");
        assert_eq!(ongoing.episode.as_deref(), Some("8"));
        assert_eq!(ongoing.release_day.as_deref(), Some("Minggu"));
        assert_eq!(ongoing.release_date.as_deref(), Some("12 Okt"));
        assert!(ongoing.rating.is_none());

        let complete = &home.complete[0];
        assert_eq!(complete.slug, "frieren-sub-indo");
        assert_eq!(complete.total_episode.as_deref(), Some("24 Episode"));
        assert_eq!(complete.rating.as_deref(), Some("8.71"));
        assert!(complete.episode.is_none());
    }

    #[test]
    fn test_empty_home() {
        let home = parse_home(&Html::parse_document("<html><body></body></html>"));
        assert!(home.ongoing.is_empty());
        assert!(home.complete.is_empty());
    }
}
