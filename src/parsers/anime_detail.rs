use super::parse_download_sections;
use crate::dom::{attr_first, own_text, root, sel, text_all};
use crate::error::{Resource, ScrapeError};
use crate::helpers::{extract_entity_slug, extract_episode_number, normalize_anime_title};
use crate::models::{AnimeDetail, EpisodeListItem};
use scraper::{ElementRef, Html};
use std::collections::HashMap;

/// Anime detail page.
///
/// An empty title, after normalization, is the only not-found signal: the
/// origin answers unknown slugs with an empty page rather than a 404.
pub fn parse_anime_detail(document: &Html, slug: &str) -> Result<AnimeDetail, ScrapeError> {
    let page = root(document);

    let title = normalize_anime_title(&text_all(page, ".jdlrx h1"));
    if title.is_empty() {
        return Err(ScrapeError::not_found(Resource::Anime, slug));
    }

    let info = parse_info_panel(page);
    let field = |key: &str| info.get(key).cloned().unwrap_or_default();

    let genre_selector = sel(r#".infozingle p span a[href*="/genres/"]"#);
    let genres: Vec<String> = page.select(&genre_selector).map(own_text).collect();

    let episodes = parse_episode_list(page);

    let batch = parse_download_sections(page, ".batchlink ul li");
    let batch = (!batch.is_empty()).then_some(batch);

    log::debug!("Anime {}: {} episodes", slug, episodes.len());

    Ok(AnimeDetail {
        title,
        japanese: field("japanese"),
        score: field("skor"),
        producer: field("produser"),
        anime_type: field("tipe"),
        status: field("status"),
        total_episode: field("total episode"),
        duration: field("durasi"),
        release_date: field("tanggal rilis"),
        studio: field("studio"),
        genres,
        synopsis: text_all(page, ".sinopc"),
        poster: attr_first(page, ".fotoanime img", "src"),
        episodes,
        batch,
    })
}

/// `Key: value` lines of the info panel, keyed by lower-cased key.
///
/// Values keep any further colons ("Durasi: 23 min. per ep. : TV").
fn parse_info_panel(page: ElementRef<'_>) -> HashMap<String, String> {
    let line_selector = sel(".infozingle p");
    let mut info = HashMap::new();
    for line in page.select(&line_selector) {
        let text = line.text().collect::<String>();
        if let Some((key, value)) = text.split_once(':') {
            let key = key.trim().to_lowercase();
            if !key.is_empty() {
                info.insert(key, value.trim().to_string());
            }
        }
    }
    info
}

fn parse_episode_list(page: ElementRef<'_>) -> Vec<EpisodeListItem> {
    let row_selector = sel(".episodelist ul li");
    page.select(&row_selector)
        .filter_map(|row| {
            let link = attr_first(row, "a", "href");
            if !link.contains("/episode/") {
                return None;
            }
            let label = text_all(row, "a");
            Some(EpisodeListItem {
                episode: extract_episode_number(&label),
                slug: extract_entity_slug(&link),
                date: text_all(row, ".zeebr"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"<html><body>
        <div class="jdlrx"><h1>Sousou no Frieren (Episode 1 – 28) Subtitle Indonesia</h1></div>
        <div class="fotoanime"><img src="https://img/frieren.jpg"></div>
        <div class="infozingle">
            <p><span><b>Judul</b>: Sousou no Frieren</span></p>
            <p><span><b>Japanese</b>: 葬送のフリーレン</span></p>
            <p><span><b>Skor</b>: 9.31</span></p>
            <p><span><b>Produser</b>: Aniplex, Dentsu</span></p>
            <p><span><b>Tipe</b>: TV</span></p>
            <p><span><b>Status</b>: Completed</span></p>
            <p><span><b>Durasi</b>: 24 min. per ep.</span></p>
            <p><span><b>Tanggal Rilis</b>: Sep 29, 2023</span></p>
            <p><span><b>Studio</b>: Madhouse</span></p>
            <p><span><b>Genre</b>: <a href="https://otakudesu.best/genres/adventure/">Adventure</a>, <a href="https://otakudesu.best/genres/drama/">Drama</a></span></p>
            <p><span>no colon here</span></p>
        </div>
        <div class="sinopc"><p>Elf mage Frieren and her companions defeated the Demon King.</p></div>
        <div class="episodelist"><ul>
            <li><span><a href="https://otakudesu.best/batch/frieren-batch/">Frieren Batch Subtitle Indonesia</a></span></li>
        </ul></div>
        <div class="episodelist"><ul>
            <li><span><a href="https://otakudesu.best/episode/snf-episode-28-sub-indo/">Frieren Episode 28 Subtitle Indonesia</a></span><span class="zeebr">22 Maret,2024</span></li>
            <li><span><a href="https://otakudesu.best/episode/snf-special-sub-indo/">Frieren Special</a></span><span class="zeebr">1 April,2024</span></li>
        </ul></div>
    </body></html>"#;

    #[test]
    fn test_parse_detail() {
        let detail = parse_anime_detail(&Html::parse_document(DETAIL), "frieren").unwrap();
        assert_eq!(detail.title, "Sousou no Frieren");
        assert_eq!(detail.japanese, "葬送のフリーレン");
        assert_eq!(detail.score, "9.31");
        assert_eq!(detail.producer, "Aniplex, Dentsu");
        assert_eq!(detail.anime_type, "TV");
        assert_eq!(detail.status, "Completed");
        assert_eq!(detail.duration, "24 min. per ep.");
        assert_eq!(detail.release_date, "Sep 29, 2023");
        assert_eq!(detail.studio, "Madhouse");
        assert_eq!(detail.total_episode, "");
        assert_eq!(detail.genres, vec!["Adventure", "Drama"]);
        assert!(detail.synopsis.starts_with("Elf mage Frieren"));
        assert_eq!(detail.poster, "https://img/frieren.jpg");
        assert!(detail.batch.is_none());

        assert_eq!(detail.episodes.len(), 2);
        assert_eq!(detail.episodes[0].episode, "28");
        assert_eq!(detail.episodes[0].slug, "snf-episode-28-sub-indo");
        assert_eq!(detail.episodes[0].date, "22 Maret,2024");
        assert_eq!(detail.episodes[1].episode, "Frieren Special");
    }

    #[test]
    fn test_info_defaults_are_empty_strings() {
        let html = r#"<div class="jdlrx"><h1>Bare Page</h1></div>"#;
        let detail = parse_anime_detail(&Html::parse_document(html), "bare").unwrap();
        assert_eq!(detail.japanese, "");
        assert_eq!(detail.studio, "");
        assert!(detail.genres.is_empty());
        assert!(detail.episodes.is_empty());
    }

    #[test]
    fn test_empty_title_is_not_found() {
        let html = r#"<div class="jdlrx"><h1>  </h1></div><div class="infozingle"><p>Skor: 8</p></div>"#;
        let err = parse_anime_detail(&Html::parse_document(html), "missing").unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::NotFound { resource: Resource::Anime, ref slug } if slug == "missing"
        ));
    }

    #[test]
    fn test_title_that_is_only_a_suffix_is_not_found() {
        let html = r#"<div class="jdlrx"><h1>Subtitle Indonesia</h1></div>"#;
        assert!(parse_anime_detail(&Html::parse_document(html), "x").is_err());
    }

    #[test]
    fn test_batch_sections() {
        let html = r#"<div class="jdlrx"><h1>Bocchi</h1></div>
            <div class="batchlink"><ul>
                <li><strong>Mp4 720p</strong><a href="https://dl/batch720">GoFile</a></li>
                <li><strong>Mp4 1080p</strong></li>
            </ul></div>"#;
        let detail = parse_anime_detail(&Html::parse_document(html), "bocchi").unwrap();
        let batch = detail.batch.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].links[0].provider, "GoFile");
    }
}
