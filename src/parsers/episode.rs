use super::parse_download_sections;
use crate::dom::{attr_first, find_containing, own_text, root, sel, text_all};
use crate::error::{Resource, ScrapeError};
use crate::helpers::{anime_title_from_episode, extract_entity_slug, non_empty};
use crate::models::{AnimeRef, EpisodeDetail, Mirror, StreamingServer};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

/// Quality token in mirror list classes, e.g. `m480p` -> `480p`
static QUALITY_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"m(\d+p)").expect("quality class pattern"));

const UNKNOWN_QUALITY: &str = "unknown";

/// Episode page: navigation, mirrors and download links.
///
/// An empty `.posttl` title is the only not-found signal.
pub fn parse_episode_detail(document: &Html, slug: &str) -> Result<EpisodeDetail, ScrapeError> {
    let page = root(document);

    let title = text_all(page, ".posttl");
    if title.is_empty() {
        return Err(ScrapeError::not_found(Resource::Episode, slug));
    }

    let mut anime_link = attr_first(page, r#".flir a[href*="/anime/"]"#, "href");
    if anime_link.is_empty() {
        anime_link = nav_link(page, "See All").unwrap_or_default();
    }

    let streaming_servers = parse_streaming_servers(page);
    let download_links = parse_download_sections(page, ".download ul li");

    log::debug!(
        "Episode {}: {} qualities, {} download sections",
        slug,
        streaming_servers.len(),
        download_links.len()
    );

    Ok(EpisodeDetail {
        anime: AnimeRef {
            title: anime_title_from_episode(&title),
            slug: extract_entity_slug(&anime_link),
        },
        title,
        prev_episode: nav_link(page, "Previous").map(|href| extract_entity_slug(&href)),
        next_episode: nav_link(page, "Next").map(|href| extract_entity_slug(&href)),
        streaming_url: non_empty(attr_first(page, "#embed_holder iframe", "src")),
        streaming_servers,
        download_links,
    })
}

/// href of the first `.flir` link whose label contains `label`
fn nav_link(page: ElementRef<'_>, label: &str) -> Option<String> {
    find_containing(page, ".flir a", label)
        .and_then(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// Group mirrors by the quality token of their list's class name.
///
/// Groups keep first-seen order; a group ending up empty is dropped.
fn parse_streaming_servers(page: ElementRef<'_>) -> Vec<StreamingServer> {
    let list_selector = sel(".mirrorstream ul");
    let mirror_selector = sel("li a[data-content]");

    let mut groups: Vec<StreamingServer> = Vec::new();

    for list in page.select(&list_selector) {
        let class_name = list.value().attr("class").unwrap_or_default();
        let quality = QUALITY_CLASS_RE
            .captures(class_name)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .unwrap_or(UNKNOWN_QUALITY)
            .to_string();

        let mirrors = list.select(&mirror_selector).filter_map(|a| {
            let provider = own_text(a);
            let data_content = a.value().attr("data-content").unwrap_or_default().to_string();
            if provider.is_empty() || data_content.is_empty() {
                return None;
            }
            let is_default = (a.value().attr("data-default") == Some("true")).then_some(true);
            Some(Mirror {
                provider,
                data_content,
                is_default,
            })
        });

        let existing = groups.iter().position(|g| g.quality == quality);
        let index = match existing {
            Some(index) => index,
            None => {
                groups.push(StreamingServer {
                    quality,
                    servers: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].servers.extend(mirrors);
    }

    groups.retain(|g| !g.servers.is_empty());
    groups
}
