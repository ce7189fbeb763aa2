use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Compact anime summary used by listings, genre pages and search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AnimeCard {
    pub title: String,
    pub slug: String,
    pub poster: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_episode: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HomeResponse {
    pub ongoing: Vec<AnimeCard>,
    pub complete: Vec<AnimeCard>,
}

/// Ongoing and complete listings share this shape
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ListingResponse {
    pub anime: Vec<AnimeCard>,
    pub pagination: Pagination,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnimeListItem {
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnimeListResponse {
    pub list: BTreeMap<String, Vec<AnimeListItem>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnimeDetail {
    pub title: String,
    pub japanese: String,
    pub score: String,
    pub producer: String,
    #[serde(rename = "type")]
    pub anime_type: String,
    pub status: String,
    pub total_episode: String,
    pub duration: String,
    pub release_date: String,
    pub studio: String,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub poster: String,
    pub episodes: Vec<EpisodeListItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<Vec<DownloadSection>>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EpisodeListItem {
    pub episode: String,
    pub slug: String,
    pub date: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnimeRef {
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeDetail {
    pub title: String,
    pub anime: AnimeRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streaming_url: Option<String>,
    pub streaming_servers: Vec<StreamingServer>,
    pub download_links: Vec<DownloadSection>,
}

/// Mirrors available at one quality
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StreamingServer {
    pub quality: String,
    pub servers: Vec<Mirror>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mirror {
    pub provider: String,
    pub data_content: String,
    /// Only ever `Some(true)`; absent otherwise
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DownloadSection {
    pub resolution: String,
    pub links: Vec<DownloadLink>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DownloadLink {
    pub provider: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Genre {
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenresResponse {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenreAnimeResponse {
    pub genre: String,
    pub anime: Vec<AnimeCard>,
    pub pagination: Pagination,
}

/// Pagination metadata derived from the listing's page widget.
///
/// `total_items` is `total_pages * items_per_page`, an estimate that
/// overstates the count whenever the last page is not full.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub items_per_page: u32,
    pub total_items: Option<u32>,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleDay {
    pub day: String,
    pub anime: Vec<AnimeRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleResponse {
    pub schedule: Vec<ScheduleDay>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchResponse {
    pub anime: Vec<AnimeCard>,
}

/// Result of resolving a mirror's `dataContent` token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StreamingResolution {
    /// Empty when the player fragment carried no `src` attribute
    pub url: String,
    pub html: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveStreamingRequest {
    #[serde(default)]
    pub data_content: Option<String>,
}
