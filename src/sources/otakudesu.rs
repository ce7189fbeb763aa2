use crate::error::ScrapeError;
use crate::http_client::{Upstream, BASE_URL};
use crate::models::{
    AnimeCard, AnimeDetail, AnimeListResponse, EpisodeDetail, Genre, GenreAnimeResponse,
    HomeResponse, ListingResponse, ScheduleDay, StreamingResolution,
};
use crate::parsers::listing::ListingKind;
use crate::parsers::{anime_detail, anime_list, episode, genres, home, listing, schedule, search};
use crate::streaming;
use scraper::Html;
use std::sync::Arc;

/// Otakudesu - WordPress anime catalog, scraped as static HTML
#[derive(Clone)]
pub struct Otakudesu {
    upstream: Arc<dyn Upstream>,
}

impl Otakudesu {
    pub fn new(upstream: Arc<dyn Upstream>) -> Self {
        Self { upstream }
    }

    async fn fetch_document(&self, url: &str) -> Result<Html, ScrapeError> {
        log::debug!("Otakudesu: fetching {}", url);
        let body = self.upstream.get_html(url).await?;
        Ok(Html::parse_document(&body))
    }

    pub async fn home(&self) -> Result<HomeResponse, ScrapeError> {
        let document = self.fetch_document(BASE_URL).await?;
        Ok(home::parse_home(&document))
    }

    pub async fn listing(&self, kind: ListingKind, page: u32) -> Result<ListingResponse, ScrapeError> {
        let url = paged_url(&format!("{}/{}", BASE_URL, kind.path()), page);
        let document = self.fetch_document(&url).await?;
        Ok(listing::parse_listing(&document, kind))
    }

    pub async fn anime_list(&self) -> Result<AnimeListResponse, ScrapeError> {
        let document = self.fetch_document(&format!("{}/anime-list/", BASE_URL)).await?;
        Ok(anime_list::parse_anime_list(&document))
    }

    pub async fn anime_detail(&self, slug: &str) -> Result<AnimeDetail, ScrapeError> {
        let document = self.fetch_document(&format!("{}/anime/{}/", BASE_URL, slug)).await?;
        anime_detail::parse_anime_detail(&document, slug)
    }

    pub async fn episode_detail(&self, slug: &str) -> Result<EpisodeDetail, ScrapeError> {
        let document = self.fetch_document(&format!("{}/episode/{}/", BASE_URL, slug)).await?;
        episode::parse_episode_detail(&document, slug)
    }

    pub async fn genres(&self) -> Result<Vec<Genre>, ScrapeError> {
        let document = self.fetch_document(&format!("{}/genre-list/", BASE_URL)).await?;
        Ok(genres::parse_genre_list(&document))
    }

    pub async fn genre_anime(&self, genre: &str, page: u32) -> Result<GenreAnimeResponse, ScrapeError> {
        let url = paged_url(&format!("{}/genres/{}", BASE_URL, genre), page);
        let document = self.fetch_document(&url).await?;
        Ok(genres::parse_genre_anime(&document, genre))
    }

    pub async fn schedule(&self) -> Result<Vec<ScheduleDay>, ScrapeError> {
        let document = self.fetch_document(&format!("{}/jadwal-rilis/", BASE_URL)).await?;
        Ok(schedule::parse_schedule(&document))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<AnimeCard>, ScrapeError> {
        let url = format!(
            "{}/?s={}&post_type=anime",
            BASE_URL,
            urlencoding::encode(query)
        );
        let document = self.fetch_document(&url).await?;
        Ok(search::parse_search(&document))
    }

    pub async fn resolve_streaming(&self, data_content: &str) -> Result<StreamingResolution, ScrapeError> {
        streaming::resolve_streaming(self.upstream.as_ref(), data_content).await
    }
}

/// Page 1 lives at the bare path; later pages under `/page/{n}/`
pub fn paged_url(base: &str, page: u32) -> String {
    if page <= 1 {
        format!("{}/", base)
    } else {
        format!("{}/page/{}/", base, page)
    }
}
