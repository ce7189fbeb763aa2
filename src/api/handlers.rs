use crate::api::envelope::{error_response, respond};
use crate::app_state::AppState;
use crate::error::ScrapeError;
use crate::models::{
    GenresResponse, ResolveStreamingRequest, ScheduleResponse, SearchResponse,
};
use crate::pagination::parse_page_number;
use crate::parsers::listing::ListingKind;
use actix_web::http::StatusCode;
use actix_web::{get, post, web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use std::time::Instant;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    /// Positive integer page, anything else is page 1
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(parse_page_number)
            .unwrap_or(1)
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

fn expose(data: &web::Data<AppState>) -> bool {
    data.config.expose_error_details
}

#[get("/")]
async fn index(req: HttpRequest) -> impl Responder {
    let started = Instant::now();
    let endpoints = serde_json::json!({
        "name": "otakudesu-scraper",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "GET /api/home",
            "GET /api/ongoing?page=N",
            "GET /api/complete?page=N",
            "GET /api/anime-list",
            "GET /api/anime/{slug}",
            "GET /api/episode/{slug}",
            "GET /api/genres",
            "GET /api/genres/{genre}?page=N",
            "GET /api/schedule",
            "GET /api/search?q=term",
            "POST /api/resolve-streaming",
            "GET /api/resolve-streaming/{dataContent}",
        ],
    });
    respond::<serde_json::Value>(&req, started, Ok(endpoints), false)
}

#[get("/api/home")]
async fn home(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.home().await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/ongoing")]
async fn ongoing(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.listing(ListingKind::Ongoing, query.page()).await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/complete")]
async fn complete(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.listing(ListingKind::Complete, query.page()).await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/anime-list")]
async fn anime_list(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.anime_list().await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/anime/{slug}")]
async fn anime_detail(
    req: HttpRequest,
    data: web::Data<AppState>,
    slug: web::Path<String>,
) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.anime_detail(&slug).await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/episode/{slug}")]
async fn episode_detail(
    req: HttpRequest,
    data: web::Data<AppState>,
    slug: web::Path<String>,
) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.episode_detail(&slug).await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/genres")]
async fn genres(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let started = Instant::now();
    let result = data
        .otakudesu
        .genres()
        .await
        .map(|genres| GenresResponse { genres });
    respond(&req, started, result, expose(&data))
}

#[get("/api/genres/{genre}")]
async fn genre_anime(
    req: HttpRequest,
    data: web::Data<AppState>,
    genre: web::Path<String>,
    query: web::Query<PageQuery>,
) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.genre_anime(&genre, query.page()).await;
    respond(&req, started, result, expose(&data))
}

#[get("/api/schedule")]
async fn schedule(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let started = Instant::now();
    let result = data
        .otakudesu
        .schedule()
        .await
        .map(|schedule| ScheduleResponse { schedule });
    respond(&req, started, result, expose(&data))
}

#[get("/api/search")]
async fn search(
    req: HttpRequest,
    data: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let started = Instant::now();
    let q = query.q.as_deref().unwrap_or_default();
    let result = data
        .otakudesu
        .search(q)
        .await
        .map(|anime| SearchResponse { anime });
    respond(&req, started, result, expose(&data))
}

/// Body is read leniently so a missing or unparseable body gets the same 400
#[post("/api/resolve-streaming")]
async fn resolve_streaming_post(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Bytes,
) -> impl Responder {
    let started = Instant::now();
    let data_content = serde_json::from_slice::<ResolveStreamingRequest>(&body)
        .ok()
        .and_then(|r| r.data_content)
        .filter(|d| !d.trim().is_empty());

    let result = match data_content {
        Some(token) => data.otakudesu.resolve_streaming(&token).await,
        None => Err(ScrapeError::BadRequest("dataContent is required".to_string())),
    };
    respond(&req, started, result, expose(&data))
}

#[get("/api/resolve-streaming/{data_content:.+}")]
async fn resolve_streaming_get(
    req: HttpRequest,
    data: web::Data<AppState>,
    data_content: web::Path<String>,
) -> impl Responder {
    let started = Instant::now();
    let result = data.otakudesu.resolve_streaming(&data_content).await;
    respond(&req, started, result, expose(&data))
}

/// Fallback for unknown routes
pub async fn route_not_found(req: HttpRequest) -> HttpResponse {
    error_response(
        &req,
        StatusCode::NOT_FOUND,
        format!("Route {} not found", req.path()),
        None,
    )
}

/// Register every route on an app or scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(home)
        .service(ongoing)
        .service(complete)
        .service(anime_list)
        .service(anime_detail)
        .service(episode_detail)
        .service(genres)
        .service(genre_anime)
        .service(schedule)
        .service(search)
        .service(resolve_streaming_post)
        .service(resolve_streaming_get);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_of(raw: Option<&str>) -> u32 {
        PageQuery {
            page: raw.map(|s| s.to_string()),
        }
        .page()
    }

    #[test]
    fn test_page_query() {
        assert_eq!(page_of(None), 1);
        assert_eq!(page_of(Some("3")), 3);
        assert_eq!(page_of(Some("0")), 1);
        assert_eq!(page_of(Some("-2")), 1);
        assert_eq!(page_of(Some("abc")), 1);
        assert_eq!(page_of(Some("")), 1);
    }
}
