use actix_web::http::StatusCode;

/// Kind of resource a not-found error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Anime,
    Episode,
}

impl Resource {
    fn label(&self) -> &'static str {
        match self {
            Resource::Anime => "Anime",
            Resource::Episode => "Episode",
        }
    }
}

/// Errors that can occur while scraping or resolving streams
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Transport failure, timeout or non-2xx status from the origin site
    #[error("Failed to fetch data from {url}")]
    UpstreamFetch { url: String },

    /// The page's title element was absent or empty
    #[error("{} dengan slug '{slug}' tidak ditemukan", .resource.label())]
    NotFound { resource: Resource, slug: String },

    /// Any phase of the streaming resolver failed
    #[error("{0}")]
    StreamingResolve(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ScrapeError {
    pub fn not_found(resource: Resource, slug: &str) -> Self {
        ScrapeError::NotFound {
            resource,
            slug: slug.to_string(),
        }
    }

    pub fn upstream(url: &str) -> Self {
        ScrapeError::UpstreamFetch {
            url: url.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ScrapeError::UpstreamFetch { .. } => StatusCode::BAD_GATEWAY,
            ScrapeError::NotFound { .. } => StatusCode::NOT_FOUND,
            ScrapeError::StreamingResolve(_) => StatusCode::BAD_GATEWAY,
            ScrapeError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

/// Map a status code and request path to the API error code.
///
/// The resource part of `*_NOT_FOUND` codes is inferred from the path, so a
/// 404 on `/api/genres/foo` reports `GENRE_NOT_FOUND`.
pub fn error_code(status: StatusCode, path: &str) -> String {
    let resource = if path.contains("/anime/") {
        "ANIME"
    } else if path.contains("/episode/") {
        "EPISODE"
    } else if path.contains("/genres/") {
        "GENRE"
    } else if path.contains("/search") {
        "SEARCH"
    } else if path.contains("/resolve-streaming") {
        "STREAMING"
    } else {
        "RESOURCE"
    };

    match status.as_u16() {
        400 => "BAD_REQUEST".to_string(),
        401 => "UNAUTHORIZED".to_string(),
        403 => "FORBIDDEN".to_string(),
        404 => format!("{}_NOT_FOUND", resource),
        429 => "RATE_LIMIT_EXCEEDED".to_string(),
        502 => "UPSTREAM_ERROR".to_string(),
        504 => "UPSTREAM_TIMEOUT".to_string(),
        _ => "INTERNAL_ERROR".to_string(),
    }
}
