//! Success and error envelopes shared by every API route

use crate::error::{error_code, ScrapeError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::time::Instant;

pub const RESPONSE_TIME_HEADER: &str = "X-Response-Time";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuccessEnvelope<T: Serialize> {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub data: T,
    pub timestamp: String,
    pub path: String,
    pub response_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    pub error: ErrorBody,
    pub timestamp: String,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-05-01T10:20:30.123Z`
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Request path including its query string, e.g. `/api/ongoing?page=2`
pub fn request_path(req: &HttpRequest) -> String {
    req.uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.path().to_string())
}

fn elapsed_ms(started: Instant) -> String {
    format!("{}ms", started.elapsed().as_millis())
}

pub fn success<T: Serialize>(req: &HttpRequest, started: Instant, data: T) -> HttpResponse {
    let response_time = elapsed_ms(started);
    let body = SuccessEnvelope {
        success: true,
        status_code: StatusCode::OK.as_u16(),
        message: "OK".to_string(),
        data,
        timestamp: timestamp(),
        path: request_path(req),
        response_time: response_time.clone(),
    };
    HttpResponse::Ok()
        .insert_header((RESPONSE_TIME_HEADER, response_time))
        .json(body)
}

pub fn failure(req: &HttpRequest, err: &ScrapeError, expose_details: bool) -> HttpResponse {
    let status = err.status_code();
    let details = expose_details.then(|| format!("{:?}", err));
    error_response(req, status, err.to_string(), details)
}

/// Error envelope for a status that did not come from a `ScrapeError`
pub fn error_response(
    req: &HttpRequest,
    status: StatusCode,
    message: String,
    details: Option<String>,
) -> HttpResponse {
    let body = ErrorEnvelope {
        success: false,
        status_code: status.as_u16(),
        message,
        error: ErrorBody {
            code: error_code(status, req.path()),
            details,
        },
        timestamp: timestamp(),
        path: request_path(req),
    };
    HttpResponse::build(status).json(body)
}

/// Wrap a handler result in the matching envelope
pub fn respond<T: Serialize>(
    req: &HttpRequest,
    started: Instant,
    result: Result<T, ScrapeError>,
    expose_details: bool,
) -> HttpResponse {
    match result {
        Ok(data) => success(req, started, data),
        Err(err) => {
            if err.status_code().is_client_error() {
                log::info!("{} -> {}", req.path(), err);
            } else {
                log::error!("{} -> {}", req.path(), err);
            }
            failure(req, &err, expose_details)
        }
    }
}
