//! Streaming link resolver
//!
//! A mirror's `dataContent` is base64 JSON (`{"id":..,"i":..,"q":".."}`).
//! Turning it into a player URL takes two sequential AJAX calls: the first
//! returns a nonce, the second exchanges nonce + token fields for a base64
//! HTML fragment whose first `src="..."` is the playable URL.
//!
//! No phase is retried and any failure ends the request.

use crate::error::ScrapeError;
use crate::http_client::{Upstream, AJAX_PATH, BASE_URL};
use crate::models::StreamingResolution;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// AJAX action that hands out a player nonce
pub const NONCE_ACTION: &str = "aa1208d27f29ca340c92c66d1926f13f";

/// AJAX action that returns the encoded player fragment
pub const PLAYER_ACTION: &str = "2a3505c93b0035d3f455df82bf976b84";

const RESOLVE_FAILED: &str = "Failed to resolve streaming URL";
const NONCE_FAILED: &str = "Failed to get nonce for streaming";
const PLAYER_FAILED: &str = "Failed to get streaming player";

/// Standard alphabet, padding optional
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

static SRC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"src="([^"]+)""#).expect("src pattern"));

/// Decoded `dataContent` token
#[derive(Debug, Deserialize, PartialEq, Default)]
pub struct StreamingToken {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub i: Option<i64>,
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AjaxResponse {
    #[serde(default)]
    data: Option<String>,
}

/// Decode a client-supplied `dataContent` token.
///
/// Bad base64 or JSON is reported as a resolver failure, the same kind as
/// an upstream failure.
pub fn decode_token(data_content: &str) -> Result<StreamingToken, ScrapeError> {
    let bytes = decode_base64(data_content).map_err(|e| {
        log::debug!("dataContent is not base64: {}", e);
        ScrapeError::StreamingResolve(RESOLVE_FAILED.to_string())
    })?;
    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
        log::debug!("dataContent is not JSON: {}", e);
        ScrapeError::StreamingResolve(RESOLVE_FAILED.to_string())
    })?;
    if !value.is_object() {
        log::debug!("dataContent is not a JSON object");
        return Err(ScrapeError::StreamingResolve(RESOLVE_FAILED.to_string()));
    }
    serde_json::from_value(value).map_err(|e| {
        log::debug!("dataContent has unexpected fields: {}", e);
        ScrapeError::StreamingResolve(RESOLVE_FAILED.to_string())
    })
}

/// Base64 with or without padding, in either the standard or URL-safe alphabet
pub fn decode_base64(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let normalized: String = input
        .trim()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    LENIENT_BASE64.decode(normalized)
}

/// First `src="..."` value in the fragment, or empty when there is none
pub fn extract_player_src(html: &str) -> String {
    SRC_RE
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Resolve a mirror token to its player URL
pub async fn resolve_streaming(
    upstream: &dyn Upstream,
    data_content: &str,
) -> Result<StreamingResolution, ScrapeError> {
    let token = decode_token(data_content)?;
    let ajax_url = format!("{}{}", BASE_URL, AJAX_PATH);

    let nonce = request_data(upstream, &ajax_url, &[("action", NONCE_ACTION.to_string())], NONCE_FAILED).await?;
    log::debug!("Streaming: got nonce for id {:?}", token.id);

    let form = [
        ("action", PLAYER_ACTION.to_string()),
        ("nonce", nonce),
        ("id", token.id.map(|v| v.to_string()).unwrap_or_default()),
        ("i", token.i.map(|v| v.to_string()).unwrap_or_default()),
        ("q", token.q.clone().unwrap_or_default()),
    ];
    let encoded_html = request_data(upstream, &ajax_url, &form, PLAYER_FAILED).await?;

    let html_bytes = decode_base64(&encoded_html).map_err(|e| {
        log::warn!("Player fragment is not base64: {}", e);
        ScrapeError::StreamingResolve(RESOLVE_FAILED.to_string())
    })?;
    let html = String::from_utf8_lossy(&html_bytes).into_owned();
    let url = extract_player_src(&html);

    log::debug!("Streaming: resolved {:?} ({} bytes of html)", url, html.len());
    Ok(StreamingResolution { url, html })
}

/// POST one AJAX form and return its non-empty `data` field
async fn request_data(
    upstream: &dyn Upstream,
    ajax_url: &str,
    form: &[(&str, String)],
    failure: &str,
) -> Result<String, ScrapeError> {
    let body = upstream
        .post_form(ajax_url, form)
        .await
        .map_err(|_| ScrapeError::StreamingResolve(failure.to_string()))?;

    let response: AjaxResponse = serde_json::from_str(&body).map_err(|e| {
        log::warn!("Unexpected AJAX response: {}", e);
        ScrapeError::StreamingResolve(failure.to_string())
    })?;

    response
        .data
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ScrapeError::StreamingResolve(failure.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD};

    #[test]
    fn test_decode_token() {
        let encoded = STANDARD.encode(r#"{"id":123,"i":0,"q":"480p"}"#);
        let token = decode_token(&encoded).unwrap();
        assert_eq!(
            token,
            StreamingToken {
                id: Some(123),
                i: Some(0),
                q: Some("480p".to_string())
            }
        );
    }

    #[test]
    fn test_decode_token_with_missing_fields() {
        let encoded = STANDARD.encode(r#"{"q":"720p"}"#);
        let token = decode_token(&encoded).unwrap();
        assert_eq!(token.id, None);
        assert_eq!(token.q.as_deref(), Some("720p"));
    }

    #[test]
    fn test_decode_token_without_padding() {
        let json = r#"{"id":1,"i":0,"q":"480p"}"#;
        let unpadded = STANDARD_NO_PAD.encode(json);
        assert!(!unpadded.ends_with('='));
        let token = decode_token(&unpadded).unwrap();
        assert_eq!(token.id, Some(1));
        assert_eq!(token.q.as_deref(), Some("480p"));

        let url_safe = URL_SAFE_NO_PAD.encode(r#"{"id":7,"q":"a?b>c"}"#);
        assert_eq!(decode_token(&url_safe).unwrap().q.as_deref(), Some("a?b>c"));
    }

    #[test]
    fn test_decode_rejects_non_object_json() {
        for json in ["[1,2]", "42", r#""text""#, "null"] {
            assert!(
                matches!(decode_token(&STANDARD.encode(json)), Err(ScrapeError::StreamingResolve(_))),
                "{} should be rejected",
                json
            );
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_token("not base64!!"),
            Err(ScrapeError::StreamingResolve(_))
        ));
        let not_json = STANDARD.encode("hello");
        assert!(matches!(
            decode_token(&not_json),
            Err(ScrapeError::StreamingResolve(_))
        ));
        let not_object = STANDARD.encode("[1,2]");
        assert!(decode_token(&not_object).is_err());
    }

    #[test]
    fn test_extract_player_src() {
        assert_eq!(
            extract_player_src(r#"<div><iframe width="100%" src="https://player.x/y" allowfullscreen></iframe><script src="https://z"></script></div>"#),
            "https://player.x/y"
        );
        assert_eq!(extract_player_src("<p>no player</p>"), "");
        assert_eq!(extract_player_src("<iframe src='single'></iframe>"), "");
    }
}
