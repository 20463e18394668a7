//! HTTP error mapping utilities

use crate::providers::error::ProviderError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

/// Longest body excerpt kept in an error message
const MAX_BODY_EXCERPT: usize = 512;

/// Map a non-success HTTP status and response body to a `ProviderError`
pub fn map_http_error(
    status: StatusCode,
    headers: Option<&HeaderMap>,
    body: Option<String>,
    request_id: Uuid,
) -> ProviderError {
    let error_message = body
        .as_deref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|v| extract_error_message(&v))
        .or_else(|| body.as_deref().map(excerpt))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    let message = format!("{} [request_id: {}]", error_message, request_id);

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::Authentication(message),

        StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimit {
            message,
            retry_after_secs: headers
                .and_then(|h| h.get(RETRY_AFTER))
                .and_then(|v| v.to_str().ok())
                .and_then(parse_retry_after),
        },

        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::Timeout(message),

        status if status.is_server_error() => ProviderError::Server {
            status: status.as_u16(),
            message,
        },

        status => ProviderError::InvalidRequest {
            status: status.as_u16(),
            message,
        },
    }
}

/// Pull a human-readable message out of common error payload shapes
fn extract_error_message(json: &Value) -> Option<String> {
    // { "error": { "message": "..." } }
    if let Some(message) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(|v| v.as_str())
    {
        return Some(message.to_string());
    }

    // Tencent Cloud: { "Response": { "Error": { "Code": "...", "Message": "..." } } }
    if let Some(error) = json.get("Response").and_then(|r| r.get("Error")) {
        let code = error.get("Code").and_then(|v| v.as_str()).unwrap_or("");
        if let Some(message) = error.get("Message").and_then(|v| v.as_str()) {
            return Some(format!("{}: {}", code, message));
        }
    }

    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    json.get("error")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

/// Parse a Retry-After header value given in seconds
pub fn parse_retry_after(header_value: &str) -> Option<u64> {
    // HTTP-date values are ignored
    header_value.trim().parse::<u64>().ok()
}
