//! HTTP plumbing shared by the concrete providers
//!
//! This module handles:
//! - Client construction with pooling and per-attempt timeouts
//! - Request ID generation for log correlation
//! - Error mapping from HTTP status and body to `ProviderError`

pub mod client;
pub mod error;

pub use client::{build_client, ClientOptions};
pub use error::{map_http_error, parse_retry_after};

use uuid::Uuid;

/// Header carrying the per-attempt request ID
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Generate a fresh request ID for one provider attempt
pub fn new_request_id() -> Uuid {
    Uuid::new_v4()
}
