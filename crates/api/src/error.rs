//! Closed taxonomy of request failures with their HTTP mapping.
//!
//! Every failure the orchestrator can produce maps to a status code, a
//! stable JSON tag, and a cache policy here; nothing is inspected at
//! runtime by shape.

use crate::http::CachePolicy;
use axum::http::StatusCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed username or parameters; the caller must correct.
    BadInput,
    /// IP- or analyze-scoped window exhausted; transient.
    RateLimited,
    /// Another handler holds the recomputation lock; retry shortly.
    Analyzing,
    /// Upstream says the user does not exist; stable negative result.
    NotFound,
    /// Any other upstream failure; transient.
    UpstreamError,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadInput => StatusCode::BAD_REQUEST,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Analyzing => StatusCode::ACCEPTED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::UpstreamError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            ErrorKind::BadInput => "bad_request",
            ErrorKind::RateLimited => "rate_limited",
            ErrorKind::Analyzing => "analyzing",
            ErrorKind::NotFound => "not_found",
            ErrorKind::UpstreamError => "upstream_error",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::BadInput => "Invalid username or parameters.",
            ErrorKind::RateLimited => "Too many requests. Try again later.",
            ErrorKind::Analyzing => "Snapshot is being generated. Retry shortly.",
            ErrorKind::NotFound => "GitHub user not found.",
            ErrorKind::UpstreamError => "Failed to analyze user.",
        }
    }

    /// Short cache lifetimes bound how long viewers of an embedded image
    /// see a placeholder or error state.
    pub fn cache(self) -> CachePolicy {
        match self {
            ErrorKind::BadInput => CachePolicy::ERRORED,
            ErrorKind::RateLimited => CachePolicy::RATE_LIMITED,
            ErrorKind::Analyzing => CachePolicy::ANALYZING,
            ErrorKind::NotFound => CachePolicy::ERRORED,
            ErrorKind::UpstreamError => CachePolicy::ERRORED,
        }
    }
}
