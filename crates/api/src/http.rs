//! Response construction: content types, CDN cache policy, rate-limit echo.

use axum::http::{header, StatusCode};
use axum::response::Response;
use repocards_store::RateDecision;

/// CDN-facing cache lifetimes. `s_maxage` is the shared-cache TTL;
/// `stale_while_revalidate` lets the CDN serve stale while refreshing, which
/// is what keeps high-fanout README embeds off the origin.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    pub s_maxage: u64,
    pub stale_while_revalidate: u64,
}

impl CachePolicy {
    /// Fresh or cache-hit SVG.
    pub const FRESH: Self = Self {
        s_maxage: 3_600,
        stale_while_revalidate: 86_400,
    };
    /// Fresh or cache-hit JSON; shorter since consumers poll it.
    pub const JSON_FRESH: Self = Self {
        s_maxage: 300,
        stale_while_revalidate: 3_600,
    };
    /// Recomputation in flight elsewhere.
    pub const ANALYZING: Self = Self {
        s_maxage: 10,
        stale_while_revalidate: 120,
    };
    pub const RATE_LIMITED: Self = Self {
        s_maxage: 30,
        stale_while_revalidate: 60,
    };
    pub const ERRORED: Self = Self {
        s_maxage: 60,
        stale_while_revalidate: 600,
    };

    fn header_value(&self) -> String {
        format!(
            "public, max-age=0, s-maxage={}, stale-while-revalidate={}",
            self.s_maxage, self.stale_while_revalidate
        )
    }
}

pub fn svg_response(
    status: StatusCode,
    policy: CachePolicy,
    rate: Option<RateDecision>,
    svg: String,
) -> Response {
    build(status, policy, rate, "image/svg+xml; charset=utf-8", svg)
}

pub fn json_response(
    status: StatusCode,
    policy: CachePolicy,
    rate: Option<RateDecision>,
    body: serde_json::Value,
) -> Response {
    build(
        status,
        policy,
        rate,
        "application/json; charset=utf-8",
        body.to_string(),
    )
}

/// Uncacheable JSON for liveness checks.
pub fn no_store_json(status: StatusCode, body: serde_json::Value) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json; charset=utf-8")
        .header(header::CACHE_CONTROL, "no-store")
        .body(axum::body::Body::from(body.to_string()))
        .expect("static response parts are valid")
}

fn build(
    status: StatusCode,
    policy: CachePolicy,
    rate: Option<RateDecision>,
    content_type: &str,
    body: String,
) -> Response {
    let mut builder = Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CACHE_CONTROL, policy.header_value());

    if let Some(rate) = rate {
        builder = builder
            .header("X-RateLimit-Limit", rate.limit.to_string())
            .header("X-RateLimit-Remaining", rate.remaining.to_string());
    }

    builder
        .body(axum::body::Body::from(body))
        .expect("static response parts are valid")
}
