//! repocards Upstream Collector
//!
//! Fetches repository listings from the GitHub API and normalizes them into
//! [`RepoRecord`]s for the metrics engine.

pub mod github;
pub mod normalize;

use async_trait::async_trait;
use repocards_store::UpstreamRateLimit;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream resource not found")]
    NotFound,

    #[error("upstream API error {status}: {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, CollectorError>;

/// Configuration for collectors.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub github_token: Option<String>,
    pub user_agent: String,
    pub api_base: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            github_token: std::env::var("GITHUB_TOKEN").ok(),
            user_agent: "repocards/0.1 (+https://github.com/repocards/repocards)".to_string(),
            api_base: "https://api.github.com".to_string(),
        }
    }
}

/// Bookkeeping for one full listing fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchMeta {
    pub calls: u32,
    pub rate_limit: Option<UpstreamRateLimit>,
}

/// One complete repository listing for a user.
#[derive(Debug, Clone)]
pub struct RepoListing {
    pub repos: Vec<github::ApiRepo>,
    pub meta: FetchMeta,
}

/// Seam over the upstream listing call so the orchestrator can be exercised
/// without the network.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn list_repos(&self, username: &str) -> Result<RepoListing>;
}
