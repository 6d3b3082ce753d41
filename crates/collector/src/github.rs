//! GitHub repository-listing client.
//!
//! One paginated listing call per analysis: per_page=100, sorted by most
//! recent push, capped at 10 pages so a pathological account cannot run the
//! fetch loop unbounded. The most-recently-pushed-first ordering matters
//! downstream: the maturity sampling reads the head of the collection.

use crate::{CollectorConfig, CollectorError, FetchMeta, RepoListing, RepoSource, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use repocards_store::UpstreamRateLimit;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

const PER_PAGE: usize = 100;
const MAX_PAGES: u32 = 10;

/// Raw repository object as the GitHub API returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRepo {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,

    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub is_template: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,

    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,

    pub stargazers_count: i64,
    pub forks_count: i64,
    pub open_issues_count: i64,

    pub size: i64,
    pub default_branch: String,

    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
}

/// GitHub API client.
pub struct GithubClient {
    client: Client,
    config: CollectorConfig,
}

impl GithubClient {
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| CollectorError::Api {
                status: 0,
                message: format!("invalid user agent: {}", e),
            })?,
        );

        if let Some(ref token) = config.github_token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
                    CollectorError::Api {
                        status: 0,
                        message: format!("invalid token: {}", e),
                    }
                })?,
            );
        }

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self { client, config })
    }

    async fn fetch_page(&self, username: &str, page: u32, meta: &mut FetchMeta) -> Result<Vec<ApiRepo>> {
        let url = format!(
            "{}/users/{}/repos?per_page={}&page={}&sort=pushed&direction=desc",
            self.config.api_base, username, PER_PAGE, page
        );

        meta.calls += 1;
        let response = self.client.get(&url).send().await?;

        if let Some(observed) = observed_rate_limit(&response) {
            meta.rate_limit = Some(observed);
        }

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CollectorError::NotFound);
        }
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(CollectorError::Api { status, message });
        }

        let batch: Vec<ApiRepo> = response.json().await?;
        debug!(username = username, page = page, count = batch.len(), "fetched repo page");
        Ok(batch)
    }
}

fn observed_rate_limit(response: &Response) -> Option<UpstreamRateLimit> {
    let remaining = response
        .headers()
        .get("x-ratelimit-remaining")?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    let reset: i64 = response
        .headers()
        .get("x-ratelimit-reset")?
        .to_str()
        .ok()?
        .parse()
        .ok()?;
    let reset_at = Utc.timestamp_opt(reset, 0).single()?;
    Some(UpstreamRateLimit { remaining, reset_at })
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn list_repos(&self, username: &str) -> Result<RepoListing> {
        let mut meta = FetchMeta::default();
        let mut repos = Vec::new();

        for page in 1..=MAX_PAGES {
            let batch = self.fetch_page(username, page, &mut meta).await?;
            let last_page = batch.len() < PER_PAGE;
            repos.extend(batch);
            if last_page {
                break;
            }
        }

        info!(
            username = username,
            repos = repos.len(),
            calls = meta.calls,
            "listed user repos"
        );
        Ok(RepoListing { repos, meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_repo_parses_a_listing_entry() {
        let raw = r#"{
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "html_url": "https://github.com/octocat/Hello-World",
            "description": "My first repository on GitHub!",
            "fork": false,
            "archived": false,
            "is_template": false,
            "created_at": "2011-01-26T19:01:12Z",
            "updated_at": "2011-01-26T19:14:43Z",
            "pushed_at": "2011-01-26T19:06:43Z",
            "language": "Ruby",
            "topics": ["octocat", "api"],
            "stargazers_count": 80,
            "forks_count": 9,
            "open_issues_count": 0,
            "size": 108,
            "default_branch": "master",
            "has_wiki": true,
            "has_pages": false
        }"#;

        let repo: ApiRepo = serde_json::from_str(raw).unwrap();
        assert_eq!(repo.full_name, "octocat/Hello-World");
        assert_eq!(repo.language.as_deref(), Some("Ruby"));
        assert_eq!(repo.topics.len(), 2);
        assert!(repo.has_wiki);
    }

    #[test]
    fn api_repo_tolerates_null_pushed_at_and_missing_topics() {
        let raw = r#"{
            "id": 2,
            "name": "empty",
            "full_name": "octocat/empty",
            "html_url": "https://github.com/octocat/empty",
            "description": null,
            "fork": false,
            "archived": false,
            "is_template": false,
            "created_at": "2020-01-01T00:00:00Z",
            "updated_at": "2020-01-01T00:00:00Z",
            "pushed_at": null,
            "language": null,
            "stargazers_count": 0,
            "forks_count": 0,
            "open_issues_count": 0,
            "size": 0,
            "default_branch": "main",
            "has_wiki": false,
            "has_pages": false
        }"#;

        let repo: ApiRepo = serde_json::from_str(raw).unwrap();
        assert!(repo.pushed_at.is_none());
        assert!(repo.topics.is_empty());
    }
}
