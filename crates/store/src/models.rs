//! Core data model shared across the workspace.
//!
//! Field names serialize in camelCase: the snapshot JSON is an external
//! contract consumed by the profile endpoint and by anything already parsing
//! the stored blobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized view of one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoRecord {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub is_fork: bool,
    pub is_archived: bool,
    pub is_template: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,

    pub stargazers_count: i64,
    pub forks_count: i64,
    pub open_issues_count: i64,

    #[serde(rename = "sizeKB")]
    pub size_kb: i64,
    pub default_branch: String,

    pub has_wiki: bool,
    pub has_pages: bool,

    pub activity: RepoActivity,
}

/// Derived activity fields, clamped at zero against inconsistent upstream
/// timestamps.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoActivity {
    pub days_since_push: i64,
    pub age_days: i64,
}

/// Share of one language within the language-tagged subset of repos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub share: f64,
}

/// Sums and counts over a repository collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub stars_total: i64,
    pub forks_total: i64,
    pub archived_count: usize,
    pub forked_count: usize,
    pub languages: Vec<LanguageShare>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EngineeringDimensions {
    pub velocity: u8,
    pub impact: u8,
    pub breadth: u8,
    pub hygiene: u8,
}

/// Engineering signal, versioned. All scores 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineeringReport {
    pub version: String,
    pub score: u8,
    pub dimensions: EngineeringDimensions,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaturitySubscores {
    pub docs: u8,
    pub maintenance: u8,
    pub repo_hygiene: u8,
}

/// Maturity heuristics, versioned. All scores 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaturityReport {
    pub version: String,
    pub score: u8,
    pub subscores: MaturitySubscores,
}

/// Sampling-quality signal, versioned. Integer percentages 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    pub version: String,
    pub repos_sampled_pct: u8,
    pub recently_active_pct: u8,
}

/// Named report bag. Reports are optional so snapshots written under an
/// older schema still parse; `upgrade_snapshot` fills the gaps at read time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueReports {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity: Option<MaturityReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engineering: Option<EngineeringReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageReport>,
}

/// Upstream rate-limit state observed during a fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRateLimit {
    pub remaining: i64,
    pub reset_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub github_api_calls: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<UpstreamRateLimit>,
}

/// The full persisted analysis result for one user. Written exactly once
/// per successful analysis and never mutated in place; a recomputation
/// replaces the whole value under the same key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: String,
    pub username: String,
    pub generated_at: DateTime<Utc>,
    pub ttl_seconds: u64,

    pub repo_count: usize,
    pub repos: Vec<RepoRecord>,

    pub aggregates: AggregateReport,
    pub unique: UniqueReports,
    pub debug: DebugInfo,
}

/// Outcome of one fixed-window rate check.
#[derive(Debug, Clone, Copy)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
}
