//! Normalization of raw API repos into [`RepoRecord`]s.
//!
//! The derived activity fields are computed against a single caller-supplied
//! reference instant and clamped at zero, so clock skew or future timestamps
//! from upstream can never produce negative ages.

use crate::github::ApiRepo;
use chrono::{DateTime, Utc};
use repocards_store::{RepoActivity, RepoRecord};

fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_days().max(0)
}

pub fn normalize_repos(api_repos: Vec<ApiRepo>, now: DateTime<Utc>) -> Vec<RepoRecord> {
    api_repos.into_iter().map(|r| normalize_repo(r, now)).collect()
}

fn normalize_repo(r: ApiRepo, now: DateTime<Utc>) -> RepoRecord {
    // Repos that have never been pushed report a null pushed_at; treat the
    // creation instant as the last push so the record stays interpretable.
    let pushed_at = r.pushed_at.unwrap_or(r.created_at);

    RepoRecord {
        id: r.id,
        name: r.name,
        full_name: r.full_name,
        html_url: r.html_url,
        description: r.description,

        is_fork: r.fork,
        is_archived: r.archived,
        is_template: r.is_template,

        created_at: r.created_at,
        updated_at: r.updated_at,
        pushed_at,

        language: r.language,
        topics: r.topics,

        stargazers_count: r.stargazers_count,
        forks_count: r.forks_count,
        open_issues_count: r.open_issues_count,

        size_kb: r.size,
        default_branch: r.default_branch,

        has_wiki: r.has_wiki,
        has_pages: r.has_pages,

        activity: RepoActivity {
            days_since_push: days_between(pushed_at, now),
            age_days: days_between(r.created_at, now),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn api_repo(created: &str, pushed: Option<&str>) -> ApiRepo {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "r",
            "full_name": "u/r",
            "html_url": "https://github.com/u/r",
            "description": null,
            "fork": false,
            "archived": false,
            "is_template": false,
            "created_at": created,
            "updated_at": created,
            "pushed_at": pushed,
            "language": null,
            "topics": [],
            "stargazers_count": 0,
            "forks_count": 0,
            "open_issues_count": 0,
            "size": 0,
            "default_branch": "main",
            "has_wiki": false,
            "has_pages": false
        }))
        .unwrap()
    }

    #[test]
    fn activity_counts_whole_days() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let repo = api_repo("2026-08-01T00:00:00Z", Some("2026-08-20T00:00:00Z"));

        let record = normalize_repo(repo, now);
        assert_eq!(record.activity.days_since_push, 5);
        assert_eq!(record.activity.age_days, 24);
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
        let repo = api_repo("2027-01-01T00:00:00Z", Some("2027-01-01T00:00:00Z"));

        let record = normalize_repo(repo, now);
        assert_eq!(record.activity.days_since_push, 0);
        assert_eq!(record.activity.age_days, 0);
    }

    #[test]
    fn never_pushed_repo_falls_back_to_creation() {
        let now = Utc.with_ymd_and_hms(2026, 8, 25, 0, 0, 0).unwrap();
        let repo = api_repo("2026-08-15T00:00:00Z", None);

        let record = normalize_repo(repo, now);
        assert_eq!(record.pushed_at, record.created_at);
        assert_eq!(record.activity.days_since_push, 10);
    }
}
