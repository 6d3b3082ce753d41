//! Maturity heuristics: docs / maintenance / repo hygiene.
//!
//! Subscores are computed over bounded samples from the head of the
//! collection. The collector requests most-recently-pushed-first ordering,
//! so the samples deliberately skew toward a user's active repos. The
//! sample sizes are an explicit parameter rather than a side effect of
//! whatever ordering happens to arrive.

use crate::{round_10, round_100, REPORT_VERSION};
use repocards_store::{MaturityReport, MaturitySubscores, RepoRecord};

#[derive(Debug, Clone, Copy)]
pub struct MaturityParams {
    /// Head-of-collection sample for the docs subscore.
    pub docs_sample: usize,
    /// Head-of-collection sample (non-archived) for the maintenance subscore.
    pub maintenance_sample: usize,
    /// Head-of-collection sample for the hygiene subscore.
    pub hygiene_sample: usize,
}

impl Default for MaturityParams {
    fn default() -> Self {
        Self {
            docs_sample: 20,
            maintenance_sample: 50,
            hygiene_sample: 50,
        }
    }
}

const MIN_DESCRIPTION_LEN: usize = 20;
const MIN_TOPICS: usize = 2;

fn score_docs_10(repos: &[RepoRecord], sample_size: usize) -> u8 {
    let sample = &repos[..repos.len().min(sample_size)];

    let described = sample
        .iter()
        .filter(|r| {
            r.description
                .as_deref()
                .map(str::trim)
                .is_some_and(|d| d.len() >= MIN_DESCRIPTION_LEN)
        })
        .count();
    let topical = sample.iter().filter(|r| r.topics.len() >= MIN_TOPICS).count();
    let wiki_or_pages = sample.iter().filter(|r| r.has_wiki || r.has_pages).count();

    // Capped sub-budgets: 5 for descriptions, 3 for topics, 2 for wiki/pages.
    let points = (described as f64 / 4.0).min(5.0)
        + (topical as f64 / 5.0).min(3.0)
        + (wiki_or_pages as f64 / 4.0).min(2.0);

    round_10(points * 1.2)
}

fn score_maintenance_10(repos: &[RepoRecord], sample_size: usize) -> u8 {
    let sample: Vec<&RepoRecord> = repos
        .iter()
        .filter(|r| !r.is_archived)
        .take(sample_size)
        .collect();
    if sample.is_empty() {
        return 0;
    }

    let recent_30 = sample
        .iter()
        .filter(|r| r.activity.days_since_push <= 30)
        .count();
    let recent_90 = sample
        .iter()
        .filter(|r| r.activity.days_since_push <= 90)
        .count();

    let ratio_30 = recent_30 as f64 / sample.len() as f64;
    let ratio_90 = recent_90 as f64 / sample.len() as f64;

    round_10(ratio_30 * 6.0 + ratio_90 * 4.0)
}

fn score_repo_hygiene_10(repos: &[RepoRecord], sample_size: usize) -> u8 {
    let sample = &repos[..repos.len().min(sample_size)];
    if sample.is_empty() {
        return 0;
    }

    let n = sample.len() as f64;
    let fork_ratio = sample.iter().filter(|r| r.is_fork).count() as f64 / n;
    let archived_ratio = sample.iter().filter(|r| r.is_archived).count() as f64 / n;
    // Open issues stand in for "uses the issue tracker"; issues-enabled
    // itself is not observable in the listing payload.
    let issue_signal = sample.iter().filter(|r| r.open_issues_count > 0).count() as f64 / n;

    round_10(10.0 - fork_ratio * 4.0 - archived_ratio * 4.0 + issue_signal * 2.0)
}

pub fn compute_maturity(repos: &[RepoRecord], params: &MaturityParams) -> MaturityReport {
    let docs_10 = score_docs_10(repos, params.docs_sample);
    let maintenance_10 = score_maintenance_10(repos, params.maintenance_sample);
    let hygiene_10 = score_repo_hygiene_10(repos, params.hygiene_sample);

    let score_10 = round_10(
        f64::from(docs_10) * 0.35 + f64::from(maintenance_10) * 0.45 + f64::from(hygiene_10) * 0.2,
    );

    let to_100 = |x: u8| round_100(f64::from(x) * 10.0);

    MaturityReport {
        version: REPORT_VERSION.to_string(),
        score: to_100(score_10),
        subscores: MaturitySubscores {
            docs: to_100(docs_10),
            maintenance: to_100(maintenance_10),
            repo_hygiene: to_100(hygiene_10),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::repo;

    #[test]
    fn empty_collection_scores_zero() {
        let report = compute_maturity(&[], &MaturityParams::default());
        assert_eq!(report.score, 0);
        assert_eq!(report.subscores.docs, 0);
        assert_eq!(report.subscores.maintenance, 0);
        assert_eq!(report.subscores.repo_hygiene, 0);
    }

    #[test]
    fn well_documented_active_repos_score_high() {
        let mut repos = Vec::new();
        for i in 0..20 {
            let mut r = repo(&format!("r{}", i), 10);
            r.description = Some("A thoroughly documented service with docs".to_string());
            r.topics = vec!["rust".to_string(), "api".to_string()];
            r.has_wiki = true;
            r.open_issues_count = 3;
            repos.push(r);
        }

        let report = compute_maturity(&repos, &MaturityParams::default());
        // docs: min(5, 20/4) + min(3, 20/5) + min(2, 20/4) = 10, *1.2 capped at 10
        assert_eq!(report.subscores.docs, 100);
        // everything pushed within 30 days: 6 + 4 = 10
        assert_eq!(report.subscores.maintenance, 100);
        assert_eq!(report.subscores.repo_hygiene, 100);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn all_archived_collection_has_zero_maintenance() {
        let mut repos = Vec::new();
        for i in 0..5 {
            let mut r = repo(&format!("r{}", i), 3);
            r.is_archived = true;
            repos.push(r);
        }

        let report = compute_maturity(&repos, &MaturityParams::default());
        assert_eq!(report.subscores.maintenance, 0);
        // hygiene: 10 - 4 * archived_ratio(1.0) = 6
        assert_eq!(report.subscores.repo_hygiene, 60);
    }

    #[test]
    fn sampling_only_reads_the_head_of_the_collection() {
        // 20 documented repos at the head, then 80 bare ones. The docs
        // sample must not see past its bound.
        let mut repos = Vec::new();
        for i in 0..20 {
            let mut r = repo(&format!("head{}", i), 10);
            r.description = Some("A thoroughly documented service with docs".to_string());
            repos.push(r);
        }
        for i in 0..80 {
            repos.push(repo(&format!("tail{}", i), 500));
        }

        let params = MaturityParams::default();
        let docs_full = compute_maturity(&repos, &params).subscores.docs;
        let docs_head = compute_maturity(&repos[..20], &params).subscores.docs;
        assert_eq!(docs_full, docs_head);
    }

    #[test]
    fn short_or_missing_descriptions_do_not_count_as_docs() {
        let mut described = repo("a", 10);
        described.description = Some("short".to_string());
        let repos = vec![described, repo("b", 10)];

        let report = compute_maturity(&repos, &MaturityParams::default());
        // No docs credit; maintenance full (both pushed recently).
        assert_eq!(report.subscores.docs, 0);
        assert_eq!(report.subscores.maintenance, 100);
    }

    #[test]
    fn is_idempotent() {
        let repos: Vec<_> = (0..30)
            .map(|i| {
                let mut r = repo(&format!("r{}", i), i * 7);
                r.is_fork = i % 4 == 0;
                r.open_issues_count = i % 3;
                r
            })
            .collect();

        let params = MaturityParams::default();
        let a = compute_maturity(&repos, &params);
        let b = compute_maturity(&repos, &params);
        assert_eq!(a.score, b.score);
        assert_eq!(a.subscores, b.subscores);
        assert!(a.score <= 100);
    }
}
