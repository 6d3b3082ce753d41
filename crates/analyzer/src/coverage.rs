//! Coverage signal: how much of the collection carries a usable age signal
//! and how much of it moved recently.

use crate::{round_100, REPORT_VERSION};
use repocards_store::{CoverageReport, RepoRecord};

const RECENT_PUSH_DAYS: i64 = 90;

pub fn compute_coverage(repos: &[RepoRecord]) -> CoverageReport {
    let total = repos.len();
    if total == 0 {
        return CoverageReport {
            version: REPORT_VERSION.to_string(),
            repos_sampled_pct: 0,
            recently_active_pct: 0,
        };
    }

    let sampled = repos.iter().filter(|r| r.activity.age_days > 0).count();
    let active_90 = repos
        .iter()
        .filter(|r| r.activity.days_since_push <= RECENT_PUSH_DAYS)
        .count();

    CoverageReport {
        version: REPORT_VERSION.to_string(),
        repos_sampled_pct: round_100(sampled as f64 / total as f64 * 100.0),
        recently_active_pct: round_100(active_90 as f64 / total as f64 * 100.0),
    }
}
