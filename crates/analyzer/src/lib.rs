//! repocards Metrics Engine
//!
//! Pure scoring functions over normalized repository records. No I/O, no
//! shared state: the same input always yields the same reports.
//!
//! All score arithmetic rounds with `f64::round` (half away from zero,
//! which on this non-negative domain is plain half-up) so rendered integers
//! are stable across call sites.

pub mod aggregate;
pub mod coverage;
pub mod engineering;
pub mod maturity;
pub mod upgrade;

pub use aggregate::compute_aggregates;
pub use coverage::compute_coverage;
pub use engineering::compute_engineering;
pub use maturity::{compute_maturity, MaturityParams};
pub use upgrade::upgrade_snapshot;

/// Report schema tag shared by all v1 reports.
pub const REPORT_VERSION: &str = "v1";

/// Linear band rescale onto 0..=100: at or below `lo` maps to 0, at or
/// above `hi` maps to 100, linear in between.
pub(crate) fn scale_to_100(x: f64, lo: f64, hi: f64) -> u8 {
    let t = if x <= lo {
        0.0
    } else if x >= hi {
        1.0
    } else {
        (x - lo) / (hi - lo)
    };
    round_100(t * 100.0)
}

pub(crate) fn round_100(x: f64) -> u8 {
    x.round().clamp(0.0, 100.0) as u8
}

pub(crate) fn round_10(x: f64) -> u8 {
    x.round().clamp(0.0, 10.0) as u8
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{Duration, Utc};
    use repocards_store::{RepoActivity, RepoRecord};

    /// Baseline non-fork, non-archived repo; tests tweak fields directly.
    pub fn repo(name: &str, days_since_push: i64) -> RepoRecord {
        let now = Utc::now();
        RepoRecord {
            id: 1,
            name: name.to_string(),
            full_name: format!("user/{}", name),
            html_url: format!("https://github.com/user/{}", name),
            description: None,
            is_fork: false,
            is_archived: false,
            is_template: false,
            created_at: now - Duration::days(400),
            updated_at: now,
            pushed_at: now - Duration::days(days_since_push),
            language: None,
            topics: Vec::new(),
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            size_kb: 10,
            default_branch: "main".to_string(),
            has_wiki: false,
            has_pages: false,
            activity: RepoActivity {
                days_since_push,
                age_days: 400,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_clamps_outside_the_band() {
        assert_eq!(scale_to_100(0.0, 0.05, 0.6), 0);
        assert_eq!(scale_to_100(0.05, 0.05, 0.6), 0);
        assert_eq!(scale_to_100(0.6, 0.05, 0.6), 100);
        assert_eq!(scale_to_100(5.0, 0.05, 0.6), 100);
    }

    #[test]
    fn scale_is_linear_inside_the_band() {
        // (0.5 - 0.05) / 0.55 = 0.8181.. -> 82
        assert_eq!(scale_to_100(0.5, 0.05, 0.6), 82);
        assert_eq!(scale_to_100(0.325, 0.05, 0.6), 50);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_100(55.5), 56);
        assert_eq!(round_100(55.4999), 55);
        assert_eq!(round_10(9.5), 10);
        assert_eq!(round_10(12.0), 10);
    }
}
