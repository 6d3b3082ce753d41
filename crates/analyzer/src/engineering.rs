//! Engineering signal: velocity / impact / breadth / hygiene, 0-100 each.

use crate::{round_100, scale_to_100, REPORT_VERSION};
use repocards_store::{EngineeringDimensions, EngineeringReport, RepoRecord};

/// Band bounds for the linear rescales.
const VELOCITY_BAND: (f64, f64) = (0.05, 0.6);
const IMPACT_BAND: (f64, f64) = (20.0, 2000.0);
const BREADTH_BAND: (f64, f64) = (2.0, 40.0);

/// Overall weighting: velocity 0.4, impact 0.25, breadth 0.15, hygiene 0.2.
const WEIGHTS: (f64, f64, f64, f64) = (0.4, 0.25, 0.15, 0.2);

/// Fork-heavy and archive-heavy profiles lose hygiene at these rates.
const HYGIENE_ARCHIVED_PENALTY: f64 = 0.6;
const HYGIENE_FORK_PENALTY: f64 = 0.4;

pub fn compute_engineering(repos: &[RepoRecord]) -> EngineeringReport {
    let active: Vec<&RepoRecord> = repos.iter().filter(|r| !r.is_archived).collect();

    let pushed_30 = active
        .iter()
        .filter(|r| r.activity.days_since_push <= 30)
        .count();
    let velocity_ratio = pushed_30 as f64 / active.len().max(1) as f64;
    let velocity = scale_to_100(velocity_ratio, VELOCITY_BAND.0, VELOCITY_BAND.1);

    let stars: i64 = active.iter().map(|r| r.stargazers_count).sum();
    let forks: i64 = active.iter().map(|r| r.forks_count).sum();
    let weighted = stars as f64 + forks as f64 * 1.5;
    let impact = scale_to_100(weighted, IMPACT_BAND.0, IMPACT_BAND.1);

    let non_fork = active.iter().filter(|r| !r.is_fork).count();
    let breadth = scale_to_100(non_fork as f64, BREADTH_BAND.0, BREADTH_BAND.1);

    let total = repos.len().max(1) as f64;
    let archived_ratio = repos.iter().filter(|r| r.is_archived).count() as f64 / total;
    let fork_ratio = repos.iter().filter(|r| r.is_fork).count() as f64 / total;
    let hygiene = round_100(
        (1.0 - archived_ratio * HYGIENE_ARCHIVED_PENALTY - fork_ratio * HYGIENE_FORK_PENALTY)
            * 100.0,
    );

    let score = round_100(
        f64::from(velocity) * WEIGHTS.0
            + f64::from(impact) * WEIGHTS.1
            + f64::from(breadth) * WEIGHTS.2
            + f64::from(hygiene) * WEIGHTS.3,
    );

    EngineeringReport {
        version: REPORT_VERSION.to_string(),
        score,
        dimensions: EngineeringDimensions {
            velocity,
            impact,
            breadth,
            hygiene,
        },
    }
}
