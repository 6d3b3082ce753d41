//! Read-time snapshot upgrade.
//!
//! Snapshots written under an older schema may be missing reports in the
//! `unique` bag. Instead of invalidating the cache, any absent report is
//! recomputed here from the stored repos. The function is total and
//! idempotent; the stored copy is not rewritten.

use crate::{compute_coverage, compute_engineering, compute_maturity, MaturityParams};
use repocards_store::Snapshot;
use tracing::debug;

pub fn upgrade_snapshot(mut snapshot: Snapshot) -> Snapshot {
    if snapshot.unique.maturity.is_none() {
        debug!(username = %snapshot.username, "filling missing maturity report");
        snapshot.unique.maturity = Some(compute_maturity(
            &snapshot.repos,
            &MaturityParams::default(),
        ));
    }
    if snapshot.unique.engineering.is_none() {
        debug!(username = %snapshot.username, "filling missing engineering report");
        snapshot.unique.engineering = Some(compute_engineering(&snapshot.repos));
    }
    if snapshot.unique.coverage.is_none() {
        debug!(username = %snapshot.username, "filling missing coverage report");
        snapshot.unique.coverage = Some(compute_coverage(&snapshot.repos));
    }
    snapshot
}
