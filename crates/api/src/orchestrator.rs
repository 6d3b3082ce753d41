//! Per-request control flow: cache-hit vs. recomputation, stampede lock,
//! rate windows, and the terminal outcome for every branch.

use crate::params::validate_username;
use crate::AppState;
use chrono::Utc;
use repocards_analyzer::{
    compute_aggregates, compute_coverage, compute_engineering, compute_maturity, upgrade_snapshot,
    MaturityParams,
};
use repocards_collector::{normalize::normalize_repos, CollectorError};
use repocards_store::{keys, DebugInfo, RateDecision, Snapshot, UniqueReports};
use tracing::{error, info, warn};

const IP_WINDOW_SECONDS: u64 = 60;
const ANALYZE_WINDOW_SECONDS: u64 = 3_600;

/// Terminal state of one request. Every variant maps to a distinct response
/// shape and cache policy in the handlers.
pub enum Outcome {
    Served {
        snapshot: Box<Snapshot>,
        from_cache: bool,
        rate: RateDecision,
    },
    /// Malformed username; rejected after the IP window was consumed.
    BadInput,
    /// Another handler is recomputing this user; not an error.
    Analyzing,
    RateLimited,
    NotFound,
    UpstreamError,
}

/// Runs the request state machine. The username arrives raw: the IP window
/// is consumed before validation, so a client hammering garbage names is
/// throttled like any other.
pub async fn run(state: &AppState, raw_username: &str, ip: &str) -> Outcome {
    let rate = state
        .limiter
        .check_and_consume(
            &keys::rate_ip_key(ip),
            IP_WINDOW_SECONDS,
            state.config.ip_limit_per_min,
        )
        .await;
    if !rate.allowed {
        return Outcome::RateLimited;
    }

    let Some(username) = validate_username(raw_username) else {
        return Outcome::BadInput;
    };

    match state.store.load(username).await {
        Ok(Some(snapshot)) => {
            // Older snapshots may be missing reports; fill them from the
            // stored repos without touching the cache or the upstream.
            return Outcome::Served {
                snapshot: Box::new(upgrade_snapshot(snapshot)),
                from_cache: true,
                rate,
            };
        }
        Ok(None) => {}
        Err(e) => {
            // An unreadable cache is a miss; the lock still serializes the
            // recomputation attempts behind it.
            warn!(username = username, error = %e, "snapshot load failed, treating as miss");
        }
    }

    let guard = match state.lock.try_acquire(username).await {
        Ok(Some(guard)) => guard,
        Ok(None) => return Outcome::Analyzing,
        Err(e) => {
            // Without the lock we cannot bound concurrent recomputation;
            // answer as if someone else holds it rather than stampede.
            warn!(username = username, error = %e, "lock acquire failed");
            return Outcome::Analyzing;
        }
    };

    // The analyze window counts recomputation attempts only, never
    // cache-hit reads: it exists to bound upstream API cost.
    let analyze_rate = state
        .limiter
        .check_and_consume(
            &keys::rate_user_analyze_key(username),
            ANALYZE_WINDOW_SECONDS,
            state.config.analyze_limit_per_hour,
        )
        .await;
    if !analyze_rate.allowed {
        guard.release().await;
        return Outcome::RateLimited;
    }

    let result = analyze_and_save(state, username).await;
    guard.release().await;

    match result {
        Ok(snapshot) => Outcome::Served {
            snapshot: Box::new(snapshot),
            from_cache: false,
            rate,
        },
        Err(CollectorError::NotFound) => Outcome::NotFound,
        Err(e) => {
            error!(username = username, error = %e, "analysis failed");
            Outcome::UpstreamError
        }
    }
}

/// Fetch, normalize, score, persist. All-or-nothing: a fetch failure on any
/// page discards everything and no partial snapshot is written.
async fn analyze_and_save(
    state: &AppState,
    username: &str,
) -> Result<Snapshot, CollectorError> {
    let listing = state.source.list_repos(username).await?;
    let now = Utc::now();
    let repos = normalize_repos(listing.repos, now);

    let aggregates = compute_aggregates(&repos);
    let unique = UniqueReports {
        maturity: Some(compute_maturity(&repos, &MaturityParams::default())),
        engineering: Some(compute_engineering(&repos)),
        coverage: Some(compute_coverage(&repos)),
    };

    let snapshot = Snapshot {
        version: state.store.schema_version().to_string(),
        username: username.to_string(),
        generated_at: now,
        ttl_seconds: state.store.default_ttl_seconds(),
        repo_count: repos.len(),
        repos,
        aggregates,
        unique,
        debug: DebugInfo {
            github_api_calls: listing.meta.calls,
            rate_limit: listing.meta.rate_limit,
        },
    };

    if let Err(e) = state.store.save(username, &snapshot).await {
        // Serve what we computed; the next request will recompute.
        warn!(username = username, error = %e, "snapshot save failed");
    } else {
        info!(
            username = username,
            repos = snapshot.repo_count,
            calls = snapshot.debug.github_api_calls,
            "snapshot persisted"
        );
    }

    Ok(snapshot)
}
