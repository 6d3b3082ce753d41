//! repocards Web API
//!
//! Axum routes, the request orchestrator, and the SVG card renderers.

mod config;
mod error;
mod handlers;
mod http;
mod orchestrator;
mod params;
pub mod render;
mod routes;

pub use config::AppConfig;
pub use orchestrator::Outcome;
pub use routes::create_router;

use repocards_collector::RepoSource;
use repocards_store::{AnalyzeLock, FixedWindowLimiter, Kv, SnapshotStore, StoreConfig};
use std::sync::Arc;

/// Shared application state: every coordination component rides on the same
/// KV backend.
pub struct AppState {
    pub config: AppConfig,
    pub store: SnapshotStore,
    pub lock: AnalyzeLock,
    pub limiter: FixedWindowLimiter,
    pub source: Arc<dyn RepoSource>,
}

impl AppState {
    pub fn new(config: AppConfig, kv: Arc<dyn Kv>, source: Arc<dyn RepoSource>) -> Self {
        let store = SnapshotStore::new(
            Arc::clone(&kv),
            StoreConfig {
                schema_version: config.schema_version.clone(),
                snapshot_ttl_seconds: config.snapshot_ttl_seconds,
            },
        );
        let lock = AnalyzeLock::new(Arc::clone(&kv), config.lock_ttl_seconds);
        let limiter = FixedWindowLimiter::new(kv);

        Self {
            config,
            store,
            lock,
            limiter,
            source,
        }
    }
}

pub type SharedState = Arc<AppState>;
