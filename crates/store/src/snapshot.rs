//! Versioned, TTL-bound snapshot cache.
//!
//! The schema version is part of the key, so bumping it invalidates every
//! previously stored entry without touching them. A stored value that no
//! longer parses reads as absent and gets recomputed on the next miss.

use crate::keys::snapshot_key;
use crate::{Kv, Result, Snapshot};
use std::sync::Arc;
use tracing::warn;

/// Process-wide store configuration, decided once at startup.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub schema_version: String,
    pub snapshot_ttl_seconds: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            schema_version: "v1".to_string(),
            snapshot_ttl_seconds: 43_200,
        }
    }
}

pub struct SnapshotStore {
    kv: Arc<dyn Kv>,
    config: StoreConfig,
}

impl SnapshotStore {
    pub fn new(kv: Arc<dyn Kv>, config: StoreConfig) -> Self {
        Self { kv, config }
    }

    pub fn schema_version(&self) -> &str {
        &self.config.schema_version
    }

    pub fn default_ttl_seconds(&self) -> u64 {
        self.config.snapshot_ttl_seconds
    }

    pub async fn load(&self, username: &str) -> Result<Option<Snapshot>> {
        let key = snapshot_key(&self.config.schema_version, username);
        let Some(raw) = self.kv.get(&key).await? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                warn!(username = username, error = %e, "discarding unparseable snapshot");
                Ok(None)
            }
        }
    }

    /// Persist with the snapshot's own TTL: the expiry is decided once, at
    /// analysis time, and the stored value matches it by construction.
    pub async fn save(&self, username: &str, snapshot: &Snapshot) -> Result<()> {
        let key = snapshot_key(&self.config.schema_version, username);
        let raw = serde_json::to_string(snapshot)?;
        self.kv.set_ex(&key, snapshot.ttl_seconds, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AggregateReport, DebugInfo, MemoryKv, UniqueReports};
    use chrono::Utc;

    fn snapshot(username: &str, version: &str) -> Snapshot {
        Snapshot {
            version: version.to_string(),
            username: username.to_string(),
            generated_at: Utc::now(),
            ttl_seconds: 3600,
            repo_count: 0,
            repos: Vec::new(),
            aggregates: AggregateReport::default(),
            unique: UniqueReports::default(),
            debug: DebugInfo::default(),
        }
    }

    fn store_with(kv: Arc<MemoryKv>, version: &str) -> SnapshotStore {
        SnapshotStore::new(kv, StoreConfig {
            schema_version: version.to_string(),
            snapshot_ttl_seconds: 43_200,
        })
    }

    #[tokio::test]
    async fn load_after_save_round_trips() {
        let kv = Arc::new(MemoryKv::new());
        let store = store_with(kv, "v1");

        let snap = snapshot("octocat", "v1");
        store.save("octocat", &snap).await.unwrap();

        let loaded = store.load("octocat").await.unwrap().unwrap();
        assert_eq!(loaded.username, "octocat");
        assert_eq!(loaded.ttl_seconds, 3600);
        assert_eq!(loaded.generated_at, snap.generated_at);
    }

    #[tokio::test]
    async fn lookup_is_case_insensitive() {
        let kv = Arc::new(MemoryKv::new());
        let store = store_with(kv, "v1");

        store.save("OctoCat", &snapshot("OctoCat", "v1")).await.unwrap();
        assert!(store.load("octocat").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn version_bump_invalidates_old_entries() {
        let kv = Arc::new(MemoryKv::new());

        let v1 = store_with(Arc::clone(&kv), "v1");
        v1.save("octocat", &snapshot("octocat", "v1")).await.unwrap();

        let v2 = store_with(kv, "v2");
        assert!(v2.load("octocat").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entry_expires_with_its_own_ttl() {
        let kv = Arc::new(MemoryKv::new());
        let store = store_with(Arc::clone(&kv), "v1");

        store.save("octocat", &snapshot("octocat", "v1")).await.unwrap();
        kv.advance(std::time::Duration::from_secs(3601));
        assert!(store.load("octocat").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn garbage_reads_as_absent() {
        let kv = Arc::new(MemoryKv::new());
        kv.set_ex(&crate::keys::snapshot_key("v1", "octocat"), 60, "{not json")
            .await
            .unwrap();

        let store = store_with(kv, "v1");
        assert!(store.load("octocat").await.unwrap().is_none());
    }
}
