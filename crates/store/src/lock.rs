//! Best-effort per-username recomputation lock.
//!
//! Acquisition is a single atomic set-if-absent with a TTL, so concurrent
//! handlers racing on the same cache miss elect exactly one to recompute.
//! The TTL is the only deadlock recovery: a handler killed mid-analysis
//! never releases, and the key simply ages out. It must stay comfortably
//! above worst-case analysis latency.

use crate::keys::lock_key;
use crate::{Kv, Result};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AnalyzeLock {
    kv: Arc<dyn Kv>,
    ttl_seconds: u64,
}

impl AnalyzeLock {
    pub fn new(kv: Arc<dyn Kv>, ttl_seconds: u64) -> Self {
        Self { kv, ttl_seconds }
    }

    /// Returns a guard when this caller won the lock, `None` when another
    /// recomputation is already in flight.
    pub async fn try_acquire(&self, username: &str) -> Result<Option<LockGuard>> {
        let key = lock_key(username);
        let acquired = self.kv.set_nx_ex(&key, self.ttl_seconds, "1").await?;
        if !acquired {
            debug!(username = username, "analyze lock contended");
            return Ok(None);
        }
        Ok(Some(LockGuard {
            kv: Arc::clone(&self.kv),
            key,
            released: false,
        }))
    }
}

/// Holds the lock until released. Dropping without an explicit release
/// spawns a best-effort delete so no exit path can wedge the key for the
/// full TTL.
pub struct LockGuard {
    kv: Arc<dyn Kv>,
    key: String,
    released: bool,
}

impl LockGuard {
    pub async fn release(mut self) {
        self.released = true;
        if let Err(e) = self.kv.del(&self.key).await {
            // The TTL will clean up; losing a release only delays the next
            // recomputation, it cannot corrupt anything.
            warn!(key = %self.key, error = %e, "lock release failed, ttl will expire it");
        }
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        let kv = Arc::clone(&self.kv);
        let key = std::mem::take(&mut self.key);
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move {
                let _ = kv.del(&key).await;
            });
        }
    }
}
