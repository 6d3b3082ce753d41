//! repocards Coordination Store
//!
//! Snapshot cache, stampede lock, and rate counters backed by a shared
//! key-value store with TTL and atomic increment / set-if-absent primitives.

pub mod keys;
mod kv;
mod lock;
mod models;
mod ratelimit;
mod snapshot;

pub use kv::{Kv, MemoryKv, RedisRestKv};
pub use lock::{AnalyzeLock, LockGuard};
pub use models::*;
pub use ratelimit::FixedWindowLimiter;
pub use snapshot::{SnapshotStore, StoreConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store command {command} failed: {message}")]
    Command { command: String, message: String },

    #[error("unexpected store reply for {command}: {reply}")]
    Reply { command: String, reply: String },

    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
