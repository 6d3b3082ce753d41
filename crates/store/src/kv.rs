//! Key-value backends.
//!
//! All coordination state lives in an external store shared by every
//! handler instance, so the primitives here must be atomic at the store:
//! `incr` for rate counters and `set_nx_ex` for the stampede lock.

use crate::{Result, StoreError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// Minimal command set the snapshot store, lock, and rate limiter need.
#[async_trait]
pub trait Kv: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Set `key` with a TTL, overwriting unconditionally.
    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<()>;

    async fn del(&self, key: &str) -> Result<()>;

    /// Atomically increment, creating the counter at 1 if absent.
    async fn incr(&self, key: &str) -> Result<i64>;

    /// Set a TTL on an existing key.
    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<()>;

    /// Atomically set `key` with a TTL only if it does not exist.
    /// Returns true when this call created the key.
    async fn set_nx_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<bool>;
}

/// Redis REST backend (Upstash-style API).
///
/// Commands are POSTed as a JSON array and the reply arrives as
/// `{"result": ...}`. One instance is shared by all handlers.
pub struct RedisRestKv {
    client: Client,
    base_url: String,
}

impl RedisRestKv {
    pub fn new(base_url: impl Into<String>, token: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| StoreError::Command {
                command: "auth".into(),
                message: e.to_string(),
            })?;
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    async fn command(&self, cmd: &[Value]) -> Result<Value> {
        let name = cmd
            .first()
            .and_then(Value::as_str)
            .unwrap_or("?")
            .to_string();

        let response = self.client.post(&self.base_url).json(&cmd).send().await?;

        let status = response.status();
        let body: Value = response.json().await?;

        if let Some(err) = body.get("error").and_then(Value::as_str) {
            return Err(StoreError::Command {
                command: name,
                message: err.to_string(),
            });
        }
        if !status.is_success() {
            return Err(StoreError::Command {
                command: name,
                message: format!("status {}", status),
            });
        }

        debug!(command = %name, "store command ok");
        Ok(body.get("result").cloned().unwrap_or(Value::Null))
    }

    fn expect_int(command: &str, reply: Value) -> Result<i64> {
        reply.as_i64().ok_or_else(|| StoreError::Reply {
            command: command.into(),
            reply: reply.to_string(),
        })
    }
}

#[async_trait]
impl Kv for RedisRestKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let reply = self.command(&[json!("GET"), json!(key)]).await?;
        match reply {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            other => Err(StoreError::Reply {
                command: "GET".into(),
                reply: other.to_string(),
            }),
        }
    }

    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<()> {
        self.command(&[json!("SETEX"), json!(key), json!(ttl_seconds), json!(value)])
            .await?;
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        self.command(&[json!("DEL"), json!(key)]).await?;
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let reply = self.command(&[json!("INCR"), json!(key)]).await?;
        Self::expect_int("INCR", reply)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<()> {
        self.command(&[json!("EXPIRE"), json!(key), json!(ttl_seconds)])
            .await?;
        Ok(())
    }

    async fn set_nx_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<bool> {
        let reply = self
            .command(&[
                json!("SET"),
                json!(key),
                json!(value),
                json!("EX"),
                json!(ttl_seconds),
                json!("NX"),
            ])
            .await?;
        // "OK" when set, null when the key already existed.
        Ok(!reply.is_null())
    }
}

struct MemoryEntry {
    value: String,
    expires_at_ms: Option<u64>,
}

/// In-process backend for tests and tokenless local runs.
///
/// Time is an internal monotonic clock that tests can push forward with
/// [`MemoryKv::advance`] to exercise window and TTL expiry.
pub struct MemoryKv {
    entries: Mutex<HashMap<String, MemoryEntry>>,
    skew_ms: AtomicU64,
    epoch: Instant,
}

impl Default for MemoryKv {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryKv {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            skew_ms: AtomicU64::new(0),
            epoch: Instant::now(),
        }
    }

    /// Push the backend's clock forward, expiring entries along the way.
    pub fn advance(&self, by: Duration) {
        self.skew_ms
            .fetch_add(by.as_millis() as u64, Ordering::SeqCst);
    }

    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64 + self.skew_ms.load(Ordering::SeqCst)
    }

    fn live<'a>(
        entries: &'a mut HashMap<String, MemoryEntry>,
        key: &str,
        now_ms: u64,
    ) -> Option<&'a mut MemoryEntry> {
        let expired = entries
            .get(key)
            .and_then(|e| e.expires_at_ms)
            .is_some_and(|at| at <= now_ms);
        if expired {
            entries.remove(key);
        }
        entries.get_mut(key)
    }
}

#[async_trait]
impl Kv for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = self.now_ms();
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        Ok(Self::live(&mut entries, key, now).map(|e| e.value.clone()))
    }

    async fn set_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<()> {
        let now = self.now_ms();
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at_ms: Some(now + ttl_seconds * 1000),
            },
        );
        Ok(())
    }

    async fn del(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        entries.remove(key);
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let now = self.now_ms();
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        let next = match Self::live(&mut entries, key, now) {
            Some(entry) => {
                let current: i64 = entry.value.parse().map_err(|_| StoreError::Reply {
                    command: "INCR".into(),
                    reply: entry.value.clone(),
                })?;
                entry.value = (current + 1).to_string();
                current + 1
            }
            None => {
                entries.insert(
                    key.to_string(),
                    MemoryEntry {
                        value: "1".to_string(),
                        expires_at_ms: None,
                    },
                );
                1
            }
        };
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<()> {
        let now = self.now_ms();
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        if let Some(entry) = Self::live(&mut entries, key, now) {
            entry.expires_at_ms = Some(now + ttl_seconds * 1000);
        }
        Ok(())
    }

    async fn set_nx_ex(&self, key: &str, ttl_seconds: u64, value: &str) -> Result<bool> {
        let now = self.now_ms();
        let mut entries = self.entries.lock().expect("kv mutex poisoned");
        if Self::live(&mut entries, key, now).is_some() {
            return Ok(false);
        }
        entries.insert(
            key.to_string(),
            MemoryEntry {
                value: value.to_string(),
                expires_at_ms: Some(now + ttl_seconds * 1000),
            },
        );
        Ok(true)
    }
}
