//! Fixed-window rate counters.
//!
//! One primitive serves both configured limiters (per-source-IP and
//! per-analyzed-username): INCR the window's counter, set the window expiry
//! on the first hit, compare against the limit.
//!
//! When the counting store is unreachable the limiter fails open: the
//! request is allowed with full remaining and a warning is logged. The
//! snapshot cache and the stampede lock still bound upstream cost, and an
//! embedded image must keep rendering through a store blip.

use crate::{Kv, RateDecision};
use std::sync::Arc;
use tracing::warn;

pub struct FixedWindowLimiter {
    kv: Arc<dyn Kv>,
}

impl FixedWindowLimiter {
    pub fn new(kv: Arc<dyn Kv>) -> Self {
        Self { kv }
    }

    pub async fn check_and_consume(
        &self,
        key: &str,
        window_seconds: u64,
        limit: u32,
    ) -> RateDecision {
        let count = match self.kv.incr(key).await {
            Ok(count) => count,
            Err(e) => {
                warn!(key = key, error = %e, "rate counter unreachable, failing open");
                return RateDecision {
                    allowed: true,
                    limit,
                    remaining: limit,
                };
            }
        };

        if count == 1 {
            // First hit establishes the window start.
            if let Err(e) = self.kv.expire(key, window_seconds).await {
                warn!(key = key, error = %e, "failed to arm rate window expiry");
            }
        }

        RateDecision {
            allowed: count <= i64::from(limit),
            limit,
            remaining: u32::try_from((i64::from(limit) - count).max(0)).unwrap_or(0),
        }
    }
}
