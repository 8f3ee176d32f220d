//! Per-binding response cache.
//!
//! # Responsibilities
//! - Hold the most recent cacheable response for one (route, method) binding
//! - Answer freshness queries against the response's cache policy
//! - Replace the slot unconditionally on store (last write wins)
//!
//! # Design Decisions
//! - One slot per binding, guarded by its own mutex, so cache traffic on one
//!   route never contends with another route or with table registration
//! - The slot is keyed by binding only; it does not vary by parameter
//!   values. Routes whose output depends on parameters must not mark their
//!   responses cacheable
//! - Expired entries linger until the next store replaces them

use crate::http::{CachePolicy, HttpResponse};
use std::sync::{Arc, Mutex};
use std::time::Instant;

struct CachedResponse {
    response: Arc<HttpResponse>,
    created: Instant,
}

/// Single-slot cache of the most recent handler response.
pub struct ResponseCache {
    slot: Mutex<Option<CachedResponse>>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached response if it is still fresh.
    ///
    /// `Forever` responses never expire; `MaxAge(ttl)` responses are fresh
    /// while the current time is before `created + ttl`.
    pub fn fetch_fresh(&self) -> Option<Arc<HttpResponse>> {
        let slot = self.slot.lock().expect("response cache mutex poisoned");
        let cached = slot.as_ref()?;
        match cached.response.cache_policy() {
            CachePolicy::Forever => Some(cached.response.clone()),
            CachePolicy::MaxAge(ttl) => {
                (cached.created.elapsed() < ttl).then(|| cached.response.clone())
            }
            CachePolicy::NoCache => None,
        }
    }

    /// Publish a response into the slot, stamping the current instant and
    /// replacing any prior entry.
    pub fn store(&self, response: Arc<HttpResponse>) {
        let mut slot = self.slot.lock().expect("response cache mutex poisoned");
        *slot = Some(CachedResponse {
            response,
            created: Instant::now(),
        });
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
