//! Metrics recorded by the dispatch hot path.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by method, status
//! - `router_dispatch_duration_seconds` (histogram): dispatch latency
//! - `router_cache_hits_total` / `router_cache_misses_total` (counters):
//!   per-route response cache effectiveness

use http::{Method, StatusCode};
use metrics::{counter, histogram};
use std::time::Duration;

pub fn record_dispatch(method: &Method, status: StatusCode, elapsed: Duration) {
    counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.as_u16().to_string()
    )
    .increment(1);
    histogram!("router_dispatch_duration_seconds").record(elapsed.as_secs_f64());
}

pub fn record_cache_hit() {
    counter!("router_cache_hits_total").increment(1);
}

pub fn record_cache_miss() {
    counter!("router_cache_misses_total").increment(1);
}
