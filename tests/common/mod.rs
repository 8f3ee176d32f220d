//! Shared utilities for integration testing.

// each test binary uses its own subset of these helpers
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use switchboard::{
    CachePolicy, Dispatcher, FilterEngine, FilterVerdict, FnHandler, Handler, HttpRequest,
    HttpResponse, PassthroughFilters, RouteTable, RouterConfig,
};

/// Handler that counts invocations and echoes its parameters as
/// `p1|p2|...` in the response body.
pub struct EchoHandler {
    param_count: usize,
    pub calls: Arc<AtomicUsize>,
    cache_policy: CachePolicy,
}

impl EchoHandler {
    pub fn new(param_count: usize) -> Self {
        Self {
            param_count,
            calls: Arc::new(AtomicUsize::new(0)),
            cache_policy: CachePolicy::NoCache,
        }
    }

    pub fn cacheable(param_count: usize, policy: CachePolicy) -> Self {
        Self {
            param_count,
            calls: Arc::new(AtomicUsize::new(0)),
            cache_policy: policy,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Handler for EchoHandler {
    fn param_count(&self) -> usize {
        self.param_count
    }

    fn handle(&self, params: Vec<String>, _req: HttpRequest) -> BoxFuture<'static, HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let policy = self.cache_policy;
        Box::pin(async move {
            HttpResponse::ok()
                .with_body(params.join("|"))
                .with_cache_policy(policy)
        })
    }
}

/// Filter engine that rejects whenever the chain contains a given name.
pub struct RejectingFilters {
    pub reject_on: String,
}

impl FilterEngine for RejectingFilters {
    fn run<'a>(
        &'a self,
        names: &'a [String],
        _req: &'a HttpRequest,
    ) -> BoxFuture<'a, FilterVerdict> {
        Box::pin(async move {
            if names.iter().any(|n| *n == self.reject_on) {
                FilterVerdict::Reject(
                    HttpResponse::new(http::StatusCode::FORBIDDEN).with_body("rejected by filter"),
                )
            } else {
                FilterVerdict::Pass
            }
        })
    }
}

/// Install a tracing subscriber once per test binary.
pub fn init_tracing() {
    static TRACING: std::sync::Once = std::sync::Once::new();
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "switchboard=debug".into()),
            )
            .try_init();
    });
}

/// Dispatcher over the given table with default config and no filters.
pub fn dispatcher(table: Arc<RouteTable>) -> Dispatcher {
    init_tracing();
    Dispatcher::new(table, Arc::new(PassthroughFilters), RouterConfig::default())
}

/// A handler that always replies 200 with a fixed body.
pub fn fixed_handler(body: &'static str) -> Arc<dyn Handler> {
    Arc::new(FnHandler::new(1, move |_params, _req| async move {
        HttpResponse::ok().with_body(body)
    }))
}
