//! Request dispatch.
//!
//! # Data Flow
//! ```text
//! HttpRequest (+ optional pending Session)
//!     → table.snapshot() → RouterIndex::match_path     (404 on miss)
//!     → RouteEntry::binding(method)                    (405 if absent)
//!     → FilterEngine::run(filter chain)                (Reject short-circuits)
//!     → ResponseCache::fetch_fresh                     (serve + session rewrite)
//!     → position params (path captures, then query overlay)
//!     → Handler::handle
//!     → ResponseCache::store (cacheable responses, head frozen)
//!     → session rewrite on a duplicate, never on the cached value
//! ```
//!
//! # Design Decisions
//! - The cache is consulted after the filter chain, so rejected requests
//!   never observe cached responses
//! - Query parameters overlay path captures: they are applied second and
//!   can fill positions path captures did not reach
//! - Synthesized 404/405 responses carry the pending session cookie

pub mod filters;
pub mod handler;

use crate::config::RouterConfig;
use crate::http::{CachePolicy, HttpRequest, HttpResponse, Session};
use crate::observability::metrics;
use crate::routing::table::{HandlerBinding, RouteTable};
use filters::{FilterEngine, FilterVerdict};
use std::sync::Arc;
use std::time::Instant;

/// Resolves requests against a finalized [`RouteTable`] and drives the
/// filter chain, cache and handler for the winning binding.
pub struct Dispatcher {
    table: Arc<RouteTable>,
    filters: Arc<dyn FilterEngine>,
    config: RouterConfig,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>, filters: Arc<dyn FilterEngine>, config: RouterConfig) -> Self {
        Self {
            table,
            filters,
            config,
        }
    }

    pub fn table(&self) -> &Arc<RouteTable> {
        &self.table
    }

    /// Resolve and serve one request.
    ///
    /// `session` is a pending session the transport layer wants established;
    /// whatever response leaves the core carries its cookie, with cached
    /// responses duplicated first.
    pub async fn dispatch(&self, req: HttpRequest, session: Option<Session>) -> HttpResponse {
        let started = Instant::now();
        let method = req.method().clone();
        let path = req.path().to_string();

        let resp = self.dispatch_inner(req, session).await;

        tracing::debug!(
            method = %method,
            path = %path,
            status = resp.status().as_u16(),
            "Dispatched request"
        );
        metrics::record_dispatch(&method, resp.status(), started.elapsed());
        resp
    }

    async fn dispatch_inner(&self, req: HttpRequest, session: Option<Session>) -> HttpResponse {
        let index = match self.table.snapshot() {
            Some(index) if !index.is_empty() => index,
            _ => return self.not_found(session),
        };

        let Some(matched) = index.match_path(req.path()) else {
            tracing::debug!(path = %req.path(), "No route matched");
            return self.not_found(session);
        };

        let entry = index.entry(matched.entry);
        let Some(binding) = entry.binding(req.method()) else {
            tracing::debug!(
                method = %req.method(),
                pattern = %entry.pattern(),
                "Route matched but method not bound"
            );
            return self.method_not_allowed(session);
        };
        let binding = binding.clone();

        if let FilterVerdict::Reject(resp) = self.filters.run(binding.filter_names(), &req).await {
            // the filter engine owns the terminal response
            return resp;
        }

        if self.config.cache.enabled {
            if let Some(cached) = binding.cache().fetch_fresh() {
                metrics::record_cache_hit();
                tracing::trace!(pattern = %entry.pattern(), "Serving cached response");
                return match session {
                    None => (*cached).clone(),
                    Some(session) => self.session_variant(&cached, &session),
                };
            }
            metrics::record_cache_miss();
        }

        let params = position_params(&binding, matched.captures, &req);
        let mut resp = binding.handler.handle(params, req).await;

        if self.config.cache.enabled && resp.cache_policy().is_cacheable() {
            resp.freeze_head();
            binding.cache().store(Arc::new(resp.clone()));
        }

        match session {
            Some(session) => self.session_variant(&resp, &session),
            None => resp,
        }
    }

    /// Duplicate a response for session establishment: the copy is marked
    /// non-cacheable and carries the session cookie; the original (and any
    /// cache slot holding it) stays untouched.
    fn session_variant(&self, resp: &HttpResponse, session: &Session) -> HttpResponse {
        let mut dup = resp.clone();
        dup.set_cache_policy(CachePolicy::NoCache);
        dup.add_cookie(session.cookie(&self.config.session.cookie_name));
        dup
    }

    fn not_found(&self, session: Option<Session>) -> HttpResponse {
        self.with_pending_session(HttpResponse::not_found(), session)
    }

    fn method_not_allowed(&self, session: Option<Session>) -> HttpResponse {
        self.with_pending_session(HttpResponse::method_not_allowed(), session)
    }

    fn with_pending_session(
        &self,
        mut resp: HttpResponse,
        session: Option<Session>,
    ) -> HttpResponse {
        if let Some(session) = session {
            resp.add_cookie(session.cookie(&self.config.session.cookie_name));
        }
        resp
    }
}

/// Build the positional parameter list for a handler invocation.
///
/// Path captures land first, each at its declared 1-based position; query
/// values overlay second. The list grows to the maximum referenced
/// position; unreferenced positions stay empty.
fn position_params(
    binding: &HandlerBinding,
    captures: Vec<String>,
    req: &HttpRequest,
) -> Vec<String> {
    let mut params = vec![String::new(); binding.param_positions().len()];

    for (capture, &place) in captures.into_iter().zip(binding.param_positions()) {
        if place > params.len() {
            params.resize(place, String::new());
        }
        params[place - 1] = capture;
    }

    for (key, value) in req.query() {
        if let Some(&place) = binding.query_positions().get(key) {
            if place > params.len() {
                params.resize(place, String::new());
            }
            params[place - 1] = value.clone();
        }
    }

    params
}
