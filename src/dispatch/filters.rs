//! Filter engine call contract.

use crate::http::{HttpRequest, HttpResponse};
use futures_util::future::BoxFuture;

/// Outcome of running a route's filter chain.
#[derive(Debug)]
pub enum FilterVerdict {
    /// All filters passed; dispatch continues.
    Pass,
    /// A filter short-circuited. The engine produced the terminal response
    /// itself; the dispatcher returns it untouched.
    Reject(HttpResponse),
}

/// External engine that executes a route's filter chain.
///
/// Filter names are the identifiers given at registration, in registration
/// order. The engine owns filter resolution and execution semantics.
pub trait FilterEngine: Send + Sync {
    fn run<'a>(&'a self, names: &'a [String], req: &'a HttpRequest)
        -> BoxFuture<'a, FilterVerdict>;
}

/// Engine for embedders without filters: every chain passes.
pub struct PassthroughFilters;

impl FilterEngine for PassthroughFilters {
    fn run<'a>(
        &'a self,
        _names: &'a [String],
        _req: &'a HttpRequest,
    ) -> BoxFuture<'a, FilterVerdict> {
        Box::pin(std::future::ready(FilterVerdict::Pass))
    }
}
