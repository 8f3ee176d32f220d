//! Handler call contract.

use crate::http::{HttpRequest, HttpResponse};
use futures_util::future::BoxFuture;
use std::future::Future;

/// An opaque request handler.
///
/// `param_count` is the number of positional parameters the handler
/// declares; registration validates every template placeholder against it.
/// `handle` receives the positioned parameter list (unset positions are
/// empty strings) and the request.
pub trait Handler: Send + Sync {
    fn param_count(&self) -> usize;

    fn handle(&self, params: Vec<String>, req: HttpRequest) -> BoxFuture<'static, HttpResponse>;
}

/// Adapter exposing an async closure as a [`Handler`].
pub struct FnHandler<F> {
    param_count: usize,
    func: F,
}

impl<F> FnHandler<F> {
    pub fn new(param_count: usize, func: F) -> Self {
        Self { param_count, func }
    }
}

impl<F, Fut> Handler for FnHandler<F>
where
    F: Fn(Vec<String>, HttpRequest) -> Fut + Send + Sync,
    Fut: Future<Output = HttpResponse> + Send + 'static,
{
    fn param_count(&self) -> usize {
        self.param_count
    }

    fn handle(&self, params: Vec<String>, req: HttpRequest) -> BoxFuture<'static, HttpResponse> {
        Box::pin((self.func)(params, req))
    }
}
