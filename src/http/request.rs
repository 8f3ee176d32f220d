//! Structured request object handed in by the transport layer.

use http::{HeaderMap, Method};
use std::collections::HashMap;

/// An already-parsed HTTP request.
///
/// The dispatch core only reads the method, the normalized path and the
/// query map; headers ride along untouched for filters and handlers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    headers: HeaderMap,
}

impl HttpRequest {
    /// Create a request with an empty query map.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: HashMap::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Parse a request target of the form `/path` or `/path?k=v&k2=v2`.
    ///
    /// Duplicate query keys keep the last value. A pair without `=` becomes
    /// a key with an empty value.
    pub fn from_target(method: Method, target: &str) -> Self {
        let (path, raw_query) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        let mut query = HashMap::new();
        for pair in raw_query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            query.insert(key.to_string(), value.to_string());
        }
        Self {
            method,
            path: path.to_string(),
            query,
            headers: HeaderMap::new(),
        }
    }

    /// Add or replace a query parameter.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full query map (keys unique, last wins).
    pub fn query(&self) -> &HashMap<String, String> {
        &self.query
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}
