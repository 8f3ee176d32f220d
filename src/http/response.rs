//! Response object produced by handlers and synthesized by the dispatcher.
//!
//! # Responsibilities
//! - Carry status, headers, cookies and body back to the transport layer
//! - Declare cacheability through `CachePolicy`
//! - Freeze a serialized header block when a response enters a cache slot
//! - Support duplication (`Clone`) so session rewriting never touches a
//!   shared cached value

use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde::Serialize;
use std::sync::Arc;
use std::time::SystemTime;

/// Cacheability signal a handler attaches to its response.
///
/// `Forever` keeps the response in the route's cache slot until it is
/// replaced; `MaxAge` expires it after the given duration; `NoCache` (the
/// default) keeps it out of the slot entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    NoCache,
    Forever,
    MaxAge(std::time::Duration),
}

impl CachePolicy {
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, CachePolicy::NoCache)
    }
}

/// A response cookie, serialized as a `Set-Cookie` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: String,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn render(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// An HTTP response value.
///
/// `Clone` produces an independent mutable copy; the dispatcher relies on
/// that for session rewriting of cached responses.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    cookies: Vec<Cookie>,
    body: String,
    cache_policy: CachePolicy,
    created_at: SystemTime,
    frozen_head: Option<Arc<str>>,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            cookies: Vec::new(),
            body: String::new(),
            cache_policy: CachePolicy::NoCache,
            created_at: SystemTime::now(),
            frozen_head: None,
        }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Synthesized when no registered route matches the request path.
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND).with_body("No matching route found")
    }

    /// Synthesized when a route matches but has no binding for the method.
    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED).with_body("Method not allowed")
    }

    /// A 200 response with a JSON body and content type.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let mut resp = Self::ok().with_body(serde_json::to_string(value)?);
        resp.headers.insert(
            http::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(resp)
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self.frozen_head = None;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.set_cache_policy(policy);
        self
    }

    /// Change the cacheability signal. Invalidates any frozen head, since
    /// the serialized form no longer describes this value.
    pub fn set_cache_policy(&mut self, policy: CachePolicy) {
        self.cache_policy = policy;
        self.frozen_head = None;
    }

    pub fn add_cookie(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
        self.frozen_head = None;
    }

    pub fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
        self.frozen_head = None;
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache_policy
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Serialize and pin the header block. Called once when the response is
    /// published into a cache slot, so repeated serves skip re-rendering.
    pub fn freeze_head(&mut self) {
        self.frozen_head = Some(Arc::from(self.render_head()));
    }

    pub fn frozen_head(&self) -> Option<&str> {
        self.frozen_head.as_deref()
    }

    fn render_head(&self) -> String {
        let mut head = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("")
        );
        for (name, value) in self.headers.iter() {
            head.push_str(name.as_str());
            head.push_str(": ");
            head.push_str(&String::from_utf8_lossy(value.as_bytes()));
            head.push_str("\r\n");
        }
        head.push_str(&format!("Content-Length: {}\r\n", self.body.len()));
        for cookie in &self.cookies {
            head.push_str("Set-Cookie: ");
            head.push_str(&cookie.render());
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_policy_is_no_cache() {
        assert_eq!(HttpResponse::ok().cache_policy(), CachePolicy::NoCache);
        assert!(!CachePolicy::NoCache.is_cacheable());
        assert!(CachePolicy::Forever.is_cacheable());
        assert!(CachePolicy::MaxAge(Duration::from_secs(5)).is_cacheable());
    }

    #[test]
    fn test_frozen_head_contains_status_and_cookies() {
        let mut resp = HttpResponse::ok().with_body("hello");
        resp.add_cookie(Cookie::new("token", "abc"));
        resp.freeze_head();
        let head = resp.frozen_head().unwrap();
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Length: 5\r\n"));
        assert!(head.contains("Set-Cookie: token=abc\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
    }

    #[test]
    fn test_mutation_invalidates_frozen_head() {
        let mut resp = HttpResponse::ok();
        resp.freeze_head();
        assert!(resp.frozen_head().is_some());
        resp.add_cookie(Cookie::new("s", "1"));
        assert!(resp.frozen_head().is_none());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = HttpResponse::ok().with_cache_policy(CachePolicy::Forever);
        let mut copy = original.clone();
        copy.set_cache_policy(CachePolicy::NoCache);
        copy.add_cookie(Cookie::new("id", "x"));
        assert_eq!(original.cache_policy(), CachePolicy::Forever);
        assert!(original.cookies().is_empty());
    }

    #[test]
    fn test_json_sets_content_type() {
        let resp = HttpResponse::json(&serde_json::json!({"ok": true})).unwrap();
        assert_eq!(
            resp.headers().get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(resp.body(), r#"{"ok":true}"#);
    }
}
