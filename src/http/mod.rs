//! HTTP object contracts consumed and produced by the dispatch core.
//!
//! # Data Flow
//! ```text
//! Transport layer (out of scope) parses the wire request
//!     → request.rs (method, normalized path, query map, headers)
//!     → [routing + dispatch resolve a handler]
//!     → response.rs (status, headers, cookies, cache policy)
//!     → session.rs (pending session id → Set-Cookie on the way out)
//!     → Transport layer serializes and sends
//! ```
//!
//! # Design Decisions
//! - Vocabulary types (`Method`, `StatusCode`, `HeaderMap`) come from the
//!   `http` crate; the transport stack built on top of them is out of scope
//! - Query keys are unique, last occurrence wins
//! - Responses are plain values; duplication is `Clone`

pub mod request;
pub mod response;
pub mod session;

pub use request::HttpRequest;
pub use response::{CachePolicy, Cookie, HttpResponse};
pub use session::Session;
