//! HTTP request routing and dispatch core.
//!
//! Compiles registered path templates (`/user/{1}/post/{2}?draft={3}`)
//! into per-route matchers, resolves each incoming request to exactly one
//! handler binding, runs the route's filter chain, positions call
//! parameters from path captures and query values, and serves or populates
//! a per-route single-slot response cache with session-cookie rewriting.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌────────────────────────────────────────────────────┐
//!                 │                   DISPATCH CORE                    │
//!                 │                                                    │
//!  registration   │  ┌──────────┐    ┌──────────┐    ┌───────────┐     │
//!  ───────────────┼─▶│ template │───▶│ matcher  │───▶│   table   │     │
//!  (startup only) │  │ compiler │    │ compile  │    │ merge +   │     │
//!                 │  └──────────┘    └──────────┘    │ finalize  │     │
//!                 │                                  └─────┬─────┘     │
//!                 │                                        │ frozen    │
//!                 │                                        │ index     │
//!  request        │  ┌──────────┐    ┌───────────┐    ┌────▼─────┐     │
//!  ───────────────┼─▶│ dispatch │───▶│   match   │───▶│ filter   │     │
//!                 │  └────┬─────┘    │ (no lock) │    │ chain    │     │
//!                 │       │          └───────────┘    └────┬─────┘     │
//!                 │       ▼                                ▼           │
//!  response       │  ┌──────────┐    ┌──────────┐     ┌─────────┐      │
//!  ◀──────────────┼──│ session  │◀───│ response │◀────│ handler │      │
//!                 │  │ rewrite  │    │  cache   │     └─────────┘      │
//!                 │  └──────────┘    └──────────┘                      │
//!                 └────────────────────────────────────────────────────┘
//! ```
//!
//! The transport layer (socket handling, wire parsing), the filter
//! execution engine and the handlers themselves are external collaborators
//! reached through the contracts in [`http`](crate::http) and
//! [`dispatch`](crate::dispatch).

// Core subsystems
pub mod dispatch;
pub mod http;
pub mod routing;

// Cross-cutting concerns
pub mod cache;
pub mod config;
pub mod error;
pub mod observability;

pub use config::RouterConfig;
pub use dispatch::filters::{FilterEngine, FilterVerdict, PassthroughFilters};
pub use dispatch::handler::{FnHandler, Handler};
pub use dispatch::Dispatcher;
pub use error::RouterError;
pub use self::http::{CachePolicy, Cookie, HttpRequest, HttpResponse, Session};
pub use routing::table::RouteTable;
