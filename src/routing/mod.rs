//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Registration (at startup):
//!     template string + handler
//!     → template.rs (split query section, validate {N} placeholders)
//!     → matcher.rs (compile path into literal/capture segments)
//!     → table.rs (merge by structural pattern equality, under mutex)
//!     → finalize(): freeze entries into an immutable RouterIndex
//!
//! Incoming Request:
//!     table.snapshot() (lock-free arc-swap load)
//!     → RouterIndex::match_path (ordered scan, first match wins)
//!     → Return: RouteMatch { entry index, captures } or no match
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: segment-wise compiled matching, captures in one pass
//! - First match wins, in registration order
//! - Placeholder numbers do not participate in pattern identity, so
//!   `/a/{1}` and `/a/{2}` merge into one entry

pub mod matcher;
pub mod table;
pub mod template;

pub use matcher::PathPattern;
pub use table::{HandlerBinding, RouteEntry, RouteMatch, RouteTable, RouterIndex};
pub use template::CompiledTemplate;
