//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatch hot path produces:
//!     → tracing events (match decisions, cache hits, dispatch outcomes)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → whatever subscriber/exporter the embedding process installs
//! ```
//!
//! # Design Decisions
//! - This crate only records; subscriber and exporter wiring belong to the
//!   embedding process
//! - Metric updates are cheap (atomic increments) and safe to leave enabled

pub mod metrics;
