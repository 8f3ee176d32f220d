//! Error definitions for registration and table lifecycle.

use thiserror::Error;

/// Errors produced while building the route table.
///
/// These are configuration errors: they are only reachable during startup
/// registration, and a caller that receives one must not continue serving
/// with a partially registered table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A `{N}` placeholder referenced a parameter the handler does not declare.
    #[error("parameter placeholder (value={placeholder}) out of range (1 to {max})")]
    PlaceholderOutOfRange { placeholder: u64, max: usize },

    /// The table was already frozen by `finalize`; no further registration
    /// or re-finalization is accepted.
    #[error("route table already finalized")]
    Finalized,
}
