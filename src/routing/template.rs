//! Path template compilation.
//!
//! # Responsibilities
//! - Split a registration template into its path and query sections
//! - Compile the path into a [`PathPattern`] with placeholder positions
//! - Record `key={N}` query placeholders with the same range validation
//!
//! # Design Decisions
//! - Placeholder positions are recorded in left-to-right occurrence order,
//!   independent of their numeric values; that order is the capture order
//! - Query pairs that are not of the `key={N}` shape are ignored
//! - Range violations fail the whole registration; there is no partial
//!   acceptance of a template

use crate::error::RouterError;
use crate::routing::matcher::{validate_place, PathPattern};
use std::collections::HashMap;

/// The compiled form of one registration template.
#[derive(Debug, Clone)]
pub struct CompiledTemplate {
    /// Matcher for the path portion.
    pub(crate) pattern: PathPattern,
    /// 1-based handler parameter index for each capture, in capture order.
    pub(crate) param_positions: Vec<usize>,
    /// Query-string key to 1-based handler parameter index.
    pub(crate) query_positions: HashMap<String, usize>,
}

/// Compile a template such as `/user/{1}/post/{2}?draft={3}` against the
/// target handler's declared parameter count.
pub fn compile(template: &str, param_count: usize) -> Result<CompiledTemplate, RouterError> {
    let (path, query) = match template.split_once('?') {
        Some((path, query)) => (path, query),
        None => (template, ""),
    };

    let (pattern, param_positions) = PathPattern::compile(path, param_count)?;

    let mut query_positions = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        let Some(place) = placeholder_value(value) else {
            continue;
        };
        query_positions.insert(key.to_string(), validate_place(place, param_count)?);
    }

    Ok(CompiledTemplate {
        pattern,
        param_positions,
        query_positions,
    })
}

/// Parse a query placeholder of the exact form `{N}`.
fn placeholder_value(value: &str) -> Option<u64> {
    let digits = value.strip_prefix('{')?.strip_suffix('}')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(digits.parse::<u64>().unwrap_or(u64::MAX))
}
