//! Route table: registration, merging, freezing and lookup.
//!
//! # Responsibilities
//! - Collect compiled route entries under a table-wide mutex during startup
//! - Merge registrations whose templates compile to equal patterns
//! - Freeze the entries into an immutable index, published lock-free
//! - Resolve a request path to its entry with first-match-wins scanning
//!
//! # Design Decisions
//! - The table mutex is held only for register/finalize; matching reads the
//!   frozen index through an arc-swap snapshot and takes no lock
//! - Merging overwrites per method, last registration wins, silently
//! - An empty method list binds every supported method at once

use crate::cache::ResponseCache;
use crate::dispatch::handler::Handler;
use crate::error::RouterError;
use crate::routing::matcher::PathPattern;
use crate::routing::template;
use arc_swap::ArcSwapOption;
use http::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The method set bound by a registration with an empty method list.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::HEAD,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
    Method::PATCH,
];

/// Everything needed to serve one (route, method) pair: the filter chain,
/// the handler, parameter-position metadata and the response cache slot.
pub struct HandlerBinding {
    pub(crate) filter_names: Vec<String>,
    pub(crate) handler: Arc<dyn Handler>,
    pub(crate) param_positions: Vec<usize>,
    pub(crate) query_positions: HashMap<String, usize>,
    pub(crate) cache: ResponseCache,
}

impl HandlerBinding {
    pub fn filter_names(&self) -> &[String] {
        &self.filter_names
    }

    pub fn param_positions(&self) -> &[usize] {
        &self.param_positions
    }

    pub fn query_positions(&self) -> &HashMap<String, usize> {
        &self.query_positions
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}

/// One compiled pattern plus its per-method bindings.
pub struct RouteEntry {
    pattern: PathPattern,
    bindings: HashMap<Method, Arc<HandlerBinding>>,
}

impl RouteEntry {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn binding(&self, method: &Method) -> Option<&Arc<HandlerBinding>> {
        self.bindings.get(method)
    }
}

/// A successful path lookup: the winning entry's index and the captured
/// path substrings in capture order.
#[derive(Debug)]
pub struct RouteMatch {
    pub entry: usize,
    pub captures: Vec<String>,
}

/// The frozen, immutable match index built by [`RouteTable::finalize`].
pub struct RouterIndex {
    entries: Vec<RouteEntry>,
}

impl RouterIndex {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, index: usize) -> &RouteEntry {
        &self.entries[index]
    }

    /// Scan entries in registration order; the first pattern matching the
    /// whole path wins, and its captures are extracted in the same pass.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        for (index, entry) in self.entries.iter().enumerate() {
            if let Some(captures) = entry.pattern.matches(path) {
                tracing::trace!(entry = index, pattern = %entry.pattern, "Route matched");
                return Some(RouteMatch {
                    entry: index,
                    captures,
                });
            }
        }
        None
    }
}

/// The mutable registration-time route collection.
///
/// `register` and `finalize` serialize on the table mutex; after
/// finalization the index is read through [`RouteTable::snapshot`] without
/// locking.
pub struct RouteTable {
    pending: Mutex<Vec<RouteEntry>>,
    index: ArcSwapOption<RouterIndex>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            index: ArcSwapOption::const_empty(),
        }
    }

    /// Register a handler under a path template.
    ///
    /// The template is compiled against `handler.param_count()`; a
    /// placeholder outside that range fails the registration. If an entry
    /// with an equal compiled pattern already exists, the new binding merges
    /// into it per method (overwriting); otherwise a new entry is appended.
    /// An empty `methods` list binds all of [`SUPPORTED_METHODS`].
    pub fn register(
        &self,
        template: &str,
        handler: Arc<dyn Handler>,
        methods: &[Method],
        filters: Vec<String>,
    ) -> Result<(), RouterError> {
        let compiled = template::compile(template, handler.param_count())?;
        let binding = Arc::new(HandlerBinding {
            filter_names: filters,
            handler,
            param_positions: compiled.param_positions,
            query_positions: compiled.query_positions,
            cache: ResponseCache::new(),
        });

        let mut pending = self.pending.lock().expect("route table mutex poisoned");
        if self.index.load().is_some() {
            return Err(RouterError::Finalized);
        }

        if let Some(entry) = pending.iter_mut().find(|e| e.pattern == compiled.pattern) {
            bind_methods(&mut entry.bindings, methods, &binding);
            tracing::debug!(template, pattern = %entry.pattern, "Merged registration into existing route");
            return Ok(());
        }

        let mut entry = RouteEntry {
            pattern: compiled.pattern,
            bindings: HashMap::new(),
        };
        bind_methods(&mut entry.bindings, methods, &binding);
        tracing::debug!(template, pattern = %entry.pattern, "Registered route");
        pending.push(entry);
        Ok(())
    }

    /// Freeze the registered entries into the match index. Must be called
    /// exactly once, after all registrations and before dispatch begins.
    pub fn finalize(&self) -> Result<(), RouterError> {
        let mut pending = self.pending.lock().expect("route table mutex poisoned");
        if self.index.load().is_some() {
            return Err(RouterError::Finalized);
        }
        let entries = std::mem::take(&mut *pending);
        tracing::debug!(routes = entries.len(), "Route table finalized");
        self.index.store(Some(Arc::new(RouterIndex { entries })));
        Ok(())
    }

    /// Lock-free load of the frozen index. `None` until [`finalize`] runs.
    ///
    /// [`finalize`]: RouteTable::finalize
    pub fn snapshot(&self) -> Option<Arc<RouterIndex>> {
        self.index.load_full()
    }

    /// Convenience lookup against the frozen index.
    pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
        self.snapshot()?.match_path(path)
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

fn bind_methods(
    bindings: &mut HashMap<Method, Arc<HandlerBinding>>,
    methods: &[Method],
    binding: &Arc<HandlerBinding>,
) {
    if methods.is_empty() {
        for method in SUPPORTED_METHODS {
            bindings.insert(method, binding.clone());
        }
    } else {
        for method in methods {
            bindings.insert(method.clone(), binding.clone());
        }
    }
}
