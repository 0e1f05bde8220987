//! Lazily populated, explicitly invalidated cache of lockable patterns.

use super::glob::Glob;
use crate::attributes::AttributeSource;
use std::sync::{Arc, Mutex, MutexGuard};

/// One generation of lockable patterns and their compiled globs.
///
/// Immutable once built; invalidation replaces it wholesale.
#[derive(Debug, Clone)]
pub struct LockablePatterns {
    generation: u64,
    patterns: Vec<String>,
    globs: Vec<Glob>,
}

impl LockablePatterns {
    fn new(generation: u64, patterns: Vec<String>) -> Self {
        let globs = patterns.iter().map(|p| Glob::new(p)).collect();
        Self {
            generation,
            patterns,
            globs,
        }
    }

    /// Which population produced this set (starts at 1).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The lockable patterns, in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// The first pattern matching `path`, if any.
    pub fn matching_pattern(&self, path: &str) -> Option<&str> {
        self.globs
            .iter()
            .find(|glob| glob.matches_prefix(path))
            .map(Glob::as_str)
    }

    /// Returns true if any pattern matches `path`.
    pub fn is_lockable(&self, path: &str) -> bool {
        self.matching_pattern(path).is_some()
    }
}

#[derive(Default)]
struct CacheState {
    current: Option<Arc<LockablePatterns>>,
    populations: u64,
}

/// Cache of the lockable patterns declared by an [`AttributeSource`].
///
/// The first [`get`](Self::get) after construction or after
/// [`invalidate`](Self::invalidate) reads the source; later calls share the
/// same [`LockablePatterns`]. Population and invalidation hold the same mutex,
/// so one population runs at a time and readers never see a partial set.
pub struct PatternCache {
    source: Box<dyn AttributeSource>,
    state: Mutex<CacheState>,
}

impl PatternCache {
    pub fn new(source: Box<dyn AttributeSource>) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Current lockable patterns, populating the cache if needed.
    pub fn get(&self) -> Arc<LockablePatterns> {
        let mut state = self.lock_state();

        if let Some(current) = &state.current {
            return Arc::clone(current);
        }

        let patterns: Vec<String> = self
            .source
            .list_attribute_paths()
            .into_iter()
            .filter(|attr| attr.lockable)
            .map(|attr| attr.path)
            .collect();

        state.populations += 1;
        let fresh = Arc::new(LockablePatterns::new(state.populations, patterns));
        tracing::debug!(
            generation = fresh.generation(),
            count = fresh.len(),
            "populated lockable patterns"
        );

        state.current = Some(Arc::clone(&fresh));
        fresh
    }

    /// Drop the cached patterns; the next [`get`](Self::get) repopulates.
    pub fn invalidate(&self) {
        let mut state = self.lock_state();
        if state.current.take().is_some() {
            tracing::debug!("invalidated lockable patterns");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        // A panic in an attribute source leaves the state untouched, so a
        // poisoned lock is still consistent.
        self.state.lock().unwrap_or_else(|poison| poison.into_inner())
    }
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock_state();
        f.debug_struct("PatternCache")
            .field("current", &state.current)
            .field("populations", &state.populations)
            .finish()
    }
}
