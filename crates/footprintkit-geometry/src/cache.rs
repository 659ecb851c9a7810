//! Body cache and invalidation protocol
//!
//! Two states: CLEAN (a body built at the current generation is held) and
//! DIRTY (inputs changed since). Invalidation bumps a monotonically increasing
//! generation counter instead of clearing shared storage, so "dirty" never
//! has to be inferred from a missing value.

use std::sync::Arc;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    Clean,
    Dirty,
}

#[derive(Debug)]
pub struct BodyCache<T> {
    generation: u64,
    built: Option<(u64, Arc<T>)>,
    computations: u64,
}

impl<T> BodyCache<T> {
    /// A fresh cache starts DIRTY
    pub fn new() -> Self {
        Self {
            generation: 1,
            built: None,
            computations: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How many times the builder has run over the cache's lifetime
    pub fn computations(&self) -> u64 {
        self.computations
    }

    pub fn state(&self) -> CacheState {
        match &self.built {
            Some((generation, _)) if *generation == self.generation => CacheState::Clean,
            _ => CacheState::Dirty,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.state() == CacheState::Clean
    }

    /// Mark stale; idempotent while already dirty
    pub fn invalidate(&mut self) {
        if self.is_clean() {
            self.generation += 1;
            trace!(generation = self.generation, "body cache invalidated");
        }
    }

    /// The cached value if it is current
    pub fn current(&self) -> Option<Arc<T>> {
        match &self.built {
            Some((generation, value)) if *generation == self.generation => Some(Arc::clone(value)),
            _ => None,
        }
    }

    /// Return the cached value, rebuilding from scratch when dirty
    pub fn get_or_build(&mut self, build: impl FnOnce(u64) -> T) -> Arc<T> {
        if let Some(value) = self.current() {
            return value;
        }
        let value = Arc::new(build(self.generation));
        self.computations += 1;
        self.built = Some((self.generation, Arc::clone(&value)));
        value
    }
}

impl<T> Default for BodyCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
