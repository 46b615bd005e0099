//! Change result caching using Moka.
//!
//! A request's outcome depends only on its normalized input, so solved
//! outcomes (including unreachable ones) can be reused as-is. Errors are
//! never cached.

use moka::sync::Cache;
use std::sync::Arc;
use std::time::Duration;

use super::error::ChangeError;
use super::service::ChangeService;
use super::types::{ChangeOutcome, NormalizedInput};

/// An outcome plus whether it came from the cache.
#[derive(Debug, Clone)]
pub struct CachedOutcome {
    /// The change outcome.
    pub outcome: Arc<ChangeOutcome>,
    /// True if this result was served from cache.
    pub cached: bool,
}

/// Cache for solved change requests, keyed by normalized input.
///
/// Thread-safe and suitable for concurrent access.
#[derive(Clone)]
pub struct ChangeCache {
    cache: Cache<NormalizedInput, Arc<ChangeOutcome>>,
}

impl ChangeCache {
    /// Creates a new change cache with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `max_capacity` - Maximum number of entries to cache
    /// * `ttl_secs` - Time-to-live in seconds for each entry
    #[must_use]
    pub fn with_config(max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { cache }
    }

    /// Solves `input`, returning a cached outcome if one exists.
    pub fn solve_cached(
        &self,
        service: &ChangeService,
        input: NormalizedInput,
    ) -> Result<CachedOutcome, ChangeError> {
        if let Some(outcome) = self.cache.get(&input) {
            return Ok(CachedOutcome {
                outcome,
                cached: true,
            });
        }

        let outcome = Arc::new(service.solve(&input)?);
        self.cache.insert(input, Arc::clone(&outcome));

        Ok(CachedOutcome {
            outcome,
            cached: false,
        })
    }

    /// Returns the number of entries currently in the cache.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl std::fmt::Debug for ChangeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeCache")
            .field("entry_count", &self.cache.entry_count())
            .finish_non_exhaustive()
    }
}
