// ============================================================================
// Selector Configuration
// Term preference and batch execution settings
// ============================================================================

use smallvec::SmallVec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Global term preference, tried in order when the caller gives no term
/// (and after the caller's term when one is given).
///
/// Callers that omit a term rely on this order: 36 months first, then 24,
/// then 48.
pub const DEFAULT_TERM_PREFERENCE: [u32; 3] = [36, 24, 48];

/// Term order as held by the selector. Inline for the usual 3-4 entries.
pub type TermPreference = SmallVec<[u32; 4]>;

/// Configuration for an [`OfferSelector`](crate::engine::OfferSelector)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectorConfig {
    /// Terms (in months) tried in order after the target term
    pub term_preference: TermPreference,

    /// Batches with at least this many listings are spread over worker
    /// threads. Smaller batches run on the calling thread.
    pub parallel_batch_threshold: usize,

    /// Upper bound on worker threads for batch selection
    pub max_workers: usize,
}

impl SelectorConfig {
    /// Create a configuration with the given term preference and default
    /// batch settings
    pub fn new(term_preference: &[u32]) -> Self {
        Self {
            term_preference: SmallVec::from_slice(term_preference),
            ..Self::marketplace()
        }
    }

    /// Builder method: Replace the term preference
    pub fn with_term_preference(mut self, terms: &[u32]) -> Self {
        self.term_preference = SmallVec::from_slice(terms);
        self
    }

    /// Builder method: Set the parallel batch threshold
    pub fn with_parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.parallel_batch_threshold = threshold;
        self
    }

    /// Builder method: Set the worker limit
    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.term_preference.is_empty() {
            return Err("Term preference cannot be empty".to_string());
        }

        if self.term_preference.iter().any(|&t| t == 0) {
            return Err("Term preference entries must be positive".to_string());
        }

        for (i, term) in self.term_preference.iter().enumerate() {
            if self.term_preference[..i].contains(term) {
                return Err(format!("Term preference lists {} months twice", term));
            }
        }

        if self.max_workers == 0 {
            return Err("Max workers must be at least 1".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations
// ============================================================================

impl SelectorConfig {
    /// Standard marketplace setup
    /// - Term preference 36, 24, 48
    /// - Parallel batches from 256 listings
    /// - Up to one worker per available core
    pub fn marketplace() -> Self {
        let workers = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);

        Self {
            term_preference: SmallVec::from_slice(&DEFAULT_TERM_PREFERENCE),
            parallel_batch_threshold: 256,
            max_workers: workers,
        }
    }

    /// Single-threaded setup, e.g. for a calculator embedded in a request
    /// handler
    pub fn single_threaded() -> Self {
        Self {
            parallel_batch_threshold: usize::MAX,
            max_workers: 1,
            ..Self::marketplace()
        }
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self::marketplace()
    }
}
