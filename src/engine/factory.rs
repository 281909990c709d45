// ============================================================================
// Offer Selector Factory
// Creates offer selectors and matchers with validated configuration
// ============================================================================

use crate::domain::SelectorConfig;
use crate::engine::{BestOfferMatcher, FallbackCascade, OfferSelector};
use crate::interfaces::{NoOpObserver, OfferMatcher, SelectionObserver};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an offer selector from configuration
///
/// # Arguments
/// * `config` - Selector configuration
/// * `observer` - Observer for selection events
///
/// # Returns
/// * `Result<OfferSelector, String>` - Configured selector or error
///
/// # Example
/// ```
/// use offer_selector::prelude::*;
/// use std::sync::Arc;
///
/// let selector = create_from_config(SelectorConfig::default(), Arc::new(NoOpObserver)).unwrap();
/// assert_eq!(selector.config().term_preference.as_slice(), &[36, 24, 48]);
/// ```
pub fn create_from_config(
    config: SelectorConfig,
    observer: Arc<dyn SelectionObserver>,
) -> Result<OfferSelector, String> {
    config.validate()?;
    Ok(OfferSelector::new(config, observer))
}

/// Which single-offer strategy to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Best-offer matcher, no relaxation
    SingleShot,
    /// strict -> flexible -> any cascade
    Cascade,
}

/// Creates a boxed single-offer matcher using the configured term order
pub fn create_matcher(
    kind: MatcherKind,
    config: &SelectorConfig,
) -> Result<Box<dyn OfferMatcher>, String> {
    config.validate()?;

    Ok(match kind {
        MatcherKind::SingleShot => Box::new(BestOfferMatcher::new(&config.term_preference)),
        MatcherKind::Cascade => Box::new(FallbackCascade::new(&config.term_preference)),
    })
}

// ============================================================================
// Builder Pattern
// ============================================================================

/// Builder for creating offer selectors with a fluent API
///
/// # Example
/// ```
/// use offer_selector::prelude::*;
///
/// let selector = OfferSelectorBuilder::new()
///     .term_preference(&[36, 48])
///     .parallel_batch_threshold(1000)
///     .build()
///     .unwrap();
/// ```
pub struct OfferSelectorBuilder {
    config: SelectorConfig,
    observer: Arc<dyn SelectionObserver>,
}

impl OfferSelectorBuilder {
    pub fn new() -> Self {
        Self {
            config: SelectorConfig::default(),
            observer: Arc::new(NoOpObserver),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: SelectorConfig) -> Self {
        Self {
            config,
            ..Self::new()
        }
    }

    pub fn term_preference(mut self, terms: &[u32]) -> Self {
        self.config = self.config.with_term_preference(terms);
        self
    }

    pub fn parallel_batch_threshold(mut self, threshold: usize) -> Self {
        self.config = self.config.with_parallel_batch_threshold(threshold);
        self
    }

    pub fn max_workers(mut self, workers: usize) -> Self {
        self.config = self.config.with_max_workers(workers);
        self
    }

    /// Run every batch on the calling thread
    pub fn single_threaded(mut self) -> Self {
        self.config = SelectorConfig {
            term_preference: self.config.term_preference,
            ..SelectorConfig::single_threaded()
        };
        self
    }

    pub fn observer(mut self, observer: Arc<dyn SelectionObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<OfferSelector, String> {
        create_from_config(self.config, self.observer)
    }
}

impl Default for OfferSelectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
