// ============================================================================
// Offer Matcher Interface
// Defines the contract for pluggable single-offer matching strategies
// ============================================================================

use crate::domain::{MatchedOffer, Offer, SelectionTarget};

/// Strategy interface for picking one offer out of a listing's offers.
/// Implementations: BestOfferMatcher (single shot), FallbackCascade.
pub trait OfferMatcher: Send + Sync {
    /// Pick the offer that best fits `target`, or `None` if this strategy
    /// finds nothing acceptable
    ///
    /// # Arguments
    /// * `offers` - The listing's offers, in caller order
    /// * `target` - Requested mileage, deposit, term and mode
    fn find(&self, offers: &[Offer], target: &SelectionTarget) -> Option<MatchedOffer>;

    /// Get the strategy name for logging
    fn name(&self) -> &str;
}
