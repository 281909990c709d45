// ============================================================================
// Fallback Cascade
// strict -> flexible -> any, stopping at the first stage that finds an offer
// ============================================================================

use super::best_offer::select_best_offer;
use super::ranking::cheapest;
use crate::domain::{
    FallbackSelection, FallbackStage, MatchMode, MatchedOffer, Offer, SelectionMethod,
    SelectionTarget, TermPreference, DEFAULT_TERM_PREFERENCE,
};
use crate::interfaces::OfferMatcher;

/// Relaxing wrapper around the best-offer matcher.
///
/// The cascade is the only place constraints get relaxed. The target's
/// own `mode` is ignored: strict is always tried first.
#[derive(Debug, Clone)]
pub struct FallbackCascade {
    term_preference: TermPreference,
}

impl FallbackCascade {
    pub fn new(term_preference: &[u32]) -> Self {
        Self {
            term_preference: TermPreference::from_slice(term_preference),
        }
    }

    /// Run the cascade and report which stage succeeded
    pub fn select(&self, offers: &[Offer], target: &SelectionTarget) -> FallbackSelection {
        select_with_fallback(offers, target, &self.term_preference)
    }
}

impl Default for FallbackCascade {
    fn default() -> Self {
        Self::new(&DEFAULT_TERM_PREFERENCE)
    }
}

impl OfferMatcher for FallbackCascade {
    fn find(&self, offers: &[Offer], target: &SelectionTarget) -> Option<MatchedOffer> {
        self.select(offers, target).matched
    }

    fn name(&self) -> &str {
        "FallbackCascade"
    }
}

/// Select an offer, relaxing constraints stage by stage.
///
/// 1. `Strict`: exact mileage via the best-offer matcher
/// 2. `Flexible`: nearest mileage via the best-offer matcher
/// 3. `Any`: lowest monthly price, ignoring mileage and term
///
/// An empty offer list returns `{ matched: None, stage: Any }` immediately.
pub fn select_with_fallback(
    offers: &[Offer],
    target: &SelectionTarget,
    term_preference: &[u32],
) -> FallbackSelection {
    if offers.is_empty() {
        return FallbackSelection {
            matched: None,
            stage: FallbackStage::Any,
        };
    }

    let strict = target.with_mode(MatchMode::Strict);
    if let Some(matched) = select_best_offer(offers, &strict, term_preference) {
        return FallbackSelection {
            matched: Some(matched),
            stage: FallbackStage::Strict,
        };
    }

    let flexible = target.with_mode(MatchMode::Flexible);
    if let Some(matched) = select_best_offer(offers, &flexible, term_preference) {
        return FallbackSelection {
            matched: Some(matched),
            stage: FallbackStage::Flexible,
        };
    }

    let method = if offers.len() == 1 {
        SelectionMethod::Exact
    } else {
        SelectionMethod::Closest
    };

    FallbackSelection {
        matched: cheapest(offers).map(|offer| MatchedOffer::new(*offer, method)),
        stage: FallbackStage::Any,
    }
}
