// ============================================================================
// Best-Offer Matcher
// Single-shot selection: mileage match -> term preference -> deposit
// ============================================================================

use super::ranking::{
    best_by_deposit, filter_by_mileage, first_available_term, term_preference_order,
};
use crate::domain::{
    MatchedOffer, Offer, SelectionMethod, SelectionTarget, TermPreference, DEFAULT_TERM_PREFERENCE,
};
use crate::interfaces::OfferMatcher;

/// Single-shot offer matcher.
///
/// Applies three filters in turn and never relaxes them. A `None` result
/// is meaningful: it tells callers to try a looser stage.
///
/// # Example
/// ```text
/// Offers:  15000 km / 24 mo / 0 down   @ 4100
///          15000 km / 48 mo / 0 down   @ 3500
///          20000 km / 36 mo / 0 down   @ 3900
///
/// Target:  15000 km, strict, no term
/// Step 1:  keep 15000 km offers (24 mo, 48 mo)
/// Step 2:  try 36 (none), 24 (found) -> keep 24 mo
/// Step 3:  deposit rule among 24 mo offers -> 4100
/// ```
#[derive(Debug, Clone)]
pub struct BestOfferMatcher {
    term_preference: TermPreference,
}

impl BestOfferMatcher {
    pub fn new(term_preference: &[u32]) -> Self {
        Self {
            term_preference: TermPreference::from_slice(term_preference),
        }
    }

    pub fn term_preference(&self) -> &[u32] {
        &self.term_preference
    }
}

impl Default for BestOfferMatcher {
    fn default() -> Self {
        Self::new(&DEFAULT_TERM_PREFERENCE)
    }
}

impl OfferMatcher for BestOfferMatcher {
    fn find(&self, offers: &[Offer], target: &SelectionTarget) -> Option<MatchedOffer> {
        select_best_offer(offers, target, &self.term_preference)
    }

    fn name(&self) -> &str {
        "BestOffer"
    }
}

/// Pick the best offer for `target` without any relaxation.
///
/// 1. Mileage: strict keeps exact matches only; flexible keeps the nearest
///    mileage (lower allowance on ties).
/// 2. Term: first of `[target term] + term_preference` with a survivor.
/// 3. Deposit: exact, else smallest at or above target, else smallest;
///    equal deposits go to the lower monthly price.
pub fn select_best_offer(
    offers: &[Offer],
    target: &SelectionTarget,
    term_preference: &[u32],
) -> Option<MatchedOffer> {
    let candidates = filter_by_mileage(offers, target.mileage_per_year, target.mode);
    if candidates.is_empty() {
        return None;
    }

    let order = term_preference_order(target.term_months, term_preference);
    let term = first_available_term(&candidates, &order)?;

    let same_term = candidates
        .iter()
        .copied()
        .filter(|o| o.period_months() == term);
    let offer = best_by_deposit(same_term, target.deposit)?;

    Some(MatchedOffer::new(*offer, selection_method(offer, target)))
}

fn selection_method(offer: &Offer, target: &SelectionTarget) -> SelectionMethod {
    if !target.user_specified {
        return SelectionMethod::Default;
    }

    let exact = match target.term_months {
        Some(term) => offer.period_months() == term,
        None => {
            offer.mileage_per_year() == target.mileage_per_year
                && offer.first_payment() == target.deposit
        }
    };

    if exact {
        SelectionMethod::Exact
    } else {
        SelectionMethod::Closest
    }
}
