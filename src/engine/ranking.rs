// ============================================================================
// Offer Ranking Helpers
// Filtering and ordering rules shared by every matching stage
// ============================================================================

use crate::domain::{MatchMode, Offer, TermPreference};
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Terms to try, in order: the target term first (if any), then `base`,
/// with duplicates removed.
///
/// # Example
/// ```text
/// target 24, base [36, 24, 48]  ->  [24, 36, 48]
/// target --, base [36, 24, 48]  ->  [36, 24, 48]
/// ```
pub fn term_preference_order(target_term: Option<u32>, base: &[u32]) -> TermPreference {
    let mut order = TermPreference::new();
    for term in target_term.into_iter().chain(base.iter().copied()) {
        if !order.contains(&term) {
            order.push(term);
        }
    }
    order
}

/// Mileage closest to `target` among `offers`. Equal distances resolve to
/// the smaller allowance.
pub fn nearest_mileage(offers: &[Offer], target: u32) -> Option<u32> {
    offers
        .iter()
        .map(|o| o.mileage_per_year())
        .min_by_key(|&m| (m.abs_diff(target), m))
}

/// Offers eligible under the mileage rule for `mode`.
///
/// Strict keeps exact matches only (possibly none). Flexible keeps every
/// offer at the nearest mileage.
pub fn filter_by_mileage(offers: &[Offer], target: u32, mode: MatchMode) -> Vec<&Offer> {
    let mileage = match mode {
        MatchMode::Strict => target,
        MatchMode::Flexible => match nearest_mileage(offers, target) {
            Some(m) => m,
            None => return Vec::new(),
        },
    };

    offers
        .iter()
        .filter(|o| o.mileage_per_year() == mileage)
        .collect()
}

/// First term in `order` with at least one candidate
pub fn first_available_term(candidates: &[&Offer], order: &[u32]) -> Option<u32> {
    order
        .iter()
        .copied()
        .find(|&term| candidates.iter().any(|o| o.period_months() == term))
}

/// Deposit preference class: exact, then at-or-above target, then below
#[inline]
fn deposit_class(deposit: Decimal, target: Decimal) -> u8 {
    match deposit.cmp(&target) {
        Ordering::Equal => 0,
        Ordering::Greater => 1,
        Ordering::Less => 2,
    }
}

/// Pick among same-term candidates by deposit.
///
/// Exact deposit wins; otherwise the smallest deposit above the target;
/// otherwise the smallest deposit overall. Equal deposits go to the lower
/// monthly price, then to the earlier offer.
pub fn best_by_deposit<'a, I>(candidates: I, target_deposit: Decimal) -> Option<&'a Offer>
where
    I: IntoIterator<Item = &'a Offer>,
{
    candidates.into_iter().min_by_key(|o| {
        (
            deposit_class(o.first_payment(), target_deposit),
            o.first_payment(),
            o.monthly_price(),
        )
    })
}

/// Lowest monthly price, then lowest deposit, then the earlier offer
pub fn cheapest(offers: &[Offer]) -> Option<&Offer> {
    offers
        .iter()
        .min_by_key(|o| (o.monthly_price(), o.first_payment()))
}

/// Offers priced at or below `max_price`
pub fn within_price(offers: &[Offer], max_price: Decimal) -> Vec<Offer> {
    offers
        .iter()
        .filter(|o| o.monthly_price() <= max_price)
        .copied()
        .collect()
}
