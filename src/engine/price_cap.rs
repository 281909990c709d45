// ============================================================================
// Price-Capped Selector
// Ideal offer vs. display offer under an optional maximum monthly price
// ============================================================================

use super::best_offer::select_best_offer;
use super::ranking::within_price;
use crate::domain::{
    DisplayReason, MatchedOffer, Offer, PriceCap, SelectionResult, SelectionTarget,
};
use rust_decimal::Decimal;

/// Select the ideal offer and the offer to display under `price_cap`.
///
/// The ideal offer is the best-offer matcher's pick for `target` as given
/// (no cascade) and never depends on the cap. When the cap binds, the same
/// matching rules run again over the offers priced at or below it, so a
/// strict caller never gets a wrong-mileage offer just because it is cheap.
///
/// # Example
/// ```text
/// Offers:  15000 km / 36 mo @ 3800
///          20000 km / 36 mo @ 3600
/// Target:  15000 km, strict, cap 3700
///
/// ideal   = 3800 (15000 km)
/// <= cap  = { 3600 (20000 km) }   -> no 15000 km offer
/// display = none, reason cheapest, delta = 3800 - 3700 = 100
/// ```
pub fn select_with_price_cap(
    offers: &[Offer],
    target: &SelectionTarget,
    price_cap: Option<&PriceCap>,
    term_preference: &[u32],
) -> SelectionResult {
    let ideal = select_best_offer(offers, target, term_preference);

    let max_price = match price_cap.and_then(PriceCap::binding_limit) {
        Some(max) => max,
        None => return uncapped(ideal),
    };

    let affordable = within_price(offers, max_price);
    let capped = if affordable.is_empty() {
        None
    } else {
        select_best_offer(&affordable, target, term_preference)
    };

    match capped {
        Some(display) => within_cap(ideal, display),
        None => nothing_within_cap(ideal, max_price),
    }
}

fn uncapped(ideal: Option<MatchedOffer>) -> SelectionResult {
    match ideal {
        Some(ideal) => SelectionResult {
            ideal_offer: Some(ideal.offer),
            display_offer: Some(ideal.offer),
            display_reason: DisplayReason::BestFit,
            delta_to_ideal: Some(Decimal::ZERO),
            selection_method: Some(ideal.method),
        },
        None => SelectionResult::empty(),
    }
}

fn within_cap(ideal: Option<MatchedOffer>, display: MatchedOffer) -> SelectionResult {
    let ideal_price = ideal.map(|m| m.offer.monthly_price());
    let display_price = display.offer.monthly_price();

    let (display_reason, delta_to_ideal) = if ideal_price == Some(display_price) {
        (DisplayReason::BestFit, Some(Decimal::ZERO))
    } else {
        (
            DisplayReason::PriceCapBestFit,
            ideal_price.map(|price| price - display_price),
        )
    };

    SelectionResult {
        ideal_offer: ideal.map(|m| m.offer),
        display_offer: Some(display.offer),
        display_reason,
        delta_to_ideal,
        selection_method: Some(display.method),
    }
}

fn nothing_within_cap(ideal: Option<MatchedOffer>, max_price: Decimal) -> SelectionResult {
    SelectionResult {
        ideal_offer: ideal.map(|m| m.offer),
        display_offer: None,
        display_reason: DisplayReason::Cheapest,
        delta_to_ideal: ideal.map(|m| m.offer.monthly_price() - max_price),
        selection_method: ideal.map(|m| m.method),
    }
}
