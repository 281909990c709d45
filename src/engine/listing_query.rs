// ============================================================================
// Listing Query
// Filter and sort listings by their displayed monthly price
// ============================================================================

use super::selector::OfferSelector;
use crate::domain::{Listing, ListingId, PriceCap, SelectionResult, SelectionTarget};
use rust_decimal::Decimal;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortOrder {
    #[default]
    PriceAscending,
    PriceDescending,
    /// Keep the order listings were supplied in
    AsSupplied,
}

/// Active filters on a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListingQuery {
    pub target: SelectionTarget,

    /// Lower bound on the displayed monthly price
    pub price_min: Option<Decimal>,

    /// Upper bound on the displayed monthly price, used as the price cap
    pub price_max: Option<Decimal>,

    /// Drop listings with nothing displayable under `price_max`
    pub enforce_price_cap: bool,

    pub sort: SortOrder,
}

impl ListingQuery {
    pub fn new(target: SelectionTarget) -> Self {
        Self {
            target,
            price_min: None,
            price_max: None,
            enforce_price_cap: true,
            sort: SortOrder::default(),
        }
    }

    /// Builder method: Set the displayed price range
    pub fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    /// Builder method: Set the sort order
    pub fn sorted(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Builder method: Show listings over the cap instead of dropping them
    pub fn lenient(mut self) -> Self {
        self.enforce_price_cap = false;
        self
    }

    fn price_cap(&self) -> PriceCap {
        PriceCap {
            max_price: self.price_max,
            enforce: self.enforce_price_cap,
        }
    }
}

/// One listing as it appears in results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListingMatch {
    pub listing_id: ListingId,
    pub selection: SelectionResult,
}

impl ListingMatch {
    /// Sort key
    pub fn display_price(&self) -> Option<Decimal> {
        self.selection.display_price()
    }
}

/// Select a display offer per listing, drop what the filters exclude and
/// sort the rest.
///
/// A listing is dropped when the cap is enforced and nothing fits under
/// it, or when its display price is below `price_min`. Listings without a
/// display offer (possible when no cap binds) sort last. Sorting is
/// stable.
pub fn query_listings(
    selector: &OfferSelector,
    listings: &[Listing],
    query: &ListingQuery,
) -> Vec<ListingMatch> {
    let cap = query.price_cap();
    let selections = selector.select_batch(listings, &query.target, Some(&cap));

    let mut matches: Vec<ListingMatch> = listings
        .iter()
        .zip(selections)
        .map(|(listing, selection)| ListingMatch {
            listing_id: listing.id,
            selection,
        })
        .filter(|m| keep(m, query, &cap))
        .collect();

    match query.sort {
        SortOrder::PriceAscending => {
            matches.sort_by(|a, b| compare_prices(a.display_price(), b.display_price()))
        }
        SortOrder::PriceDescending => {
            matches.sort_by(|a, b| compare_prices_desc(a.display_price(), b.display_price()))
        }
        SortOrder::AsSupplied => {}
    }

    tracing::debug!(
        listings = listings.len(),
        matched = matches.len(),
        "listing query evaluated"
    );

    matches
}

fn keep(m: &ListingMatch, query: &ListingQuery, cap: &PriceCap) -> bool {
    match m.display_price() {
        None => cap.binding_limit().is_none(),
        Some(price) => query.price_min.map_or(true, |min| price >= min),
    }
}

/// Ascending, missing prices last
fn compare_prices(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Descending, missing prices still last
fn compare_prices_desc(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        _ => compare_prices(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayReason, Offer, SelectorConfig};
    use crate::interfaces::NoOpObserver;
    use std::sync::Arc;

    fn offer(price: i64, mileage: u32) -> Offer {
        Offer::new(Decimal::from(price), Decimal::ZERO, 36, mileage).unwrap()
    }

    fn selector() -> OfferSelector {
        OfferSelector::new(SelectorConfig::single_threaded(), Arc::new(NoOpObserver))
    }

    fn target() -> SelectionTarget {
        SelectionTarget::new(15000, Decimal::ZERO).unwrap()
    }

    fn listings() -> Vec<Listing> {
        vec![
            Listing::new(vec![offer(4200, 15000)]),
            Listing::new(vec![offer(3100, 15000), offer(2800, 20000)]),
            // Only the wrong mileage
            Listing::new(vec![offer(2500, 20000)]),
            Listing::new(vec![offer(3600, 15000)]),
        ]
    }

    fn prices(matches: &[ListingMatch]) -> Vec<Option<Decimal>> {
        matches.iter().map(|m| m.display_price()).collect()
    }

    #[test]
    fn test_sorted_ascending_under_cap() {
        let listings = listings();
        let query = ListingQuery::new(target()).with_price_range(None, Some(Decimal::from(4000)));

        let matches = query_listings(&selector(), &listings, &query);

        assert_eq!(
            prices(&matches),
            vec![Some(Decimal::from(3100)), Some(Decimal::from(3600))]
        );
        assert_eq!(matches[0].listing_id, listings[1].id);
    }

    #[test]
    fn test_descending_with_min_price() {
        let listings = listings();
        let query = ListingQuery::new(target())
            .with_price_range(Some(Decimal::from(3500)), None)
            .sorted(SortOrder::PriceDescending);

        let matches = query_listings(&selector(), &listings, &query);

        // No cap binds, so the wrong-mileage-only listing stays, unpriced
        assert_eq!(
            prices(&matches),
            vec![Some(Decimal::from(4200)), Some(Decimal::from(3600)), None]
        );
    }

    #[test]
    fn test_lenient_cap_keeps_listings_without_display_offer_last() {
        let listings = listings();
        let query = ListingQuery::new(target())
            .with_price_range(None, Some(Decimal::from(3500)))
            .lenient();

        let matches = query_listings(&selector(), &listings, &query);

        assert_eq!(matches.len(), 4);
        assert_eq!(matches[0].display_price(), Some(Decimal::from(3100)));
        assert_eq!(matches[3].listing_id, listings[2].id);
        assert_eq!(matches[3].selection.display_reason, DisplayReason::Cheapest);
    }

    #[test]
    fn test_as_supplied_order() {
        let listings = listings();
        let query = ListingQuery::new(target()).sorted(SortOrder::AsSupplied);

        let matches = query_listings(&selector(), &listings, &query);
        let ids: Vec<ListingId> = matches.iter().map(|m| m.listing_id).collect();

        assert_eq!(ids, listings.iter().map(|l| l.id).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_page_on_parallel_selector() {
        let selector = OfferSelector::new(
            SelectorConfig::default()
                .with_parallel_batch_threshold(0)
                .with_max_workers(4),
            Arc::new(NoOpObserver),
        );
        let query = ListingQuery::new(target());

        assert!(query_listings(&selector, &[], &query).is_empty());
    }
}
