// ============================================================================
// Offer Selector
// Engine facade: configured term preference, events, batch evaluation
// ============================================================================

use super::fallback::select_with_fallback;
use super::price_cap::select_with_price_cap;
use crate::domain::{
    DisplayReason, FallbackSelection, Listing, ListingId, Offer, PriceCap, SelectionResult,
    SelectionTarget, SelectorConfig,
};
use crate::interfaces::{SelectionEvent, SelectionObserver};
use chrono::Utc;
use std::sync::Arc;

/// Offer selector bound to a configuration and an observer.
///
/// Every selection is a pure computation over the supplied offers; the
/// observer only sees a copy of what happened.
pub struct OfferSelector {
    config: SelectorConfig,
    observer: Arc<dyn SelectionObserver>,
}

impl OfferSelector {
    /// Create a new offer selector
    pub fn new(config: SelectorConfig, observer: Arc<dyn SelectionObserver>) -> Self {
        Self { config, observer }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Ideal and display offer for one listing's offers
    pub fn select(
        &self,
        listing_id: Option<ListingId>,
        offers: &[Offer],
        target: &SelectionTarget,
        price_cap: Option<&PriceCap>,
    ) -> SelectionResult {
        let result = select_with_price_cap(offers, target, price_cap, &self.config.term_preference);

        tracing::trace!(
            listing = ?listing_id,
            offers = offers.len(),
            reason = %result.display_reason,
            "selected display offer"
        );

        self.observer
            .on_events(selection_events(listing_id, offers.len(), price_cap, &result));

        result
    }

    pub fn select_listing(
        &self,
        listing: &Listing,
        target: &SelectionTarget,
        price_cap: Option<&PriceCap>,
    ) -> SelectionResult {
        self.select(Some(listing.id), &listing.offers, target, price_cap)
    }

    /// Run the strict -> flexible -> any cascade with the configured term
    /// preference
    pub fn select_with_fallback(
        &self,
        offers: &[Offer],
        target: &SelectionTarget,
    ) -> FallbackSelection {
        select_with_fallback(offers, target, &self.config.term_preference)
    }

    /// Select for many listings. Results are in input order.
    ///
    /// Batches at or above the configured threshold are split into chunks
    /// evaluated on scoped worker threads; calls share no data, so no
    /// synchronization is involved.
    pub fn select_batch(
        &self,
        listings: &[Listing],
        target: &SelectionTarget,
        price_cap: Option<&PriceCap>,
    ) -> Vec<SelectionResult> {
        let workers = self.config.max_workers.max(1);
        if listings.is_empty() {
            return Vec::new();
        }
        if listings.len() < self.config.parallel_batch_threshold || workers == 1 {
            return self.select_sequential(listings, target, price_cap);
        }

        let chunk_size = listings.len().div_ceil(workers);
        tracing::debug!(
            listings = listings.len(),
            workers,
            chunk_size,
            "evaluating listing batch in parallel"
        );

        let outcome = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = listings
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move |_| self.select_sequential(chunk, target, price_cap)))
                .collect();

            let mut results = Vec::with_capacity(listings.len());
            for handle in handles {
                match handle.join() {
                    Ok(chunk_results) => results.extend(chunk_results),
                    Err(panic) => std::panic::resume_unwind(panic),
                }
            }
            results
        });

        match outcome {
            Ok(results) => results,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    fn select_sequential(
        &self,
        listings: &[Listing],
        target: &SelectionTarget,
        price_cap: Option<&PriceCap>,
    ) -> Vec<SelectionResult> {
        listings
            .iter()
            .map(|listing| self.select_listing(listing, target, price_cap))
            .collect()
    }
}

fn selection_events(
    listing_id: Option<ListingId>,
    offer_count: usize,
    price_cap: Option<&PriceCap>,
    result: &SelectionResult,
) -> Vec<SelectionEvent> {
    let timestamp = Utc::now();
    let mut events = vec![
        SelectionEvent::OffersReceived {
            listing_id,
            offer_count,
            timestamp,
        },
        SelectionEvent::IdealSelected {
            listing_id,
            offer: result.ideal_offer,
            timestamp,
        },
    ];

    if let Some(max_price) = price_cap.and_then(PriceCap::binding_limit) {
        match (result.display_offer, result.display_reason) {
            (Some(display_offer), DisplayReason::PriceCapBestFit) => {
                events.push(SelectionEvent::PriceCapApplied {
                    listing_id,
                    max_price,
                    display_offer,
                    timestamp,
                });
            }
            (None, _) => events.push(SelectionEvent::NoOfferWithinCap {
                listing_id,
                max_price,
                timestamp,
            }),
            _ => {}
        }
    }

    events.push(SelectionEvent::Selected {
        listing_id,
        display_offer: result.display_offer,
        reason: result.display_reason,
        method: result.selection_method,
        timestamp,
    });

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FallbackStage, MatchMode};
    use crate::interfaces::{NoOpObserver, RecordingObserver};
    use rust_decimal::Decimal;

    fn offer(price: i64, deposit: i64, term: u32, mileage: u32) -> Offer {
        Offer::new(Decimal::from(price), Decimal::from(deposit), term, mileage).unwrap()
    }

    fn target() -> SelectionTarget {
        SelectionTarget::new(15000, Decimal::from(35000)).unwrap()
    }

    fn listing(base_price: i64) -> Listing {
        Listing::new(vec![
            offer(base_price, 35000, 36, 15000),
            offer(base_price - 200, 35000, 36, 20000),
            offer(base_price + 300, 0, 36, 15000),
        ])
    }

    #[test]
    fn test_select_reports_events() {
        let observer = Arc::new(RecordingObserver::new());
        let selector = OfferSelector::new(SelectorConfig::default(), observer.clone());
        let listing = listing(3800);
        let cap = PriceCap::at_most(Decimal::from(3700)).unwrap();

        let result = selector.select_listing(&listing, &target(), Some(&cap));
        assert_eq!(result.display_reason, DisplayReason::Cheapest);

        let events = observer.take();
        assert_eq!(events.len(), 4);
        assert!(matches!(
            events[0],
            SelectionEvent::OffersReceived { offer_count: 3, .. }
        ));
        assert!(matches!(events[2], SelectionEvent::NoOfferWithinCap { .. }));
        assert!(matches!(
            events[3],
            SelectionEvent::Selected {
                reason: DisplayReason::Cheapest,
                ..
            }
        ));
    }

    #[test]
    fn test_price_cap_applied_event() {
        let observer = Arc::new(RecordingObserver::new());
        let selector = OfferSelector::new(SelectorConfig::default(), observer.clone());
        let listing = listing(3800);
        let flexible = target().with_mode(MatchMode::Flexible);
        let cap = PriceCap::at_most(Decimal::from(3700)).unwrap();

        let result = selector.select_listing(&listing, &flexible, Some(&cap));
        assert_eq!(result.display_reason, DisplayReason::PriceCapBestFit);
        assert!(observer
            .events()
            .iter()
            .any(|e| matches!(e, SelectionEvent::PriceCapApplied { .. })));
    }

    #[test]
    fn test_uses_configured_term_preference() {
        let selector = OfferSelector::new(
            SelectorConfig::default().with_term_preference(&[48, 36]),
            Arc::new(NoOpObserver),
        );
        let offers = [offer(3800, 35000, 36, 15000), offer(3500, 35000, 48, 15000)];

        let result = selector.select(None, &offers, &target(), None);
        assert_eq!(result.display_offer.unwrap().period_months(), 48);

        let fallback = selector.select_with_fallback(&offers, &target());
        assert_eq!(fallback.stage, FallbackStage::Strict);
        assert_eq!(fallback.offer().unwrap().period_months(), 48);
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let listings: Vec<Listing> = (0..50).map(|i| listing(3000 + i * 20)).collect();
        let cap = PriceCap::at_most(Decimal::from(3600)).unwrap();

        let sequential = OfferSelector::new(SelectorConfig::single_threaded(), Arc::new(NoOpObserver))
            .select_batch(&listings, &target(), Some(&cap));

        let parallel = OfferSelector::new(
            SelectorConfig::default()
                .with_parallel_batch_threshold(1)
                .with_max_workers(4),
            Arc::new(NoOpObserver),
        )
        .select_batch(&listings, &target(), Some(&cap));

        assert_eq!(sequential.len(), listings.len());
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_empty_batch_with_zero_threshold() {
        let config = SelectorConfig::default()
            .with_parallel_batch_threshold(0)
            .with_max_workers(4);
        assert!(config.validate().is_ok());

        let selector = OfferSelector::new(config, Arc::new(NoOpObserver));
        assert!(selector.select_batch(&[], &target(), None).is_empty());

        let one = [listing(3800)];
        assert_eq!(selector.select_batch(&one, &target(), None).len(), 1);
    }

    #[test]
    fn test_parallel_batch_reports_every_listing() {
        let observer = Arc::new(RecordingObserver::new());
        let selector = OfferSelector::new(
            SelectorConfig::default()
                .with_parallel_batch_threshold(2)
                .with_max_workers(3),
            observer.clone(),
        );
        let listings: Vec<Listing> = (0..7).map(|i| listing(3500 + i * 50)).collect();

        selector.select_batch(&listings, &target(), None);

        let selected = observer
            .events()
            .iter()
            .filter(|e| matches!(e, SelectionEvent::Selected { .. }))
            .count();
        assert_eq!(selected, listings.len());
    }
}
