// ============================================================================
// Offer Selector Library
// Deterministic lease offer selection with price-capped display pricing
// ============================================================================

//! # Offer Selector
//!
//! Chooses which lease offer to show for a car listing. A listing publishes
//! a set of offers (annual mileage × term × deposit → monthly price); the
//! selector picks one for the user's mileage/term/deposit, optionally under
//! a maximum monthly price.
//!
//! ## Layers
//!
//! - **Best-offer matcher**: mileage match → term preference → deposit
//!   rule, no relaxation
//! - **Fallback cascade**: strict → flexible → any, tagged with the stage
//!   that succeeded
//! - **Price-capped selector**: ideal offer, display offer under the cap,
//!   the delta between them and a reason code
//!
//! All three are pure functions: identical inputs give identical results.
//! The global term order `[36, 24, 48]` is exposed as
//! [`DEFAULT_TERM_PREFERENCE`](domain::DEFAULT_TERM_PREFERENCE) and always
//! passed explicitly.
//!
//! ## Example
//!
//! ```rust
//! use offer_selector::prelude::*;
//! use rust_decimal::Decimal;
//!
//! let offers = vec![
//!     Offer::new(Decimal::from(3800), Decimal::from(35000), 36, 15000).unwrap(),
//!     Offer::new(Decimal::from(3600), Decimal::from(35000), 36, 20000).unwrap(),
//! ];
//! let target = SelectionTarget::new(15000, Decimal::from(35000)).unwrap();
//! let cap = PriceCap::at_most(Decimal::from(3700)).unwrap();
//!
//! let result = select_with_price_cap(&offers, &target, Some(&cap), &DEFAULT_TERM_PREFERENCE);
//!
//! // The cheaper offer has the wrong mileage, so nothing is displayed
//! assert_eq!(result.display_offer, None);
//! assert_eq!(result.display_reason, DisplayReason::Cheapest);
//! assert_eq!(result.delta_to_ideal, Some(Decimal::from(100)));
//! ```

pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{
        DisplayReason, FallbackSelection, FallbackStage, Listing, ListingId, MatchMode,
        MatchedOffer, Offer, PriceCap, SelectionError, SelectionMethod, SelectionResult,
        SelectionTarget, SelectorConfig, DEFAULT_TERM_PREFERENCE,
    };
    pub use crate::engine::{
        create_from_config, create_matcher, query_listings, select_best_offer,
        select_with_fallback, select_with_price_cap, BestOfferMatcher, FallbackCascade,
        LeaseCalculator, ListingQuery, MatcherKind, OfferSelector, OfferSelectorBuilder,
        SortOrder,
    };
    pub use crate::interfaces::{
        LoggingObserver, NoOpObserver, OfferMatcher, RecordingObserver, SelectionEvent,
        SelectionObserver,
    };
}
