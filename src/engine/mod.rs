// ============================================================================
// Engine Module
// Offer selection algorithms and the layers built on them
// ============================================================================

mod best_offer;
mod fallback;
mod lease_calculator;
mod listing_query;
mod price_cap;
mod selector;

pub mod factory;
pub mod ranking;

pub use best_offer::{select_best_offer, BestOfferMatcher};
pub use factory::{create_from_config, create_matcher, MatcherKind, OfferSelectorBuilder};
pub use fallback::{select_with_fallback, FallbackCascade};
pub use lease_calculator::{CalculatorSelection, LeaseCalculator};
pub use listing_query::{query_listings, ListingMatch, ListingQuery, SortOrder};
pub use price_cap::select_with_price_cap;
pub use selector::OfferSelector;
