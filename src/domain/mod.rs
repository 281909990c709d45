// ============================================================================
// Domain Models Module
// Offers, selection parameters, outcomes and configuration
// ============================================================================

pub mod config;
pub mod errors;
pub mod listing;
pub mod offer;
pub mod selection;
pub mod target;

pub use config::{SelectorConfig, TermPreference, DEFAULT_TERM_PREFERENCE};
pub use errors::{SelectionError, SelectorResult};
pub use listing::{Listing, ListingId};
pub use offer::Offer;
pub use selection::{
    DisplayReason, FallbackSelection, FallbackStage, MatchedOffer, SelectionMethod,
    SelectionResult,
};
pub use target::{MatchMode, PriceCap, SelectionTarget};
