// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod offer_matcher;
mod selection_observer;

pub use offer_matcher::OfferMatcher;
pub use selection_observer::{
    LoggingObserver, NoOpObserver, RecordingObserver, SelectionEvent, SelectionObserver,
};
