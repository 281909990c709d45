// ============================================================================
// Selection Observer Interface
// Defines the contract for receiving selection events
// ============================================================================

use crate::domain::{DisplayReason, ListingId, Offer, SelectionMethod};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the offer selector
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SelectionEvent {
    /// Offers handed to the selector for one listing
    OffersReceived {
        listing_id: Option<ListingId>,
        offer_count: usize,
        timestamp: DateTime<Utc>,
    },

    /// Unconstrained best match determined
    IdealSelected {
        listing_id: Option<ListingId>,
        offer: Option<Offer>,
        timestamp: DateTime<Utc>,
    },

    /// A binding price cap changed the displayed offer
    PriceCapApplied {
        listing_id: Option<ListingId>,
        max_price: Decimal,
        display_offer: Offer,
        timestamp: DateTime<Utc>,
    },

    /// A binding price cap left nothing to display
    NoOfferWithinCap {
        listing_id: Option<ListingId>,
        max_price: Decimal,
        timestamp: DateTime<Utc>,
    },

    /// Final selection for the listing
    Selected {
        listing_id: Option<ListingId>,
        display_offer: Option<Offer>,
        reason: DisplayReason,
        method: Option<SelectionMethod>,
        timestamp: DateTime<Utc>,
    },
}

/// Observer trait for selection events.
/// Implementations can handle logging, metrics, audit trails, etc.
pub trait SelectionObserver: Send + Sync {
    /// Handle a selection event
    fn on_event(&self, event: SelectionEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<SelectionEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op observer
pub struct NoOpObserver;

impl SelectionObserver for NoOpObserver {
    fn on_event(&self, _event: SelectionEvent) {}
}

/// Logging observer
pub struct LoggingObserver;

impl SelectionObserver for LoggingObserver {
    fn on_event(&self, event: SelectionEvent) {
        tracing::debug!("Offer selector event: {:?}", event);
    }
}

/// Observer that keeps every event in memory
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<SelectionEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far
    pub fn events(&self) -> Vec<SelectionEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events
    pub fn take(&self) -> Vec<SelectionEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl SelectionObserver for RecordingObserver {
    fn on_event(&self, event: SelectionEvent) {
        self.events.lock().push(event);
    }

    fn on_events(&self, events: Vec<SelectionEvent>) {
        self.events.lock().extend(events);
    }
}
