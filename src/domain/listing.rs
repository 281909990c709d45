// ============================================================================
// Listing Domain Model
// ============================================================================

use super::offer::Offer;
use std::fmt;
use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListingId(Uuid);

impl ListingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ListingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A car listing and the offers its dealer publishes for it
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Listing {
    pub id: ListingId,
    pub offers: Vec<Offer>,
}

impl Listing {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self {
            id: ListingId::new(),
            offers,
        }
    }

    pub fn with_id(id: ListingId, offers: Vec<Offer>) -> Self {
        Self { id, offers }
    }
}
