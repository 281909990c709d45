// ============================================================================
// Selection Outcomes
// Tags and result records produced by the selector
// ============================================================================

use super::offer::Offer;
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How the chosen offer relates to what was asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SelectionMethod {
    Exact,
    Closest,
    /// Target came from marketplace defaults, not from the user
    Default,
}

impl SelectionMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMethod::Exact => "exact",
            SelectionMethod::Closest => "closest",
            SelectionMethod::Default => "default",
        }
    }
}

/// Why the display offer is (or is not) the ideal offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DisplayReason {
    /// Display offer is the ideal offer
    BestFit,
    /// Cap was binding; display offer is the best match under the cap
    PriceCapBestFit,
    /// Nothing could be displayed under the cap
    Cheapest,
}

impl DisplayReason {
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayReason::BestFit => "best_fit",
            DisplayReason::PriceCapBestFit => "price_cap_best_fit",
            DisplayReason::Cheapest => "cheapest",
        }
    }

    /// Position in the `Cheapest -> PriceCapBestFit -> BestFit` progression
    /// a rising cap walks through
    pub fn rank(self) -> u8 {
        match self {
            DisplayReason::Cheapest => 0,
            DisplayReason::PriceCapBestFit => 1,
            DisplayReason::BestFit => 2,
        }
    }
}

/// Which relaxation stage of the fallback cascade produced the offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FallbackStage {
    Strict,
    Flexible,
    Any,
}

impl FallbackStage {
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackStage::Strict => "strict",
            FallbackStage::Flexible => "flexible",
            FallbackStage::Any => "any",
        }
    }
}

macro_rules! display_via_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_via_as_str!(SelectionMethod, DisplayReason, FallbackStage);

/// An offer picked by a matcher, tagged with how it was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchedOffer {
    pub offer: Offer,
    pub method: SelectionMethod,
}

impl MatchedOffer {
    pub fn new(offer: Offer, method: SelectionMethod) -> Self {
        Self { offer, method }
    }
}

/// Outcome of the fallback cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FallbackSelection {
    pub matched: Option<MatchedOffer>,
    pub stage: FallbackStage,
}

impl FallbackSelection {
    pub fn offer(&self) -> Option<&Offer> {
        self.matched.as_ref().map(|m| &m.offer)
    }
}

/// Outcome of price-capped selection: the ideal offer, the offer to
/// display, and why they differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SelectionResult {
    /// Best match ignoring the price cap
    pub ideal_offer: Option<Offer>,

    /// Best match honoring the price cap
    pub display_offer: Option<Offer>,

    pub display_reason: DisplayReason,

    /// `ideal - display` monthly price. Signed: it can be negative when a
    /// deposit substitution under the cap raises the monthly price. When
    /// nothing fits under the cap it is `ideal - max_price`.
    pub delta_to_ideal: Option<Decimal>,

    /// Tag from the matching call that produced the display offer (or the
    /// ideal offer if nothing is displayed). `None` when neither exists.
    pub selection_method: Option<SelectionMethod>,
}

impl SelectionResult {
    /// Nothing matched at all
    pub fn empty() -> Self {
        Self {
            ideal_offer: None,
            display_offer: None,
            display_reason: DisplayReason::Cheapest,
            delta_to_ideal: None,
            selection_method: None,
        }
    }

    /// Monthly price to show, if any
    pub fn display_price(&self) -> Option<Decimal> {
        self.display_offer.map(|o| o.monthly_price())
    }

    /// Delta clamped at zero, for "you save X" style presentation
    pub fn savings_for_display(&self) -> Option<Decimal> {
        self.delta_to_ideal.map(|d| d.max(Decimal::ZERO))
    }

    /// True when the cap forced a different offer than the ideal one
    pub fn is_capped(&self) -> bool {
        self.display_reason != DisplayReason::BestFit
    }
}
