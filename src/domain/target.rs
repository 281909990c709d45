// ============================================================================
// Selection Target and Price Cap
// Caller-supplied parameters for one selection call
// ============================================================================

use super::errors::{SelectionError, SelectorResult};
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How strictly the target mileage must be honored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchMode {
    /// Only offers with exactly the target mileage are eligible
    #[default]
    Strict,
    /// The nearest available mileage may be substituted (ties go to the
    /// lower allowance)
    Flexible,
}

/// The mileage/deposit/term the caller wants matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTarget"))]
pub struct SelectionTarget {
    /// Desired annual mileage allowance
    pub mileage_per_year: u32,

    /// Desired upfront payment
    pub deposit: Decimal,

    /// Desired contract term. `None` means "use the term preference order"
    pub term_months: Option<u32>,

    pub mode: MatchMode,

    /// Whether the user picked these values explicitly. Only affects the
    /// selection method label, never which offer is chosen.
    pub user_specified: bool,
}

impl SelectionTarget {
    /// Create a user-specified, strict target with no preferred term.
    ///
    /// # Errors
    /// `NegativeAmount` if `deposit` is below zero.
    pub fn new(mileage_per_year: u32, deposit: Decimal) -> SelectorResult<Self> {
        let target = Self {
            mileage_per_year,
            deposit,
            term_months: None,
            mode: MatchMode::Strict,
            user_specified: true,
        };
        target.validate()?;
        Ok(target)
    }

    /// Builder method: Set the preferred term
    pub fn with_term(mut self, term_months: u32) -> Self {
        self.term_months = Some(term_months);
        self
    }

    /// Builder method: Set the mileage matching mode
    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builder method: Mark the values as marketplace defaults rather than
    /// an explicit user choice
    pub fn as_default(mut self) -> Self {
        self.user_specified = false;
        self
    }

    /// Validate the target
    pub fn validate(&self) -> SelectorResult<()> {
        if self.deposit < Decimal::ZERO {
            return Err(SelectionError::NegativeAmount { field: "deposit" });
        }
        if self.term_months == Some(0) {
            return Err(SelectionError::ZeroTerm);
        }
        Ok(())
    }
}

/// Optional ceiling on the displayable monthly price.
///
/// The cap only has an effect when it is enforced *and* a maximum is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPriceCap"))]
pub struct PriceCap {
    pub max_price: Option<Decimal>,
    pub enforce: bool,
}

impl PriceCap {
    /// An enforced cap at `max_price`.
    ///
    /// # Errors
    /// `NegativeAmount` if `max_price` is below zero.
    pub fn at_most(max_price: Decimal) -> SelectorResult<Self> {
        let cap = Self {
            max_price: Some(max_price),
            enforce: true,
        };
        cap.validate()?;
        Ok(cap)
    }

    /// An enforced cap from a floating-point boundary value.
    ///
    /// # Errors
    /// `NonFinite` for NaN or infinity, otherwise as [`PriceCap::at_most`].
    pub fn at_most_f64(max_price: f64) -> SelectorResult<Self> {
        Self::at_most(super::offer::finite_decimal(max_price, "max_price")?)
    }

    /// A cap that never binds
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Validate the cap
    pub fn validate(&self) -> SelectorResult<()> {
        match self.max_price {
            Some(max) if self.enforce && max < Decimal::ZERO => {
                Err(SelectionError::NegativeAmount { field: "max_price" })
            }
            _ => Ok(()),
        }
    }

    /// The limit to apply, if this cap binds at all
    pub fn binding_limit(&self) -> Option<Decimal> {
        if self.enforce {
            self.max_price
        } else {
            None
        }
    }
}

/// Unchecked wire form of [`SelectionTarget`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawTarget {
    mileage_per_year: u32,
    deposit: Decimal,
    term_months: Option<u32>,
    mode: MatchMode,
    user_specified: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTarget> for SelectionTarget {
    type Error = SelectionError;

    fn try_from(raw: RawTarget) -> SelectorResult<Self> {
        let target = Self {
            mileage_per_year: raw.mileage_per_year,
            deposit: raw.deposit,
            term_months: raw.term_months,
            mode: raw.mode,
            user_specified: raw.user_specified,
        };
        target.validate()?;
        Ok(target)
    }
}

/// Unchecked wire form of [`PriceCap`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPriceCap {
    max_price: Option<Decimal>,
    enforce: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPriceCap> for PriceCap {
    type Error = SelectionError;

    fn try_from(raw: RawPriceCap) -> SelectorResult<Self> {
        let cap = Self {
            max_price: raw.max_price,
            enforce: raw.enforce,
        };
        cap.validate()?;
        Ok(cap)
    }
}
