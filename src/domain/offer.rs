// ============================================================================
// Offer Domain Model
// One published lease-pricing combination for a listing
// ============================================================================

use super::errors::{SelectionError, SelectorResult};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single lease offer: annual mileage, term, deposit and the resulting
/// monthly price.
///
/// Offers carry no identity beyond their four values. The selector only
/// ever copies them out of the caller's collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawOffer"))]
pub struct Offer {
    monthly_price: Decimal,
    first_payment: Decimal,
    period_months: u32,
    mileage_per_year: u32,
}

impl Offer {
    /// Create a validated offer.
    ///
    /// # Errors
    /// - `NegativeAmount` if the price or first payment is below zero
    /// - `ZeroTerm` / `ZeroMileage` for a zero term or mileage
    pub fn new(
        monthly_price: Decimal,
        first_payment: Decimal,
        period_months: u32,
        mileage_per_year: u32,
    ) -> SelectorResult<Self> {
        if monthly_price < Decimal::ZERO {
            return Err(SelectionError::NegativeAmount {
                field: "monthly_price",
            });
        }
        if first_payment < Decimal::ZERO {
            return Err(SelectionError::NegativeAmount {
                field: "first_payment",
            });
        }
        if period_months == 0 {
            return Err(SelectionError::ZeroTerm);
        }
        if mileage_per_year == 0 {
            return Err(SelectionError::ZeroMileage);
        }

        Ok(Self {
            monthly_price,
            first_payment,
            period_months,
            mileage_per_year,
        })
    }

    /// Create an offer from floating-point amounts.
    ///
    /// Intended for system boundaries (JSON rows, database floats).
    ///
    /// # Errors
    /// `NonFinite` for NaN or infinite amounts, otherwise as [`Offer::new`].
    pub fn from_f64(
        monthly_price: f64,
        first_payment: f64,
        period_months: u32,
        mileage_per_year: u32,
    ) -> SelectorResult<Self> {
        let monthly_price = finite_decimal(monthly_price, "monthly_price")?;
        let first_payment = finite_decimal(first_payment, "first_payment")?;
        Self::new(monthly_price, first_payment, period_months, mileage_per_year)
    }

    #[inline]
    pub fn monthly_price(&self) -> Decimal {
        self.monthly_price
    }

    /// Upfront payment (deposit)
    #[inline]
    pub fn first_payment(&self) -> Decimal {
        self.first_payment
    }

    #[inline]
    pub fn period_months(&self) -> u32 {
        self.period_months
    }

    #[inline]
    pub fn mileage_per_year(&self) -> u32 {
        self.mileage_per_year
    }

    /// True when mileage, term and deposit all equal the requested values
    pub fn matches_exactly(
        &self,
        mileage_per_year: u32,
        period_months: u32,
        deposit: Decimal,
    ) -> bool {
        self.mileage_per_year == mileage_per_year
            && self.period_months == period_months
            && self.first_payment == deposit
    }
}

/// Unchecked wire form of [`Offer`]
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawOffer {
    monthly_price: Decimal,
    first_payment: Decimal,
    period_months: u32,
    mileage_per_year: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawOffer> for Offer {
    type Error = SelectionError;

    fn try_from(raw: RawOffer) -> SelectorResult<Self> {
        Self::new(
            raw.monthly_price,
            raw.first_payment,
            raw.period_months,
            raw.mileage_per_year,
        )
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/month ({} months, {} km/year, {} upfront)",
            self.monthly_price, self.period_months, self.mileage_per_year, self.first_payment
        )
    }
}

/// Convert a float to a decimal, rejecting NaN and infinity.
pub(crate) fn finite_decimal(value: f64, field: &'static str) -> SelectorResult<Decimal> {
    if !value.is_finite() {
        return Err(SelectionError::NonFinite { field });
    }
    Decimal::from_f64(value).ok_or(SelectionError::NonFinite { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offer_creation() {
        let offer = Offer::new(Decimal::from(3800), Decimal::from(35000), 36, 15000).unwrap();

        assert_eq!(offer.monthly_price(), Decimal::from(3800));
        assert_eq!(offer.first_payment(), Decimal::from(35000));
        assert_eq!(offer.period_months(), 36);
        assert_eq!(offer.mileage_per_year(), 15000);
    }

    #[test]
    fn test_zero_price_is_valid() {
        assert!(Offer::new(Decimal::ZERO, Decimal::ZERO, 12, 10000).is_ok());
    }

    #[test]
    fn test_rejects_malformed_offers() {
        assert_eq!(
            Offer::new(Decimal::from(-1), Decimal::ZERO, 36, 15000),
            Err(SelectionError::NegativeAmount {
                field: "monthly_price"
            })
        );
        assert_eq!(
            Offer::new(Decimal::from(100), Decimal::from(-5), 36, 15000),
            Err(SelectionError::NegativeAmount {
                field: "first_payment"
            })
        );
        assert_eq!(
            Offer::new(Decimal::from(100), Decimal::ZERO, 0, 15000),
            Err(SelectionError::ZeroTerm)
        );
        assert_eq!(
            Offer::new(Decimal::from(100), Decimal::ZERO, 36, 0),
            Err(SelectionError::ZeroMileage)
        );
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert_eq!(
            Offer::from_f64(f64::NAN, 0.0, 36, 15000),
            Err(SelectionError::NonFinite {
                field: "monthly_price"
            })
        );
        assert_eq!(
            Offer::from_f64(3800.0, f64::INFINITY, 36, 15000),
            Err(SelectionError::NonFinite {
                field: "first_payment"
            })
        );

        let offer = Offer::from_f64(3799.5, 0.0, 36, 15000).unwrap();
        assert_eq!(offer.monthly_price(), Decimal::new(37995, 1));
    }

    #[test]
    fn test_matches_exactly() {
        let offer = Offer::new(Decimal::from(3800), Decimal::from(35000), 36, 15000).unwrap();
        assert!(offer.matches_exactly(15000, 36, Decimal::from(35000)));
        assert!(!offer.matches_exactly(15000, 24, Decimal::from(35000)));
        assert!(!offer.matches_exactly(20000, 36, Decimal::from(35000)));
    }

    #[test]
    fn test_display() {
        let offer = Offer::new(Decimal::from(3800), Decimal::from(35000), 36, 15000).unwrap();
        assert_eq!(
            offer.to_string(),
            "3800/month (36 months, 15000 km/year, 35000 upfront)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let offer = Offer::new(Decimal::from(3800), Decimal::from(35000), 36, 15000).unwrap();
        let json = serde_json::to_string(&offer).unwrap();
        assert_eq!(serde_json::from_str::<Offer>(&json).unwrap(), offer);

        let negative = r#"{"monthly_price":"-1","first_payment":"0","period_months":36,"mileage_per_year":15000}"#;
        let err = serde_json::from_str::<Offer>(negative).unwrap_err();
        assert!(err.to_string().contains("monthly_price must not be below zero"));

        let zero_term = r#"{"monthly_price":"3800","first_payment":"0","period_months":0,"mileage_per_year":15000}"#;
        assert!(serde_json::from_str::<Offer>(zero_term).is_err());

        let zero_mileage = r#"{"monthly_price":"3800","first_payment":"0","period_months":36,"mileage_per_year":0}"#;
        assert!(serde_json::from_str::<Offer>(zero_mileage).is_err());
    }
}
