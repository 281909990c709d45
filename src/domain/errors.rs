// ============================================================================
// Selection Errors
// Rejections for malformed offers, targets and price caps
// ============================================================================

use std::fmt;

/// Errors raised when a caller hands the selector values it cannot rank.
///
/// Every shape of *valid* input (empty offer list, no matching mileage,
/// cap below all offers) is a modeled outcome, never one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A monetary amount (price, deposit, cap) was below zero
    NegativeAmount { field: &'static str },
    /// A floating-point input was NaN or infinite
    NonFinite { field: &'static str },
    /// Contract term of zero months
    ZeroTerm,
    /// Annual mileage allowance of zero
    ZeroMileage,
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NegativeAmount { field } => {
                write!(f, "negative amount: {} must not be below zero", field)
            }
            SelectionError::NonFinite { field } => {
                write!(f, "non-finite value: {} must be a finite number", field)
            }
            SelectionError::ZeroTerm => write!(f, "contract term must be at least one month"),
            SelectionError::ZeroMileage => write!(f, "annual mileage must be positive"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Result type alias for validating constructors
pub type SelectorResult<T> = Result<T, SelectionError>;
