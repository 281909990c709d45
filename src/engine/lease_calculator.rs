// ============================================================================
// Lease Calculator
// Live mileage/term/deposit selection for a single listing
// ============================================================================

use super::price_cap::select_with_price_cap;
use super::ranking::cheapest;
use crate::domain::{
    MatchMode, Offer, SelectionResult, SelectionTarget, TermPreference, DEFAULT_TERM_PREFERENCE,
};
use rust_decimal::Decimal;

/// Calculator over one listing's offers.
///
/// The user adjusts mileage, term and deposit; the calculator shows the
/// nearest available offer and flags when it is not the exact combination.
#[derive(Debug, Clone)]
pub struct LeaseCalculator {
    offers: Vec<Offer>,
    term_preference: TermPreference,
}

/// What the calculator shows for the current choices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculatorSelection {
    pub result: SelectionResult,

    /// Displayed offer has exactly the chosen mileage, term and deposit
    pub is_exact_combination: bool,
}

impl LeaseCalculator {
    pub fn new(offers: Vec<Offer>) -> Self {
        Self::with_term_preference(offers, &DEFAULT_TERM_PREFERENCE)
    }

    pub fn with_term_preference(offers: Vec<Offer>, term_preference: &[u32]) -> Self {
        Self {
            offers,
            term_preference: TermPreference::from_slice(term_preference),
        }
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Distinct annual mileages, ascending
    pub fn available_mileages(&self) -> Vec<u32> {
        distinct_sorted(self.offers.iter().map(|o| o.mileage_per_year()))
    }

    /// Distinct terms in months, ascending
    pub fn available_terms(&self) -> Vec<u32> {
        distinct_sorted(self.offers.iter().map(|o| o.period_months()))
    }

    /// Distinct deposits, ascending
    pub fn available_deposits(&self) -> Vec<Decimal> {
        distinct_sorted(self.offers.iter().map(|o| o.first_payment()))
    }

    /// Lowest monthly price across all offers
    pub fn cheapest_offer(&self) -> Option<Offer> {
        cheapest(&self.offers).copied()
    }

    /// Offer to show for the user's current choices.
    ///
    /// Uses flexible mileage matching and no price cap, so something is
    /// shown whenever an offer exists at a preferred term.
    pub fn select(
        &self,
        mileage_per_year: u32,
        term_months: u32,
        deposit: Decimal,
    ) -> CalculatorSelection {
        let target = SelectionTarget {
            mileage_per_year,
            deposit,
            term_months: Some(term_months),
            mode: MatchMode::Flexible,
            user_specified: true,
        };

        let result = select_with_price_cap(&self.offers, &target, None, &self.term_preference);
        let is_exact_combination = result
            .display_offer
            .is_some_and(|o| o.matches_exactly(mileage_per_year, term_months, deposit));

        CalculatorSelection {
            result,
            is_exact_combination,
        }
    }
}

fn distinct_sorted<T: Ord>(values: impl Iterator<Item = T>) -> Vec<T> {
    let mut values: Vec<T> = values.collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SelectionMethod;

    fn offer(price: i64, deposit: i64, term: u32, mileage: u32) -> Offer {
        Offer::new(Decimal::from(price), Decimal::from(deposit), term, mileage).unwrap()
    }

    fn calculator() -> LeaseCalculator {
        LeaseCalculator::new(vec![
            offer(3800, 35000, 36, 15000),
            offer(4200, 0, 36, 15000),
            offer(4000, 35000, 24, 15000),
            offer(4100, 35000, 36, 20000),
            offer(4500, 0, 36, 20000),
        ])
    }

    #[test]
    fn test_available_options() {
        let calc = calculator();

        assert_eq!(calc.available_mileages(), vec![15000, 20000]);
        assert_eq!(calc.available_terms(), vec![24, 36]);
        assert_eq!(
            calc.available_deposits(),
            vec![Decimal::ZERO, Decimal::from(35000)]
        );
        assert_eq!(calc.cheapest_offer().unwrap().monthly_price(), Decimal::from(3800));
    }

    #[test]
    fn test_exact_combination() {
        let selection = calculator().select(20000, 36, Decimal::ZERO);

        assert!(selection.is_exact_combination);
        assert_eq!(selection.result.display_price(), Some(Decimal::from(4500)));
        assert_eq!(selection.result.delta_to_ideal, Some(Decimal::ZERO));
    }

    #[test]
    fn test_closest_available() {
        // No 25000 km offers; nearest is 20000, and no 48 month term
        let selection = calculator().select(25000, 48, Decimal::from(35000));

        assert!(!selection.is_exact_combination);
        let shown = selection.result.display_offer.unwrap();
        assert_eq!(shown.mileage_per_year(), 20000);
        assert_eq!(shown.period_months(), 36);
        assert_eq!(selection.result.selection_method, Some(SelectionMethod::Closest));
    }

    #[test]
    fn test_empty_calculator() {
        let calc = LeaseCalculator::new(Vec::new());

        assert!(calc.available_terms().is_empty());
        assert!(calc.cheapest_offer().is_none());
        let selection = calc.select(15000, 36, Decimal::ZERO);
        assert!(selection.result.display_offer.is_none());
        assert!(!selection.is_exact_combination);
    }
}
