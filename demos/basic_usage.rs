// ============================================================================
// Basic Usage Example
// ============================================================================

use offer_selector::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

fn offer(price: i64, deposit: i64, term: u32, mileage: u32) -> Offer {
    Offer::new(Decimal::from(price), Decimal::from(deposit), term, mileage).unwrap()
}

fn main() {
    println!("=== Offer Selector Example ===\n");

    let selector = OfferSelectorBuilder::new()
        .observer(Arc::new(LoggingObserver))
        .build()
        .unwrap();

    let offers = vec![
        offer(3800, 35000, 36, 15000),
        offer(4200, 0, 36, 15000),
        offer(3600, 35000, 36, 20000),
        offer(4000, 35000, 24, 15000),
    ];

    println!("Offers:");
    for o in &offers {
        println!("  {}", o);
    }

    let target = SelectionTarget::new(15000, Decimal::from(35000)).unwrap();

    // Price-capped selection at a few caps
    println!("\n=== Price Cap Sweep (strict, 15000 km, 35000 down) ===");
    for max in [3500, 3700, 3900] {
        let cap = PriceCap::at_most(Decimal::from(max)).unwrap();
        let result = selector.select(None, &offers, &target, Some(&cap));
        println!(
            "  cap {:>5}: display {:?}, reason {}, delta {:?}",
            max,
            result.display_price(),
            result.display_reason,
            result.delta_to_ideal
        );
    }

    let flexible = target.with_mode(MatchMode::Flexible);
    let cap = PriceCap::at_most(Decimal::from(3700)).unwrap();
    let result = selector.select(None, &offers, &flexible, Some(&cap));
    println!(
        "  flexible, cap  3700: display {:?}, reason {}",
        result.display_offer.map(|o| o.to_string()),
        result.display_reason
    );

    // Fallback cascade
    println!("\n=== Fallback Cascade ===");
    let far = SelectionTarget::new(30000, Decimal::ZERO).unwrap();
    let selection = selector.select_with_fallback(&offers, &far);
    println!(
        "  30000 km target -> stage {}, offer {:?}",
        selection.stage,
        selection.offer().map(|o| o.to_string())
    );

    // Lease calculator
    println!("\n=== Lease Calculator ===");
    let calculator = LeaseCalculator::new(offers);
    println!("  mileages: {:?}", calculator.available_mileages());
    println!("  terms:    {:?}", calculator.available_terms());
    let choice = calculator.select(15000, 48, Decimal::from(35000));
    println!(
        "  15000 km / 48 mo -> {:?} (exact: {})",
        choice.result.display_offer.map(|o| o.to_string()),
        choice.is_exact_combination
    );
}
