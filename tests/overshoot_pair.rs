//! Integration tests for the paired greedy and overshoot plans.

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, THB},
};
use testresult::TestResult;

use cashcard::{
    catalog::Catalog,
    selector::{CardSelector, Strategy},
};

fn baht<'a>(amount: i64) -> Money<'a, Currency> {
    Money::from_minor(amount * 100, THB)
}

#[test]
fn pairs_minimal_and_overshoot_options() -> TestResult {
    let catalog = Catalog::cash_cards();
    let selection =
        CardSelector::new(&catalog).select(baht(1_200), Strategy::GreedyOvershootPair)?;
    let comparison = selection.comparison().ok_or("expected a comparison")?;

    assert_eq!(comparison.minimal.amount_customer_pays(), baht(930));
    assert_eq!(comparison.minimal.cash_gap(), baht(30));

    let overshoot = &comparison.overshoot;

    assert_eq!(overshoot.card_count(), 1);
    assert_eq!(overshoot.total_redemption_value(), baht(1_300));
    assert_eq!(overshoot.cash_gap(), baht(0));
    assert_eq!(overshoot.overpay(), baht(100));
    assert_eq!(overshoot.amount_customer_pays(), baht(1_000));
    assert_eq!(overshoot.discount_percent(), Decimal::new(2500, 2));
    assert_eq!(comparison.remaining_card_value(), baht(100));

    Ok(())
}

#[test]
fn overshoot_always_covers_price() -> TestResult {
    let catalog = Catalog::cash_cards();
    let selector = CardSelector::new(&catalog);

    for amount in (1..=5_000).step_by(37) {
        let selection = selector.select(baht(amount), Strategy::GreedyOvershootPair)?;
        let comparison = selection.comparison().ok_or("expected a comparison")?;

        assert!(
            comparison.overshoot.total_redemption_value().to_minor_units() >= amount * 100,
            "overshoot plan must cover {amount}"
        );
        assert_eq!(comparison.overshoot.cash_gap(), baht(0));
        assert!(comparison.minimal.total_redemption_value().to_minor_units() <= amount * 100);
    }

    Ok(())
}

#[test]
fn zero_price_pairs_two_empty_plans() -> TestResult {
    let catalog = Catalog::cash_cards();
    let selection = CardSelector::new(&catalog).select(baht(0), Strategy::GreedyOvershootPair)?;
    let comparison = selection.comparison().ok_or("expected a comparison")?;

    assert!(comparison.minimal.is_empty());
    assert!(comparison.overshoot.is_empty());
    assert_eq!(comparison.remaining_card_value(), baht(0));

    Ok(())
}
