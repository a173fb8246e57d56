//! Purchase Plans

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

use crate::{cards::CardDenomination, strategies::SelectionError, valuation::Valuation};

/// A denomination and how many of it to buy. `count` is always positive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    /// Denomination bought
    pub denomination: CardDenomination<'a>,

    /// Number of cards bought
    pub count: u32,
}

/// The cards to buy for one target price, and what that purchase works out to.
#[derive(Clone, Debug, PartialEq)]
pub struct PurchasePlan<'a> {
    line_items: SmallVec<[LineItem<'a>; 6]>,
    valuation: Valuation,
    target: Money<'a, Currency>,
    total_redemption_value: Money<'a, Currency>,
    total_effective_value: Money<'a, Currency>,
    total_bonus_value: Money<'a, Currency>,
    total_cost: Money<'a, Currency>,
    cash_gap: Money<'a, Currency>,
    overpay: Money<'a, Currency>,
    amount_customer_pays: Money<'a, Currency>,
    discount_amount: Money<'a, Currency>,
    discount_percent: Decimal,
}

impl<'a> PurchasePlan<'a> {
    /// A plan that buys nothing and leaves the whole target to be paid in cash.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the target is negative.
    pub fn empty(target: Money<'a, Currency>, valuation: Valuation) -> Result<Self, SelectionError> {
        PlanBuilder::new(target, valuation).build()
    }

    /// Cards to buy, in the order the strategy chose them
    pub fn line_items(&self) -> &[LineItem<'a>] {
        &self.line_items
    }

    /// Whether the plan buys no cards at all
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Total number of cards bought
    pub fn card_count(&self) -> u64 {
        self.line_items
            .iter()
            .map(|line| u64::from(line.count))
            .sum()
    }

    /// Valuation the plan was built under
    pub fn valuation(&self) -> Valuation {
        self.valuation
    }

    /// Price the plan was built for
    pub fn target(&self) -> Money<'a, Currency> {
        self.target
    }

    /// Sum of redemption value over all cards
    pub fn total_redemption_value(&self) -> Money<'a, Currency> {
        self.total_redemption_value
    }

    /// Sum of the value counted toward the price over all cards
    pub fn total_effective_value(&self) -> Money<'a, Currency> {
        self.total_effective_value
    }

    /// Sum of bonus value over all cards
    pub fn total_bonus_value(&self) -> Money<'a, Currency> {
        self.total_bonus_value
    }

    /// What the cards cost
    pub fn total_cost(&self) -> Money<'a, Currency> {
        self.total_cost
    }

    /// Part of the target not covered by cards, paid in cash
    pub fn cash_gap(&self) -> Money<'a, Currency> {
        self.cash_gap
    }

    /// Card value beyond the target, left on the cards as credit
    pub fn overpay(&self) -> Money<'a, Currency> {
        self.overpay
    }

    /// Cards plus cash gap
    pub fn amount_customer_pays(&self) -> Money<'a, Currency> {
        self.amount_customer_pays
    }

    /// Value received beyond what was paid
    pub fn discount_amount(&self) -> Money<'a, Currency> {
        self.discount_amount
    }

    /// Discount in percent points of the target, rounded to two places.
    pub fn discount_percent(&self) -> Decimal {
        self.discount_percent
    }

    /// Discount as a fraction of the target.
    pub fn discount(&self) -> Percentage {
        Percentage::from(self.discount_percent / Decimal::ONE_HUNDRED)
    }
}

/// The paired comparison returned by the overshoot strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanComparison<'a> {
    /// Option A: as few cards as possible, remainder paid in cash
    pub minimal: PurchasePlan<'a>,

    /// Option B: enough cards to cover the price, excess banked as card credit
    pub overshoot: PurchasePlan<'a>,
}

impl<'a> PlanComparison<'a> {
    /// Card credit left over after paying with the overshoot option
    pub fn remaining_card_value(&self) -> Money<'a, Currency> {
        self.overshoot.overpay()
    }
}

/// Accumulates line items in minor units and derives the plan totals.
#[derive(Debug)]
pub(crate) struct PlanBuilder<'a> {
    target: Money<'a, Currency>,
    valuation: Valuation,
    line_items: SmallVec<[LineItem<'a>; 6]>,
    redemption_minor: i64,
    effective_minor: i64,
    bonus_minor: i64,
    cost_minor: i64,
}

impl<'a> PlanBuilder<'a> {
    pub(crate) fn new(target: Money<'a, Currency>, valuation: Valuation) -> Self {
        Self {
            target,
            valuation,
            line_items: SmallVec::new(),
            redemption_minor: 0,
            effective_minor: 0,
            bonus_minor: 0,
            cost_minor: 0,
        }
    }

    /// Add `count` cards of `denomination`. Zero counts are skipped.
    pub(crate) fn push(
        &mut self,
        denomination: CardDenomination<'a>,
        count: u32,
    ) -> Result<(), SelectionError> {
        if count == 0 {
            return Ok(());
        }

        let effective = denomination.effective_value(self.valuation)?;

        self.redemption_minor = accumulate(
            self.redemption_minor,
            denomination.redemption_value().to_minor_units(),
            count,
        )?;
        self.effective_minor = accumulate(self.effective_minor, effective.to_minor_units(), count)?;
        self.bonus_minor =
            accumulate(self.bonus_minor, denomination.bonus().to_minor_units(), count)?;
        self.cost_minor = accumulate(self.cost_minor, denomination.cost().to_minor_units(), count)?;

        self.line_items.push(LineItem {
            denomination,
            count,
        });

        Ok(())
    }

    pub(crate) fn build(self) -> Result<PurchasePlan<'a>, SelectionError> {
        let target_minor = self.target.to_minor_units();

        if target_minor < 0 {
            return Err(SelectionError::NegativeTarget(target_minor));
        }

        let currency = self.target.currency();
        let money = |minor: i64| Money::from_minor(minor, currency);

        let difference = target_minor
            .checked_sub(self.effective_minor)
            .ok_or(SelectionError::Overflow)?;

        let cash_gap = difference.max(0);
        let overpay = difference.min(0).checked_neg().ok_or(SelectionError::Overflow)?;

        let amount_customer_pays = self
            .cost_minor
            .checked_add(cash_gap)
            .ok_or(SelectionError::Overflow)?;

        let discount_minor = if self.valuation.reports_discount() {
            self.effective_minor
                .checked_sub(self.cost_minor)
                .ok_or(SelectionError::Overflow)?
        } else {
            0
        };

        Ok(PurchasePlan {
            line_items: self.line_items,
            valuation: self.valuation,
            target: self.target,
            total_redemption_value: money(self.redemption_minor),
            total_effective_value: money(self.effective_minor),
            total_bonus_value: money(self.bonus_minor),
            total_cost: money(self.cost_minor),
            cash_gap: money(cash_gap),
            overpay: money(overpay),
            amount_customer_pays: money(amount_customer_pays),
            discount_amount: money(discount_minor),
            discount_percent: percent_points(discount_minor, target_minor),
        })
    }
}

/// `total + unit * count`, checked.
fn accumulate(total: i64, unit: i64, count: u32) -> Result<i64, SelectionError> {
    unit.checked_mul(i64::from(count))
        .and_then(|amount| total.checked_add(amount))
        .ok_or(SelectionError::Overflow)
}

/// `part / whole * 100` rounded half away from zero to two places; zero when `whole` is zero.
fn percent_points(part: i64, whole: i64) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
