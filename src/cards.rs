//! Cards

use rusty_money::{Money, MoneyError, iso::Currency};

use crate::valuation::{BonusMode, Valuation};

/// A cash card the shop sells: what it costs and what it is worth.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CardDenomination<'a> {
    cost: Money<'a, Currency>,
    redemption_value: Money<'a, Currency>,
    bonus: Money<'a, Currency>,
}

impl<'a> CardDenomination<'a> {
    /// Creates a card bought for `cost` that redeems for `redemption_value`.
    pub fn new(cost: Money<'a, Currency>, redemption_value: Money<'a, Currency>) -> Self {
        Self {
            cost,
            redemption_value,
            bonus: Money::from_minor(0, cost.currency()),
        }
    }

    /// Creates a card that redeems at cost and carries a separate bonus value.
    pub fn with_bonus(cost: Money<'a, Currency>, bonus: Money<'a, Currency>) -> Self {
        Self {
            cost,
            redemption_value: cost,
            bonus,
        }
    }

    /// Creates a card from all three components.
    pub fn from_parts(
        cost: Money<'a, Currency>,
        redemption_value: Money<'a, Currency>,
        bonus: Money<'a, Currency>,
    ) -> Self {
        Self {
            cost,
            redemption_value,
            bonus,
        }
    }

    /// Price the customer pays for one card
    pub fn cost(&self) -> Money<'a, Currency> {
        self.cost
    }

    /// Face value usable toward a purchase
    pub fn redemption_value(&self) -> Money<'a, Currency> {
        self.redemption_value
    }

    /// Secondary reward value (zero for plain cash cards)
    pub fn bonus(&self) -> Money<'a, Currency> {
        self.bonus
    }

    /// Currency of the card's cost
    pub fn currency(&self) -> &'a Currency {
        self.cost.currency()
    }

    /// Returns the amount this card counts toward the price under `valuation`.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the cost and bonus are in different currencies.
    pub fn effective_value(&self, valuation: Valuation) -> Result<Money<'a, Currency>, MoneyError> {
        match valuation {
            Valuation::Redemption => Ok(self.redemption_value),
            Valuation::Bonus(BonusMode::UsableInBill) => self.cost.add(self.bonus),
            Valuation::Bonus(BonusMode::NotUsable) => Ok(self.cost),
        }
    }

    /// Checks every component is in `currency`, returning the first one that isn't.
    pub(crate) fn mismatched_currency(&self, currency: &Currency) -> Option<&'a Currency> {
        [self.cost, self.redemption_value, self.bonus]
            .into_iter()
            .map(|money| money.currency())
            .find(|found| *found != currency)
    }
}
