//! Valuations

use clap::ValueEnum;

/// How a denomination's bonus component is treated when paying a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BonusMode {
    /// The bonus (e.g. an attached gift card) can be spent on the same bill.
    UsableInBill,

    /// The bonus is tracked separately and never counts toward the bill.
    NotUsable,
}

/// Selects which per-card amount counts toward the target price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Valuation {
    /// Count the card's redemption (face) value.
    #[default]
    Redemption,

    /// Count the card's cost, plus its bonus when the mode allows it.
    Bonus(BonusMode),
}

impl Valuation {
    /// Whether plans built under this valuation report a blended discount.
    ///
    /// With [`BonusMode::NotUsable`] the discount is always zero and the bonus
    /// is reported on its own.
    pub const fn reports_discount(self) -> bool {
        !matches!(self, Valuation::Bonus(BonusMode::NotUsable))
    }
}

impl From<Option<BonusMode>> for Valuation {
    fn from(mode: Option<BonusMode>) -> Self {
        mode.map_or(Valuation::Redemption, Valuation::Bonus)
    }
}
