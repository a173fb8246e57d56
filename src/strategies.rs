//! Card Selection Strategies

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    cards::CardDenomination,
    catalog::Catalog,
    plans::{PlanComparison, PurchasePlan},
    valuation::Valuation,
};

pub mod exhaustive;
pub mod greedy;
pub mod observer;
pub mod overshoot;

/// Selection Errors
#[derive(Debug, Error)]
pub enum SelectionError {
    /// Target price is below zero (minor units).
    #[error("target price must not be negative, got {0} minor units")]
    NegativeTarget(i64),

    /// A denomination would count nothing (or less) toward the price.
    #[error("denomination {index} has a non-positive value of {minor_units} minor units")]
    NonPositiveValue {
        /// Catalog index of the denomination
        index: usize,
        /// Effective value in minor units
        minor_units: i64,
    },

    /// A denomination has a negative cost, redemption value or bonus.
    #[error("denomination {index} has a negative amount")]
    NegativeAmount {
        /// Catalog index of the denomination
        index: usize,
    },

    /// Target price is in a different currency than the catalog.
    #[error("target price has currency {found}, but catalog has currency {expected}")]
    CurrencyMismatch {
        /// Catalog currency code
        expected: &'static str,
        /// Target currency code
        found: &'static str,
    },

    /// Exhaustive search would evaluate too many combinations.
    #[error("search space of {combinations} combinations exceeds the limit of {limit}")]
    SearchSpaceTooLarge {
        /// Number of combinations the search would evaluate (saturating)
        combinations: u64,
        /// Maximum number of combinations allowed
        limit: u64,
    },

    /// Money totals do not fit in minor units.
    #[error("money total overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Outcome of running a strategy.
#[derive(Clone, Debug, PartialEq)]
pub enum Selection<'a> {
    /// A single plan
    Plan(PurchasePlan<'a>),

    /// A minimal plan paired with an overshooting plan
    Comparison(PlanComparison<'a>),

    /// No combination within the search bounds satisfies the objective
    NoFeasibleCombination,
}

impl<'a> Selection<'a> {
    /// Returns the plan if this is a single-plan selection.
    pub fn plan(&self) -> Option<&PurchasePlan<'a>> {
        match self {
            Selection::Plan(plan) => Some(plan),
            _ => None,
        }
    }

    /// Returns the comparison if this is a paired selection.
    pub fn comparison(&self) -> Option<&PlanComparison<'a>> {
        match self {
            Selection::Comparison(comparison) => Some(comparison),
            _ => None,
        }
    }

    /// Whether the strategy found no feasible combination
    pub fn is_infeasible(&self) -> bool {
        matches!(self, Selection::NoFeasibleCombination)
    }
}

/// A validated target price and catalog, with each denomination's effective value resolved.
#[derive(Debug)]
pub struct SelectionRequest<'c, 'a> {
    target: Money<'a, Currency>,
    catalog: &'c Catalog<'a>,
    valuation: Valuation,
    values: SmallVec<[i64; 6]>,
}

impl<'c, 'a> SelectionRequest<'c, 'a> {
    /// Validates the inputs for a selection.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::CurrencyMismatch`]: target and catalog currencies differ.
    /// - [`SelectionError::NegativeTarget`]: target is below zero.
    /// - [`SelectionError::NegativeAmount`]: a denomination has a negative component.
    /// - [`SelectionError::NonPositiveValue`]: a denomination's effective value is not positive.
    /// - [`SelectionError::Money`]: a denomination mixes currencies.
    pub fn new(
        target: Money<'a, Currency>,
        catalog: &'c Catalog<'a>,
        valuation: Valuation,
    ) -> Result<Self, SelectionError> {
        let found = target.currency();

        if found != catalog.currency() {
            return Err(SelectionError::CurrencyMismatch {
                expected: catalog.currency().iso_alpha_code,
                found: found.iso_alpha_code,
            });
        }

        let target_minor = target.to_minor_units();

        if target_minor < 0 {
            return Err(SelectionError::NegativeTarget(target_minor));
        }

        let values = catalog
            .iter()
            .enumerate()
            .map(|(index, denomination)| validated_value(index, denomination, valuation))
            .collect::<Result<SmallVec<[i64; 6]>, _>>()?;

        Ok(Self {
            target,
            catalog,
            valuation,
            values,
        })
    }

    /// Target price
    pub fn target(&self) -> Money<'a, Currency> {
        self.target
    }

    /// Target price in minor units (never negative)
    pub fn target_minor(&self) -> i64 {
        self.target.to_minor_units()
    }

    /// Catalog to choose from
    pub fn catalog(&self) -> &'c Catalog<'a> {
        self.catalog
    }

    /// Valuation applied to every denomination
    pub fn valuation(&self) -> Valuation {
        self.valuation
    }

    /// Denominations paired with their effective value in minor units, in catalog order.
    pub fn valued(&self) -> impl Iterator<Item = (CardDenomination<'a>, i64)> + '_ {
        self.catalog.iter().copied().zip(self.values.iter().copied())
    }

    /// Denominations by descending effective value; equal values keep catalog order.
    pub fn by_descending_value(&self) -> SmallVec<[(CardDenomination<'a>, i64); 6]> {
        let mut ordered: SmallVec<[(CardDenomination<'a>, i64); 6]> = self.valued().collect();

        ordered.sort_by(|(_, a), (_, b)| b.cmp(a));

        ordered
    }
}

fn validated_value(
    index: usize,
    denomination: &CardDenomination<'_>,
    valuation: Valuation,
) -> Result<i64, SelectionError> {
    let negative = [
        denomination.cost(),
        denomination.redemption_value(),
        denomination.bonus(),
    ]
    .iter()
    .any(|money| money.to_minor_units() < 0);

    if negative {
        return Err(SelectionError::NegativeAmount { index });
    }

    let minor_units = denomination.effective_value(valuation)?.to_minor_units();

    if minor_units <= 0 {
        return Err(SelectionError::NonPositiveValue { index, minor_units });
    }

    Ok(minor_units)
}

/// Trait for choosing which cards to buy for a validated request
pub trait SelectionStrategy {
    /// Select cards for the given request
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the strategy cannot build a plan.
    fn select<'a>(&self, request: &SelectionRequest<'_, 'a>) -> Result<Selection<'a>, SelectionError>;
}
