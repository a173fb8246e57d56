//! Card Selector

use clap::ValueEnum;
use rusty_money::{Money, iso::Currency};
use tracing::instrument;

use crate::{
    catalog::Catalog,
    strategies::{
        Selection, SelectionError, SelectionRequest, SelectionStrategy,
        exhaustive::{ExhaustiveSearch, Objective},
        greedy::GreedyFill,
        observer::SearchObserver,
        overshoot::OvershootFill,
    },
    valuation::Valuation,
};

/// Which selection strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Largest cards first, never exceeding the target
    GreedyMinimal,

    /// The greedy plan paired with a plan that overshoots the target
    GreedyOvershootPair,

    /// Search for the cheapest overshoot of the target
    ExhaustiveMinOverpay,

    /// Search for the closest coverage below the target
    ExhaustiveMaxCoverage,
}

/// Chooses cash cards from a catalog for a target price.
#[derive(Debug, Clone, Copy)]
pub struct CardSelector<'c, 'a> {
    catalog: &'c Catalog<'a>,
    valuation: Valuation,
}

impl<'c, 'a> CardSelector<'c, 'a> {
    /// Create a selector over `catalog` that counts redemption value.
    pub fn new(catalog: &'c Catalog<'a>) -> Self {
        Self {
            catalog,
            valuation: Valuation::default(),
        }
    }

    /// Count a different per-card value toward the price.
    #[must_use]
    pub fn with_valuation(mut self, valuation: Valuation) -> Self {
        self.valuation = valuation;
        self
    }

    /// The catalog cards are chosen from
    pub fn catalog(&self) -> &'c Catalog<'a> {
        self.catalog
    }

    /// The valuation in effect
    pub fn valuation(&self) -> Valuation {
        self.valuation
    }

    /// Select cards for `target` using `strategy`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the inputs are invalid or the strategy fails.
    #[instrument(
        skip(self, target),
        fields(target_price = target.to_minor_units(), valuation = ?self.valuation)
    )]
    pub fn select(
        &self,
        target: Money<'a, Currency>,
        strategy: Strategy,
    ) -> Result<Selection<'a>, SelectionError> {
        let request = SelectionRequest::new(target, self.catalog, self.valuation)?;

        match strategy {
            Strategy::GreedyMinimal => GreedyFill.select(&request),
            Strategy::GreedyOvershootPair => OvershootFill.select(&request),
            Strategy::ExhaustiveMinOverpay => {
                ExhaustiveSearch::new(Objective::MinOverpay).select(&request)
            }
            Strategy::ExhaustiveMaxCoverage => {
                ExhaustiveSearch::new(Objective::MaxCoverage).select(&request)
            }
        }
    }

    /// Run an exhaustive search for `target`, reporting every candidate to `observer`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if the inputs are invalid or the search fails.
    pub fn search_with_observer<O: SearchObserver>(
        &self,
        target: Money<'a, Currency>,
        search: ExhaustiveSearch,
        observer: &mut O,
    ) -> Result<Selection<'a>, SelectionError> {
        let request = SelectionRequest::new(target, self.catalog, self.valuation)?;

        search.select_with_observer(&request, observer)
    }
}

impl Strategy {
    /// Whether this strategy returns a pair of plans rather than one.
    pub const fn is_paired(self) -> bool {
        matches!(self, Strategy::GreedyOvershootPair)
    }
}
