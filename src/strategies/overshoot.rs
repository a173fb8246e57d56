//! Overshoot Fill
//!
//! Pairs the greedy plan with a second option that buys enough card value to
//! cover the whole target. Any value above the target stays on the cards as
//! credit for later purchases.

use tracing::debug;

use crate::{
    plans::{PlanBuilder, PlanComparison, PurchasePlan},
    strategies::{
        Selection, SelectionError, SelectionRequest, SelectionStrategy,
        greedy::{GreedyFill, card_count},
    },
};

/// Minimal plan plus a plan that overshoots the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct OvershootFill;

impl OvershootFill {
    /// Build the overshooting plan for `request`.
    ///
    /// Rounds the target up to the most valuable denomination: buys
    /// `floor(target / value) + 1` of it, so an exact multiple still takes one
    /// extra card. A zero target buys nothing.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if totals overflow or money arithmetic fails.
    pub fn plan<'a>(
        &self,
        request: &SelectionRequest<'_, 'a>,
    ) -> Result<PurchasePlan<'a>, SelectionError> {
        let target = request.target_minor();
        let mut builder = PlanBuilder::new(request.target(), request.valuation());

        let largest = request.by_descending_value().first().copied();

        if let Some((denomination, value)) = largest
            && target > 0
        {
            let count = (target / value)
                .checked_add(1)
                .ok_or(SelectionError::Overflow)?;

            builder.push(denomination, card_count(count)?)?;
        }

        builder.build()
    }
}

impl SelectionStrategy for OvershootFill {
    fn select<'a>(&self, request: &SelectionRequest<'_, 'a>) -> Result<Selection<'a>, SelectionError> {
        let comparison = PlanComparison {
            minimal: GreedyFill.plan(request)?,
            overshoot: self.plan(request)?,
        };

        debug!(
            target_price = request.target_minor(),
            minimal_cards = comparison.minimal.card_count(),
            overshoot_cards = comparison.overshoot.card_count(),
            remaining_card_value = comparison.remaining_card_value().to_minor_units(),
            "overshoot fill selected cards"
        );

        Ok(Selection::Comparison(comparison))
    }
}
