//! Greedy Fill
//!
//! Buys the most valuable cards first, as many as fit under the target, then
//! moves on to the next denomination. The part of the target left over is paid
//! in cash, so the plan never covers more than the target.

use tracing::debug;

use crate::{
    plans::{PlanBuilder, PurchasePlan},
    strategies::{Selection, SelectionError, SelectionRequest, SelectionStrategy},
};

/// Largest-denomination-first fill that never exceeds the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyFill;

impl GreedyFill {
    /// Build the minimal plan for `request`.
    ///
    /// # Errors
    ///
    /// Returns a [`SelectionError`] if totals overflow or money arithmetic fails.
    pub fn plan<'a>(
        &self,
        request: &SelectionRequest<'_, 'a>,
    ) -> Result<PurchasePlan<'a>, SelectionError> {
        let mut builder = PlanBuilder::new(request.target(), request.valuation());
        let mut remaining = request.target_minor();

        for (denomination, value) in request.by_descending_value() {
            let count = remaining / value;

            if count > 0 {
                builder.push(denomination, card_count(count)?)?;
                remaining -= count * value;
            }
        }

        let plan = builder.build()?;

        debug!(
            target_price = request.target_minor(),
            cards = plan.card_count(),
            total_value = plan.total_effective_value().to_minor_units(),
            cash_gap = plan.cash_gap().to_minor_units(),
            "greedy fill selected cards"
        );

        Ok(plan)
    }
}

impl SelectionStrategy for GreedyFill {
    fn select<'a>(&self, request: &SelectionRequest<'_, 'a>) -> Result<Selection<'a>, SelectionError> {
        Ok(Selection::Plan(self.plan(request)?))
    }
}

/// Narrow a computed card count to the line item count type.
pub(crate) fn card_count(count: i64) -> Result<u32, SelectionError> {
    u32::try_from(count).map_err(|_err| SelectionError::Overflow)
}
