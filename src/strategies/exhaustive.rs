//! Exhaustive Search
//!
//! Tries every combination of `0..=max_count` cards per denomination and keeps
//! the best feasible one. Combinations are enumerated with the first catalog
//! denomination in the outermost loop and counts ascending, and only a strictly
//! better candidate replaces the current best, so ties always go to the
//! combination found first.

use smallvec::{SmallVec, smallvec};
use tracing::debug;

use crate::{
    plans::PlanBuilder,
    strategies::{
        Selection, SelectionError, SelectionRequest, SelectionStrategy,
        observer::{NoopObserver, SearchObserver},
    },
};

/// Per-denomination upper bound on the number of cards tried.
pub const DEFAULT_MAX_COUNT: u32 = 10;

/// Largest number of combinations a search may evaluate (11^6).
pub const MAX_SEARCH_SPACE: u64 = 1_771_561;

/// What the search optimises for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// Cover at least the target, overshooting it as little as possible.
    MinOverpay,

    /// Cover as much of the target as possible without exceeding it.
    MaxCoverage,
}

impl Objective {
    /// Whether a combination worth `total` is acceptable for `target`.
    pub const fn is_feasible(self, total: i64, target: i64) -> bool {
        match self {
            Objective::MinOverpay => total >= target,
            Objective::MaxCoverage => total <= target,
        }
    }

    /// Whether feasible `candidate` strictly beats feasible `best`.
    pub const fn improves(self, candidate: i64, best: i64) -> bool {
        match self {
            Objective::MinOverpay => candidate < best,
            Objective::MaxCoverage => candidate > best,
        }
    }
}

/// Brute-force search over bounded card counts.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSearch {
    objective: Objective,
    max_count: u32,
}

impl ExhaustiveSearch {
    /// Create a search with the default bound of [`DEFAULT_MAX_COUNT`] cards per denomination.
    pub const fn new(objective: Objective) -> Self {
        Self {
            objective,
            max_count: DEFAULT_MAX_COUNT,
        }
    }

    /// Replace the per-denomination bound.
    #[must_use]
    pub const fn with_max_count(mut self, max_count: u32) -> Self {
        self.max_count = max_count;
        self
    }

    /// The search objective
    pub const fn objective(&self) -> Objective {
        self.objective
    }

    /// The per-denomination bound
    pub const fn max_count(&self) -> u32 {
        self.max_count
    }

    /// Number of combinations evaluated for `denominations` entries (saturating).
    pub fn search_space(&self, denominations: usize) -> u64 {
        let base = u64::from(self.max_count) + 1;

        u32::try_from(denominations)
            .ok()
            .and_then(|exp| base.checked_pow(exp))
            .unwrap_or(u64::MAX)
    }

    /// Run the search, reporting every candidate to `observer`.
    ///
    /// # Errors
    ///
    /// - [`SelectionError::SearchSpaceTooLarge`]: more than [`MAX_SEARCH_SPACE`] combinations.
    /// - [`SelectionError::Overflow`]: the largest combination's value does not fit in minor units.
    pub fn select_with_observer<'a, O: SearchObserver>(
        &self,
        request: &SelectionRequest<'_, 'a>,
        observer: &mut O,
    ) -> Result<Selection<'a>, SelectionError> {
        let values: SmallVec<[i64; 6]> = request.valued().map(|(_, value)| value).collect();

        let combinations = self.search_space(values.len());

        if combinations > MAX_SEARCH_SPACE {
            return Err(SelectionError::SearchSpaceTooLarge {
                combinations,
                limit: MAX_SEARCH_SPACE,
            });
        }

        // Bounds every running total below, so the loop can use plain arithmetic.
        values.iter().try_fold(0_i64, |acc, value| {
            value
                .checked_mul(i64::from(self.max_count))
                .and_then(|max| acc.checked_add(max))
                .ok_or(SelectionError::Overflow)
        })?;

        let target = request.target_minor();
        let mut counts: SmallVec<[u32; 6]> = smallvec![0; values.len()];
        let mut total: i64 = 0;
        let mut best: Option<(SmallVec<[u32; 6]>, i64)> = None;

        loop {
            let feasible = self.objective.is_feasible(total, target);

            observer.on_candidate(&counts, total, feasible);

            if feasible
                && best
                    .as_ref()
                    .is_none_or(|(_, best_total)| self.objective.improves(total, *best_total))
            {
                observer.on_improvement(&counts, total);
                best = Some((counts.clone(), total));
            }

            if !advance(&mut counts, &values, &mut total, self.max_count) {
                break;
            }
        }

        let Some((winner, best_total)) = best else {
            debug!(
                target_price = target,
                combinations,
                objective = ?self.objective,
                "exhaustive search found no feasible combination"
            );

            return Ok(Selection::NoFeasibleCombination);
        };

        let mut builder = PlanBuilder::new(request.target(), request.valuation());

        for ((denomination, _), count) in request.valued().zip(winner.iter().copied()) {
            builder.push(denomination, count)?;
        }

        debug!(
            target_price = target,
            combinations,
            objective = ?self.objective,
            total_value = best_total,
            counts = ?winner.as_slice(),
            "exhaustive search selected cards"
        );

        Ok(Selection::Plan(builder.build()?))
    }
}

impl SelectionStrategy for ExhaustiveSearch {
    fn select<'a>(&self, request: &SelectionRequest<'_, 'a>) -> Result<Selection<'a>, SelectionError> {
        self.select_with_observer(request, &mut NoopObserver)
    }
}

/// Step the odometer to the next combination, keeping `total` in sync.
///
/// The last denomination turns fastest. Returns `false` once every
/// combination has been visited.
fn advance(counts: &mut [u32], values: &[i64], total: &mut i64, max_count: u32) -> bool {
    for (count, value) in counts.iter_mut().zip(values).rev() {
        if *count < max_count {
            *count += 1;
            *total += value;

            return true;
        }

        *total -= value * i64::from(max_count);
        *count = 0;
    }

    false
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::THB};
    use testresult::TestResult;

    use crate::{cards::CardDenomination, catalog::Catalog, valuation::Valuation};

    use super::*;

    fn catalog<'a>(cards: &[(i64, i64)]) -> Result<Catalog<'a>, crate::catalog::CatalogError> {
        Catalog::with_denominations(
            cards.iter().map(|&(cost, value)| {
                CardDenomination::new(Money::from_minor(cost, THB), Money::from_minor(value, THB))
            }),
            THB,
        )
    }

    #[derive(Debug, Default)]
    struct RecordingObserver {
        candidates: Vec<(Vec<u32>, i64, bool)>,
        improvements: Vec<(Vec<u32>, i64)>,
    }

    impl SearchObserver for RecordingObserver {
        fn on_candidate(&mut self, counts: &[u32], total_value: i64, feasible: bool) {
            self.candidates.push((counts.to_vec(), total_value, feasible));
        }

        fn on_improvement(&mut self, counts: &[u32], total_value: i64) {
            self.improvements.push((counts.to_vec(), total_value));
        }
    }

    #[test]
    fn advance_turns_last_denomination_fastest() {
        let values = [10, 1];
        let mut counts = [0, 0];
        let mut total = 0;
        let mut seen = vec![(counts, total)];

        while advance(&mut counts, &values, &mut total, 2) {
            seen.push((counts, total));
        }

        assert_eq!(
            seen,
            vec![
                ([0, 0], 0),
                ([0, 1], 1),
                ([0, 2], 2),
                ([1, 0], 10),
                ([1, 1], 11),
                ([1, 2], 12),
                ([2, 0], 20),
                ([2, 1], 21),
                ([2, 2], 22),
            ]
        );
    }

    #[test]
    fn min_overpay_prefers_smallest_overshoot() -> TestResult {
        let catalog = catalog(&[(100, 130), (50, 65), (30, 39)])?;
        let request = SelectionRequest::new(Money::from_minor(100, THB), &catalog, Valuation::default())?;

        let selection = ExhaustiveSearch::new(Objective::MinOverpay).select(&request)?;
        let plan = selection.plan().ok_or("expected a plan")?;

        // 65 + 39 = 104 is the smallest total of at least 100
        assert_eq!(plan.total_effective_value(), Money::from_minor(104, THB));
        assert_eq!(plan.overpay(), Money::from_minor(4, THB));

        Ok(())
    }

    #[test]
    fn max_coverage_prefers_closest_from_below() -> TestResult {
        let catalog = catalog(&[(100, 130), (50, 65), (30, 39)])?;
        let request = SelectionRequest::new(Money::from_minor(100, THB), &catalog, Valuation::default())?;

        let selection = ExhaustiveSearch::new(Objective::MaxCoverage).select(&request)?;
        let plan = selection.plan().ok_or("expected a plan")?;

        // 2 x 39 = 78 beats 65 and 39
        assert_eq!(plan.total_effective_value(), Money::from_minor(78, THB));
        assert_eq!(plan.cash_gap(), Money::from_minor(22, THB));

        Ok(())
    }

    #[test]
    fn ties_go_to_first_combination_found() -> TestResult {
        // Both [2, 0] and [0, 1] are worth 20; the outer loop reaches [0, 1] first.
        let catalog = catalog(&[(8, 10), (15, 20)])?;
        let request = SelectionRequest::new(Money::from_minor(20, THB), &catalog, Valuation::default())?;

        let selection = ExhaustiveSearch::new(Objective::MinOverpay).select(&request)?;
        let plan = selection.plan().ok_or("expected a plan")?;

        assert_eq!(plan.line_items().len(), 1);
        assert_eq!(
            plan.line_items().first().map(|line| (line.denomination.cost(), line.count)),
            Some((Money::from_minor(15, THB), 1))
        );

        Ok(())
    }

    #[test]
    fn min_overpay_without_feasible_combination() -> TestResult {
        let catalog = catalog(&[(10, 13)])?;
        let request = SelectionRequest::new(Money::from_minor(200, THB), &catalog, Valuation::default())?;

        let selection = ExhaustiveSearch::new(Objective::MinOverpay).select(&request)?;

        assert!(selection.is_infeasible());

        Ok(())
    }

    #[test]
    fn max_coverage_zero_target_is_empty_plan() -> TestResult {
        let catalog = catalog(&[(100, 130), (50, 65)])?;
        let request = SelectionRequest::new(Money::from_minor(0, THB), &catalog, Valuation::default())?;

        let selection = ExhaustiveSearch::new(Objective::MaxCoverage).select(&request)?;
        let plan = selection.plan().ok_or("expected a plan")?;

        assert!(plan.is_empty());
        assert_eq!(plan.total_effective_value(), Money::from_minor(0, THB));

        Ok(())
    }

    #[test]
    fn observer_sees_every_candidate_and_only_feasible_improvements() -> TestResult {
        let catalog = catalog(&[(100, 130), (50, 65), (30, 39)])?;
        let request = SelectionRequest::new(Money::from_minor(250, THB), &catalog, Valuation::default())?;
        let search = ExhaustiveSearch::new(Objective::MinOverpay);
        let mut observer = RecordingObserver::default();

        search.select_with_observer(&request, &mut observer)?;

        assert_eq!(observer.candidates.len(), 1331);
        assert_eq!(
            observer.candidates.first(),
            Some(&(vec![0, 0, 0], 0, false))
        );
        assert_eq!(
            observer.candidates.last(),
            Some(&(vec![10, 10, 10], 2340, true))
        );
        assert!(!observer.improvements.is_empty());
        assert!(
            observer
                .improvements
                .iter()
                .all(|(_, total)| Objective::MinOverpay.is_feasible(*total, 250)),
            "every improvement must be feasible"
        );
        assert!(
            observer
                .improvements
                .windows(2)
                .all(|pair| matches!(pair, [a, b] if b.1 < a.1)),
            "improvements must strictly decrease the overpay"
        );

        Ok(())
    }

    #[test]
    fn max_count_bounds_the_search() -> TestResult {
        let catalog = catalog(&[(10, 13)])?;
        let request = SelectionRequest::new(Money::from_minor(50, THB), &catalog, Valuation::default())?;
        let search = ExhaustiveSearch::new(Objective::MinOverpay).with_max_count(3);
        let mut observer = RecordingObserver::default();

        let selection = search.select_with_observer(&request, &mut observer)?;

        assert_eq!(observer.candidates.len(), 4);
        assert!(selection.is_infeasible());

        Ok(())
    }

    #[test]
    fn rejects_oversized_search_space() -> TestResult {
        let cards = [(1, 2); 7];
        let catalog = catalog(&cards)?;
        let request = SelectionRequest::new(Money::from_minor(50, THB), &catalog, Valuation::default())?;

        let result = ExhaustiveSearch::new(Objective::MaxCoverage).select(&request);

        assert!(matches!(
            result,
            Err(SelectionError::SearchSpaceTooLarge {
                combinations: 19_487_171,
                limit: MAX_SEARCH_SPACE
            })
        ));

        Ok(())
    }

    #[test]
    fn rejects_totals_that_overflow() -> TestResult {
        let value = i64::MAX / 5;
        let catalog = catalog(&[(value, value)])?;
        let request = SelectionRequest::new(Money::from_minor(100, THB), &catalog, Valuation::default())?;

        let result = ExhaustiveSearch::new(Objective::MinOverpay).select(&request);

        assert!(matches!(result, Err(SelectionError::Overflow)));

        Ok(())
    }

    #[test]
    fn search_space_saturates() {
        let search = ExhaustiveSearch::new(Objective::MaxCoverage).with_max_count(u32::MAX);

        assert_eq!(search.search_space(0), 1);
        assert_eq!(search.search_space(6), u64::MAX);
        assert_eq!(ExhaustiveSearch::new(Objective::MaxCoverage).search_space(6), MAX_SEARCH_SPACE);
    }

    #[test]
    fn empty_catalog_evaluates_single_empty_combination() -> TestResult {
        let catalog = Catalog::new(THB);
        let request = SelectionRequest::new(Money::from_minor(0, THB), &catalog, Valuation::default())?;
        let mut observer = RecordingObserver::default();

        let selection = ExhaustiveSearch::new(Objective::MinOverpay)
            .select_with_observer(&request, &mut observer)?;

        assert_eq!(observer.candidates.len(), 1);
        assert!(selection.plan().is_some_and(|plan| plan.is_empty()));

        Ok(())
    }
}
