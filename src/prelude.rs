//! Cash Card prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cards::CardDenomination,
    catalog::{Catalog, CatalogError},
    fixtures::{Fixture, FixtureError},
    plans::{LineItem, PlanComparison, PurchasePlan},
    report::ReportError,
    selector::{CardSelector, Strategy},
    strategies::{
        Selection, SelectionError, SelectionRequest, SelectionStrategy,
        exhaustive::{ExhaustiveSearch, Objective},
        greedy::GreedyFill,
        observer::{NoopObserver, SearchObserver},
        overshoot::OvershootFill,
    },
    valuation::{BonusMode, Valuation},
};
