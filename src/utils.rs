//! Utils

use clap::Parser;

use crate::{selector::Strategy, valuation::BonusMode};

/// Arguments for the cash card examples
#[derive(Debug, Parser)]
pub struct ExampleSelectionArgs {
    /// Purchase price, e.g. "1200 THB"
    #[clap(short, long, default_value = "1200 THB")]
    pub price: String,

    /// Selection strategy
    #[clap(short, long, value_enum, default_value_t = Strategy::GreedyOvershootPair)]
    pub strategy: Strategy,

    /// Treat each card's bonus as usable (or not) instead of using its redemption value
    #[clap(short, long, value_enum)]
    pub bonus: Option<BonusMode>,

    /// Catalog fixture to load from `./fixtures/catalogs`; defaults to the built-in cash cards
    #[clap(short, long)]
    pub fixture: Option<String>,
}
