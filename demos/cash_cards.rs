//! Cash Card Example
//!
//! Prints the cards to buy for a purchase price.
//!
//! Use `-p` to set the price (e.g. `-p "2500 THB"`)
//! Use `-s` to pick a strategy (`greedy-minimal`, `greedy-overshoot-pair`,
//! `exhaustive-min-overpay`, `exhaustive-max-coverage`)
//! Use `-b` to value cards by cost and bonus (`usable-in-bill`, `not-usable`)
//! Use `-f` to load a catalog fixture by name from `./fixtures/catalogs`
//!
//! Set `RUST_LOG=debug` to see which cards each strategy settled on.

use std::{io, time::Instant};

use anyhow::Result;
use clap::Parser;
use rusty_money::Money;
use tracing_subscriber::EnvFilter;

use cashcard::{
    catalog::Catalog,
    fixtures::{Fixture, parse_price},
    selector::CardSelector,
    strategies::Selection,
    utils::ExampleSelectionArgs,
    valuation::Valuation,
};

/// Cash Card Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .compact()
        .init();

    let args = ExampleSelectionArgs::parse();

    let catalog = match args.fixture.as_deref() {
        Some(name) => Fixture::new().load_catalog(name)?,
        None => Catalog::cash_cards(),
    };

    let (minor_units, currency) = parse_price(&args.price)?;
    let price = Money::from_minor(minor_units, currency);

    let selector = CardSelector::new(&catalog).with_valuation(Valuation::from(args.bonus));

    let start = Instant::now();
    let selection = selector.select(price, args.strategy)?;
    let elapsed = start.elapsed().as_secs_f32();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    println!("Price: {price}\n");

    match selection {
        Selection::Plan(plan) => plan.write_to(&mut handle)?,
        Selection::Comparison(comparison) => comparison.write_to(&mut handle)?,
        Selection::NoFeasibleCombination => {
            println!("No combination of cards within the search bounds covers the price.");
        }
    }

    println!("\nSolution: {elapsed}s");

    Ok(())
}
