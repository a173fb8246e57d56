//! Plan Report

use std::io;

use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::plans::{LineItem, PlanComparison, PurchasePlan};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Writing to the output failed.
    #[error("failed to write report")]
    IO,

    /// A line item's total does not fit in minor units.
    #[error("line item total overflowed")]
    Overflow,
}

impl PurchasePlan<'_> {
    /// Writes the plan as a table of cards followed by the payment summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        let mut builder = Builder::default();

        builder.push_record(["Card", "Count", "Value", "Bonus", "Paid"]);

        for line in self.line_items() {
            builder.push_record(line_cells(line)?);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..5), Alignment::right());

        writeln!(out, "{table}").map_err(|_err| ReportError::IO)?;

        write_summary(&mut out, self)
    }
}

impl PlanComparison<'_> {
    /// Writes both options one after the other.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        writeln!(out, "Option A: only the cards needed").map_err(|_err| ReportError::IO)?;
        self.minimal.write_to(&mut out)?;

        writeln!(out, "\nOption B: buy past the price and keep the credit")
            .map_err(|_err| ReportError::IO)?;
        self.overshoot.write_to(&mut out)
    }
}

fn line_cells(line: &LineItem<'_>) -> Result<[String; 5], ReportError> {
    let denomination = &line.denomination;
    let paid = times(denomination.cost(), line.count)?;

    Ok([
        format!("{}", denomination.cost()),
        format!("× {}", line.count),
        format!("{}", denomination.redemption_value()),
        format!("{}", denomination.bonus()),
        format!("{paid}"),
    ])
}

fn times<'a>(unit: Money<'a, Currency>, count: u32) -> Result<Money<'a, Currency>, ReportError> {
    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(count))
        .ok_or(ReportError::Overflow)?;

    Ok(Money::from_minor(minor, unit.currency()))
}

fn write_summary(out: &mut impl io::Write, plan: &PurchasePlan<'_>) -> Result<(), ReportError> {
    let mut lines = vec![
        ("Card value", format!("{}", plan.total_effective_value())),
        ("Paid for cards", format!("{}", plan.total_cost())),
        ("Cash gap", format!("{}", plan.cash_gap())),
        ("Total to pay", format!("{}", plan.amount_customer_pays())),
        (
            "Discount",
            format!("{} ({:.2}%)", plan.discount_amount(), plan.discount_percent()),
        ),
    ];

    if plan.overpay().to_minor_units() > 0 {
        lines.push(("Card credit left", format!("{}", plan.overpay())));
    }

    if plan.total_bonus_value().to_minor_units() > 0 {
        lines.push(("Bonus value", format!("{}", plan.total_bonus_value())));
    }

    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    for (label, value) in lines {
        writeln!(out, " {label:<label_width$}  {value}").map_err(|_err| ReportError::IO)?;
    }

    Ok(())
}
