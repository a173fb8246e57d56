//! Fixtures
//!
//! Catalogs are fixed per deployment and live in YAML files under
//! `<base>/catalogs/<name>.yml`:
//!
//! ```yaml
//! name: Cash cards
//! denominations:
//!   - cost: "1000 THB"
//!     value: "1300 THB"
//!   - cost: "500 THB"
//!     bonus: "100 THB"
//! ```
//!
//! `value` defaults to `cost` and `bonus` defaults to zero.

use std::{fs, path::PathBuf};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, THB, USD},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    cards::CardDenomination,
    catalog::{Catalog, CatalogError},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Catalog has no denominations, so its currency is unknown
    #[error("Catalog fixture has no denominations; currency unknown")]
    NoDenominations,

    /// Catalog construction error
    #[error("Failed to create catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Wrapper for a catalog in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Display name of the catalog
    pub name: String,

    /// Denominations, in catalog order
    pub denominations: Vec<DenominationFixture>,
}

/// Denomination Fixture
#[derive(Debug, Deserialize)]
pub struct DenominationFixture {
    /// Card price (e.g., "1000 THB")
    pub cost: String,

    /// Redemption value; defaults to the cost
    #[serde(default)]
    pub value: Option<String>,

    /// Bonus value; defaults to zero
    #[serde(default)]
    pub bonus: Option<String>,
}

impl TryFrom<&DenominationFixture> for CardDenomination<'static> {
    type Error = FixtureError;

    fn try_from(fixture: &DenominationFixture) -> Result<Self, Self::Error> {
        let (cost_minor, currency) = parse_price(&fixture.cost)?;
        let cost = Money::from_minor(cost_minor, currency);

        let value = fixture
            .value
            .as_deref()
            .map(parse_money)
            .transpose()?
            .unwrap_or(cost);

        let bonus = fixture
            .bonus
            .as_deref()
            .map(parse_money)
            .transpose()?
            .unwrap_or_else(|| Money::from_minor(0, currency));

        Ok(CardDenomination::from_parts(cost, value, bonus))
    }
}

impl CatalogFixture {
    /// Parse a catalog fixture from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(serde_norway::from_str(yaml)?)
    }

    /// Build the catalog this fixture describes.
    ///
    /// # Errors
    ///
    /// Returns an error if a price is malformed, the fixture is empty, or
    /// denominations use more than one currency.
    pub fn catalog(&self) -> Result<Catalog<'static>, FixtureError> {
        let denominations = self
            .denominations
            .iter()
            .map(CardDenomination::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = denominations
            .first()
            .map(CardDenomination::currency)
            .ok_or(FixtureError::NoDenominations)?;

        Ok(Catalog::with_denominations(denominations, currency)?)
    }
}

/// Loads catalog fixtures from a directory.
#[derive(Debug, Clone)]
pub struct Fixture {
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load the named catalog fixture.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or does not
    /// describe a valid catalog.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog<'static>, FixtureError> {
        let file_path = self.base_path.join("catalogs").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture = CatalogFixture::from_yaml(&contents)?;
        let catalog = fixture.catalog()?;

        debug!(
            path = %file_path.display(),
            catalog = %fixture.name,
            denominations = catalog.len(),
            "loaded catalog fixture"
        );

        Ok(catalog)
    }
}

/// Parse price string (e.g., "1000 THB") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount cannot be parsed as a decimal, or if the currency code
/// is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "THB" => THB,
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("1000THB");

        assert!(matches!(result, Err(FixtureError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("10.00 ABC");

        assert!(matches!(result, Err(FixtureError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn parse_price_accepts_baht_and_pounds() -> Result<(), FixtureError> {
        let (thb_minor, thb) = parse_price("1300 THB")?;
        let (gbp_minor, gbp) = parse_price("2.50 GBP")?;

        assert_eq!(thb_minor, 130_000);
        assert_eq!(thb, THB);
        assert_eq!(gbp_minor, 250);
        assert_eq!(gbp, GBP);

        Ok(())
    }

    #[test]
    fn catalog_from_yaml_applies_defaults() -> TestResult {
        let fixture = CatalogFixture::from_yaml(
            r#"
name: Gift cards
denominations:
  - cost: "1000 THB"
    value: "1300 THB"
  - cost: "500 THB"
    bonus: "100 THB"
"#,
        )?;

        let catalog = fixture.catalog()?;

        assert_eq!(fixture.name, "Gift cards");
        assert_eq!(catalog.currency(), THB);
        assert_eq!(
            catalog.get(0),
            Some(&CardDenomination::new(
                Money::from_minor(100_000, THB),
                Money::from_minor(130_000, THB)
            ))
        );
        assert_eq!(
            catalog.get(1),
            Some(&CardDenomination::with_bonus(
                Money::from_minor(50_000, THB),
                Money::from_minor(10_000, THB)
            ))
        );

        Ok(())
    }

    #[test]
    fn catalog_without_denominations_errors() -> TestResult {
        let fixture = CatalogFixture::from_yaml("name: Empty\ndenominations: []\n")?;

        assert!(matches!(fixture.catalog(), Err(FixtureError::NoDenominations)));

        Ok(())
    }

    #[test]
    fn catalog_with_mixed_currencies_errors() -> TestResult {
        let fixture = CatalogFixture::from_yaml(
            r#"
name: Mixed
denominations:
  - cost: "10 THB"
  - cost: "10 USD"
"#,
        )?;

        assert!(matches!(
            fixture.catalog(),
            Err(FixtureError::Catalog(CatalogError::CurrencyMismatch(1, "USD", "THB")))
        ));

        Ok(())
    }

    #[test]
    fn malformed_yaml_errors() {
        assert!(matches!(
            CatalogFixture::from_yaml("denominations: [[["),
            Err(FixtureError::Yaml(_))
        ));
    }
}
