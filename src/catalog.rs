//! Catalog

use std::slice;

use rusty_money::{
    Money,
    iso::{self, Currency},
};
use smallvec::SmallVec;
use thiserror::Error;

use crate::cards::CardDenomination;

/// Cost and redemption value, in whole baht, of the standard cash cards.
const CASH_CARDS_BAHT: [(i64, i64); 6] = [
    (1000, 1300),
    (500, 650),
    (300, 390),
    (200, 260),
    (100, 130),
    (50, 65),
];

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A denomination's currency differs from the catalog currency (index, found, expected).
    #[error("Denomination {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// Ordered set of card denominations on sale, all in one currency.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    denominations: SmallVec<[CardDenomination<'a>; 6]>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            denominations: SmallVec::new(),
            currency,
        }
    }

    /// Create a catalog with the given denominations, in the order given.
    ///
    /// # Errors
    ///
    /// Returns a `CatalogError` if any denomination is priced in another currency.
    pub fn with_denominations(
        denominations: impl IntoIterator<Item = CardDenomination<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let denominations: SmallVec<[CardDenomination<'a>; 6]> =
            denominations.into_iter().collect();

        denominations
            .iter()
            .enumerate()
            .try_for_each(|(i, denomination)| {
                match denomination.mismatched_currency(currency) {
                    None => Ok(()),
                    Some(found) => Err(CatalogError::CurrencyMismatch(
                        i,
                        found.iso_alpha_code,
                        currency.iso_alpha_code,
                    )),
                }
            })?;

        Ok(Catalog {
            denominations,
            currency,
        })
    }

    /// The standard THB cash card catalog, largest card first.
    pub fn cash_cards() -> Catalog<'static> {
        let denominations = CASH_CARDS_BAHT.iter().map(|&(cost, value)| {
            CardDenomination::new(
                Money::from_minor(cost * 100, iso::THB),
                Money::from_minor(value * 100, iso::THB),
            )
        });

        Catalog {
            denominations: denominations.collect(),
            currency: iso::THB,
        }
    }

    /// Get the number of denominations in the catalog.
    pub fn len(&self) -> usize {
        self.denominations.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.denominations.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Iterate over the denominations in catalog order.
    pub fn iter(&self) -> slice::Iter<'_, CardDenomination<'a>> {
        self.denominations.iter()
    }

    /// Get the denomination at `index`.
    pub fn get(&self, index: usize) -> Option<&CardDenomination<'a>> {
        self.denominations.get(index)
    }
}

impl<'c, 'a> IntoIterator for &'c Catalog<'a> {
    type Item = &'c CardDenomination<'a>;
    type IntoIter = slice::Iter<'c, CardDenomination<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
