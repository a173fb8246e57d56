//! Cash Card
//!
//! Works out which discounted prepaid cash cards to buy to cover a purchase
//! price, and what the customer ends up paying.

pub mod cards;
pub mod catalog;
pub mod fixtures;
pub mod plans;
pub mod prelude;
pub mod report;
pub mod selector;
pub mod strategies;
pub mod utils;
pub mod valuation;
