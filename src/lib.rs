//! Supermarket
//!
//! Supermarket is a checkout engine: it prices shopping carts against a product catalog, applies
//! special offers and produces itemised receipts.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod discounts;
pub mod fixtures;
pub mod offers;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod utils;
