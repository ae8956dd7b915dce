//! Prices
//!
//! Catalog prices are held as [`Money`] in minor units. Anything derived from a quantity
//! (weights in particular) is carried as a full-precision [`Decimal`] in major units and only
//! rounded back to [`Money`] for display. The number of minor units per major unit comes from
//! the currency exponent (2 for GBP, 0 for JPY).

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors that can occur during price arithmetic.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Decimal arithmetic overflowed.
    #[error("price arithmetic overflowed")]
    Overflow,

    /// The amount does not fit in minor units.
    #[error("amount {0} cannot be represented in minor units")]
    Unrepresentable(Decimal),
}

/// Converts a price into major units (e.g. 99 pence becomes `0.99`, 100 yen stays `100`).
pub fn major_units(price: &Money<'_, Currency>) -> Decimal {
    Decimal::new(price.to_minor_units(), price.currency().exponent)
}

/// Rounds a major unit amount to the nearest minor unit of `currency`.
///
/// # Errors
///
/// Returns [`PricingError::Unrepresentable`] if the amount overflows `i64` minor units.
pub fn to_money(
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, PricingError> {
    let minor = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|per_major| {
            amount
                .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
                .checked_mul(Decimal::from(per_major))
        })
        .and_then(|value| value.to_i64())
        .ok_or(PricingError::Unrepresentable(amount))?;

    Ok(Money::from_minor(minor, currency))
}

/// Checks that `amount` has no more decimal places than `currency` has minor units.
pub fn fits_minor_units(amount: Decimal, currency: &Currency) -> bool {
    amount.normalize().scale() <= currency.exponent
}

/// Calculates `quantity × unit_price` without rounding.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the multiplication overflows.
pub fn line_total(quantity: Decimal, unit_price: Decimal) -> Result<Decimal, PricingError> {
    quantity
        .checked_mul(unit_price)
        .ok_or(PricingError::Overflow)
}

/// Sums a sequence of amounts.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the sum overflows.
pub fn total_price(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, PricingError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))
        .ok_or(PricingError::Overflow)
}
