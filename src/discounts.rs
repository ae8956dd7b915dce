//! Discounts
//!
//! Computes the reduction an offer gives on one cart line. Amounts are in major units at full
//! precision and a discount is always negative: it is the discounted line total minus the
//! original line total.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{offers::Offer, pricing::major_units, products::Product};

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Decimal arithmetic overflowed.
    #[error("discount arithmetic overflowed")]
    Overflow,
}

/// A reduction applied to the receipt total for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct Discount {
    product: Product,
    description: String,
    discount_amount: Decimal,
}

impl Discount {
    /// Create a new discount line.
    pub fn new(product: Product, description: impl Into<String>, discount_amount: Decimal) -> Self {
        Self {
            product,
            description: description.into(),
            discount_amount,
        }
    }

    /// The discounted product
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Human readable offer label
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Amount taken off the total, never positive
    pub fn discount_amount(&self) -> Decimal {
        self.discount_amount
    }
}

/// Whole bundles in a quantity and the units left over.
#[derive(Debug, PartialEq)]
struct Bundles {
    count: Decimal,
    remainder: Decimal,
}

/// Calculates the discount an offer gives on `quantity` units of `product` at `unit_price`.
///
/// Returns `Ok(None)` when the offer is not triggered: the quantity is below the bundle size,
/// or the offer would not reduce the price.
///
/// # Errors
///
/// Returns [`DiscountError::Overflow`] if the arithmetic overflows.
pub fn calculate_discount(
    offer: &Offer<'_>,
    product: &Product,
    unit_price: Decimal,
    quantity: Decimal,
) -> Result<Option<Discount>, DiscountError> {
    let original_total = quantity
        .checked_mul(unit_price)
        .ok_or(DiscountError::Overflow)?;

    let discounted_total = match offer {
        Offer::PercentDiscount(percent) => {
            let reduction = (*percent * Decimal::ONE)
                .checked_mul(original_total)
                .ok_or(DiscountError::Overflow)?;

            Some(
                original_total
                    .checked_sub(reduction)
                    .ok_or(DiscountError::Overflow)?,
            )
        }
        Offer::TwoForAmount(amount) => split_bundles(quantity, 2)?
            .map(|bundles| bundle_for_amount(&bundles, major_units(amount), unit_price))
            .transpose()?,
        Offer::FiveForAmount(amount) => split_bundles(quantity, 5)?
            .map(|bundles| bundle_for_amount(&bundles, major_units(amount), unit_price))
            .transpose()?,
        Offer::ThreeForTwo => split_bundles(quantity, 3)?
            .map(|bundles| buy_three_pay_two(&bundles, unit_price))
            .transpose()?,
    };

    let Some(discounted_total) = discounted_total else {
        return Ok(None);
    };

    let discount_amount = discounted_total
        .checked_sub(original_total)
        .ok_or(DiscountError::Overflow)?;

    if discount_amount >= Decimal::ZERO {
        return Ok(None);
    }

    Ok(Some(Discount::new(
        product.clone(),
        offer.description(),
        discount_amount,
    )))
}

/// Split a quantity into whole bundles of `size`, or `None` if there isn't a full bundle.
fn split_bundles(quantity: Decimal, size: u32) -> Result<Option<Bundles>, DiscountError> {
    let size = Decimal::from(size);

    if quantity < size {
        return Ok(None);
    }

    let count = quantity
        .checked_div(size)
        .ok_or(DiscountError::Overflow)?
        .floor();

    let remainder = size
        .checked_mul(count)
        .and_then(|bundled| quantity.checked_sub(bundled))
        .ok_or(DiscountError::Overflow)?;

    Ok(Some(Bundles { count, remainder }))
}

/// Bundles at the offer amount, remainder at full price.
fn bundle_for_amount(
    bundles: &Bundles,
    bundle_price: Decimal,
    unit_price: Decimal,
) -> Result<Decimal, DiscountError> {
    let bundled = bundles.count.checked_mul(bundle_price);
    let rest = bundles.remainder.checked_mul(unit_price);

    bundled
        .zip(rest)
        .and_then(|(bundled, rest)| bundled.checked_add(rest))
        .ok_or(DiscountError::Overflow)
}

/// Two paid units per bundle, remainder at full price.
fn buy_three_pay_two(bundles: &Bundles, unit_price: Decimal) -> Result<Decimal, DiscountError> {
    Decimal::TWO
        .checked_mul(bundles.count)
        .and_then(|paid| paid.checked_add(bundles.remainder))
        .and_then(|paid| paid.checked_mul(unit_price))
        .ok_or(DiscountError::Overflow)
}
