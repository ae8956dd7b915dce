//! Receipt

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    discounts::Discount,
    pricing::{PricingError, to_money, total_price},
    products::{Product, ProductUnit},
};

/// Errors that can occur when totalling or printing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One priced cart line.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptItem<'a> {
    product: Product,
    quantity: Decimal,
    price: Money<'a, Currency>,
    total_price: Decimal,
}

impl<'a> ReceiptItem<'a> {
    /// The product sold
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity sold
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Unit price
    pub fn price(&self) -> Money<'a, Currency> {
        self.price
    }

    /// `quantity × price`, unrounded
    pub fn total_price(&self) -> Decimal {
        self.total_price
    }
}

/// Final receipt for a checked out cart.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    items: Vec<ReceiptItem<'a>>,
    discounts: SmallVec<[Discount; 4]>,
    currency: &'static Currency,
}

impl<'a> Receipt<'a> {
    /// Create an empty receipt.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            discounts: SmallVec::new(),
            currency,
        }
    }

    /// Append a priced line.
    pub fn add_product(
        &mut self,
        product: Product,
        quantity: Decimal,
        price: Money<'a, Currency>,
        total_price: Decimal,
    ) {
        self.items.push(ReceiptItem {
            product,
            quantity,
            price,
            total_price,
        });
    }

    /// Append a discount line.
    pub fn add_discount(&mut self, discount: Discount) {
        self.discounts.push(discount);
    }

    /// Priced lines in the order they were added
    pub fn items(&self) -> &[ReceiptItem<'a>] {
        &self.items
    }

    /// Discount lines in the order they were added
    pub fn discounts(&self) -> &[Discount] {
        &self.discounts
    }

    /// Currency used for all monetary values.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Sum of all line totals, before discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the sum overflows.
    pub fn subtotal(&self) -> Result<Decimal, PricingError> {
        total_price(self.items.iter().map(ReceiptItem::total_price))
    }

    /// Amount payable: line totals plus (negative) discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the sum overflows.
    pub fn total_price(&self) -> Result<Decimal, PricingError> {
        let item_totals = self.items.iter().map(ReceiptItem::total_price);
        let discounts = self.discounts.iter().map(Discount::discount_amount);

        total_price(item_totals.chain(discounts))
    }

    /// Prints the receipt as a table followed by the total.
    ///
    /// # Errors
    ///
    /// Returns an error if an amount cannot be displayed or the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Quantity", "Unit Price", "Total"]);

        for item in &self.items {
            builder.push_record([
                item.product.name().to_string(),
                display_quantity(item.quantity, item.product.unit()),
                format!("{}", item.price),
                format!("{}", to_money(item.total_price, self.currency)?),
            ]);
        }

        for discount in &self.discounts {
            builder.push_record([
                format!("{} ({})", discount.description(), discount.product()),
                String::new(),
                String::new(),
                format!("{}", to_money(discount.discount_amount(), self.currency)?),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..4), Alignment::right());

        let total = to_money(self.total_price()?, self.currency)?;

        writeln!(out, "{table}").map_err(|_err| ReceiptError::IO)?;
        writeln!(out, "Total: {total}").map_err(|_err| ReceiptError::IO)
    }
}

fn display_quantity(quantity: Decimal, unit: ProductUnit) -> String {
    match unit {
        ProductUnit::Each => quantity.normalize().to_string(),
        ProductUnit::Kilo => format!("{quantity:.3} {unit}"),
    }
}
