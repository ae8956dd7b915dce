//! Shopping Cart

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::Product;

/// Errors related to cart construction.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// Quantities must be strictly positive (product name, rejected quantity).
    #[error("Quantity for {0} must be positive, got {1}")]
    NonPositiveQuantity(String, Decimal),

    /// Merging quantities overflowed.
    #[error("Quantity for {0} overflowed")]
    QuantityOverflow(String),
}

/// A single product and the quantity of it in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: Decimal,
}

impl CartLine {
    /// The product on this line
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Count for discrete products, weight in kilos for weighed ones
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }
}

/// Shopping cart
///
/// Holds at most one line per product, in the order products were first added.
#[derive(Debug, Clone, Default)]
pub struct ShoppingCart {
    lines: Vec<CartLine>,
    positions: FxHashMap<Product, usize>,
}

impl ShoppingCart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single unit of a product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the merged quantity overflows.
    pub fn add_item(&mut self, product: &Product) -> Result<(), CartError> {
        self.add_item_quantity(product, Decimal::ONE)
    }

    /// Add a quantity of a product, merging with any existing line for it.
    ///
    /// # Errors
    ///
    /// - [`CartError::NonPositiveQuantity`]: the quantity is zero or negative.
    /// - [`CartError::QuantityOverflow`]: the merged quantity overflows.
    pub fn add_item_quantity(
        &mut self,
        product: &Product,
        quantity: Decimal,
    ) -> Result<(), CartError> {
        if quantity <= Decimal::ZERO {
            return Err(CartError::NonPositiveQuantity(
                product.name().to_string(),
                quantity,
            ));
        }

        let existing = self
            .positions
            .get(product)
            .and_then(|&idx| self.lines.get_mut(idx));

        if let Some(line) = existing {
            line.quantity = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| CartError::QuantityOverflow(product.name().to_string()))?;

            return Ok(());
        }

        self.positions.insert(product.clone(), self.lines.len());
        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });

        Ok(())
    }

    /// Cart lines in insertion order.
    pub fn items(&self) -> &[CartLine] {
        &self.lines
    }

    /// Quantity of a product in the cart, if present.
    pub fn quantity_of(&self, product: &Product) -> Option<Decimal> {
        self.positions
            .get(product)
            .and_then(|&idx| self.lines.get(idx))
            .map(CartLine::quantity)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
