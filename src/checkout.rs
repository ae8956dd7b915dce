//! Checkout
//!
//! The teller prices every cart line from its catalog, then applies the registered offers.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    cart::ShoppingCart,
    catalog::{Catalog, CatalogError},
    discounts::{DiscountError, calculate_discount},
    offers::{OfferError, OfferRegistry, SpecialOfferType},
    pricing::{PricingError, line_total, major_units},
    products::Product,
    receipt::Receipt,
};

/// Errors that abort a checkout.
#[derive(Debug, Error, PartialEq)]
pub enum CheckoutError {
    /// A cart product has no catalog price.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Wrapped discount calculation error.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Checks out carts against a catalog and a set of offers.
#[derive(Debug)]
pub struct Teller<'a, C: Catalog<'a>> {
    catalog: C,
    offers: OfferRegistry<'a>,
}

impl<'a, C: Catalog<'a>> Teller<'a, C> {
    /// Create a teller with no offers.
    pub fn new(catalog: C) -> Self {
        let offers = OfferRegistry::new(catalog.currency());

        Self { catalog, offers }
    }

    /// Create a teller with a pre-built offer registry.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::CurrencyMismatch`] if the registry is priced in a different
    /// currency from the catalog.
    pub fn with_offers(catalog: C, offers: OfferRegistry<'a>) -> Result<Self, OfferError> {
        if offers.currency() != catalog.currency() {
            return Err(OfferError::CurrencyMismatch {
                expected: catalog.currency().iso_alpha_code,
                actual: offers.currency().iso_alpha_code,
            });
        }

        Ok(Self { catalog, offers })
    }

    /// Register a special offer for a product.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferError`] if the argument does not suit the offer type.
    pub fn add_special_offer(
        &mut self,
        offer_type: SpecialOfferType,
        product: &Product,
        argument: Option<Decimal>,
    ) -> Result<(), OfferError> {
        self.offers.add_special_offer(offer_type, product, argument)
    }

    /// The catalog prices are looked up in.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The active offers.
    pub fn offers(&self) -> &OfferRegistry<'a> {
        &self.offers
    }

    /// Price every line of the cart and apply offers.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Catalog`]: a cart product is missing from the catalog.
    /// - [`CheckoutError::Pricing`]: a line total overflowed.
    /// - [`CheckoutError::Discount`]: a discount calculation overflowed.
    pub fn checks_out_articles_from(
        &self,
        cart: &ShoppingCart,
    ) -> Result<Receipt<'a>, CheckoutError> {
        let mut receipt = Receipt::new(self.catalog.currency());

        for line in cart.items() {
            let unit_price = self.catalog.unit_price(line.product())?;
            let total = line_total(line.quantity(), major_units(&unit_price))?;

            debug!(
                product = %line.product(),
                quantity = %line.quantity(),
                unit_price = %unit_price,
                total = %total,
                "Priced cart line"
            );

            receipt.add_product(line.product().clone(), line.quantity(), unit_price, total);
        }

        for line in cart.items() {
            let Some(offer) = self.offers.offer_for(line.product()) else {
                continue;
            };

            let unit_price = major_units(&self.catalog.unit_price(line.product())?);

            match calculate_discount(offer, line.product(), unit_price, line.quantity())? {
                Some(discount) => {
                    debug!(
                        product = %line.product(),
                        offer = %discount.description(),
                        amount = %discount.discount_amount(),
                        "Applied discount"
                    );

                    receipt.add_discount(discount);
                }
                None => {
                    debug!(
                        product = %line.product(),
                        offer = %offer.description(),
                        quantity = %line.quantity(),
                        "Offer not triggered"
                    );
                }
            }
        }

        info!(
            items = receipt.items().len(),
            discounts = receipt.discounts().len(),
            "Checked out cart"
        );

        Ok(receipt)
    }
}
