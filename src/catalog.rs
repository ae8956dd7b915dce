//! Catalog

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::products::Product;

/// Errors raised when registering or looking up catalog prices.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// The product was never registered in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Prices must not be negative.
    #[error("Negative price {price} for product {product}")]
    NegativePrice {
        /// Product name
        product: String,
        /// Rejected price, formatted
        price: String,
    },

    /// The price currency differs from the catalog currency.
    #[error("Product {product} is priced in {actual}, but the catalog uses {expected}")]
    CurrencyMismatch {
        /// Product name
        product: String,
        /// Catalog currency code
        expected: &'static str,
        /// Price currency code
        actual: &'static str,
    },
}

/// Read access to unit prices.
pub trait Catalog<'a> {
    /// Look up the unit price of a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::ProductNotFound`] if the product has no price.
    fn unit_price(&self, product: &Product) -> Result<Money<'a, Currency>, CatalogError>;

    /// Currency every price in this catalog is expressed in.
    fn currency(&self) -> &'static Currency;
}

impl<'a, C: Catalog<'a> + ?Sized> Catalog<'a> for &C {
    fn unit_price(&self, product: &Product) -> Result<Money<'a, Currency>, CatalogError> {
        (**self).unit_price(product)
    }

    fn currency(&self) -> &'static Currency {
        (**self).currency()
    }
}

/// Catalog backed by in-memory maps.
#[derive(Debug, Clone)]
pub struct InMemoryCatalog<'a> {
    products: FxHashMap<String, Product>,
    prices: FxHashMap<Product, Money<'a, Currency>>,
    currency: &'static Currency,
}

impl<'a> InMemoryCatalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            products: FxHashMap::default(),
            prices: FxHashMap::default(),
            currency,
        }
    }

    /// Register a product at the given unit price. Registering the same product again
    /// replaces its price.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::NegativePrice`]: the price is below zero.
    /// - [`CatalogError::CurrencyMismatch`]: the price is not in the catalog currency.
    pub fn add_product(
        &mut self,
        product: Product,
        price: Money<'a, Currency>,
    ) -> Result<(), CatalogError> {
        if price.currency() != self.currency {
            return Err(CatalogError::CurrencyMismatch {
                product: product.name().to_string(),
                expected: self.currency.iso_alpha_code,
                actual: price.currency().iso_alpha_code,
            });
        }

        if price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice {
                product: product.name().to_string(),
                price: price.to_string(),
            });
        }

        debug!(product = %product, unit = %product.unit(), price = %price, "Adding product");

        self.products
            .insert(product.name().to_string(), product.clone());

        self.prices.insert(product, price);

        Ok(())
    }

    /// Find a registered product by name.
    ///
    /// Names are not unique across units: when the same name is registered as both
    /// [`ProductUnit::Each`](crate::products::ProductUnit::Each) and
    /// [`ProductUnit::Kilo`](crate::products::ProductUnit::Kilo), the most recently added product
    /// is returned. Both stay priced and can still be looked up with [`Catalog::unit_price`].
    pub fn product_with_name(&self, name: &str) -> Option<&Product> {
        self.products.get(name)
    }

    /// Number of priced products.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Check if no products are priced.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<'a> Catalog<'a> for InMemoryCatalog<'a> {
    fn unit_price(&self, product: &Product) -> Result<Money<'a, Currency>, CatalogError> {
        self.prices
            .get(product)
            .copied()
            .ok_or_else(|| CatalogError::ProductNotFound(product.name().to_string()))
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, USD};
    use testresult::TestResult;

    use crate::products::ProductUnit;

    use super::*;

    fn toothbrush() -> Product {
        Product::new("toothbrush", ProductUnit::Each)
    }

    #[test]
    fn unit_price_returns_registered_price() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);

        catalog.add_product(toothbrush(), Money::from_minor(99, GBP))?;

        assert_eq!(catalog.unit_price(&toothbrush())?, Money::from_minor(99, GBP));

        Ok(())
    }

    #[test]
    fn unit_price_of_unknown_product_errors() {
        let catalog = InMemoryCatalog::new(GBP);

        assert_eq!(
            catalog.unit_price(&toothbrush()),
            Err(CatalogError::ProductNotFound("toothbrush".to_string()))
        );
    }

    #[test]
    fn unit_of_measure_is_part_of_the_lookup() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);

        catalog.add_product(toothbrush(), Money::from_minor(99, GBP))?;

        let by_weight = Product::new("toothbrush", ProductUnit::Kilo);

        assert!(matches!(
            catalog.unit_price(&by_weight),
            Err(CatalogError::ProductNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn re_adding_a_product_replaces_its_price() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);

        catalog.add_product(toothbrush(), Money::from_minor(99, GBP))?;
        catalog.add_product(toothbrush(), Money::from_minor(120, GBP))?;

        assert_eq!(catalog.unit_price(&toothbrush())?, Money::from_minor(120, GBP));
        assert_eq!(catalog.len(), 1);

        Ok(())
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut catalog = InMemoryCatalog::new(GBP);

        let result = catalog.add_product(toothbrush(), Money::from_minor(-1, GBP));

        assert!(matches!(result, Err(CatalogError::NegativePrice { .. })));
        assert!(catalog.is_empty());
    }

    #[test]
    fn zero_price_is_allowed() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);

        catalog.add_product(toothbrush(), Money::from_minor(0, GBP))?;

        assert_eq!(catalog.unit_price(&toothbrush())?, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn currency_mismatch_is_rejected() {
        let mut catalog = InMemoryCatalog::new(GBP);

        let result = catalog.add_product(toothbrush(), Money::from_minor(99, USD));

        assert_eq!(
            result,
            Err(CatalogError::CurrencyMismatch {
                product: "toothbrush".to_string(),
                expected: GBP.iso_alpha_code,
                actual: USD.iso_alpha_code,
            })
        );
    }

    #[test]
    fn product_with_name_finds_registered_products() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);

        catalog.add_product(toothbrush(), Money::from_minor(99, GBP))?;

        assert_eq!(catalog.product_with_name("toothbrush"), Some(&toothbrush()));
        assert_eq!(catalog.product_with_name("apples"), None);

        Ok(())
    }

    #[test]
    fn product_with_name_returns_the_latest_unit_for_a_shared_name() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);
        let loose = Product::new("apples", ProductUnit::Kilo);
        let bagged = Product::new("apples", ProductUnit::Each);

        catalog.add_product(loose.clone(), Money::from_minor(199, GBP))?;
        catalog.add_product(bagged.clone(), Money::from_minor(250, GBP))?;

        assert_eq!(catalog.product_with_name("apples"), Some(&bagged));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.unit_price(&loose)?, Money::from_minor(199, GBP));

        Ok(())
    }

    #[test]
    fn shared_reference_is_a_catalog() -> TestResult {
        let mut catalog = InMemoryCatalog::new(GBP);

        catalog.add_product(toothbrush(), Money::from_minor(99, GBP))?;

        let shared = &catalog;

        assert_eq!(Catalog::unit_price(&shared, &toothbrush())?, Money::from_minor(99, GBP));
        assert_eq!(Catalog::currency(&shared), GBP);

        Ok(())
    }
}
