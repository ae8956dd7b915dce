//! Fixtures
//!
//! Named fixture sets configure a catalog, its offers and a cart from YAML files laid out as
//! `<base>/products/<name>.yml`, `<base>/offers/<name>.yml` and `<base>/carts/<name>.yml`.

use std::{fs, path::PathBuf};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::{CartError, ShoppingCart},
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    checkout::Teller,
    fixtures::{carts::CartFixture, offers::OffersFixture, products::ProductsFixture},
    offers::{OfferError, OfferRegistry},
    products::Product,
};

pub mod carts;
pub mod offers;
pub mod products;

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

    /// Invalid quantity or argument format
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog rejected a product
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Registry rejected an offer
    #[error(transparent)]
    Offer(#[from] OfferError),

    /// Cart rejected a line
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Fixture key -> product
    products: FxHashMap<String, Product>,

    /// Created once the first product fixes the currency
    catalog: Option<InMemoryCatalog<'a>>,
    offers: Option<OfferRegistry<'a>>,

    cart: ShoppingCart,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            products: FxHashMap::default(),
            catalog: None,
            offers: None,
            cart: ShoppingCart::new(),
        }
    }

    /// Load products and their prices from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a price is invalid, or if
    /// prices use more than one currency.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        for (key, product_fixture) in fixture.products {
            let (product, price) = product_fixture.into_priced_product()?;
            let currency = price.currency();

            let catalog = self
                .catalog
                .get_or_insert_with(|| InMemoryCatalog::new(currency));

            if catalog.currency() != currency {
                return Err(FixtureError::CurrencyMismatch(
                    catalog.currency().iso_alpha_code.to_string(),
                    currency.iso_alpha_code.to_string(),
                ));
            }

            catalog.add_product(product.clone(), price)?;

            self.products.insert(key, product);
        }

        Ok(self)
    }

    /// Load offers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if no products are loaded, if an
    /// offer references an unknown product, or if an offer argument is invalid.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: OffersFixture = self.read("offers", name)?;
        let currency = self.currency()?;

        for offer_fixture in fixture.offers {
            let product = self.product(&offer_fixture.product)?.clone();

            let argument = offer_fixture
                .argument
                .as_deref()
                .map(parse_decimal)
                .transpose()?;

            self.offers
                .get_or_insert_with(|| OfferRegistry::new(currency))
                .add_special_offer(offer_fixture.offer_type, &product, argument)?;
        }

        Ok(self)
    }

    /// Load cart lines from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a line references an unknown
    /// product, or if a quantity is invalid.
    pub fn load_cart(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartFixture = self.read("carts", name)?;

        for line in fixture.items {
            let product = self.product(&line.product)?.clone();
            let quantity = parse_decimal(&line.quantity)?;

            self.cart.add_item_quantity(&product, quantity)?;
        }

        Ok(self)
    }

    /// Load a complete fixture set (products, offers and cart with the same name)
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_products(name)?
            .load_offers(name)?
            .load_cart(name)?;

        Ok(fixture)
    }

    /// Get a product by its fixture key
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found.
    pub fn product(&self, key: &str) -> Result<&Product, FixtureError> {
        self.products
            .get(key)
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Get the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn catalog(&self) -> Result<&InMemoryCatalog<'a>, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get the loaded offers, or an empty registry if none were loaded
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn offers(&self) -> Result<OfferRegistry<'a>, FixtureError> {
        match &self.offers {
            Some(offers) => Ok(offers.clone()),
            None => Ok(OfferRegistry::new(self.currency()?)),
        }
    }

    /// Get the loaded cart
    pub fn cart(&self) -> &ShoppingCart {
        &self.cart
    }

    /// Build a teller over the loaded catalog and offers
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet, or if the offers are priced in
    /// another currency.
    pub fn teller(&self) -> Result<Teller<'a, &InMemoryCatalog<'a>>, FixtureError> {
        Ok(Teller::with_offers(self.catalog()?, self.offers()?)?)
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.catalog
            .as_ref()
            .map(|catalog| catalog.currency())
            .ok_or(FixtureError::NoCurrency)
    }

    fn read<T: serde::de::DeserializeOwned>(
        &self,
        category: &str,
        name: &str,
    ) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "Loading fixture");

        let contents = fs::read_to_string(&file_path)?;

        Ok(serde_norway::from_str(&contents)?)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a decimal string (e.g., "2.5") from a fixture
///
/// # Errors
///
/// Returns [`FixtureError::InvalidDecimal`] if the string is not a decimal number.
pub fn parse_decimal(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidDecimal(s.to_string()))
}
