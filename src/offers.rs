//! Offers
//!
//! Special offers are registered per product. A product has at most one active offer;
//! registering another replaces it.

use std::fmt;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    pricing::{PricingError, fits_minor_units, to_money},
    products::Product,
};

/// Errors raised when registering an offer.
#[derive(Debug, Error, PartialEq)]
pub enum OfferError {
    /// The offer type needs an argument but none was given.
    #[error("{0} offers require an argument")]
    MissingArgument(SpecialOfferType),

    /// The offer type takes no argument but one was given.
    #[error("{0} offers take no argument, got {1}")]
    UnexpectedArgument(SpecialOfferType, Decimal),

    /// Percentages must be above 0 and at most 100.
    #[error("Percentage must be in (0, 100], got {0}")]
    PercentOutOfRange(Decimal),

    /// Bundle prices must not be negative.
    #[error("{0} offers need a non-negative amount, got {1}")]
    NegativeAmount(SpecialOfferType, Decimal),

    /// Bundle prices cannot be finer than the currency's minor unit.
    #[error("{0} offers need an amount in whole minor units, got {1}")]
    ExcessPrecision(SpecialOfferType, Decimal),

    /// The offer amount is not in the registry currency.
    #[error("Offer is priced in {actual}, but the registry uses {expected}")]
    CurrencyMismatch {
        /// Registry currency code
        expected: &'static str,
        /// Offer currency code
        actual: &'static str,
    },

    /// Wrapped pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// The kinds of special offer a product can carry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialOfferType {
    /// A percentage off the line total, argument is the percentage (e.g. `10`)
    PercentDiscount,

    /// Two units for a fixed amount, argument is the bundle price
    TwoForAmount,

    /// Buy three, pay for two, no argument
    ThreeForTwo,

    /// Five units for a fixed amount, argument is the bundle price
    FiveForAmount,
}

impl fmt::Display for SpecialOfferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SpecialOfferType::PercentDiscount => "Percent discount",
            SpecialOfferType::TwoForAmount => "Two for amount",
            SpecialOfferType::ThreeForTwo => "Three for two",
            SpecialOfferType::FiveForAmount => "Five for amount",
        };

        f.write_str(name)
    }
}

/// A validated special offer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Offer<'a> {
    /// Take a percentage off the line total
    PercentDiscount(Percentage),

    /// Every two units cost this amount
    TwoForAmount(Money<'a, Currency>),

    /// Every third unit is free
    ThreeForTwo,

    /// Every five units cost this amount
    FiveForAmount(Money<'a, Currency>),
}

impl<'a> Offer<'a> {
    /// Build an offer from its type and raw argument.
    ///
    /// Percent arguments are expressed in percent points (`10` is 10% off). Amount arguments
    /// are bundle prices in major units of `currency` and are never rounded: `1.499` is
    /// rejected for GBP rather than stored as `1.50`.
    ///
    /// # Errors
    ///
    /// Returns an [`OfferError`] if the argument is missing, unexpected, out of range or finer
    /// than the currency's minor unit.
    pub fn new(
        offer_type: SpecialOfferType,
        argument: Option<Decimal>,
        currency: &'a Currency,
    ) -> Result<Self, OfferError> {
        match (offer_type, argument) {
            (SpecialOfferType::ThreeForTwo, None) => Ok(Offer::ThreeForTwo),
            (SpecialOfferType::ThreeForTwo, Some(arg)) => {
                Err(OfferError::UnexpectedArgument(offer_type, arg))
            }
            (_, None) => Err(OfferError::MissingArgument(offer_type)),
            (SpecialOfferType::PercentDiscount, Some(points)) => {
                if points <= Decimal::ZERO || points > Decimal::ONE_HUNDRED {
                    return Err(OfferError::PercentOutOfRange(points));
                }

                Ok(Offer::PercentDiscount(Percentage::from(
                    points / Decimal::ONE_HUNDRED,
                )))
            }
            (SpecialOfferType::TwoForAmount, Some(amount)) => {
                Ok(Offer::TwoForAmount(bundle_price(offer_type, amount, currency)?))
            }
            (SpecialOfferType::FiveForAmount, Some(amount)) => {
                Ok(Offer::FiveForAmount(bundle_price(offer_type, amount, currency)?))
            }
        }
    }

    /// The type tag of this offer.
    pub fn offer_type(&self) -> SpecialOfferType {
        match self {
            Offer::PercentDiscount(_) => SpecialOfferType::PercentDiscount,
            Offer::TwoForAmount(_) => SpecialOfferType::TwoForAmount,
            Offer::ThreeForTwo => SpecialOfferType::ThreeForTwo,
            Offer::FiveForAmount(_) => SpecialOfferType::FiveForAmount,
        }
    }

    /// Units per bundle, or `None` when the offer applies to any quantity.
    pub fn bundle_size(&self) -> Option<u32> {
        match self {
            Offer::PercentDiscount(_) => None,
            Offer::TwoForAmount(_) => Some(2),
            Offer::ThreeForTwo => Some(3),
            Offer::FiveForAmount(_) => Some(5),
        }
    }

    /// Receipt label, e.g. `10% off` or `2 for £1.50`.
    pub fn description(&self) -> String {
        match self {
            Offer::PercentDiscount(percent) => {
                let points = (*percent * Decimal::ONE) * Decimal::ONE_HUNDRED;

                format!("{}% off", points.normalize())
            }
            Offer::TwoForAmount(amount) => format!("2 for {amount}"),
            Offer::ThreeForTwo => "3 for 2".to_string(),
            Offer::FiveForAmount(amount) => format!("5 for {amount}"),
        }
    }

    fn amount(&self) -> Option<&Money<'a, Currency>> {
        match self {
            Offer::TwoForAmount(amount) | Offer::FiveForAmount(amount) => Some(amount),
            Offer::PercentDiscount(_) | Offer::ThreeForTwo => None,
        }
    }
}

fn bundle_price(
    offer_type: SpecialOfferType,
    amount: Decimal,
    currency: &Currency,
) -> Result<Money<'_, Currency>, OfferError> {
    if amount < Decimal::ZERO {
        return Err(OfferError::NegativeAmount(offer_type, amount));
    }

    if !fits_minor_units(amount, currency) {
        return Err(OfferError::ExcessPrecision(offer_type, amount));
    }

    Ok(to_money(amount, currency)?)
}

/// Registry of active offers, keyed by product.
#[derive(Debug, Clone)]
pub struct OfferRegistry<'a> {
    offers: FxHashMap<Product, Offer<'a>>,
    currency: &'static Currency,
}

impl<'a> OfferRegistry<'a> {
    /// Create an empty registry for offers priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            offers: FxHashMap::default(),
            currency,
        }
    }

    /// Currency that amount offers must be priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Validate and register an offer from its type and raw argument.
    ///
    /// See [`Offer::new`] for how arguments are interpreted. Nothing is stored if the argument
    /// is rejected.
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
        let offer = Offer::new(offer_type, argument, self.currency)?;

        self.add_offer(product, offer)
    }

    /// Register an already-built offer, replacing any existing offer for the product.
    ///
    /// # Errors
    ///
    /// Returns [`OfferError::CurrencyMismatch`] if the offer amount is in another currency.
    pub fn add_offer(&mut self, product: &Product, offer: Offer<'a>) -> Result<(), OfferError> {
        if let Some(amount) = offer.amount()
            && amount.currency() != self.currency
        {
            return Err(OfferError::CurrencyMismatch {
                expected: self.currency.iso_alpha_code,
                actual: amount.currency().iso_alpha_code,
            });
        }

        debug!(product = %product, offer = %offer.description(), "Registering offer");

        self.offers.insert(product.clone(), offer);

        Ok(())
    }

    /// The active offer for a product, if any.
    pub fn offer_for(&self, product: &Product) -> Option<&Offer<'a>> {
        self.offers.get(product)
    }

    /// Number of products with an active offer.
    pub fn len(&self) -> usize {
        self.offers.len()
    }

    /// Check if no offers are registered.
    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }
}
