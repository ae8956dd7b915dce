//! Offer Fixtures

use serde::Deserialize;

use crate::offers::SpecialOfferType;

/// Wrapper for offers in YAML
#[derive(Debug, Deserialize)]
pub struct OffersFixture {
    /// Offers, applied in order (a later offer for the same product replaces an earlier one)
    pub offers: Vec<OfferFixture>,
}

/// Offer fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Product fixture key the offer applies to
    pub product: String,

    /// Offer type
    #[serde(rename = "type")]
    pub offer_type: SpecialOfferType,

    /// Percentage points or bundle price, as a decimal string (e.g., "10" or "4.50")
    pub argument: Option<String>,
}
