//! Cart Fixtures

use serde::Deserialize;

/// Cart lines in YAML, in the order they are added to the cart
#[derive(Debug, Deserialize)]
pub struct CartFixture {
    /// Lines to add
    pub items: Vec<CartLineFixture>,
}

/// Cart line fixture from YAML
#[derive(Debug, Deserialize)]
pub struct CartLineFixture {
    /// Product fixture key
    pub product: String,

    /// Count or weight, as a decimal string (e.g., "2" or "2.5")
    pub quantity: String,
}
