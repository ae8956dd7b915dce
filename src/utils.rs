//! Utils

use clap::Parser;

/// Arguments for the checkout example
#[derive(Debug, Parser)]
pub struct ExampleCheckoutArgs {
    /// Fixture set to use for the catalog, offers & cart
    #[clap(short, long, default_value = "supermarket")]
    pub fixture: String,
}
