//! Checkout Example
//!
//! This example checks out a cart loaded from a fixture set and prints the receipt.
//!
//! Use `-f` to load a fixture set by name
//! Set `RUST_LOG=debug` to trace pricing and offer decisions

use std::io;

use anyhow::Result;
use clap::Parser;
use supermarket::{fixtures::Fixture, utils::ExampleCheckoutArgs};
use tracing_subscriber::EnvFilter;

/// Checkout Example
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleCheckoutArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let teller = fixture.teller()?;

    let receipt = teller.checks_out_articles_from(fixture.cart())?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    Ok(())
}
