//! Supermarket prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{CartError, CartLine, ShoppingCart},
    catalog::{Catalog, CatalogError, InMemoryCatalog},
    checkout::{CheckoutError, Teller},
    discounts::{Discount, DiscountError, calculate_discount},
    offers::{Offer, OfferError, OfferRegistry, SpecialOfferType},
    pricing::PricingError,
    products::{Product, ProductUnit},
    receipt::{Receipt, ReceiptError, ReceiptItem},
};
