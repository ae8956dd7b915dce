//! Integration tests for checking out carts against a small catalog.
//!
//! Catalog used throughout:
//!
//! - toothbrush: £0.99 each
//! - apples: £1.99 per kilo

use rust_decimal::Decimal;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use supermarket::prelude::*;

fn toothbrush() -> Product {
    Product::new("toothbrush", ProductUnit::Each)
}

fn apples() -> Product {
    Product::new("apples", ProductUnit::Kilo)
}

fn catalog<'a>() -> Result<InMemoryCatalog<'a>, CatalogError> {
    let mut catalog = InMemoryCatalog::new(GBP);

    catalog.add_product(toothbrush(), Money::from_minor(99, GBP))?;
    catalog.add_product(apples(), Money::from_minor(199, GBP))?;

    Ok(catalog)
}

fn toothbrushes(quantity: i64) -> Result<ShoppingCart, CartError> {
    let mut cart = ShoppingCart::new();

    cart.add_item_quantity(&toothbrush(), Decimal::from(quantity))?;

    Ok(cart)
}

fn discount_amounts(receipt: &Receipt<'_>) -> Vec<Decimal> {
    receipt
        .discounts()
        .iter()
        .map(Discount::discount_amount)
        .collect()
}

#[test]
fn ten_percent_discount_on_toothbrushes() -> TestResult {
    let mut teller = Teller::new(catalog()?);
    let mut cart = ShoppingCart::new();

    teller.add_special_offer(
        SpecialOfferType::PercentDiscount,
        &toothbrush(),
        Some(Decimal::TEN),
    )?;

    cart.add_item_quantity(&apples(), Decimal::new(25, 1))?;
    cart.add_item(&toothbrush())?;
    cart.add_item(&toothbrush())?;

    let receipt = teller.checks_out_articles_from(&cart)?;

    assert_eq!(receipt.total_price()?, Decimal::new(6757, 3));
    assert_eq!(discount_amounts(&receipt), [Decimal::new(-198, 3)]);
    assert_eq!(receipt.items().len(), 2);

    let apples_line = receipt.items().first().ok_or("Expected an apples line")?;

    assert_eq!(apples_line.product(), &apples());
    assert_eq!(apples_line.quantity(), Decimal::new(25, 1));
    assert_eq!(apples_line.price(), Money::from_minor(199, GBP));
    assert_eq!(apples_line.total_price(), Decimal::new(4975, 3));

    let discount = receipt
        .discounts()
        .first()
        .ok_or("Expected a toothbrush discount")?;

    assert_eq!(discount.product(), &toothbrush());
    assert_eq!(discount.description(), "10% off");

    Ok(())
}

#[test]
fn three_for_two_with_three_toothbrushes() -> TestResult {
    let mut teller = Teller::new(catalog()?);

    teller.add_special_offer(SpecialOfferType::ThreeForTwo, &toothbrush(), None)?;

    let receipt = teller.checks_out_articles_from(&toothbrushes(3)?)?;

    assert_eq!(receipt.total_price()?, Decimal::new(198, 2));
    assert_eq!(discount_amounts(&receipt), [Decimal::new(-99, 2)]);

    Ok(())
}

#[test]
fn three_for_two_with_four_toothbrushes() -> TestResult {
    let mut teller = Teller::new(catalog()?);

    teller.add_special_offer(SpecialOfferType::ThreeForTwo, &toothbrush(), None)?;

    let receipt = teller.checks_out_articles_from(&toothbrushes(4)?)?;

    assert_eq!(receipt.total_price()?, Decimal::new(297, 2));
    assert_eq!(discount_amounts(&receipt), [Decimal::new(-99, 2)]);

    Ok(())
}

#[test]
fn five_for_amount_with_seven_toothbrushes() -> TestResult {
    let mut teller = Teller::new(catalog()?);

    teller.add_special_offer(
        SpecialOfferType::FiveForAmount,
        &toothbrush(),
        Some(Decimal::new(450, 2)),
    )?;

    let receipt = teller.checks_out_articles_from(&toothbrushes(7)?)?;

    // 5 for £4.50 plus two at £0.99
    assert_eq!(receipt.total_price()?, Decimal::new(648, 2));
    assert_eq!(discount_amounts(&receipt), [Decimal::new(-45, 2)]);

    Ok(())
}

#[test]
fn two_for_amount_with_three_toothbrushes() -> TestResult {
    let mut teller = Teller::new(catalog()?);

    teller.add_special_offer(
        SpecialOfferType::TwoForAmount,
        &toothbrush(),
        Some(Decimal::new(150, 2)),
    )?;

    let receipt = teller.checks_out_articles_from(&toothbrushes(3)?)?;

    assert_eq!(receipt.total_price()?, Decimal::new(249, 2));
    assert_eq!(discount_amounts(&receipt), [Decimal::new(-48, 2)]);

    let discount = receipt
        .discounts()
        .first()
        .ok_or("Expected a toothbrush discount")?;

    assert_eq!(discount.description(), "2 for £1.50");

    Ok(())
}

#[test]
fn no_offers_charges_full_price() -> TestResult {
    let teller = Teller::new(catalog()?);
    let mut cart = ShoppingCart::new();

    cart.add_item_quantity(&apples(), Decimal::new(175, 2))?;
    cart.add_item_quantity(&toothbrush(), Decimal::TWO)?;

    let receipt = teller.checks_out_articles_from(&cart)?;

    assert_eq!(receipt.total_price()?, Decimal::new(54625, 4));
    assert!(receipt.discounts().is_empty());

    Ok(())
}

#[test]
fn single_lines_without_offers() -> TestResult {
    let teller = Teller::new(catalog()?);

    let mut apples_only = ShoppingCart::new();
    apples_only.add_item_quantity(&apples(), Decimal::new(25, 1))?;

    assert_eq!(
        teller.checks_out_articles_from(&apples_only)?.total_price()?,
        Decimal::new(4975, 3)
    );

    assert_eq!(
        teller.checks_out_articles_from(&toothbrushes(1)?)?.total_price()?,
        Decimal::new(99, 2)
    );

    Ok(())
}

#[test]
fn items_follow_first_insertion_order() -> TestResult {
    let teller = Teller::new(catalog()?);
    let mut cart = ShoppingCart::new();

    cart.add_item(&toothbrush())?;
    cart.add_item_quantity(&apples(), Decimal::ONE)?;
    cart.add_item(&toothbrush())?;

    let receipt = teller.checks_out_articles_from(&cart)?;

    let lines: Vec<(&str, Decimal)> = receipt
        .items()
        .iter()
        .map(|item| (item.product().name(), item.quantity()))
        .collect();

    assert_eq!(lines, [("toothbrush", Decimal::TWO), ("apples", Decimal::ONE)]);

    Ok(())
}

#[test]
fn unknown_product_fails_the_checkout() -> TestResult {
    let teller = Teller::new(catalog()?);
    let mut cart = ShoppingCart::new();

    cart.add_item(&toothbrush())?;
    cart.add_item(&Product::new("rice", ProductUnit::Each))?;

    let result = teller.checks_out_articles_from(&cart);

    assert!(matches!(
        result,
        Err(CheckoutError::Catalog(CatalogError::ProductNotFound(name))) if name == "rice"
    ));

    Ok(())
}

#[test]
fn replacing_an_offer_keeps_the_latest() -> TestResult {
    let mut teller = Teller::new(catalog()?);

    teller.add_special_offer(SpecialOfferType::ThreeForTwo, &toothbrush(), None)?;
    teller.add_special_offer(
        SpecialOfferType::PercentDiscount,
        &toothbrush(),
        Some(Decimal::from(50)),
    )?;

    let receipt = teller.checks_out_articles_from(&toothbrushes(3)?)?;

    assert_eq!(discount_amounts(&receipt), [Decimal::new(-1485, 3)]);

    Ok(())
}
