//! Products

use std::fmt;

use serde::Deserialize;

/// How a product is measured at the till.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductUnit {
    /// Sold by discrete count
    Each,

    /// Sold by weight, in kilos
    Kilo,
}

impl fmt::Display for ProductUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductUnit::Each => f.write_str("each"),
            ProductUnit::Kilo => f.write_str("kg"),
        }
    }
}

/// Product
///
/// Identity is the pair of name and unit, so two products with the same name but different
/// units are distinct catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Product {
    name: String,
    unit: ProductUnit,
}

impl Product {
    /// Create a new product.
    pub fn new(name: impl Into<String>, unit: ProductUnit) -> Self {
        Self {
            name: name.into(),
            unit,
        }
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product unit of measure
    pub fn unit(&self) -> ProductUnit {
        self.unit
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashSet;

    use super::*;

    #[test]
    fn equality_is_by_name_and_unit() {
        let apples = Product::new("apples", ProductUnit::Kilo);

        assert_eq!(apples, Product::new("apples", ProductUnit::Kilo));
        assert_ne!(apples, Product::new("apples", ProductUnit::Each));
        assert_ne!(apples, Product::new("pears", ProductUnit::Kilo));
    }

    #[test]
    fn equal_products_hash_to_the_same_key() {
        let mut set = FxHashSet::default();

        set.insert(Product::new("toothbrush", ProductUnit::Each));
        set.insert(Product::new("toothbrush", ProductUnit::Each));

        assert_eq!(set.len(), 1);
    }

    #[test]
    fn unit_display() {
        assert_eq!(ProductUnit::Each.to_string(), "each");
        assert_eq!(ProductUnit::Kilo.to_string(), "kg");
    }
}
