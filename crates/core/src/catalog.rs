//! Product catalog types and category filtering.
//!
//! Products are immutable once fetched; the admin panel replaces whole
//! records. Pricing behaviour is carried on the record itself as a
//! [`PricingRule`] rather than being inferred from the product name.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Sentinel category that selects every product ("alle" = "all").
pub const ALL_CATEGORIES: &str = "alle";

/// How a product's quantity is priced in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingRule {
    /// Linear pricing: `quantity * unit_price`.
    #[default]
    Unit,
    /// Multi-pack discount: every complete group of `size` units is charged
    /// `price`; the remainder is charged at the unit price.
    Bundle { size: u32, price: Price },
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Unit price in whole kroner.
    pub price: Price,
    /// Image URL.
    pub image: String,
    pub category: String,
    /// Variant names the customer can choose from (e.g. "Kanel", "Karamell").
    /// Empty when the product has no variants.
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub pricing: PricingRule,
}

/// Filter products by category.
///
/// Returns all products for the [`ALL_CATEGORIES`] sentinel, otherwise an
/// exact match on the category field. Input order is preserved.
#[must_use]
pub fn filter_by_category<'a>(products: &'a [Product], category: &str) -> Vec<&'a Product> {
    if category == ALL_CATEGORIES {
        return products.iter().collect();
    }
    products.iter().filter(|p| p.category == category).collect()
}

/// Distinct category values across products, with the [`ALL_CATEGORIES`]
/// sentinel prepended. First-seen order.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut out = vec![ALL_CATEGORIES.to_owned()];
    for product in products {
        if !out.contains(&product.category) {
            out.push(product.category.clone());
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use super::*;

    /// Catalog fixture mirroring the seeded shop data.
    pub(crate) fn sample_products() -> Vec<Product> {
        vec![
            Product {
                id: ProductId::new(1),
                name: "Wienerbrødsnurrer".to_owned(),
                description: "Luftige wienerbrødsnurrer med smakfull fyll.".to_owned(),
                price: Price::from_kroner(35),
                image: "https://example.com/wienerbrod.jpg".to_owned(),
                category: "wienerbrød".to_owned(),
                variants: vec!["Kanel".to_owned(), "Karamell".to_owned()],
                pricing: PricingRule::Unit,
            },
            Product {
                id: ProductId::new(2),
                name: "Konfekt".to_owned(),
                description: "Hjemmelaget konfekt i fire deilige varianter.".to_owned(),
                price: Price::from_kroner(129),
                image: "https://example.com/konfekt.jpg".to_owned(),
                category: "konfekt".to_owned(),
                variants: vec![
                    "Salt karamell".to_owned(),
                    "Lakris".to_owned(),
                    "Pistasj".to_owned(),
                    "Jordbær".to_owned(),
                ],
                pricing: PricingRule::Unit,
            },
            Product {
                id: ProductId::new(3),
                name: "Hamburgerbrød".to_owned(),
                description: "Myke og luftige hamburgerbrød.".to_owned(),
                price: Price::from_kroner(45),
                image: "https://example.com/hamburgerbrod.jpg".to_owned(),
                category: "brød".to_owned(),
                variants: vec!["Med sesamfrø".to_owned(), "Uten sesamfrø".to_owned()],
                pricing: PricingRule::Unit,
            },
            Product {
                id: ProductId::new(4),
                name: "Focaccia 230g".to_owned(),
                description: "1 stk for 35 kr, 3 stk for 90 kr".to_owned(),
                price: Price::from_kroner(35),
                image: "https://example.com/focaccia.jpg".to_owned(),
                category: "brød".to_owned(),
                variants: Vec::new(),
                pricing: PricingRule::Bundle {
                    size: 3,
                    price: Price::from_kroner(90),
                },
            },
        ]
    }

    #[test]
    fn test_filter_all_is_identity() {
        let products = sample_products();
        let filtered = filter_by_category(&products, ALL_CATEGORIES);
        assert_eq!(filtered.len(), products.len());
        // Order preserved
        for (original, kept) in products.iter().zip(filtered) {
            assert_eq!(original.id, kept.id);
        }
    }

    #[test]
    fn test_filter_exact_match() {
        let products = sample_products();
        let bread = filter_by_category(&products, "brød");
        assert_eq!(bread.len(), 2);
        assert!(bread.iter().all(|p| p.category == "brød"));
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let products = sample_products();
        assert!(filter_by_category(&products, "kaker").is_empty());
    }

    #[test]
    fn test_categories_distinct_with_sentinel() {
        let products = sample_products();
        let cats = categories(&products);
        assert_eq!(cats, vec!["alle", "wienerbrød", "konfekt", "brød"]);
    }

    #[test]
    fn test_categories_empty_catalog() {
        assert_eq!(categories(&[]), vec!["alle"]);
    }
}
