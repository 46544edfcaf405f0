//! Cart aggregation and bundle pricing.
//!
//! The cart is a list of lines keyed by (product id, variant). All
//! operations are pure transformations over the line set; the storefront
//! keeps the result in the customer's session.
//!
//! # Pricing invariant
//!
//! A line's total is `quantity * unit_price`, unless the product carries a
//! bundle rule and the quantity reaches the bundle size: then every
//! complete group of `size` units is charged the bundle price and the
//! remaining 0..size units are charged at full unit price.

use serde::{Deserialize, Serialize};

use crate::catalog::{PricingRule, Product};
use crate::types::{Price, ProductId};

/// One (product, variant) pairing with a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Chosen variant name, if the product has variants.
    pub variant: Option<String>,
    /// Always at least 1 for a stored line; setting 0 removes the line.
    pub quantity: u32,
}

/// The shopping cart: an ordered set of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of (product, variant): increments the matching line or
    /// appends a new line with quantity 1. No upper bound on quantity.
    pub fn add(&mut self, product_id: ProductId, variant: Option<String>) {
        if let Some(line) = self.find_mut(product_id, variant.as_deref()) {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product_id,
            variant,
            quantity: 1,
        });
    }

    /// Set the quantity for the matching line. A quantity of 0 removes the
    /// line instead of storing it; other lines are left untouched. Setting
    /// a quantity for a line that does not exist is a no-op.
    pub fn update_quantity(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        variant: Option<&str>,
    ) {
        if quantity == 0 {
            self.lines
                .retain(|line| !(line.product_id == product_id && line.variant.as_deref() == variant));
            return;
        }
        if let Some(line) = self.find_mut(product_id, variant) {
            line.quantity = quantity;
        }
    }

    /// Empty all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// True when the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Order total: the sum of per-line totals over the given catalog.
    ///
    /// Lines referencing a product no longer in the catalog contribute
    /// nothing (the product was deleted after the line was added).
    #[must_use]
    pub fn total(&self, products: &[Product]) -> Price {
        let mut total = Price::ZERO;
        for line in &self.lines {
            if let Some(product) = products.iter().find(|p| p.id == line.product_id) {
                total += line_total(product, line.quantity);
            }
        }
        total
    }

    fn find_mut(&mut self, product_id: ProductId, variant: Option<&str>) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id && line.variant.as_deref() == variant)
    }
}

/// Price for `quantity` units of `product`, applying its pricing rule.
#[must_use]
pub fn line_total(product: &Product, quantity: u32) -> Price {
    match product.pricing {
        PricingRule::Bundle { size, price } if size > 0 && quantity >= size => {
            let groups = quantity / size;
            let remainder = quantity % size;
            price * groups + product.price * remainder
        }
        _ => product.price * quantity,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::tests::sample_products;

    fn focaccia() -> Product {
        sample_products()
            .into_iter()
            .find(|p| matches!(p.pricing, PricingRule::Bundle { .. }))
            .unwrap()
    }

    #[test]
    fn test_line_total_linear_below_bundle_size() {
        let product = focaccia();
        assert_eq!(line_total(&product, 0), Price::ZERO);
        assert_eq!(line_total(&product, 1), Price::from_kroner(35));
        assert_eq!(line_total(&product, 2), Price::from_kroner(70));
    }

    #[test]
    fn test_line_total_bundle_groups() {
        let product = focaccia();
        // floor(q/3)*90 + (q%3)*35
        assert_eq!(line_total(&product, 3), Price::from_kroner(90));
        assert_eq!(line_total(&product, 4), Price::from_kroner(125));
        assert_eq!(line_total(&product, 5), Price::from_kroner(160));
        assert_eq!(line_total(&product, 6), Price::from_kroner(180));
        assert_eq!(line_total(&product, 7), Price::from_kroner(215));
    }

    #[test]
    fn test_line_total_unit_rule_ignores_quantity_breaks() {
        let products = sample_products();
        let konfekt = products.iter().find(|p| p.name == "Konfekt").unwrap();
        assert_eq!(line_total(konfekt, 3), Price::from_kroner(3 * 129));
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), Some("Kanel".to_owned()));
        cart.add(ProductId::new(1), Some("Kanel".to_owned()));

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines.first().unwrap().quantity, 2);
    }

    #[test]
    fn test_add_distinct_variants_are_separate_lines() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), Some("Kanel".to_owned()));
        cart.add(ProductId::new(1), Some("Karamell".to_owned()));
        cart.add(ProductId::new(1), None);

        assert_eq!(cart.lines.len(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(4), None);
        cart.update_quantity(ProductId::new(4), 6, None);

        assert_eq!(cart.lines.first().unwrap().quantity, 6);
    }

    #[test]
    fn test_update_quantity_zero_removes_only_matching_line() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), Some("Kanel".to_owned()));
        cart.add(ProductId::new(1), Some("Karamell".to_owned()));
        cart.add(ProductId::new(4), None);

        cart.update_quantity(ProductId::new(1), 0, Some("Kanel"));

        assert_eq!(cart.lines.len(), 2);
        assert!(
            cart.lines
                .iter()
                .all(|line| line.variant.as_deref() != Some("Kanel"))
        );
    }

    #[test]
    fn test_update_quantity_missing_line_is_noop() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), None);
        cart.update_quantity(ProductId::new(99), 5, None);

        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines.first().unwrap().quantity, 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), None);
        cart.add(ProductId::new(2), None);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_total_four_focaccia() {
        // End-to-end scenario from the order flow: 4 focaccia =
        // one bundle of 3 (90 kr) plus one at unit price (35 kr).
        let products = sample_products();
        let mut cart = Cart::new();
        for _ in 0..4 {
            cart.add(ProductId::new(4), None);
        }

        assert_eq!(cart.total(&products), Price::from_kroner(125));
    }

    #[test]
    fn test_total_mixed_cart() {
        let products = sample_products();
        let mut cart = Cart::new();
        cart.add(ProductId::new(2), Some("Lakris".to_owned())); // 129
        cart.add(ProductId::new(3), Some("Med sesamfrø".to_owned())); // 45
        cart.update_quantity(ProductId::new(3), 2, Some("Med sesamfrø")); // 90

        assert_eq!(cart.total(&products), Price::from_kroner(219));
    }

    #[test]
    fn test_total_skips_deleted_products() {
        let products = sample_products();
        let mut cart = Cart::new();
        cart.add(ProductId::new(1), Some("Kanel".to_owned()));
        cart.add(ProductId::new(99), None);

        assert_eq!(cart.total(&products), Price::from_kroner(35));
    }

    #[test]
    fn test_cart_serde_roundtrip() {
        let mut cart = Cart::new();
        cart.add(ProductId::new(4), None);
        cart.update_quantity(ProductId::new(4), 3, None);

        let json = serde_json::to_string(&cart).unwrap();
        let parsed: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cart);
    }
}
