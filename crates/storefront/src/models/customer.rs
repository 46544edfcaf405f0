//! Customer account data.
//!
//! The shop holds a single customer record per session (plus the seeded
//! demo account). Passwords are stored and compared as plain text; this is
//! a demo shop with no real accounts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bakehuset_core::{Email, OrderId, OrderStatus, Price};

/// A customer account as stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub password: String,
}

impl CustomerRecord {
    /// The seeded demo account every deployment answers to.
    #[must_use]
    pub fn demo() -> Self {
        Self {
            name: "Kari Nordmann".to_owned(),
            email: Email::parse("kunde@test.no").unwrap_or_else(|_| unreachable!()),
            phone: "+47 123 45 678".to_owned(),
            address: "Testveien 123, 1234 Testby".to_owned(),
            password: "kunde123".to_owned(),
        }
    }
}

/// One line of a past order.
///
/// Carries the charged line total rather than a unit price, so bundle
/// discounts show correctly in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    pub line_total: Price,
}

/// A past order shown in the account's order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub id: OrderId,
    pub date: NaiveDate,
    pub items: Vec<OrderLine>,
    pub total: Price,
    pub status: OrderStatus,
}

/// Demo order history shown to logged-in customers.
///
/// Checkout never persists orders, so the history is fixed display data.
#[must_use]
pub fn demo_orders() -> Vec<OrderSummary> {
    vec![
        OrderSummary {
            id: OrderId::new(1001),
            date: NaiveDate::from_ymd_opt(2025, 12, 10).unwrap_or_default(),
            items: vec![
                OrderLine {
                    name: "Wienerbrødsnurrer".to_owned(),
                    quantity: 4,
                    line_total: Price::from_kroner(140),
                },
                OrderLine {
                    name: "Konfekt".to_owned(),
                    quantity: 2,
                    line_total: Price::from_kroner(258),
                },
            ],
            total: Price::from_kroner(398),
            status: OrderStatus::Completed,
        },
        OrderSummary {
            id: OrderId::new(1002),
            date: NaiveDate::from_ymd_opt(2025, 12, 5).unwrap_or_default(),
            items: vec![
                OrderLine {
                    name: "Hamburgerbrød".to_owned(),
                    quantity: 6,
                    line_total: Price::from_kroner(270),
                },
                // Three-pack at the bundle price
                OrderLine {
                    name: "Focaccia 230g".to_owned(),
                    quantity: 3,
                    line_total: Price::from_kroner(90),
                },
            ],
            total: Price::from_kroner(360),
            status: OrderStatus::Completed,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_customer() {
        let customer = CustomerRecord::demo();
        assert!(customer.email.matches("kunde@test.no"));
        assert_eq!(customer.password, "kunde123");
    }

    #[test]
    fn test_demo_orders_totals_match_lines() {
        for order in demo_orders() {
            let computed = order
                .items
                .iter()
                .fold(Price::ZERO, |acc, line| acc + line.line_total);
            assert_eq!(computed, order.total, "order {}", order.id);
        }
    }
}
