//! # Order Payload
//!
//! The one externally meaningful structured output of the widget: the
//! payload handed to the order-submission collaborator. Field names are a
//! wire contract with the ordering backend and must not drift.
//!
//! All monetary amounts are integers in the smallest currency unit.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::product::CategorySummary;

// =============================================================================
// Customer Info
// =============================================================================

/// Delivery details collected by the order form.
///
/// Opaque to this crate: no format validation happens here, the backend
/// owns address and phone rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CustomerInfo {
    pub address: String,
    pub phone: String,
}

// =============================================================================
// Order Lines
// =============================================================================

/// One ordered product as it appears in the submitted payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    /// Product id.
    pub id: String,

    /// Ordered quantity.
    pub amount: i64,

    /// Line total in cents: `priceSingle * amount`.
    pub price: i64,

    /// Per-unit price in cents, quantity excluded.
    pub price_single: i64,

    /// Product name at add time.
    pub name: String,

    /// Selection summary per category.
    pub params: BTreeMap<String, CategorySummary>,
}

// =============================================================================
// Order Payload
// =============================================================================

/// The immutable order submitted at checkout.
///
/// Shaped by `Cart::submit` and handed to the transport collaborator
/// as-is. The core neither performs nor awaits the network call, and cart
/// state is not rolled back if the transport fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderPayload {
    pub address: String,
    pub phone: String,

    /// Grand total in cents: subtotal plus delivery fee.
    pub total_price: i64,

    /// Sum of line totals in cents.
    pub subtotal_price: i64,

    /// Total quantity across all lines.
    pub total_number: i64,

    /// Applied delivery fee in cents (zero for an all-zero-quantity cart).
    pub delivery_fee: i64,

    /// Ordered products in cart display order.
    pub products: Vec<OrderLine>,

    /// When the order was shaped.
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_wire_field_names() {
        let payload = OrderPayload {
            address: "12 Oven Lane".to_string(),
            phone: "555-0321".to_string(),
            total_price: 8600,
            subtotal_price: 6600,
            total_number: 3,
            delivery_fee: 2000,
            products: vec![OrderLine {
                id: "focaccia".to_string(),
                amount: 3,
                price: 6600,
                price_single: 2200,
                name: "Focaccia".to_string(),
                params: BTreeMap::from([(
                    "toppings".to_string(),
                    CategorySummary {
                        label: "Toppings".to_string(),
                        options: BTreeMap::from([(
                            "olives".to_string(),
                            "Olives".to_string(),
                        )]),
                    },
                )]),
            }],
            placed_at: Utc::now(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["address"], "12 Oven Lane");
        assert_eq!(value["phone"], "555-0321");
        assert_eq!(value["totalPrice"], 8600);
        assert_eq!(value["subtotalPrice"], 6600);
        assert_eq!(value["totalNumber"], 3);
        assert_eq!(value["deliveryFee"], 2000);

        let line = &value["products"][0];
        assert_eq!(line["id"], "focaccia");
        assert_eq!(line["amount"], 3);
        assert_eq!(line["price"], 6600);
        assert_eq!(line["priceSingle"], 2200);
        assert_eq!(line["name"], "Focaccia");
        assert_eq!(line["params"]["toppings"]["label"], "Toppings");
        assert_eq!(line["params"]["toppings"]["options"]["olives"], "Olives");
    }

    #[test]
    fn test_payload_round_trips() {
        let payload = OrderPayload {
            address: "a".to_string(),
            phone: "p".to_string(),
            total_price: 0,
            subtotal_price: 0,
            total_number: 0,
            delivery_fee: 0,
            products: Vec::new(),
            placed_at: Utc::now(),
        };

        let json = serde_json::to_string(&payload).unwrap();
        let back: OrderPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
