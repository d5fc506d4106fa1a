//! Order model
//!
//! Orders embed their item sequence; items are append-only (there is no
//! removal operation). An order whose status is `Paid` is immutable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order lifecycle status
///
/// `New → InProgress → Done → Delivered → Paid`, with `Cancelled` reachable
/// from any non-paid state. The first four are the "active" set: at most one
/// active order may exist per table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    InProgress,
    Done,
    Delivered,
    Paid,
    Cancelled,
}

impl OrderStatus {
    /// Whether an order in this status still holds its table
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            OrderStatus::New | OrderStatus::InProgress | OrderStatus::Done | OrderStatus::Delivered
        )
    }

    /// Whether this status is terminal (no further transitions)
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Paid | OrderStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::InProgress => "in_progress",
            OrderStatus::Done => "done",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unrecognized order status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "in_progress" => Ok(OrderStatus::InProgress),
            "done" => Ok(OrderStatus::Done),
            "delivered" => Ok(OrderStatus::Delivered),
            "paid" => Ok(OrderStatus::Paid),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// Per-item kitchen status, independent of the order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    New,
    InProgress,
    Done,
    Delivered,
}

/// A line on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub menu_item_id: String,
    /// Name captured at order time; menu renames do not rewrite history
    pub name: String,
    /// Unit price captured at order time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: ItemStatus,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub table_id: String,
    pub waiter_id: String,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub created_at: i64,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn total(&self) -> Decimal {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub table_id: String,
    /// Defaults to the table's assigned waiter when omitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub waiter_id: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
}

/// Incoming order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: String,
    pub quantity: u32,
    /// Overrides the menu price when present
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// In-place replacement patch for an existing order line
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_set() {
        assert!(OrderStatus::New.is_active());
        assert!(OrderStatus::InProgress.is_active());
        assert!(OrderStatus::Done.is_active());
        assert!(OrderStatus::Delivered.is_active());
        assert!(!OrderStatus::Paid.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "in_progress".parse::<OrderStatus>().unwrap(),
            OrderStatus::InProgress
        );
        assert!("shipped".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_order_total() {
        let order = Order {
            id: "order:1".into(),
            table_id: "table:1".into(),
            waiter_id: "user:1".into(),
            status: OrderStatus::New,
            items: vec![
                OrderItem {
                    id: "item:1".into(),
                    menu_item_id: "menu:1".into(),
                    name: "Paella".into(),
                    price: Decimal::new(1450, 2),
                    quantity: 2,
                    notes: None,
                    status: ItemStatus::New,
                },
                OrderItem {
                    id: "item:2".into(),
                    menu_item_id: "menu:2".into(),
                    name: "Agua".into(),
                    price: Decimal::new(200, 2),
                    quantity: 1,
                    notes: None,
                    status: ItemStatus::New,
                },
            ],
            created_at: 0,
        };
        assert_eq!(order.total(), Decimal::new(3100, 2));
    }
}
