//! Order and OrderItem Models
//!
//! Status enums carry the small classification predicates the lifecycle
//! manager builds on; the transition rules themselves live in
//! `tableside-core::orders`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Order pipeline status.
///
/// Orders advance `pending → preparing → ready → served → paid →
/// completed`; `cancelled` is reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
    Paid,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Served,
        OrderStatus::Paid,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Whether this status keeps the table seated and blocks a new order.
    ///
    /// `paid`/`completed` do NOT block: a paid-but-uncleared table may be
    /// re-seated.
    pub fn blocks_table(self) -> bool {
        matches!(
            self,
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready | OrderStatus::Served
        )
    }

    /// Terminal states: `paid`/`completed` (awaiting clearing) and
    /// `cancelled`.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Paid | OrderStatus::Completed | OrderStatus::Cancelled
        )
    }

    /// Position in the forward pipeline; `cancelled` has none.
    pub fn pipeline_index(self) -> Option<u8> {
        match self {
            OrderStatus::Pending => Some(0),
            OrderStatus::Preparing => Some(1),
            OrderStatus::Ready => Some(2),
            OrderStatus::Served => Some(3),
            OrderStatus::Paid => Some(4),
            OrderStatus::Completed => Some(5),
            OrderStatus::Cancelled => None,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "served" => Ok(OrderStatus::Served),
            "paid" => Ok(OrderStatus::Paid),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(UnknownVariant::new("order status", other)),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
            OrderStatus::Paid => "paid",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Line-item prep status, independent of the parent order's status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
}

impl FromStr for ItemStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "preparing" => Ok(ItemStatus::Preparing),
            "ready" => Ok(ItemStatus::Ready),
            other => Err(UnknownVariant::new("item status", other)),
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Preparing => "preparing",
            ItemStatus::Ready => "ready",
        };
        write!(f, "{s}")
    }
}

/// Order entity - the audit record of a seating
///
/// `table_id` is None for take-away orders. Orders are never deleted;
/// merge and cancel leave a `cancelled` row behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub restaurant_id: i64,
    pub table_id: Option<i64>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Order line item
///
/// Identity for coalescing is the (order_id, menu_item_id, notes)
/// composite key; equal keys are merged by summing quantity rather than
/// inserting a duplicate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i32,
    pub notes: Option<String>,
    /// Selected modifier options, attached when the row is first created
    #[serde(default)]
    pub modifier_option_ids: Vec<i64>,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
}

/// Per-order item tally used by the table board and order list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ItemCounts {
    pub total: usize,
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
}

impl ItemCounts {
    /// Tally item statuses; `None` when the order has no items.
    pub fn tally<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> Option<Self> {
        let mut counts = ItemCounts::default();
        for item in items {
            counts.total += 1;
            match item.status {
                ItemStatus::Pending => counts.pending += 1,
                ItemStatus::Preparing => counts.preparing += 1,
                ItemStatus::Ready => counts.ready += 1,
            }
        }
        (counts.total > 0).then_some(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocking_statuses_match_the_reseating_rule() {
        let blocking: Vec<OrderStatus> = OrderStatus::ALL
            .into_iter()
            .filter(|s| s.blocks_table())
            .collect();
        assert_eq!(
            blocking,
            vec![
                OrderStatus::Pending,
                OrderStatus::Preparing,
                OrderStatus::Ready,
                OrderStatus::Served,
            ]
        );
        assert!(!OrderStatus::Paid.blocks_table());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in OrderStatus::ALL {
            assert_eq!(status.to_string().parse::<OrderStatus>(), Ok(status));
        }
        assert!("settled".parse::<OrderStatus>().is_err());
        assert!("served".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn item_counts_tally() {
        let item = |status| OrderItem {
            id: 1,
            order_id: 1,
            menu_item_id: 1,
            quantity: 1,
            notes: None,
            modifier_option_ids: vec![],
            status,
            created_at: chrono::Utc::now(),
        };
        let items = [
            item(ItemStatus::Pending),
            item(ItemStatus::Ready),
            item(ItemStatus::Ready),
        ];
        let counts = ItemCounts::tally(items.iter()).unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.preparing, 0);
        assert_eq!(counts.ready, 2);
        assert_eq!(ItemCounts::tally(std::iter::empty::<&OrderItem>()), None);
    }
}
