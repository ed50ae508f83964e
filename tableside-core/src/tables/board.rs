//! Staff table board
//!
//! Every table of the tenant with its resolved display status and, when
//! an order is seated there, a summary card for the floor screens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::models::{ItemCounts, Order, OrderItem, OrderStatus, Table};

use super::resolver::{self, TableDisplay};

/// Order summary shown on an occupied table tile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderCard {
    pub order_id: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub item_counts: Option<ItemCounts>,
}

/// One table tile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardEntry {
    pub table: Table,
    pub display: TableDisplay,
    pub order: Option<OrderCard>,
}

/// Sort key for table labels: numeric labels first in numeric order,
/// then the rest lexicographically ("2" before "10" before "Patio A").
pub fn table_sort_key(number: &str) -> (bool, u32, String) {
    match number.parse::<u32>() {
        Ok(n) => (false, n, String::new()),
        Err(_) => (true, 0, number.to_string()),
    }
}

/// Build the board from a tenant's tables and their seated orders.
///
/// `order_for_table` must yield the display order (anything not yet
/// cleared or cancelled); `items_for_order` its line items.
pub fn build<'a>(
    mut tables: Vec<Table>,
    order_for_table: impl Fn(i64) -> Option<&'a Order>,
    items_for_order: impl Fn(i64) -> Vec<&'a OrderItem>,
) -> Vec<BoardEntry> {
    tables.sort_by_key(|t| table_sort_key(&t.number));
    tables
        .into_iter()
        .map(|table| {
            let order = order_for_table(table.id);
            let display = resolver::resolve(&table, order);
            let card = order.map(|o| OrderCard {
                order_id: o.id,
                status: o.status,
                created_at: o.created_at,
                item_counts: ItemCounts::tally(items_for_order(o.id)),
            });
            BoardEntry {
                table,
                display,
                order: card,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_orders_numeric_before_labels() {
        let mut numbers = vec!["Patio A", "10", "2", "Bar"];
        numbers.sort_by_key(|n| table_sort_key(n));
        assert_eq!(numbers, vec!["2", "10", "Bar", "Patio A"]);
    }
}
