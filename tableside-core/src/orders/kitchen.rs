//! Kitchen display projection
//!
//! Outstanding prep work grouped by station: line items of orders still
//! in pending/preparing whose own status is not yet ready, in creation
//! order. Items routed to no station (or to a station that no longer
//! exists) land in the unassigned bucket.

use serde::{Deserialize, Serialize};
use shared::models::{ItemStatus, MenuItem, Order, OrderItem, OrderStatus, Station};

/// One station's queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationQueue {
    pub station: Station,
    pub items: Vec<OrderItem>,
}

/// The whole kitchen view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitchenQueue {
    pub stations: Vec<StationQueue>,
    pub unassigned: Vec<OrderItem>,
}

/// Whether an order still feeds the kitchen queue.
pub(crate) fn order_in_prep(order: &Order) -> bool {
    matches!(order.status, OrderStatus::Pending | OrderStatus::Preparing)
}

/// Build the queue from pre-filtered tenant data.
///
/// `items` must be the line items of in-prep orders, in creation order;
/// `menu_item_for` resolves each line's menu item for station routing.
pub(crate) fn build<'a>(
    mut stations: Vec<Station>,
    items: Vec<&OrderItem>,
    menu_item_for: impl Fn(i64) -> Option<&'a MenuItem>,
) -> KitchenQueue {
    stations.sort_by(|a, b| a.name.cmp(&b.name));

    let mut queues: Vec<StationQueue> = stations
        .into_iter()
        .map(|station| StationQueue {
            station,
            items: Vec::new(),
        })
        .collect();
    let mut unassigned = Vec::new();

    for item in items {
        if item.status == ItemStatus::Ready {
            continue;
        }
        let station_id = menu_item_for(item.menu_item_id).and_then(|m| m.station_id);
        let queue = station_id.and_then(|sid| queues.iter_mut().find(|q| q.station.id == sid));
        match queue {
            Some(q) => q.items.push(item.clone()),
            None => unassigned.push(item.clone()),
        }
    }

    KitchenQueue {
        stations: queues,
        unassigned,
    }
}
