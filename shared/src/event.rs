//! Realtime change events
//!
//! The core publishes these through the notifier seam whenever an order
//! or item status changes; the presentation layer maps scopes to
//! whatever transport rooms it uses.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::order::{ItemStatus, OrderStatus};

/// Event kind, as seen on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NewOrder,
    StatusChange,
    StaffAlert,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::NewOrder => write!(f, "new_order"),
            EventKind::StatusChange => write!(f, "status_change"),
            EventKind::StaffAlert => write!(f, "staff_alert"),
        }
    }
}

/// Subscriber filtering scope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case", tag = "scope", content = "id")]
pub enum Scope {
    /// All staff screens of a tenant
    Restaurant(i64),
    /// One customer's live order-status page
    Order(i64),
}

impl Scope {
    /// Channel name the presentation layer subscribes to.
    pub fn channel(&self) -> String {
        match self {
            Scope::Restaurant(id) => format!("restaurant_{id}"),
            Scope::Order(id) => format!("order_{id}"),
        }
    }
}

/// The status carried by a `status_change` event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "level", content = "status")]
pub enum StatusUpdate {
    Order(OrderStatus),
    Item(ItemStatus),
}

/// A single change broadcast to live clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChangeEvent {
    pub kind: EventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    /// Set when a single line item drove the change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<StatusUpdate>,
    /// Free-text payload for staff alerts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ChangeEvent {
    pub fn new_order(order_id: i64) -> Self {
        Self {
            kind: EventKind::NewOrder,
            order_id: Some(order_id),
            item_id: None,
            status: None,
            message: None,
        }
    }

    pub fn order_status(order_id: i64, status: OrderStatus) -> Self {
        Self {
            kind: EventKind::StatusChange,
            order_id: Some(order_id),
            item_id: None,
            status: Some(StatusUpdate::Order(status)),
            message: None,
        }
    }

    pub fn item_status(order_id: i64, item_id: i64, status: ItemStatus) -> Self {
        Self {
            kind: EventKind::StatusChange,
            order_id: Some(order_id),
            item_id: Some(item_id),
            status: Some(StatusUpdate::Item(status)),
            message: None,
        }
    }

    pub fn staff_alert(message: impl Into<String>) -> Self {
        Self {
            kind: EventKind::StaffAlert,
            order_id: None,
            item_id: None,
            status: None,
            message: Some(message.into()),
        }
    }
}
