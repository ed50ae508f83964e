//! Table Status Resolver
//!
//! Computes the display status of a table from three overlapping
//! signals: the staff-set manual status, the reservation record, and
//! the order currently seated there (if any). Pure and total; the same
//! inputs always resolve to the same output.

use std::fmt;

use serde::{Deserialize, Serialize};
use shared::models::{ManualStatus, Order, OrderStatus, Table};

/// Customer-facing availability label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Occupied,
    NotAvailable,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Availability::Available => write!(f, "Available"),
            Availability::Occupied => write!(f, "Occupied"),
            Availability::NotAvailable => write!(f, "Not Available"),
        }
    }
}

/// Presentation color hint, derived 1:1 from the resolution branch.
/// Never carries independent state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorTag {
    /// Free table
    Success,
    /// Seated with a live order
    Warning,
    /// Manual walk-in hold
    Secondary,
    /// Reserved
    Info,
    /// Settled order awaiting clearing
    Primary,
    /// Under maintenance
    Dark,
}

/// Resolved display state
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableDisplay {
    pub availability: Availability,
    pub color: ColorTag,
}

/// Resolve a table's display status.
///
/// `active_order` is the order currently seated at the table, if any:
/// anything not yet cleared or cancelled, including a paid order
/// awaiting bussing.
///
/// Priority order, first match wins:
/// 1. maintenance override
/// 2. reservation (non-empty name)
/// 3. seated order (settled ⇒ needs clearing, else occupied)
/// 4. manual walk-in hold
/// 5. available
pub fn resolve(table: &Table, active_order: Option<&Order>) -> TableDisplay {
    if table.status == ManualStatus::Maintenance {
        return TableDisplay {
            availability: Availability::NotAvailable,
            color: ColorTag::Dark,
        };
    }
    if table.has_reservation() {
        return TableDisplay {
            availability: Availability::NotAvailable,
            color: ColorTag::Info,
        };
    }
    if let Some(order) = active_order {
        return if matches!(order.status, OrderStatus::Paid | OrderStatus::Completed) {
            // Physically occupied until bussed
            TableDisplay {
                availability: Availability::NotAvailable,
                color: ColorTag::Primary,
            }
        } else {
            TableDisplay {
                availability: Availability::Occupied,
                color: ColorTag::Warning,
            }
        };
    }
    if table.status == ManualStatus::Occupied {
        return TableDisplay {
            availability: Availability::Occupied,
            color: ColorTag::Secondary,
        };
    }
    TableDisplay {
        availability: Availability::Available,
        color: ColorTag::Success,
    }
}
