//! Dining Table Model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UnknownVariant;

/// Staff-set table status.
///
/// This is the manual override only; the customer-facing availability is
/// computed by the table status resolver from this value plus the
/// reservation and any seated order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ManualStatus {
    #[default]
    Available,
    /// Walk-in hold without an order
    Occupied,
    /// Blocks all new seating
    Maintenance,
}

impl FromStr for ManualStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ManualStatus::Available),
            "occupied" => Ok(ManualStatus::Occupied),
            "maintenance" => Ok(ManualStatus::Maintenance),
            other => Err(UnknownVariant::new("table status", other)),
        }
    }
}

impl fmt::Display for ManualStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManualStatus::Available => write!(f, "available"),
            ManualStatus::Occupied => write!(f, "occupied"),
            ManualStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// Reservation record held on the table.
///
/// Presence of a non-empty `name` is what marks the table reserved; the
/// date/time fields are informational for the floor staff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Reservation {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub restaurant_id: i64,
    /// Display label; not guaranteed numeric ("12", "Patio A")
    pub number: String,
    /// Stable external identifier baked into the printed QR code.
    /// Immutable for the lifetime of the table.
    pub qr_identifier: Uuid,
    pub status: ManualStatus,
    pub floor: Option<String>,
    pub seating_capacity: Option<i32>,
    pub notes: Option<String>,
    pub reservation: Option<Reservation>,
    pub created_at: DateTime<Utc>,
}

impl Table {
    /// Whether an active reservation is held (non-empty name).
    pub fn has_reservation(&self) -> bool {
        self.reservation.as_ref().is_some_and(Reservation::is_active)
    }
}

/// Create table payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TableCreate {
    pub number: String,
    pub floor: Option<String>,
    pub seating_capacity: Option<i32>,
    pub notes: Option<String>,
    pub reservation: Option<Reservation>,
}
