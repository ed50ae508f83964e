//! Staff Role Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Closed staff role set.
///
/// Adding a role is a compile-time-checked change: every gate matches
/// exhaustively on this enum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Owner/manager: full tenant administration
    Admin,
    /// Floor staff: tables, orders, payment marking
    Staff,
    /// Kitchen display: prep status updates and queue reads
    Kitchen,
}

impl FromStr for StaffRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(StaffRole::Admin),
            "staff" => Ok(StaffRole::Staff),
            "kitchen" => Ok(StaffRole::Kitchen),
            other => Err(UnknownVariant::new("role", other)),
        }
    }
}

impl fmt::Display for StaffRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaffRole::Admin => write!(f, "admin"),
            StaffRole::Staff => write!(f, "staff"),
            StaffRole::Kitchen => write!(f, "kitchen"),
        }
    }
}
