//! Domain entity models
//!
//! One module per entity, each carrying the entity struct plus the
//! Create/Update payload structs used by the store layer.

pub mod category;
pub mod menu;
pub mod menu_item;
pub mod modifier;
pub mod order;
pub mod restaurant;
pub mod role;
pub mod station;
pub mod table;
pub mod user;

pub use category::Category;
pub use menu::Menu;
pub use menu_item::MenuItem;
pub use modifier::{ModifierGroup, ModifierOption, SelectionType};
pub use order::{ItemCounts, ItemStatus, Order, OrderItem, OrderStatus};
pub use restaurant::{ImageBlob, Restaurant};
pub use role::StaffRole;
pub use station::Station;
pub use table::{ManualStatus, Reservation, Table, TableCreate};
pub use user::User;

use thiserror::Error;

/// Parse failure for a closed enum coming from an external string
/// (status fields, role names).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {field} value: {value}")]
pub struct UnknownVariant {
    pub field: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}
