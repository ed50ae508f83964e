//! Shared domain types for the tableside workspace
//!
//! This crate holds the serde-facing data model used by the
//! reconciliation core and by any presentation layer built on top of it:
//!
//! - **models**: tenant entities (Restaurant, Table, Menu, Category,
//!   MenuItem, Station, User, Order, OrderItem) and their status enums
//! - **event**: realtime change events and subscriber scopes
//!
//! Types here carry no business logic beyond small predicates on
//! themselves; lifecycle rules live in `tableside-core`.

pub mod event;
pub mod models;

// Re-export 公共类型
pub use event::{ChangeEvent, EventKind, Scope, StatusUpdate};
pub use models::order::{ItemCounts, ItemStatus, Order, OrderItem, OrderStatus};
pub use models::role::StaffRole;
pub use models::table::{ManualStatus, Reservation, Table};
pub use models::UnknownVariant;
