//! Tableside Core - 多租户餐厅点餐状态核心
//!
//! The order/table state reconciliation core of a multi-tenant QR
//! ordering platform: customers scan a per-table code to order, floor
//! and kitchen staff track and update status in near-real-time.
//!
//! # Module structure
//!
//! ```text
//! tableside-core/src/
//! ├── core/          # Configuration and policy knobs
//! ├── common/        # Errors, logging
//! ├── auth/          # Actor context and role gates
//! ├── store/         # Embedded transactional entity store
//! ├── orders/        # Order lifecycle manager, money, kitchen queue
//! ├── tables/        # Table status resolver and floor board
//! ├── menus/         # Menu scheduling resolver
//! └── notify/        # Realtime change-event seam
//! ```
//!
//! Persistence beyond the embedded store, HTTP framing, sessions, file
//! storage and delivery transports are external collaborators; the
//! seams here are the store guards and the notifier.

pub mod auth;
pub mod common;
pub mod core;
pub mod menus;
pub mod notify;
pub mod orders;
pub mod store;
pub mod tables;

// Re-export 公共类型
pub use auth::ActorContext;
pub use common::{ErrorKind, ServiceError, ServiceResult};
pub use common::logger::{init_logger, init_logger_with_file};
pub use core::{CoreConfig, SettledAdditions, TransitionPolicy};
pub use menus::schedule::{active_menus, menu_is_active, restaurant_tz, visible_items, MenuView};
pub use notify::{BroadcastNotifier, Notifier, Published};
pub use orders::{
    CheckoutOrigin, ItemStatusChange, KitchenQueue, OrderLine, OrdersManager, QuantityUpdate,
    Seating,
};
pub use store::EntityStore;
pub use tables::{next_table_number, resolver::resolve, Availability, BoardEntry, TableDisplay};
