//! Order lifecycle
//!
//! - **manager**: the `OrdersManager` owning every mutating operation
//!   on orders and their items
//! - **money**: Decimal-backed total arithmetic and input bounds
//! - **kitchen**: the kitchen display projection

pub mod kitchen;
pub mod manager;
pub mod money;

pub use kitchen::{KitchenQueue, StationQueue};
pub use manager::{
    CheckoutOrigin, ItemStatusChange, OrderLine, OrdersManager, QuantityUpdate, Seating,
};
