//! Menu scheduling

pub mod schedule;

pub use schedule::{MenuView, active_categories, active_menus, menu_is_active, restaurant_tz, visible_items};
