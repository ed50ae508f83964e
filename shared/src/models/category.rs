//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Many-to-many with menus (via `Menu::category_ids`) and with menu
/// items (via `MenuItem::category_ids`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub is_active: bool,
}
