//! Modifier Models
//!
//! A modifier group belongs to one menu item ("Choose your protein");
//! its options carry a price override added on top of the item price
//! ("Extra Beef", +2.00).

use serde::{Deserialize, Serialize};

/// Option selection mode for a group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionType {
    #[default]
    Single,
    Multiple,
}

/// Modifier group entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierGroup {
    pub id: i64,
    pub menu_item_id: i64,
    pub name: String,
    pub selection_type: SelectionType,
    pub is_required: bool,
    pub min_selection: i32,
    pub max_selection: Option<i32>,
}

/// Modifier option entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierOption {
    pub id: i64,
    pub group_id: i64,
    pub name: String,
    /// Amount added to the item's unit price when selected
    pub price_override: f64,
}
