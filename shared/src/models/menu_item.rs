//! Menu Item Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::restaurant::ImageBlob;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub price: f64,
    /// Strikethrough price for display; no effect on totals
    pub compare_at_price: Option<f64>,
    pub description: Option<String>,
    pub image: Option<ImageBlob>,
    pub is_available: bool,
    /// Kitchen prep queue this item is routed to, if any
    pub station_id: Option<i64>,
    /// Categories this item appears under (junction)
    #[serde(default)]
    pub category_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}
