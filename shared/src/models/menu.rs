//! Menu Model
//!
//! A menu is a named grouping of categories with an activation window:
//! an optional time-of-day range (which may wrap midnight) and an
//! optional weekday set. The scheduling resolver in the core decides
//! what is orderable right now.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Menu entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Window start, time-of-day. Constrains only when `end_time` is
    /// also set.
    pub start_time: Option<NaiveTime>,
    /// Window end, time-of-day. `start > end` means an overnight window.
    pub end_time: Option<NaiveTime>,
    /// Comma-separated weekday indices, Monday=0 .. Sunday=6.
    /// `None` = no day restriction; empty string = never active.
    pub active_days: Option<String>,
    pub is_active: bool,
    /// Categories attached to this menu (junction)
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuCreate {
    pub name: String,
    pub description: Option<String>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub active_days: Option<String>,
    #[serde(default)]
    pub category_ids: Vec<i64>,
}
