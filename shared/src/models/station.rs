//! Station Model

use serde::{Deserialize, Serialize};

/// Kitchen prep station (a named queue on the kitchen display)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
}
