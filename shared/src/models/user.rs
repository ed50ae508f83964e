//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::role::StaffRole;

/// Staff account entity
///
/// Credential storage and session handling live in the excluded auth
/// layer; the core only needs the tenant binding and the role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub restaurant_id: i64,
    pub email: String,
    pub role: StaffRole,
    /// Invited-but-not-activated accounts are inactive
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
