//! Request actor context
//!
//! Every core operation takes the acting tenant explicitly instead of
//! re-deriving it per query: the calling layer resolves the session
//! once into an `ActorContext` and passes it down. All store lookups
//! made on behalf of the actor are scoped by `restaurant_id`.

use serde::{Deserialize, Serialize};
use shared::models::{StaffRole, User};

use crate::common::{ServiceError, ServiceResult};

/// The authenticated staff member a request acts as.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorContext {
    pub restaurant_id: i64,
    pub user_id: i64,
    pub role: StaffRole,
}

impl ActorContext {
    pub fn new(restaurant_id: i64, user_id: i64, role: StaffRole) -> Self {
        Self {
            restaurant_id,
            user_id,
            role,
        }
    }

    pub fn for_user(user: &User) -> Self {
        Self::new(user.restaurant_id, user.id, user.role)
    }

    /// Floor operations: opening, moving, merging, settling orders.
    pub fn can_manage_floor(&self) -> bool {
        match self.role {
            StaffRole::Admin | StaffRole::Staff => true,
            StaffRole::Kitchen => false,
        }
    }

    pub(crate) fn require_floor(&self) -> ServiceResult<()> {
        if self.can_manage_floor() {
            Ok(())
        } else {
            Err(ServiceError::forbidden(format!(
                "role {} cannot manage floor orders",
                self.role
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kitchen_cannot_manage_floor() {
        let ctx = ActorContext::new(1, 1, StaffRole::Kitchen);
        assert!(!ctx.can_manage_floor());
        assert!(ctx.require_floor().is_err());

        let ctx = ActorContext::new(1, 1, StaffRole::Staff);
        assert!(ctx.require_floor().is_ok());
    }
}
