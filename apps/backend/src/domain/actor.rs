use crate::entities::users::UserRole;
use crate::errors::domain::{DomainError, ForbiddenKind};

/// Authenticated caller, as resolved by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
    pub role: UserRole,
}

impl Actor {
    /// User id carried by the built-in system actor. Never a real row.
    pub const SYSTEM_USER_ID: i64 = 0;

    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// Administrator identity used by the wall-clock scheduler.
    pub fn system() -> Self {
        Self::new(Self::SYSTEM_USER_ID, UserRole::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn ensure_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::forbidden(
                ForbiddenKind::NotAdmin,
                "Only administrators may do this",
            ))
        }
    }
}
