//! DTOs for users_sea adapter.

use crate::entities::users::{ApprovalStatus, UserRole};

/// DTO for mirroring a user from the identity service.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub approval_status: ApprovalStatus,
}

impl UserCreate {
    pub fn new(display_name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            display_name: display_name.into(),
            email: email.into(),
            role,
            approval_status: ApprovalStatus::Pending,
        }
    }
}
