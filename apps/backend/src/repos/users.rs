//! User repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::users_sea as users_adapter;
use crate::entities::users::{self, ApprovalStatus, UserRole};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Local mirror of an identity-service user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub approval_status: ApprovalStatus,
    pub created_at: time::OffsetDateTime,
}

pub async fn find_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_user(conn, user_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::User, format!("User {user_id} not found"))
    })
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_by_email(conn, email).await?;
    Ok(user.map(User::from))
}

pub async fn create_user(
    txn: &DatabaseTransaction,
    display_name: &str,
    email: &str,
    role: UserRole,
) -> Result<User, DomainError> {
    let dto = users_adapter::UserCreate::new(display_name, email, role);
    let user = users_adapter::create_user(txn, dto).await?;
    Ok(User::from(user))
}

pub async fn set_approval_status(
    txn: &DatabaseTransaction,
    user_id: i64,
    status: ApprovalStatus,
) -> Result<User, DomainError> {
    let user = users_adapter::update_approval_status(txn, user_id, status).await?;
    Ok(User::from(user))
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            display_name: model.display_name,
            email: model.email,
            role: model.role,
            approval_status: model.approval_status,
            created_at: model.created_at,
        }
    }
}
