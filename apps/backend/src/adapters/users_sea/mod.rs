//! SeaORM adapter for user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};

use crate::entities::users::{self, ApprovalStatus};

pub mod dto;

pub use dto::UserCreate;

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn create_user(
    txn: &DatabaseTransaction,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        display_name: Set(dto.display_name),
        email: Set(dto.email),
        role: Set(dto.role),
        approval_status: Set(dto.approval_status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(txn).await
}

pub async fn update_approval_status(
    txn: &DatabaseTransaction,
    user_id: i64,
    status: ApprovalStatus,
) -> Result<users::Model, sea_orm::DbErr> {
    let user = users::ActiveModel {
        id: Set(user_id),
        display_name: NotSet,
        email: NotSet,
        role: NotSet,
        approval_status: Set(status),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    user.update(txn).await
}
