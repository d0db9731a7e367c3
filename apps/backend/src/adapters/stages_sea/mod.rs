//! SeaORM adapter for the stage catalogue.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entities::stages;

pub mod dto;

pub use dto::StageCreate;

pub async fn find_all_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<stages::Model>, sea_orm::DbErr> {
    stages::Entity::find()
        .order_by_asc(stages::Column::StageOrder)
        .all(conn)
        .await
}

/// `SELECT ... ORDER BY stage_order FOR UPDATE`.
///
/// Row locks are a no-op on SQLite, where the single-connection pool already
/// serializes writers.
pub async fn lock_all_ordered(
    txn: &DatabaseTransaction,
) -> Result<Vec<stages::Model>, sea_orm::DbErr> {
    stages::Entity::find()
        .order_by_asc(stages::Column::StageOrder)
        .lock_exclusive()
        .all(txn)
        .await
}

pub async fn find_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Option<stages::Model>, sea_orm::DbErr> {
    stages::Entity::find()
        .filter(stages::Column::IsActive.eq(true))
        .one(conn)
        .await
}

pub async fn deactivate(
    txn: &DatabaseTransaction,
    stage_id: i64,
) -> Result<stages::Model, sea_orm::DbErr> {
    let stage = stages::ActiveModel {
        id: Set(stage_id),
        name: NotSet,
        stage_type: NotSet,
        stage_order: NotSet,
        is_active: Set(false),
        activation_seq: NotSet,
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    stage.update(txn).await
}

/// Flag `stage_id` active and stamp it with `activation_seq`.
pub async fn activate(
    txn: &DatabaseTransaction,
    stage_id: i64,
    activation_seq: i64,
) -> Result<stages::Model, sea_orm::DbErr> {
    let stage = stages::ActiveModel {
        id: Set(stage_id),
        name: NotSet,
        stage_type: NotSet,
        stage_order: NotSet,
        is_active: Set(true),
        activation_seq: Set(activation_seq),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    stage.update(txn).await
}

pub async fn create_stage(
    txn: &DatabaseTransaction,
    dto: StageCreate,
) -> Result<stages::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let stage_active = stages::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        stage_type: Set(dto.stage_type),
        stage_order: Set(dto.stage_order),
        is_active: Set(dto.is_active),
        activation_seq: Set(dto.activation_seq),
        created_at: Set(now),
        updated_at: Set(now),
    };

    stage_active.insert(txn).await
}
