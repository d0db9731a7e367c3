//! SeaORM adapter for team repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::teams;

pub mod dto;

pub use dto::TeamCreate;

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn find_by_leader<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leader_id: i64,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .filter(teams::Column::LeaderId.eq(leader_id))
        .order_by_asc(teams::Column::Id)
        .all(conn)
        .await
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    dto: TeamCreate,
) -> Result<teams::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let team_active = teams::ActiveModel {
        id: NotSet,
        name: Set(dto.name),
        motto: Set(dto.motto),
        leader_id: Set(dto.leader_id),
        logo_ref: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    team_active.insert(txn).await
}

pub async fn update_logo(
    txn: &DatabaseTransaction,
    team_id: i64,
    logo_ref: Option<String>,
) -> Result<teams::Model, sea_orm::DbErr> {
    let team = teams::ActiveModel {
        id: Set(team_id),
        name: NotSet,
        motto: NotSet,
        leader_id: NotSet,
        logo_ref: Set(logo_ref),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    team.update(txn).await
}

pub async fn delete_team(txn: &DatabaseTransaction, team_id: i64) -> Result<u64, sea_orm::DbErr> {
    let result = teams::Entity::delete_by_id(team_id).exec(txn).await?;
    Ok(result.rows_affected)
}
