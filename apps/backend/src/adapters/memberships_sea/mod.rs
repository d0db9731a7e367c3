//! SeaORM adapter for membership repository.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::team_members::{self, MembershipStatus, TeamRole};
use crate::entities::users;

pub mod dto;

pub use dto::{MembershipCreate, MembershipStatusUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
) -> Result<Option<team_members::Model>, sea_orm::DbErr> {
    team_members::Entity::find_by_id(membership_id).one(conn).await
}

pub async fn find_by_team_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<Option<team_members::Model>, sea_orm::DbErr> {
    team_members::Entity::find()
        .filter(team_members::Column::TeamId.eq(team_id))
        .filter(team_members::Column::UserId.eq(user_id))
        .one(conn)
        .await
}

pub async fn find_all_by_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<team_members::Model>, sea_orm::DbErr> {
    team_members::Entity::find()
        .filter(team_members::Column::TeamId.eq(team_id))
        .order_by_asc(team_members::Column::Id)
        .all(conn)
        .await
}

pub async fn find_by_user_and_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    status: MembershipStatus,
) -> Result<Vec<team_members::Model>, sea_orm::DbErr> {
    team_members::Entity::find()
        .filter(team_members::Column::UserId.eq(user_id))
        .filter(team_members::Column::Status.eq(status))
        .order_by_asc(team_members::Column::Id)
        .all(conn)
        .await
}

/// Accepted team-lead or member rows held by the user, across all teams.
pub async fn find_accepted_non_mentor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<team_members::Model>, sea_orm::DbErr> {
    team_members::Entity::find()
        .filter(team_members::Column::UserId.eq(user_id))
        .filter(team_members::Column::Status.eq(MembershipStatus::Accepted))
        .filter(team_members::Column::Role.ne(TeamRole::Mentor))
        .order_by_asc(team_members::Column::Id)
        .all(conn)
        .await
}

pub async fn count_accepted_with_role<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    role: TeamRole,
) -> Result<u64, sea_orm::DbErr> {
    team_members::Entity::find()
        .filter(team_members::Column::TeamId.eq(team_id))
        .filter(team_members::Column::Role.eq(role))
        .filter(team_members::Column::Status.eq(MembershipStatus::Accepted))
        .count(conn)
        .await
}

/// Accepted rows paired with the member's user record, optionally for one team.
pub async fn find_accepted_with_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: Option<i64>,
) -> Result<Vec<(team_members::Model, Option<users::Model>)>, sea_orm::DbErr> {
    let mut query = team_members::Entity::find()
        .filter(team_members::Column::Status.eq(MembershipStatus::Accepted));
    if let Some(team_id) = team_id {
        query = query.filter(team_members::Column::TeamId.eq(team_id));
    }
    query
        .find_also_related(users::Entity)
        .order_by_asc(team_members::Column::TeamId)
        .order_by_asc(team_members::Column::Id)
        .all(conn)
        .await
}

pub async fn create_membership(
    txn: &DatabaseTransaction,
    dto: MembershipCreate,
) -> Result<team_members::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let membership_active = team_members::ActiveModel {
        id: NotSet,
        team_id: Set(dto.team_id),
        user_id: Set(dto.user_id),
        role: Set(dto.role),
        status: Set(dto.status),
        created_at: Set(now),
        updated_at: Set(now),
    };

    membership_active.insert(txn).await
}

pub async fn update_status(
    txn: &DatabaseTransaction,
    dto: MembershipStatusUpdate,
) -> Result<team_members::Model, sea_orm::DbErr> {
    let membership = team_members::ActiveModel {
        id: Set(dto.id),
        team_id: NotSet,
        user_id: NotSet,
        role: match dto.role {
            Some(role) => Set(role),
            None => NotSet,
        },
        status: Set(dto.status),
        created_at: NotSet,
        updated_at: Set(time::OffsetDateTime::now_utc()),
    };
    membership.update(txn).await
}

/// Reject every pending invitation of `role` on the team except `keep_id`.
pub async fn reject_pending_for_team_role(
    txn: &DatabaseTransaction,
    team_id: i64,
    role: TeamRole,
    keep_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = team_members::Entity::update_many()
        .col_expr(
            team_members::Column::Status,
            Expr::value(MembershipStatus::Rejected),
        )
        .col_expr(
            team_members::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(team_members::Column::TeamId.eq(team_id))
        .filter(team_members::Column::Role.eq(role))
        .filter(team_members::Column::Status.eq(MembershipStatus::Pending))
        .filter(team_members::Column::Id.ne(keep_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

/// Reject every pending invitation addressed to the user except `keep_id`.
pub async fn reject_pending_for_user(
    txn: &DatabaseTransaction,
    user_id: i64,
    keep_id: Option<i64>,
) -> Result<u64, sea_orm::DbErr> {
    let mut update = team_members::Entity::update_many()
        .col_expr(
            team_members::Column::Status,
            Expr::value(MembershipStatus::Rejected),
        )
        .col_expr(
            team_members::Column::UpdatedAt,
            Expr::value(time::OffsetDateTime::now_utc()),
        )
        .filter(team_members::Column::UserId.eq(user_id))
        .filter(team_members::Column::Status.eq(MembershipStatus::Pending));
    if let Some(keep_id) = keep_id {
        update = update.filter(team_members::Column::Id.ne(keep_id));
    }
    let result = update.exec(txn).await?;
    Ok(result.rows_affected)
}

pub async fn delete_membership(txn: &DatabaseTransaction, id: i64) -> Result<(), sea_orm::DbErr> {
    team_members::Entity::delete_many()
        .filter(team_members::Column::Id.eq(id))
        .exec(txn)
        .await?;
    Ok(())
}

pub async fn delete_all_by_team(
    txn: &DatabaseTransaction,
    team_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let result = team_members::Entity::delete_many()
        .filter(team_members::Column::TeamId.eq(team_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}
