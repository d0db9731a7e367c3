//! Membership repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::memberships_sea as memberships_adapter;
use crate::domain::team_status::RosterMember;
use crate::entities::team_members::{self, MembershipStatus, TeamRole};
use crate::entities::users;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Team membership domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Membership {
    pub id: i64,
    pub team_id: i64,
    pub user_id: i64,
    pub role: TeamRole,
    pub status: MembershipStatus,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Membership {
    pub fn is_accepted(&self) -> bool {
        self.status == MembershipStatus::Accepted
    }
}

/// One accepted membership joined with its user's approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub team_id: i64,
    pub user_id: i64,
    pub member: RosterMember,
}

pub async fn find_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
) -> Result<Option<Membership>, DomainError> {
    let membership = memberships_adapter::find_by_id(conn, membership_id).await?;
    Ok(membership.map(Membership::from))
}

pub async fn require_membership<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    membership_id: i64,
) -> Result<Membership, DomainError> {
    find_membership(conn, membership_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Membership,
            format!("Membership {membership_id} not found"),
        )
    })
}

pub async fn find_for_team_and_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    user_id: i64,
) -> Result<Option<Membership>, DomainError> {
    let membership = memberships_adapter::find_by_team_and_user(conn, team_id, user_id).await?;
    Ok(membership.map(Membership::from))
}

pub async fn list_for_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<Membership>, DomainError> {
    let rows = memberships_adapter::find_all_by_team(conn, team_id).await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}

pub async fn list_pending_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Membership>, DomainError> {
    let rows =
        memberships_adapter::find_by_user_and_status(conn, user_id, MembershipStatus::Pending)
            .await?;
    Ok(rows.into_iter().map(Membership::from).collect())
}

/// The user's accepted team-lead or member row, if any.
pub async fn find_accepted_non_mentor<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<Membership>, DomainError> {
    let rows = memberships_adapter::find_accepted_non_mentor(conn, user_id).await?;
    Ok(rows.into_iter().next().map(Membership::from))
}

pub async fn count_accepted<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
    role: TeamRole,
) -> Result<usize, DomainError> {
    let count = memberships_adapter::count_accepted_with_role(conn, team_id, role).await?;
    Ok(count as usize)
}

pub async fn accepted_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<RosterEntry>, DomainError> {
    let rows = memberships_adapter::find_accepted_with_users(conn, Some(team_id)).await?;
    rows.into_iter().map(roster_entry).collect()
}

/// Accepted rosters of every team, ordered by team id.
pub async fn accepted_rosters_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<RosterEntry>, DomainError> {
    let rows = memberships_adapter::find_accepted_with_users(conn, None).await?;
    rows.into_iter().map(roster_entry).collect()
}

pub async fn create_invitation(
    txn: &DatabaseTransaction,
    team_id: i64,
    user_id: i64,
    role: TeamRole,
) -> Result<Membership, DomainError> {
    let dto = memberships_adapter::MembershipCreate::invitation(team_id, user_id, role);
    let membership = memberships_adapter::create_membership(txn, dto).await?;
    Ok(Membership::from(membership))
}

pub async fn create_team_lead(
    txn: &DatabaseTransaction,
    team_id: i64,
    user_id: i64,
) -> Result<Membership, DomainError> {
    let dto = memberships_adapter::MembershipCreate::team_lead(team_id, user_id);
    let membership = memberships_adapter::create_membership(txn, dto).await?;
    Ok(Membership::from(membership))
}

/// Flip a rejected row back to pending under a (possibly new) role.
pub async fn reinvite(
    txn: &DatabaseTransaction,
    membership_id: i64,
    role: TeamRole,
) -> Result<Membership, DomainError> {
    let dto = memberships_adapter::MembershipStatusUpdate::new(
        membership_id,
        MembershipStatus::Pending,
    )
    .with_role(role);
    let membership = memberships_adapter::update_status(txn, dto).await?;
    Ok(Membership::from(membership))
}

pub async fn set_status(
    txn: &DatabaseTransaction,
    membership_id: i64,
    status: MembershipStatus,
) -> Result<Membership, DomainError> {
    let dto = memberships_adapter::MembershipStatusUpdate::new(membership_id, status);
    let membership = memberships_adapter::update_status(txn, dto).await?;
    Ok(Membership::from(membership))
}

pub async fn reject_pending_for_team_role(
    txn: &DatabaseTransaction,
    team_id: i64,
    role: TeamRole,
    keep_id: i64,
) -> Result<u64, DomainError> {
    Ok(memberships_adapter::reject_pending_for_team_role(txn, team_id, role, keep_id).await?)
}

pub async fn reject_pending_for_user(
    txn: &DatabaseTransaction,
    user_id: i64,
    keep_id: Option<i64>,
) -> Result<u64, DomainError> {
    Ok(memberships_adapter::reject_pending_for_user(txn, user_id, keep_id).await?)
}

pub async fn delete_membership(
    txn: &DatabaseTransaction,
    membership_id: i64,
) -> Result<(), DomainError> {
    memberships_adapter::delete_membership(txn, membership_id).await?;
    Ok(())
}

pub async fn delete_all_for_team(
    txn: &DatabaseTransaction,
    team_id: i64,
) -> Result<u64, DomainError> {
    Ok(memberships_adapter::delete_all_by_team(txn, team_id).await?)
}

fn roster_entry(
    (membership, user): (team_members::Model, Option<users::Model>),
) -> Result<RosterEntry, DomainError> {
    let user = user.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::DataCorruption,
            format!("Membership {} references a missing user", membership.id),
        )
    })?;
    Ok(RosterEntry {
        team_id: membership.team_id,
        user_id: membership.user_id,
        member: RosterMember {
            role: membership.role,
            approval: user.approval_status,
        },
    })
}

impl From<team_members::Model> for Membership {
    fn from(model: team_members::Model) -> Self {
        Self {
            id: model.id,
            team_id: model.team_id,
            user_id: model.user_id,
            role: model.role,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
