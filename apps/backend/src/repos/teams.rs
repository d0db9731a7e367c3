//! Team repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::teams_sea as teams_adapter;
use crate::entities::teams;
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub motto: String,
    pub leader_id: i64,
    pub logo_ref: Option<String>,
    pub created_at: time::OffsetDateTime,
}

impl Team {
    pub fn is_led_by(&self, user_id: i64) -> bool {
        self.leader_id == user_id
    }
}

pub async fn find_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    let team = teams_adapter::find_by_id(conn, team_id).await?;
    Ok(team.map(Team::from))
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    find_team(conn, team_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found"))
    })
}

/// Teams whose leader is `leader_id`, oldest first.
pub async fn list_led_by<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    leader_id: i64,
) -> Result<Vec<Team>, DomainError> {
    let rows = teams_adapter::find_by_leader(conn, leader_id).await?;
    Ok(rows.into_iter().map(Team::from).collect())
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    name: &str,
    motto: &str,
    leader_id: i64,
) -> Result<Team, DomainError> {
    let dto = teams_adapter::TeamCreate::new(name, motto, leader_id);
    let team = teams_adapter::create_team(txn, dto).await?;
    Ok(Team::from(team))
}

pub async fn set_logo(
    txn: &DatabaseTransaction,
    team_id: i64,
    logo_ref: Option<String>,
) -> Result<Team, DomainError> {
    let team = teams_adapter::update_logo(txn, team_id, logo_ref).await?;
    Ok(Team::from(team))
}

pub async fn delete_team(txn: &DatabaseTransaction, team_id: i64) -> Result<(), DomainError> {
    let deleted = teams_adapter::delete_team(txn, team_id).await?;
    if deleted == 0 {
        return Err(DomainError::not_found(
            NotFoundKind::Team,
            format!("Team {team_id} not found"),
        ));
    }
    Ok(())
}

impl From<teams::Model> for Team {
    fn from(model: teams::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            motto: model.motto,
            leader_id: model.leader_id,
            logo_ref: model.logo_ref,
            created_at: model.created_at,
        }
    }
}
