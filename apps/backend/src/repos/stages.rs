//! Stage repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::stages_sea as stages_adapter;
use crate::entities::stages::{self, StageType};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stage {
    pub id: i64,
    pub name: String,
    pub stage_type: StageType,
    pub order: i32,
    pub is_active: bool,
    /// Sequence number of the activation that last made this stage active;
    /// zero for stages never activated.
    pub activation_seq: i64,
}

/// Lock every stage row for the rest of the transaction, ordered by ordinal.
///
/// Every mutating operation calls this first so that writers queue on the
/// stage rows and each one sees everything committed before it.
pub async fn lock_all(txn: &DatabaseTransaction) -> Result<Vec<Stage>, DomainError> {
    let rows = stages_adapter::lock_all_ordered(txn).await?;
    Ok(rows.into_iter().map(Stage::from).collect())
}

pub async fn list_ordered<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Stage>, DomainError> {
    let rows = stages_adapter::find_all_ordered(conn).await?;
    Ok(rows.into_iter().map(Stage::from).collect())
}

/// The authoritative current stage, read through `conn`.
pub async fn current_stage<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Stage, DomainError> {
    stages_adapter::find_active(conn)
        .await?
        .map(Stage::from)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::ActiveStage, "No stage is active"))
}

/// Deactivate `from_id`, then activate `to_id` under `activation_seq`.
///
/// The order matters: the partial unique index allows one active row at a time.
pub async fn switch_active(
    txn: &DatabaseTransaction,
    from_id: i64,
    to_id: i64,
    activation_seq: i64,
) -> Result<Stage, DomainError> {
    stages_adapter::deactivate(txn, from_id).await?;
    let activated = stages_adapter::activate(txn, to_id, activation_seq).await?;
    Ok(Stage::from(activated))
}

pub async fn create_stage(
    txn: &DatabaseTransaction,
    stage_type: StageType,
    is_active: bool,
) -> Result<Stage, DomainError> {
    let dto = stages_adapter::StageCreate::from_type(stage_type, is_active);
    let stage = stages_adapter::create_stage(txn, dto).await?;
    Ok(Stage::from(stage))
}

impl From<stages::Model> for Stage {
    fn from(model: stages::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            stage_type: model.stage_type,
            order: model.stage_order,
            is_active: model.is_active,
            activation_seq: model.activation_seq,
        }
    }
}
