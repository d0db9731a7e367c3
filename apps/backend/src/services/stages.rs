use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;

use crate::domain::stage_rules::{self, GatedOperation};
use crate::domain::Actor;
use crate::entities::stages::StageType;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::repos::stages::{self, Stage};

/// The stage catalogue, row-locked for the rest of the transaction.
///
/// Holding one of these is what makes a mutating operation a single writer:
/// the lock is taken before any other read.
#[derive(Debug, Clone)]
pub struct LockedStages {
    stages: Vec<Stage>,
}

impl LockedStages {
    pub async fn acquire(txn: &DatabaseTransaction) -> Result<Self, AppError> {
        let stages = stages::lock_all(txn).await?;
        Ok(Self { stages })
    }

    pub fn active(&self) -> Result<&Stage, DomainError> {
        self.stages
            .iter()
            .find(|s| s.is_active)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::ActiveStage, "No stage is active"))
    }

    pub fn by_type(&self, stage_type: StageType) -> Result<&Stage, DomainError> {
        self.stages
            .iter()
            .find(|s| s.stage_type == stage_type)
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Stage,
                    format!("Stage {} is not seeded", stage_type.display_name()),
                )
            })
    }

    pub fn by_id(&self, stage_id: i64) -> Result<&Stage, DomainError> {
        self.stages
            .iter()
            .find(|s| s.id == stage_id)
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Stage, format!("Stage {stage_id} not found"))
            })
    }

    pub fn ensure_allows(&self, operation: GatedOperation) -> Result<(), DomainError> {
        stage_rules::ensure_allows(operation, self.active()?.stage_type)
    }

    /// Make `to_id` the active stage, stamped with the next activation
    /// sequence number.
    ///
    /// Writers hold the row lock, so sequence numbers follow commit order and
    /// the returned catalogue can be ordered against any other one.
    pub async fn switch_to(
        &self,
        txn: &DatabaseTransaction,
        to_id: i64,
    ) -> Result<(Stage, Vec<Stage>), DomainError> {
        let from_id = self.active()?.id;
        let seq = self.latest_activation_seq() + 1;
        let activated = stages::switch_active(txn, from_id, to_id, seq).await?;

        let catalogue = self
            .stages
            .iter()
            .map(|s| {
                if s.id == activated.id {
                    activated.clone()
                } else {
                    Stage {
                        is_active: false,
                        ..s.clone()
                    }
                }
            })
            .collect();
        Ok((activated, catalogue))
    }

    fn latest_activation_seq(&self) -> i64 {
        self.stages
            .iter()
            .map(|s| s.activation_seq)
            .max()
            .unwrap_or(0)
    }
}

/// Result of a manual stage activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageActivation {
    pub previous: Stage,
    pub activated: Stage,
    /// Catalogue after the flip, for the Status Directory.
    pub stages: Vec<Stage>,
}

/// Stage lifecycle service.
#[derive(Debug, Default, Clone, Copy)]
pub struct StageService;

impl StageService {
    pub fn new() -> Self {
        Self
    }

    /// Manually move the competition to an adjacent stage.
    pub async fn activate_stage(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        stage_id: i64,
    ) -> Result<StageActivation, AppError> {
        actor.ensure_admin()?;
        let locked = LockedStages::acquire(txn).await?;

        let target = locked.by_id(stage_id)?;
        let current = locked.active()?.clone();

        stage_rules::check_manual_activation(current.order, target.stage_type, target.order)?;

        let (activated, stages) = locked.switch_to(txn, target.id).await?;
        info!(
            actor_id = actor.user_id,
            from = ?current.stage_type,
            to = ?activated.stage_type,
            "stage activated"
        );

        Ok(StageActivation {
            previous: current,
            activated,
            stages,
        })
    }

    pub async fn current_stage<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Stage, AppError> {
        Ok(stages::current_stage(conn).await?)
    }

    pub async fn list_stages<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
    ) -> Result<Vec<Stage>, AppError> {
        Ok(stages::list_ordered(conn).await?)
    }

    /// Fails with a stage-mismatch conflict unless the active stage allows `operation`.
    pub async fn ensure_stage_allows<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        operation: GatedOperation,
    ) -> Result<Stage, AppError> {
        let current = stages::current_stage(conn).await?;
        stage_rules::ensure_allows(operation, current.stage_type)?;
        Ok(current)
    }
}
