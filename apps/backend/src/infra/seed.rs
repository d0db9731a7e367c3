//! Stage catalogue seeding.
//!
//! The catalogue is written once, with `Registration` active, and never
//! changes shape afterwards. Later bootstraps only verify it.

use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::info;

use crate::entities::stages::StageType;
use crate::error::AppError;
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::stages::{self, Stage};

/// Seed the catalogue if the table is empty, otherwise validate it.
pub async fn ensure_stages(conn: &DatabaseConnection) -> Result<Vec<Stage>, AppError> {
    let txn = conn.begin().await?;
    let existing = stages::lock_all(&txn).await?;

    if !existing.is_empty() {
        txn.rollback().await?;
        validate_catalogue(&existing)?;
        return Ok(existing);
    }

    let mut seeded = Vec::with_capacity(StageType::ALL.len());
    for stage_type in StageType::ALL {
        let is_active = stage_type == StageType::Registration;
        seeded.push(stages::create_stage(&txn, stage_type, is_active).await?);
    }
    txn.commit().await?;

    info!(count = seeded.len(), "seeded stage catalogue");
    Ok(seeded)
}

/// Ordinals must be 1..N and match the built-in order. Exactly one stage is
/// active, and it holds the highest activation sequence.
pub fn validate_catalogue(stages: &[Stage]) -> Result<(), DomainError> {
    if stages.len() != StageType::ALL.len() {
        return Err(corrupt(format!(
            "expected {} stages, found {}",
            StageType::ALL.len(),
            stages.len()
        )));
    }

    for (idx, stage) in stages.iter().enumerate() {
        let expected_order = idx as i32 + 1;
        if stage.order != expected_order {
            return Err(corrupt(format!(
                "stage ordinals are not contiguous: expected {expected_order}, found {}",
                stage.order
            )));
        }
        if stage.stage_type.ordinal() != stage.order {
            return Err(corrupt(format!(
                "stage {:?} stored at ordinal {}",
                stage.stage_type, stage.order
            )));
        }
    }

    let flagged: Vec<&Stage> = stages.iter().filter(|s| s.is_active).collect();
    let [active] = flagged.as_slice() else {
        return Err(corrupt(format!(
            "expected one active stage, found {}",
            flagged.len()
        )));
    };

    if let Some(newer) = stages
        .iter()
        .find(|s| s.activation_seq >= active.activation_seq && s.id != active.id)
    {
        return Err(corrupt(format!(
            "active stage {:?} is not the latest activation ({:?} has sequence {})",
            active.stage_type, newer.stage_type, newer.activation_seq
        )));
    }
    Ok(())
}

fn corrupt(detail: String) -> DomainError {
    DomainError::infra(
        InfraErrorKind::DataCorruption,
        format!("Stage catalogue is inconsistent: {detail}"),
    )
}
