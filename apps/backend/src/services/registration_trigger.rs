//! Automatic closing of registration.
//!
//! After any event that can move a team into or out of `active`, the number of
//! active teams is recomputed inside the same transaction. When it reaches the
//! threshold while `Registration` is the active stage, the stage flips to
//! `RegistrationClosed`. Once the stage has moved on, evaluation is a no-op.

use std::collections::BTreeMap;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use super::stages::LockedStages;
use crate::config::competition::CompetitionConfig;
use crate::domain::team_status::{self, RosterMember, TeamStatus};
use crate::entities::stages::StageType;
use crate::error::AppError;
use crate::repos::memberships;
use crate::repos::stages::Stage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// Registration is not the active stage; nothing was counted.
    Idle { stage: StageType },
    BelowThreshold { active_teams: usize },
    /// Registration closed in this transaction.
    Fired {
        active_team_ids: Vec<i64>,
        stages: Vec<Stage>,
    },
}

impl TriggerOutcome {
    pub fn fired(&self) -> bool {
        matches!(self, TriggerOutcome::Fired { .. })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RegistrationTrigger {
    threshold: usize,
    roster_size: usize,
}

impl RegistrationTrigger {
    pub fn new(config: CompetitionConfig) -> Self {
        Self {
            threshold: config.activation_threshold,
            roster_size: config.roster_size,
        }
    }

    /// Recount and flip if due. `locked` must come from the same transaction.
    pub async fn evaluate(
        &self,
        txn: &DatabaseTransaction,
        locked: &LockedStages,
    ) -> Result<TriggerOutcome, AppError> {
        let current = locked.active()?;
        if current.stage_type != StageType::Registration {
            return Ok(TriggerOutcome::Idle {
                stage: current.stage_type,
            });
        }

        let active_team_ids = active_team_ids(txn, self.roster_size).await?;
        if active_team_ids.len() < self.threshold {
            debug!(
                active_teams = active_team_ids.len(),
                threshold = self.threshold,
                "registration stays open"
            );
            return Ok(TriggerOutcome::BelowThreshold {
                active_teams: active_team_ids.len(),
            });
        }

        let closed = locked.by_type(StageType::RegistrationClosed)?;
        let (_, stages) = locked.switch_to(txn, closed.id).await?;
        info!(
            active_teams = active_team_ids.len(),
            threshold = self.threshold,
            "registration closed automatically"
        );

        Ok(TriggerOutcome::Fired {
            active_team_ids,
            stages,
        })
    }
}

/// Ids of every team whose composite status is `active`, ascending.
pub async fn active_team_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    roster_size: usize,
) -> Result<Vec<i64>, AppError> {
    let entries = memberships::accepted_rosters_all(conn).await?;

    let mut rosters: BTreeMap<i64, Vec<RosterMember>> = BTreeMap::new();
    for entry in entries {
        rosters.entry(entry.team_id).or_default().push(entry.member);
    }

    Ok(rosters
        .into_iter()
        .filter(|(_, roster)| {
            team_status::evaluate(roster, roster_size).status == TeamStatus::Active
        })
        .map(|(team_id, _)| team_id)
        .collect())
}
