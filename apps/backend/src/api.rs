//! Entry points for the transport layer and the wall-clock scheduler.
//!
//! Every mutating call runs in exactly one transaction. Effects that must not
//! outlive a rollback (Status Directory refresh, notifications) are applied
//! here, after `with_txn` has returned `Ok`.

use tracing::debug;

use crate::db::txn::with_txn;
use crate::domain::stage_rules::GatedOperation;
use crate::domain::{Actor, TeamStatusReport};
use crate::entities::stages::StageType;
use crate::entities::team_members::TeamRole;
use crate::entities::users::{ApprovalStatus, UserRole};
use crate::error::AppError;
use crate::repos::memberships::Membership;
use crate::repos::stages::Stage;
use crate::repos::teams::Team;
use crate::repos::users::User;
use crate::services::notifications::Notification;
use crate::services::registration_trigger::TriggerOutcome;
use crate::services::stages::{StageActivation, StageService};
use crate::services::teams::{Acceptance, CreatedTeam, Departure, TeamFormationService};
use crate::services::users::{ApprovalChange, UserService};
use crate::state::app_state::AppState;
use crate::state::status_directory::StageEntry;

#[derive(Debug, Clone)]
pub struct HackathonApi {
    state: AppState,
}

impl HackathonApi {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn teams(&self) -> TeamFormationService {
        TeamFormationService::new(self.state.competition())
    }

    fn users(&self) -> UserService {
        UserService::new(self.state.competition())
    }

    // ----- users -----

    pub async fn register_user(
        &self,
        display_name: &str,
        email: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        let service = self.users();
        let display_name = display_name.to_owned();
        let email = email.to_owned();
        with_txn(&self.state, move |txn| {
            Box::pin(async move {
                service
                    .register_user(txn, &display_name, &email, role)
                    .await
            })
        })
        .await
    }

    pub async fn set_approval_status(
        &self,
        actor: Actor,
        user_id: i64,
        status: ApprovalStatus,
    ) -> Result<ApprovalChange, AppError> {
        let service = self.users();
        let change = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                service
                    .set_approval_status(txn, &actor, user_id, status)
                    .await
            })
        })
        .await?;
        self.after_trigger(&change.trigger);
        Ok(change)
    }

    // ----- teams -----

    pub async fn create_team(
        &self,
        actor: Actor,
        name: &str,
        motto: &str,
    ) -> Result<CreatedTeam, AppError> {
        let service = self.teams();
        let name = name.to_owned();
        let motto = motto.to_owned();
        with_txn(&self.state, move |txn| {
            Box::pin(async move { service.create_team(txn, &actor, &name, &motto).await })
        })
        .await
    }

    pub async fn invite_member(
        &self,
        actor: Actor,
        team_id: i64,
        invitee_id: i64,
        role: TeamRole,
    ) -> Result<Membership, AppError> {
        let service = self.teams();
        let invitation = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                service
                    .invite_member(txn, &actor, team_id, invitee_id, role)
                    .await
            })
        })
        .await?;

        let membership = invitation.membership;
        self.state.notifier().dispatch(Notification::TeamInvitation {
            membership_id: membership.id,
            team_id: membership.team_id,
            team_name: invitation.team_name,
            invitee_id: membership.user_id,
            role: membership.role,
        });
        Ok(membership)
    }

    pub async fn accept_invitation(
        &self,
        actor: Actor,
        membership_id: i64,
    ) -> Result<Acceptance, AppError> {
        let service = self.teams();
        let acceptance = with_txn(&self.state, move |txn| {
            Box::pin(async move { service.accept_invitation(txn, &actor, membership_id).await })
        })
        .await?;
        self.after_trigger(&acceptance.trigger);
        Ok(acceptance)
    }

    pub async fn reject_invitation(
        &self,
        actor: Actor,
        membership_id: i64,
    ) -> Result<Membership, AppError> {
        let service = self.teams();
        with_txn(&self.state, move |txn| {
            Box::pin(async move { service.reject_invitation(txn, &actor, membership_id).await })
        })
        .await
    }

    pub async fn remove_member(
        &self,
        actor: Actor,
        team_id: i64,
        membership_id: i64,
    ) -> Result<Departure, AppError> {
        let service = self.teams();
        let departure = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                service
                    .remove_member(txn, &actor, team_id, membership_id)
                    .await
            })
        })
        .await?;
        self.after_trigger(&departure.trigger);
        Ok(departure)
    }

    pub async fn leave_team(&self, actor: Actor) -> Result<Departure, AppError> {
        let service = self.teams();
        let departure = with_txn(&self.state, move |txn| {
            Box::pin(async move { service.leave_team(txn, &actor).await })
        })
        .await?;
        self.after_trigger(&departure.trigger);
        Ok(departure)
    }

    pub async fn leave_mentorship(&self, actor: Actor, team_id: i64) -> Result<Departure, AppError> {
        let service = self.teams();
        let departure = with_txn(&self.state, move |txn| {
            Box::pin(async move { service.leave_mentorship(txn, &actor, team_id).await })
        })
        .await?;
        self.after_trigger(&departure.trigger);
        Ok(departure)
    }

    pub async fn delete_team(&self, actor: Actor, team_id: i64) -> Result<TriggerOutcome, AppError> {
        let service = self.teams();
        let trigger = with_txn(&self.state, move |txn| {
            Box::pin(async move { service.delete_team(txn, &actor, team_id).await })
        })
        .await?;
        self.after_trigger(&trigger);
        Ok(trigger)
    }

    pub async fn set_team_logo(
        &self,
        actor: Actor,
        team_id: i64,
        logo_ref: Option<String>,
    ) -> Result<Team, AppError> {
        let service = self.teams();
        with_txn(&self.state, move |txn| {
            Box::pin(async move { service.set_team_logo(txn, &actor, team_id, logo_ref).await })
        })
        .await
    }

    pub async fn get_team_status(&self, team_id: i64) -> Result<TeamStatusReport, AppError> {
        self.teams().team_status(self.state.db(), team_id).await
    }

    pub async fn list_team_members(&self, team_id: i64) -> Result<Vec<Membership>, AppError> {
        self.teams()
            .list_team_members(self.state.db(), team_id)
            .await
    }

    /// Teams the actor leads; empty for anyone who leads none.
    pub async fn list_teams_for_leader(&self, actor: Actor) -> Result<Vec<Team>, AppError> {
        self.teams()
            .list_teams_for_leader(self.state.db(), &actor)
            .await
    }

    pub async fn list_pending_invitations(&self, actor: Actor) -> Result<Vec<Membership>, AppError> {
        self.teams()
            .list_pending_invitations(self.state.db(), &actor)
            .await
    }

    // ----- stages -----

    pub async fn activate_stage(
        &self,
        actor: Actor,
        stage_id: i64,
    ) -> Result<StageActivation, AppError> {
        let activation = with_txn(&self.state, move |txn| {
            Box::pin(async move {
                StageService::new()
                    .activate_stage(txn, &actor, stage_id)
                    .await
            })
        })
        .await?;

        self.refresh_directory(&activation.stages);
        self.state.notifier().dispatch(Notification::StageActivated {
            stage_id: activation.activated.id,
            stage_type: activation.activated.stage_type,
            previous: activation.previous.stage_type,
        });
        Ok(activation)
    }

    /// Called by the wall-clock scheduler; runs with the built-in system actor.
    pub async fn scheduled_activate_stage(
        &self,
        stage_id: i64,
    ) -> Result<StageActivation, AppError> {
        self.activate_stage(Actor::system(), stage_id).await
    }

    /// Reads the store, never the cached directory.
    pub async fn get_current_stage(&self) -> Result<Stage, AppError> {
        StageService::new().current_stage(self.state.db()).await
    }

    pub async fn list_stages(&self) -> Result<Vec<Stage>, AppError> {
        StageService::new().list_stages(self.state.db()).await
    }

    pub fn get_available_transitions(&self, current: StageType) -> Vec<StageEntry> {
        self.state
            .directory()
            .snapshot()
            .available_transitions(current)
    }

    /// Gate for collaborators such as file storage.
    pub async fn ensure_stage_allows(&self, operation: GatedOperation) -> Result<Stage, AppError> {
        StageService::new()
            .ensure_stage_allows(self.state.db(), operation)
            .await
    }

    /// Install a committed catalogue unless a later commit already did.
    fn refresh_directory(&self, stages: &[Stage]) {
        match self.state.directory().install(stages) {
            Some(version) => debug!(version, "status directory refreshed"),
            None => debug!("status directory already holds a newer catalogue"),
        }
    }

    fn after_trigger(&self, outcome: &TriggerOutcome) {
        match outcome {
            TriggerOutcome::Fired {
                active_team_ids,
                stages,
            } => {
                self.refresh_directory(stages);
                self.state
                    .notifier()
                    .dispatch(Notification::RegistrationClosed {
                        active_team_ids: active_team_ids.clone(),
                    });
            }
            TriggerOutcome::Idle { .. } | TriggerOutcome::BelowThreshold { .. } => {}
        }
    }
}
