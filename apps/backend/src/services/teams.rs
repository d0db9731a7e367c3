//! Team formation: team creation, invitations and roster changes.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use super::registration_trigger::{RegistrationTrigger, TriggerOutcome};
use super::stages::LockedStages;
use crate::config::competition::CompetitionConfig;
use crate::domain::membership_rules;
use crate::domain::stage_rules::GatedOperation;
use crate::domain::team_status::{self, RosterMember, TeamStatusReport};
use crate::domain::Actor;
use crate::entities::team_members::{MembershipStatus, TeamRole};
use crate::entities::users::UserRole;
use crate::error::AppError;
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InvalidStateKind, NotFoundKind,
};
use crate::repos::memberships::{self, Membership};
use crate::repos::teams::{self, Team};
use crate::repos::users;

/// A freshly created team together with its lead membership.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTeam {
    pub team: Team,
    pub lead: Membership,
    /// Pending invitations of the leader that were rejected on creation.
    pub withdrawn_invitations: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invitation {
    pub membership: Membership,
    pub team_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Acceptance {
    pub membership: Membership,
    /// Sibling invitations rejected as a side effect.
    pub force_rejected: u64,
    pub trigger: TriggerOutcome,
}

/// A membership row that no longer exists, and the recount that followed.
#[derive(Debug, Clone, PartialEq)]
pub struct Departure {
    pub membership: Membership,
    pub trigger: TriggerOutcome,
}

#[derive(Debug, Clone, Copy)]
pub struct TeamFormationService {
    config: CompetitionConfig,
}

impl TeamFormationService {
    pub fn new(config: CompetitionConfig) -> Self {
        Self { config }
    }

    fn trigger(&self) -> RegistrationTrigger {
        RegistrationTrigger::new(self.config)
    }

    /// Create a team led by the actor.
    ///
    /// The leader must be a participant with no accepted lead or member
    /// membership anywhere. Their other pending invitations are withdrawn.
    pub async fn create_team(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        name: &str,
        motto: &str,
    ) -> Result<CreatedTeam, AppError> {
        let locked = LockedStages::acquire(txn).await?;
        locked.ensure_allows(GatedOperation::CreateTeam)?;

        let leader = users::require_user(txn, actor.user_id).await?;
        if leader.role != UserRole::Participant {
            return Err(DomainError::forbidden(
                ForbiddenKind::UserRole,
                "Only participants can create teams",
            )
            .into());
        }
        if let Some(existing) = memberships::find_accepted_non_mentor(txn, leader.id).await? {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInTeam,
                format!("User {} already belongs to team {}", leader.id, existing.team_id),
            )
            .into());
        }

        let team = teams::create_team(txn, name, motto, leader.id).await?;
        let lead = memberships::create_team_lead(txn, team.id, leader.id).await?;
        let withdrawn_invitations =
            memberships::reject_pending_for_user(txn, leader.id, None).await?;

        info!(team_id = team.id, leader_id = leader.id, "team created");
        Ok(CreatedTeam {
            team,
            lead,
            withdrawn_invitations,
        })
    }

    /// Invite `invitee_id` to the actor's team under `role`.
    ///
    /// A previously rejected (team, user) row is reused and flipped back to pending.
    pub async fn invite_member(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        team_id: i64,
        invitee_id: i64,
        role: TeamRole,
    ) -> Result<Invitation, AppError> {
        let locked = LockedStages::acquire(txn).await?;
        locked.ensure_allows(GatedOperation::InviteMember)?;

        let team = teams::require_team(txn, team_id).await?;
        ensure_leader(&team, actor)?;

        let invitee = users::require_user(txn, invitee_id).await?;
        membership_rules::ensure_role_fits(role, invitee.role)?;

        let existing = memberships::find_for_team_and_user(txn, team.id, invitee.id).await?;
        if let Some(row) = &existing {
            if row.status != MembershipStatus::Rejected {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicateInvitation,
                    format!(
                        "User {} already has a {} membership in team {}",
                        invitee.id,
                        status_label(row.status),
                        team.id
                    ),
                )
                .into());
            }
        }

        match role {
            TeamRole::Mentor => self.ensure_mentor_free(txn, team.id).await?,
            TeamRole::Member => {
                self.ensure_not_in_team(txn, invitee.id).await?;
                self.ensure_roster_open(txn, team.id).await?;
            }
            TeamRole::TeamLead => unreachable_lead_role()?,
        }

        let membership = match existing {
            Some(row) => {
                debug!(membership_id = row.id, "reusing rejected membership");
                memberships::reinvite(txn, row.id, role).await?
            }
            None => memberships::create_invitation(txn, team.id, invitee.id, role).await?,
        };

        info!(
            membership_id = membership.id,
            team_id = team.id,
            invitee_id = invitee.id,
            ?role,
            "invitation sent"
        );
        Ok(Invitation {
            membership,
            team_name: team.name,
        })
    }

    /// Accept a pending invitation addressed to the actor.
    ///
    /// Capacity is re-checked before the status so that the loser of two
    /// concurrent mentor acceptances sees the mentor conflict rather than the
    /// force-rejection the winner applied to it. An already accepted row is
    /// turned away first, since it occupies the very seat being counted.
    pub async fn accept_invitation(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        membership_id: i64,
    ) -> Result<Acceptance, AppError> {
        let locked = LockedStages::acquire(txn).await?;
        locked.ensure_allows(GatedOperation::RespondToInvitation)?;

        let membership = memberships::require_membership(txn, membership_id).await?;
        membership_rules::ensure_invitee(membership.user_id, actor.user_id)?;
        if membership.is_accepted() {
            return Err(DomainError::invalid_state(
                InvalidStateKind::NotPending,
                "Invitation has already been accepted",
            )
            .into());
        }

        let accepted_members = match membership.role {
            TeamRole::Mentor => {
                self.ensure_mentor_free(txn, membership.team_id).await?;
                0
            }
            TeamRole::Member => {
                self.ensure_not_in_team(txn, membership.user_id).await?;
                self.ensure_roster_open(txn, membership.team_id).await?
            }
            TeamRole::TeamLead => unreachable_lead_role()?,
        };
        membership_rules::ensure_pending(membership.status)?;

        let accepted =
            memberships::set_status(txn, membership.id, MembershipStatus::Accepted).await?;

        let mut force_rejected = 0;
        match accepted.role {
            TeamRole::Mentor => {
                force_rejected += memberships::reject_pending_for_team_role(
                    txn,
                    accepted.team_id,
                    TeamRole::Mentor,
                    accepted.id,
                )
                .await?;
            }
            TeamRole::Member if accepted_members + 1 >= self.config.roster_size => {
                force_rejected += memberships::reject_pending_for_team_role(
                    txn,
                    accepted.team_id,
                    TeamRole::Member,
                    accepted.id,
                )
                .await?;
            }
            _ => {}
        }
        force_rejected +=
            memberships::reject_pending_for_user(txn, accepted.user_id, Some(accepted.id)).await?;

        info!(
            membership_id = accepted.id,
            team_id = accepted.team_id,
            user_id = accepted.user_id,
            force_rejected,
            "invitation accepted"
        );

        let trigger = self.trigger().evaluate(txn, &locked).await?;
        Ok(Acceptance {
            membership: accepted,
            force_rejected,
            trigger,
        })
    }

    pub async fn reject_invitation(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        membership_id: i64,
    ) -> Result<Membership, AppError> {
        let locked = LockedStages::acquire(txn).await?;
        locked.ensure_allows(GatedOperation::RespondToInvitation)?;

        let membership = memberships::require_membership(txn, membership_id).await?;
        membership_rules::ensure_invitee(membership.user_id, actor.user_id)?;
        membership_rules::ensure_pending(membership.status)?;

        let rejected =
            memberships::set_status(txn, membership.id, MembershipStatus::Rejected).await?;
        info!(membership_id = rejected.id, "invitation rejected");
        Ok(rejected)
    }

    /// Leader removes an accepted member or mentor. The row is deleted so the
    /// user can be invited again.
    pub async fn remove_member(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        team_id: i64,
        membership_id: i64,
    ) -> Result<Departure, AppError> {
        let locked = LockedStages::acquire(txn).await?;

        let team = teams::require_team(txn, team_id).await?;
        ensure_leader(&team, actor)?;

        let membership = memberships::require_membership(txn, membership_id).await?;
        if membership.team_id != team.id {
            return Err(DomainError::not_found(
                NotFoundKind::Membership,
                format!("Membership {membership_id} is not part of team {team_id}"),
            )
            .into());
        }
        membership_rules::ensure_removable(membership.role, membership.status)?;

        memberships::delete_membership(txn, membership.id).await?;
        info!(
            membership_id = membership.id,
            team_id = team.id,
            user_id = membership.user_id,
            "member removed"
        );

        let trigger = self.trigger().evaluate(txn, &locked).await?;
        Ok(Departure {
            membership,
            trigger,
        })
    }

    /// The actor leaves the team they belong to as a regular member.
    pub async fn leave_team(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
    ) -> Result<Departure, AppError> {
        let locked = LockedStages::acquire(txn).await?;

        let membership = memberships::find_accepted_non_mentor(txn, actor.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Membership,
                    format!("User {} is not a member of any team", actor.user_id),
                )
            })?;
        membership_rules::ensure_removable(membership.role, membership.status)?;

        memberships::delete_membership(txn, membership.id).await?;
        info!(
            membership_id = membership.id,
            team_id = membership.team_id,
            user_id = actor.user_id,
            "member left team"
        );

        let trigger = self.trigger().evaluate(txn, &locked).await?;
        Ok(Departure {
            membership,
            trigger,
        })
    }

    /// A mentor steps down from one team.
    pub async fn leave_mentorship(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        team_id: i64,
    ) -> Result<Departure, AppError> {
        let locked = LockedStages::acquire(txn).await?;

        let team = teams::require_team(txn, team_id).await?;
        let membership = memberships::find_for_team_and_user(txn, team.id, actor.user_id)
            .await?
            .filter(|m| m.role == TeamRole::Mentor && m.is_accepted())
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Membership,
                    format!("User {} does not mentor team {}", actor.user_id, team.id),
                )
            })?;

        memberships::delete_membership(txn, membership.id).await?;
        info!(team_id = team.id, mentor_id = actor.user_id, "mentor left team");

        let trigger = self.trigger().evaluate(txn, &locked).await?;
        Ok(Departure {
            membership,
            trigger,
        })
    }

    /// Leader deletes the team along with every membership row.
    pub async fn delete_team(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        team_id: i64,
    ) -> Result<TriggerOutcome, AppError> {
        let locked = LockedStages::acquire(txn).await?;

        let team = teams::require_team(txn, team_id).await?;
        ensure_leader(&team, actor)?;

        let dropped = memberships::delete_all_for_team(txn, team.id).await?;
        teams::delete_team(txn, team.id).await?;
        info!(team_id = team.id, memberships = dropped, "team deleted");

        self.trigger().evaluate(txn, &locked).await
    }

    pub async fn set_team_logo(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        team_id: i64,
        logo_ref: Option<String>,
    ) -> Result<Team, AppError> {
        LockedStages::acquire(txn).await?;

        let team = teams::require_team(txn, team_id).await?;
        ensure_leader(&team, actor)?;
        Ok(teams::set_logo(txn, team.id, logo_ref).await?)
    }

    /// Composite status of one team. Read-only and idempotent between writes.
    pub async fn team_status<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i64,
    ) -> Result<TeamStatusReport, AppError> {
        let team = teams::require_team(conn, team_id).await?;
        let roster: Vec<RosterMember> = memberships::accepted_roster(conn, team.id)
            .await?
            .into_iter()
            .map(|entry| entry.member)
            .collect();
        Ok(team_status::evaluate(&roster, self.config.roster_size))
    }

    pub async fn list_team_members<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        team_id: i64,
    ) -> Result<Vec<Membership>, AppError> {
        let team = teams::require_team(conn, team_id).await?;
        Ok(memberships::list_for_team(conn, team.id).await?)
    }

    pub async fn list_teams_for_leader<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
    ) -> Result<Vec<Team>, AppError> {
        Ok(teams::list_led_by(conn, actor.user_id).await?)
    }

    pub async fn list_pending_invitations<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        actor: &Actor,
    ) -> Result<Vec<Membership>, AppError> {
        Ok(memberships::list_pending_for_user(conn, actor.user_id).await?)
    }

    async fn ensure_mentor_free(
        &self,
        txn: &DatabaseTransaction,
        team_id: i64,
    ) -> Result<(), DomainError> {
        if memberships::count_accepted(txn, team_id, TeamRole::Mentor).await? > 0 {
            return Err(DomainError::conflict(
                ConflictKind::MentorTaken,
                format!("Team {team_id} already has a mentor"),
            ));
        }
        Ok(())
    }

    async fn ensure_not_in_team(
        &self,
        txn: &DatabaseTransaction,
        user_id: i64,
    ) -> Result<(), DomainError> {
        if let Some(existing) = memberships::find_accepted_non_mentor(txn, user_id).await? {
            return Err(DomainError::conflict(
                ConflictKind::AlreadyInTeam,
                format!("User {user_id} already belongs to team {}", existing.team_id),
            ));
        }
        Ok(())
    }

    /// Returns the current number of accepted regular members.
    async fn ensure_roster_open(
        &self,
        txn: &DatabaseTransaction,
        team_id: i64,
    ) -> Result<usize, DomainError> {
        let accepted = memberships::count_accepted(txn, team_id, TeamRole::Member).await?;
        if accepted >= self.config.roster_size {
            return Err(DomainError::conflict(
                ConflictKind::RosterFull,
                format!(
                    "Team {team_id} already has {accepted} of {} members",
                    self.config.roster_size
                ),
            ));
        }
        Ok(accepted)
    }
}

fn ensure_leader(team: &Team, actor: &Actor) -> Result<(), DomainError> {
    if team.is_led_by(actor.user_id) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::NotTeamLead,
            format!("Only the leader of team {} may do this", team.id),
        ))
    }
}

/// Lead memberships are only ever created with their team, never invited.
fn unreachable_lead_role<T>() -> Result<T, DomainError> {
    Err(DomainError::conflict(
        ConflictKind::RoleMismatch,
        "The team-lead role cannot be assigned by invitation",
    ))
}

fn status_label(status: MembershipStatus) -> &'static str {
    match status {
        MembershipStatus::Pending => "pending",
        MembershipStatus::Accepted => "accepted",
        MembershipStatus::Rejected => "rejected",
    }
}
