//! Checks on a single membership or invitation, independent of storage.

use crate::entities::team_members::{MembershipStatus, TeamRole};
use crate::entities::users::UserRole;
use crate::errors::domain::{ConflictKind, DomainError, ForbiddenKind, InvalidStateKind};

/// Which invitation roles fit which user roles.
///
/// Team leads are never invited; mentors must be mentor users and regular
/// members must be participants.
pub fn ensure_role_fits(role: TeamRole, user_role: UserRole) -> Result<(), DomainError> {
    match (role, user_role) {
        (TeamRole::TeamLead, _) => Err(DomainError::conflict(
            ConflictKind::RoleMismatch,
            "The team-lead role cannot be assigned by invitation",
        )),
        (TeamRole::Mentor, UserRole::Mentor) | (TeamRole::Member, UserRole::Participant) => Ok(()),
        (TeamRole::Mentor, _) => Err(DomainError::conflict(
            ConflictKind::RoleMismatch,
            "Only mentor users can be invited as mentors",
        )),
        (TeamRole::Member, _) => Err(DomainError::conflict(
            ConflictKind::RoleMismatch,
            "Only participants can be invited as team members",
        )),
    }
}

pub fn ensure_invitee(invitee_id: i64, actor_id: i64) -> Result<(), DomainError> {
    if invitee_id == actor_id {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            ForbiddenKind::NotInvitee,
            "Only the invited user may answer this invitation",
        ))
    }
}

pub fn ensure_pending(status: MembershipStatus) -> Result<(), DomainError> {
    match status {
        MembershipStatus::Pending => Ok(()),
        other => Err(DomainError::invalid_state(
            InvalidStateKind::NotPending,
            format!("Invitation is {}, not pending", status_str(other)),
        )),
    }
}

/// Only accepted non-lead memberships can be removed or left.
pub fn ensure_removable(role: TeamRole, status: MembershipStatus) -> Result<(), DomainError> {
    if role == TeamRole::TeamLead {
        return Err(DomainError::invalid_state(
            InvalidStateKind::LeadMembership,
            "The team lead cannot leave or be removed; delete the team instead",
        ));
    }
    if status != MembershipStatus::Accepted {
        return Err(DomainError::invalid_state(
            InvalidStateKind::NotAccepted,
            format!("Membership is {}, not accepted", status_str(status)),
        ));
    }
    Ok(())
}

fn status_str(status: MembershipStatus) -> &'static str {
    match status {
        MembershipStatus::Pending => "pending",
        MembershipStatus::Accepted => "accepted",
        MembershipStatus::Rejected => "rejected",
    }
}
