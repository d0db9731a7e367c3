//! DTOs for memberships_sea adapter.

use crate::entities::team_members::{MembershipStatus, TeamRole};

/// DTO for creating a team membership row.
#[derive(Debug, Clone)]
pub struct MembershipCreate {
    pub team_id: i64,
    pub user_id: i64,
    pub role: TeamRole,
    pub status: MembershipStatus,
}

impl MembershipCreate {
    /// A fresh invitation.
    pub fn invitation(team_id: i64, user_id: i64, role: TeamRole) -> Self {
        Self {
            team_id,
            user_id,
            role,
            status: MembershipStatus::Pending,
        }
    }

    /// The leader's own membership, accepted on creation.
    pub fn team_lead(team_id: i64, user_id: i64) -> Self {
        Self {
            team_id,
            user_id,
            role: TeamRole::TeamLead,
            status: MembershipStatus::Accepted,
        }
    }
}

/// DTO for moving a membership to a new status, optionally changing its role.
#[derive(Debug, Clone)]
pub struct MembershipStatusUpdate {
    pub id: i64,
    pub status: MembershipStatus,
    pub role: Option<TeamRole>,
}

impl MembershipStatusUpdate {
    pub fn new(id: i64, status: MembershipStatus) -> Self {
        Self {
            id,
            status,
            role: None,
        }
    }

    pub fn with_role(mut self, role: TeamRole) -> Self {
        self.role = Some(role);
        self
    }
}
