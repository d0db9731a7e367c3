//! Derived team status.
//!
//! A team's status is a pure function of its accepted memberships and the
//! approval status of each member's user. Nothing here is stored.

use serde::Serialize;

use crate::entities::team_members::TeamRole;
use crate::entities::users::ApprovalStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamStatus {
    /// Lead, mentor or a regular member is missing
    Incomplete,
    /// Complete, some approvals outstanding
    Pending,
    /// Complete, at least one member must update their profile
    NeedsUpdate,
    /// Complete and fully approved
    Active,
    /// Accepted rows break the single-lead/single-mentor invariant
    Invalid,
}

/// One accepted membership as seen by the status function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterMember {
    pub role: TeamRole,
    pub approval: ApprovalStatus,
}

impl RosterMember {
    pub fn new(role: TeamRole, approval: ApprovalStatus) -> Self {
        Self { role, approval }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MemberApprovalCounts {
    pub approved: usize,
    pub pending: usize,
    pub need_update: usize,
}

impl MemberApprovalCounts {
    fn record(&mut self, approval: ApprovalStatus) {
        match approval {
            ApprovalStatus::Approved => self.approved += 1,
            ApprovalStatus::Pending => self.pending += 1,
            ApprovalStatus::NeedUpdate => self.need_update += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusDetails {
    pub total_members: usize,
    pub regular_members_count: usize,
    pub has_mentor: bool,
    pub mentor_status: Option<ApprovalStatus>,
    pub has_team_leader: bool,
    pub team_leader_status: Option<ApprovalStatus>,
    pub members_status: MemberApprovalCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamStatusReport {
    pub status: TeamStatus,
    pub can_participate: bool,
    pub details: StatusDetails,
}

/// Compute the composite status of one team's accepted roster.
pub fn evaluate(roster: &[RosterMember], roster_size: usize) -> TeamStatusReport {
    let leads: Vec<ApprovalStatus> = approvals_with_role(roster, TeamRole::TeamLead);
    let mentors: Vec<ApprovalStatus> = approvals_with_role(roster, TeamRole::Mentor);
    let members: Vec<ApprovalStatus> = approvals_with_role(roster, TeamRole::Member);

    let mut members_status = MemberApprovalCounts::default();
    for approval in &members {
        members_status.record(*approval);
    }

    let details = StatusDetails {
        total_members: roster.len(),
        regular_members_count: members.len(),
        has_mentor: !mentors.is_empty(),
        mentor_status: mentors.first().copied(),
        has_team_leader: !leads.is_empty(),
        team_leader_status: leads.first().copied(),
        members_status,
    };

    let status = if leads.len() > 1 || mentors.len() > 1 {
        TeamStatus::Invalid
    } else if leads.is_empty() || mentors.is_empty() || members.len() != roster_size {
        TeamStatus::Incomplete
    } else {
        let all = leads.iter().chain(&mentors).chain(&members);
        aggregate_approvals(all)
    };

    let can_participate = status == TeamStatus::Active
        && details.regular_members_count == roster_size
        && details.has_team_leader
        && details.has_mentor;

    TeamStatusReport {
        status,
        can_participate,
        details,
    }
}

fn approvals_with_role(roster: &[RosterMember], role: TeamRole) -> Vec<ApprovalStatus> {
    roster
        .iter()
        .filter(|m| m.role == role)
        .map(|m| m.approval)
        .collect()
}

fn aggregate_approvals<'a>(approvals: impl Iterator<Item = &'a ApprovalStatus>) -> TeamStatus {
    let mut any_need_update = false;
    let mut any_pending = false;
    for approval in approvals {
        match approval {
            ApprovalStatus::Approved => {}
            ApprovalStatus::NeedUpdate => any_need_update = true,
            ApprovalStatus::Pending => any_pending = true,
        }
    }
    if any_need_update {
        TeamStatus::NeedsUpdate
    } else if any_pending {
        TeamStatus::Pending
    } else {
        TeamStatus::Active
    }
}
