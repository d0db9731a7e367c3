use hackathon_backend::entities::team_members::{MembershipStatus, TeamRole};
use hackathon_backend::{AppError, ErrorCode};

use crate::support::assertions::assert_code;
use crate::support::harness::harness;

#[tokio::test]
async fn create_team_makes_the_creator_lead() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;

    let created = h.api.create_team(lead, "Borrow Checkers", "No data races").await?;

    assert_eq!(created.team.leader_id, lead.user_id);
    assert_eq!(created.lead.role, TeamRole::TeamLead);
    assert_eq!(created.lead.status, MembershipStatus::Accepted);

    let members = h.api.list_team_members(created.team.id).await?;
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].user_id, lead.user_id);
    Ok(())
}

#[tokio::test]
async fn create_team_requires_participant() -> Result<(), AppError> {
    let h = harness().await?;
    let mentor = h.mentor("mentor").await?;

    assert_code(
        h.api.create_team(mentor, "Mentors Only", "-").await,
        ErrorCode::UserRoleForbidden,
    );
    Ok(())
}

#[tokio::test]
async fn create_team_rejects_user_already_in_a_team() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    h.api.create_team(lead, "First", "-").await?;

    assert_code(
        h.api.create_team(lead, "Second", "-").await,
        ErrorCode::AlreadyInTeam,
    );
    Ok(())
}

#[tokio::test]
async fn create_team_withdraws_pending_invitations() -> Result<(), AppError> {
    let h = harness().await?;
    let other_lead = h.participant("other").await?;
    let team = h.api.create_team(other_lead, "Other", "-").await?.team;
    let user = h.participant("user").await?;
    h.api
        .invite_member(other_lead, team.id, user.user_id, TeamRole::Member)
        .await?;

    let created = h.api.create_team(user, "Own Team", "-").await?;

    assert_eq!(created.withdrawn_invitations, 1);
    assert!(h.api.list_pending_invitations(user).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn remove_member_deletes_row_and_allows_reinvite() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let member = h.participant("member").await?;
    let team = h.api.create_team(lead, "Team", "-").await?.team;
    let membership_id = h.join(lead, team.id, member, TeamRole::Member).await?;

    let departure = h.api.remove_member(lead, team.id, membership_id).await?;
    assert_eq!(departure.membership.user_id, member.user_id);
    assert_eq!(h.api.list_team_members(team.id).await?.len(), 1);

    let again = h
        .api
        .invite_member(lead, team.id, member.user_id, TeamRole::Member)
        .await?;
    assert_ne!(again.id, membership_id);
    assert_eq!(again.status, MembershipStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn remove_member_guards() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let member = h.participant("member").await?;
    let created = h.api.create_team(lead, "Team", "-").await?;
    let team_id = created.team.id;
    let pending = h
        .api
        .invite_member(lead, team_id, member.user_id, TeamRole::Member)
        .await?;

    assert_code(
        h.api.remove_member(member, team_id, pending.id).await,
        ErrorCode::NotTeamLead,
    );
    assert_code(
        h.api.remove_member(lead, team_id, pending.id).await,
        ErrorCode::MembershipNotAccepted,
    );
    assert_code(
        h.api.remove_member(lead, team_id, created.lead.id).await,
        ErrorCode::LeadMembership,
    );

    let elsewhere = h.participant("elsewhere").await?;
    let other_team = h.api.create_team(elsewhere, "Elsewhere", "-").await?;
    assert_code(
        h.api.remove_member(lead, team_id, other_team.lead.id).await,
        ErrorCode::MembershipNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn leave_team() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let member = h.participant("member").await?;
    let team = h.api.create_team(lead, "Team", "-").await?.team;
    h.join(lead, team.id, member, TeamRole::Member).await?;

    assert_code(h.api.leave_team(lead).await, ErrorCode::LeadMembership);

    let departure = h.api.leave_team(member).await?;
    assert_eq!(departure.membership.team_id, team.id);

    assert_code(h.api.leave_team(member).await, ErrorCode::MembershipNotFound);
    Ok(())
}

#[tokio::test]
async fn mentor_can_leave_one_of_several_teams() -> Result<(), AppError> {
    let h = harness().await?;
    let mentor = h.mentor("mentor").await?;
    let lead_a = h.participant("lead-a").await?;
    let lead_b = h.participant("lead-b").await?;
    let team_a = h.api.create_team(lead_a, "A", "-").await?.team;
    let team_b = h.api.create_team(lead_b, "B", "-").await?.team;

    h.join(lead_a, team_a.id, mentor, TeamRole::Mentor).await?;
    h.join(lead_b, team_b.id, mentor, TeamRole::Mentor).await?;

    h.api.leave_mentorship(mentor, team_a.id).await?;

    assert!(!h.api.get_team_status(team_a.id).await?.details.has_mentor);
    assert!(h.api.get_team_status(team_b.id).await?.details.has_mentor);
    assert_code(
        h.api.leave_mentorship(mentor, team_a.id).await,
        ErrorCode::MembershipNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn delete_team_is_leader_only_and_drops_memberships() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let member = h.participant("member").await?;
    let team = h.api.create_team(lead, "Team", "-").await?.team;
    h.join(lead, team.id, member, TeamRole::Member).await?;

    assert_code(h.api.delete_team(member, team.id).await, ErrorCode::NotTeamLead);

    h.api.delete_team(lead, team.id).await?;

    assert_code(h.api.get_team_status(team.id).await, ErrorCode::TeamNotFound);
    // Both users are free to form a new team.
    h.api.create_team(member, "Phoenix", "-").await?;
    h.api.create_team(lead, "Phoenix II", "-").await?;
    Ok(())
}

#[tokio::test]
async fn set_team_logo_is_leader_only() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let member = h.participant("member").await?;
    let team = h.api.create_team(lead, "Team", "-").await?.team;
    h.join(lead, team.id, member, TeamRole::Member).await?;

    assert_code(
        h.api
            .set_team_logo(member, team.id, Some("logos/x.png".into()))
            .await,
        ErrorCode::NotTeamLead,
    );

    let updated = h
        .api
        .set_team_logo(lead, team.id, Some("logos/team.png".into()))
        .await?;
    assert_eq!(updated.logo_ref.as_deref(), Some("logos/team.png"));

    let cleared = h.api.set_team_logo(lead, team.id, None).await?;
    assert_eq!(cleared.logo_ref, None);
    Ok(())
}

#[tokio::test]
async fn leaders_see_only_the_teams_they_lead() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let other_lead = h.participant("other-lead").await?;
    let member = h.participant("member").await?;

    let team = h.api.create_team(lead, "Lifetimes", "-").await?.team;
    h.api.create_team(other_lead, "Traits", "-").await?;
    h.join(lead, team.id, member, TeamRole::Member).await?;

    let led: Vec<i64> = h
        .api
        .list_teams_for_leader(lead)
        .await?
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(led, vec![team.id]);
    assert!(h.api.list_teams_for_leader(member).await?.is_empty());

    h.api.delete_team(lead, team.id).await?;
    assert!(h.api.list_teams_for_leader(lead).await?.is_empty());
    Ok(())
}
