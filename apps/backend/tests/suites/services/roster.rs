use hackathon_backend::entities::team_members::{MembershipStatus, TeamRole};
use hackathon_backend::{AppError, ErrorCode};

use crate::support::assertions::assert_code;
use crate::support::harness::harness;

#[tokio::test]
async fn fourth_acceptance_closes_the_roster() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let team = h.api.create_team(lead, "Full House", "-").await?.team;

    let mut candidates = Vec::new();
    for _ in 0..5 {
        let user = h.participant("candidate").await?;
        let invitation = h
            .api
            .invite_member(lead, team.id, user.user_id, TeamRole::Member)
            .await?;
        candidates.push((user, invitation.id));
    }

    for (user, membership_id) in &candidates[..3] {
        let acceptance = h.api.accept_invitation(*user, *membership_id).await?;
        assert_eq!(acceptance.force_rejected, 0);
    }
    let (fourth, fourth_id) = candidates[3];
    let acceptance = h.api.accept_invitation(fourth, fourth_id).await?;
    assert_eq!(acceptance.force_rejected, 1);

    let (fifth, fifth_id) = candidates[4];
    assert_code(
        h.api.accept_invitation(fifth, fifth_id).await,
        ErrorCode::RosterFull,
    );

    let members = h.api.list_team_members(team.id).await?;
    let accepted_regulars = members
        .iter()
        .filter(|m| m.role == TeamRole::Member && m.status == MembershipStatus::Accepted)
        .count();
    assert_eq!(accepted_regulars, 4);
    let fifth_row = members
        .iter()
        .find(|m| m.id == fifth_id)
        .expect("fifth invitation row");
    assert_eq!(fifth_row.status, MembershipStatus::Rejected);
    Ok(())
}

#[tokio::test]
async fn full_roster_refuses_new_member_invitations() -> Result<(), AppError> {
    let h = harness().await?;
    let lead = h.participant("lead").await?;
    let team = h.api.create_team(lead, "Full", "-").await?.team;
    for _ in 0..4 {
        let user = h.participant("member").await?;
        h.join(lead, team.id, user, TeamRole::Member).await?;
    }

    let late = h.participant("late").await?;
    assert_code(
        h.api
            .invite_member(lead, team.id, late.user_id, TeamRole::Member)
            .await,
        ErrorCode::RosterFull,
    );

    // A mentor slot is still open.
    let mentor = h.mentor("mentor").await?;
    h.api
        .invite_member(lead, team.id, mentor.user_id, TeamRole::Mentor)
        .await?;
    Ok(())
}
