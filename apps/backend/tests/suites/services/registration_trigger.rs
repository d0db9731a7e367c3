use hackathon_backend::config::competition::CompetitionConfig;
use hackathon_backend::entities::stages::StageType;
use hackathon_backend::entities::team_members::TeamRole;
use hackathon_backend::entities::users::ApprovalStatus;
use hackathon_backend::services::notifications::Notification;
use hackathon_backend::services::registration_trigger::TriggerOutcome;
use hackathon_backend::{AppError, TeamStatus};

use crate::support::harness::{harness, harness_with};

fn registration_closed(notifications: &[Notification]) -> Vec<Vec<i64>> {
    notifications
        .iter()
        .filter_map(|n| match n {
            Notification::RegistrationClosed { active_team_ids } => Some(active_team_ids.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn twentieth_active_team_closes_registration_once() -> Result<(), AppError> {
    let mut h = harness().await?;

    // Complete but not yet approved; becomes the 21st active team later.
    let straggler = h.full_team(ApprovalStatus::Pending).await?;

    let mut active_ids = Vec::new();
    for _ in 0..19 {
        active_ids.push(h.full_team(ApprovalStatus::Approved).await?.team_id);
    }
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::Registration
    );
    assert!(registration_closed(&h.drain_notifications()).is_empty());

    active_ids.push(h.full_team(ApprovalStatus::Approved).await?.team_id);
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::RegistrationClosed
    );
    assert_eq!(
        h.api.state().directory().snapshot().active(),
        Some(StageType::RegistrationClosed)
    );

    let fired = registration_closed(&h.drain_notifications());
    assert_eq!(fired, vec![active_ids.clone()]);

    // The straggler turning active is a no-op for the stage.
    let who = std::iter::once(straggler.lead)
        .chain([straggler.mentor])
        .chain(straggler.members.iter().copied());
    let mut last = None;
    for actor in who {
        last = Some(
            h.api
                .set_approval_status(h.admin, actor.user_id, ApprovalStatus::Approved)
                .await?
                .trigger,
        );
    }
    assert_eq!(
        last,
        Some(TriggerOutcome::Idle {
            stage: StageType::RegistrationClosed
        })
    );
    assert_eq!(
        h.api.get_team_status(straggler.team_id).await?.status,
        TeamStatus::Active
    );
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::RegistrationClosed
    );
    assert!(registration_closed(&h.drain_notifications()).is_empty());
    Ok(())
}

#[tokio::test]
async fn approving_the_last_pending_member_fires_in_the_same_call() -> Result<(), AppError> {
    let mut h = harness_with(CompetitionConfig::default().with_activation_threshold(2)).await?;
    let already_active = h.full_team(ApprovalStatus::Approved).await?;
    let team = h.nearly_approved_team(1).await?;

    let report = h.api.get_team_status(team.team_id).await?;
    assert_eq!(report.status, TeamStatus::Pending);
    assert_eq!(report.details.members_status.approved, 3);
    assert_eq!(report.details.members_status.pending, 1);
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::Registration
    );
    h.drain_notifications();

    let last = team.members[3];
    let change = h
        .api
        .set_approval_status(h.admin, last.user_id, ApprovalStatus::Approved)
        .await?;

    assert!(change.trigger.fired());
    assert_eq!(
        h.api.get_team_status(team.team_id).await?.status,
        TeamStatus::Active
    );
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::RegistrationClosed
    );
    assert_eq!(
        registration_closed(&h.drain_notifications()),
        vec![vec![already_active.team_id, team.team_id]]
    );
    Ok(())
}

#[tokio::test]
async fn departures_report_the_recount() -> Result<(), AppError> {
    let h = harness_with(CompetitionConfig::default().with_activation_threshold(3)).await?;
    let team = h.full_team(ApprovalStatus::Approved).await?;

    let departure = h.api.leave_team(team.members[0]).await?;
    assert_eq!(
        departure.trigger,
        TriggerOutcome::BelowThreshold { active_teams: 0 }
    );

    let replacement = h.participant("replacement").await?;
    h.set_approval(replacement, ApprovalStatus::Approved).await?;
    let membership_id = h
        .join(team.lead, team.team_id, replacement, TeamRole::Member)
        .await?;

    let removal = h
        .api
        .remove_member(team.lead, team.team_id, membership_id)
        .await?;
    assert_eq!(
        removal.trigger,
        TriggerOutcome::BelowThreshold { active_teams: 0 }
    );

    let outcome = h.api.delete_team(team.lead, team.team_id).await?;
    assert_eq!(outcome, TriggerOutcome::BelowThreshold { active_teams: 0 });
    Ok(())
}

#[tokio::test]
async fn need_update_drops_a_team_from_the_count() -> Result<(), AppError> {
    let h = harness_with(CompetitionConfig::default().with_activation_threshold(5)).await?;
    let a = h.full_team(ApprovalStatus::Approved).await?;
    h.full_team(ApprovalStatus::Approved).await?;

    let change = h
        .api
        .set_approval_status(h.admin, a.mentor.user_id, ApprovalStatus::NeedUpdate)
        .await?;
    assert_eq!(
        change.trigger,
        TriggerOutcome::BelowThreshold { active_teams: 1 }
    );
    Ok(())
}
