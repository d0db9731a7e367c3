use hackathon_backend::config::competition::CompetitionConfig;
use hackathon_backend::entities::stages::StageType;
use hackathon_backend::entities::team_members::TeamRole;
use hackathon_backend::entities::users::ApprovalStatus;
use hackathon_backend::services::notifications::Notification;
use hackathon_backend::{Actor, AppError, ErrorCode, GatedOperation};

use crate::support::assertions::assert_code;
use crate::support::harness::{harness, harness_with, Harness};

/// A harness already past registration: one approved team closed it.
async fn closed_registration() -> Result<Harness, AppError> {
    let h = harness_with(CompetitionConfig::default().with_activation_threshold(1)).await?;
    h.full_team(ApprovalStatus::Approved).await?;
    Ok(h)
}

#[tokio::test]
async fn catalogue_starts_in_registration() -> Result<(), AppError> {
    let h = harness().await?;

    let stages = h.api.list_stages().await?;
    let types: Vec<StageType> = stages.iter().map(|s| s.stage_type).collect();
    assert_eq!(types, StageType::ALL.to_vec());
    assert_eq!(stages.iter().filter(|s| s.is_active).count(), 1);

    let current = h.api.get_current_stage().await?;
    assert_eq!(current.stage_type, StageType::Registration);
    assert_eq!(
        h.api.state().directory().snapshot().active(),
        Some(StageType::Registration)
    );
    Ok(())
}

#[tokio::test]
async fn registration_closed_is_never_activated_by_hand() -> Result<(), AppError> {
    let h = harness().await?;
    let closed = h.stage_id(StageType::RegistrationClosed);

    assert_code(
        h.api.activate_stage(h.admin, closed).await,
        ErrorCode::AutomaticStage,
    );
    assert!(h
        .api
        .get_available_transitions(StageType::Registration)
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn non_adjacent_jumps_conflict() -> Result<(), AppError> {
    let h = closed_registration().await?;

    for target in [
        StageType::RegistrationClosed,
        StageType::SolutionSubmission,
        StageType::AwardCeremony,
    ] {
        assert_code(
            h.api.activate_stage(h.admin, h.stage_id(target)).await,
            ErrorCode::NonAdjacentStage,
        );
    }
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::RegistrationClosed
    );
    Ok(())
}

#[tokio::test]
async fn activation_is_admin_only_and_needs_a_real_stage() -> Result<(), AppError> {
    let h = closed_registration().await?;
    let participant = h.participant("p").await?;
    let next = h.stage_id(StageType::TaskDistribution);

    assert_code(
        h.api.activate_stage(participant, next).await,
        ErrorCode::AdminRequired,
    );
    assert_code(
        h.api.activate_stage(h.admin, 9_999).await,
        ErrorCode::StageNotFound,
    );
    Ok(())
}

#[tokio::test]
async fn adjacent_activation_flips_exactly_two_rows() -> Result<(), AppError> {
    let mut h = closed_registration().await?;
    h.drain_notifications();
    let version_before = h.api.state().directory().snapshot().version();
    let next = h.stage_id(StageType::TaskDistribution);

    let activation = h.api.activate_stage(h.admin, next).await?;

    assert_eq!(activation.previous.stage_type, StageType::RegistrationClosed);
    assert_eq!(activation.activated.stage_type, StageType::TaskDistribution);
    assert!(activation.activated.is_active);

    let stages = h.api.list_stages().await?;
    let active: Vec<StageType> = stages
        .iter()
        .filter(|s| s.is_active)
        .map(|s| s.stage_type)
        .collect();
    assert_eq!(active, vec![StageType::TaskDistribution]);

    let snapshot = h.api.state().directory().snapshot();
    assert_eq!(snapshot.active(), Some(StageType::TaskDistribution));
    assert_eq!(snapshot.version(), version_before + 1);

    assert_eq!(
        h.drain_notifications(),
        vec![Notification::StageActivated {
            stage_id: next,
            stage_type: StageType::TaskDistribution,
            previous: StageType::RegistrationClosed,
        }]
    );
    Ok(())
}

#[tokio::test]
async fn moving_back_into_registration_closed_is_refused() -> Result<(), AppError> {
    let h = closed_registration().await?;
    h.api
        .activate_stage(h.admin, h.stage_id(StageType::TaskDistribution))
        .await?;

    assert_code(
        h.api
            .activate_stage(h.admin, h.stage_id(StageType::RegistrationClosed))
            .await,
        ErrorCode::AutomaticStage,
    );

    let transitions: Vec<StageType> = h
        .api
        .get_available_transitions(StageType::TaskDistribution)
        .into_iter()
        .map(|e| e.stage_type)
        .collect();
    assert_eq!(transitions, vec![StageType::SolutionSubmission]);
    Ok(())
}

#[tokio::test]
async fn scheduler_walks_the_rest_of_the_competition() -> Result<(), AppError> {
    let h = closed_registration().await?;

    for target in &StageType::ALL[2..] {
        let activation = h.api.scheduled_activate_stage(h.stage_id(*target)).await?;
        assert_eq!(activation.activated.stage_type, *target);
    }
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::AwardCeremony
    );

    // And back one step.
    let back = h
        .api
        .scheduled_activate_stage(h.stage_id(StageType::ResultsPublication))
        .await?;
    assert_eq!(back.previous.stage_type, StageType::AwardCeremony);
    assert_eq!(Actor::system().user_id, Actor::SYSTEM_USER_ID);
    Ok(())
}

#[tokio::test]
async fn stage_gates_follow_the_active_stage() -> Result<(), AppError> {
    let h = harness().await?;
    h.api.ensure_stage_allows(GatedOperation::CreateTeam).await?;
    h.api
        .ensure_stage_allows(GatedOperation::UploadDocument)
        .await?;
    assert_code(
        h.api
            .ensure_stage_allows(GatedOperation::UploadSolution)
            .await,
        ErrorCode::StageMismatch,
    );

    let h = closed_registration().await?;
    let latecomer = h.participant("late").await?;
    assert_code(
        h.api.create_team(latecomer, "Too Late", "-").await,
        ErrorCode::StageMismatch,
    );
    h.api
        .ensure_stage_allows(GatedOperation::UploadDocument)
        .await?;

    h.api
        .activate_stage(h.admin, h.stage_id(StageType::TaskDistribution))
        .await?;
    h.api
        .activate_stage(h.admin, h.stage_id(StageType::SolutionSubmission))
        .await?;
    let stage = h
        .api
        .ensure_stage_allows(GatedOperation::UploadSolution)
        .await?;
    assert_eq!(stage.stage_type, StageType::SolutionSubmission);
    assert_code(
        h.api
            .ensure_stage_allows(GatedOperation::UploadDocument)
            .await,
        ErrorCode::StageMismatch,
    );
    Ok(())
}

#[tokio::test]
async fn invitations_are_frozen_once_registration_closes() -> Result<(), AppError> {
    let h = harness_with(CompetitionConfig::default().with_activation_threshold(1)).await?;
    let lead = h.participant("lead").await?;
    let member = h.participant("member").await?;
    let waiting = h.api.create_team(lead, "Waiting", "-").await?.team;
    let invitation = h
        .api
        .invite_member(lead, waiting.id, member.user_id, TeamRole::Member)
        .await?;

    h.full_team(ApprovalStatus::Approved).await?;

    assert_code(
        h.api.accept_invitation(member, invitation.id).await,
        ErrorCode::StageMismatch,
    );
    assert_code(
        h.api.reject_invitation(member, invitation.id).await,
        ErrorCode::StageMismatch,
    );
    Ok(())
}

#[tokio::test]
async fn admin_may_reopen_registration() -> Result<(), AppError> {
    let h = closed_registration().await?;

    let activation = h
        .api
        .activate_stage(h.admin, h.stage_id(StageType::Registration))
        .await?;

    assert_eq!(activation.previous.stage_type, StageType::RegistrationClosed);
    h.api.ensure_stage_allows(GatedOperation::CreateTeam).await?;
    Ok(())
}

#[tokio::test]
async fn directory_keeps_the_latest_commit_when_installs_arrive_out_of_order(
) -> Result<(), AppError> {
    let h = closed_registration().await?;

    let earlier = h
        .api
        .activate_stage(h.admin, h.stage_id(StageType::TaskDistribution))
        .await?;
    let later = h
        .api
        .activate_stage(h.admin, h.stage_id(StageType::SolutionSubmission))
        .await?;
    assert!(later.activated.activation_seq > earlier.activated.activation_seq);

    // The earlier writer's refresh lands after the later one.
    let directory = h.api.state().directory();
    assert_eq!(directory.install(&earlier.stages), None);

    let snapshot = directory.snapshot();
    assert_eq!(snapshot.active(), Some(StageType::SolutionSubmission));
    assert_eq!(
        snapshot.version(),
        u64::try_from(later.activated.activation_seq).unwrap()
    );
    assert_eq!(
        h.api.get_current_stage().await?.stage_type,
        StageType::SolutionSubmission
    );
    Ok(())
}
