use hackathon_backend::entities::users::{ApprovalStatus, UserRole};
use hackathon_backend::{AppError, ErrorCode};

use crate::support::assertions::assert_code;
use crate::support::harness::harness;

#[tokio::test]
async fn registered_users_start_pending() -> Result<(), AppError> {
    let h = harness().await?;
    let user = h
        .api
        .register_user("Ada", "ada@example.com", UserRole::Participant)
        .await?;

    assert_eq!(user.display_name, "Ada");
    assert_eq!(user.approval_status, ApprovalStatus::Pending);
    Ok(())
}

#[tokio::test]
async fn email_is_unique_ignoring_case() -> Result<(), AppError> {
    let h = harness().await?;
    h.api
        .register_user("Ada", "ada@example.com", UserRole::Participant)
        .await?;

    assert_code(
        h.api
            .register_user("Ada Again", "  ADA@Example.com ", UserRole::Mentor)
            .await,
        ErrorCode::UniqueEmail,
    );
    Ok(())
}

#[tokio::test]
async fn blank_display_name_uses_email_local_part() -> Result<(), AppError> {
    let h = harness().await?;
    let user = h
        .api
        .register_user("  ", "grace.hopper@example.com", UserRole::Jury)
        .await?;
    assert_eq!(user.display_name, "grace.hopper");
    Ok(())
}

#[tokio::test]
async fn approval_changes_are_admin_only() -> Result<(), AppError> {
    let h = harness().await?;
    let user = h.participant("user").await?;
    let other = h.participant("other").await?;

    assert_code(
        h.api
            .set_approval_status(other, user.user_id, ApprovalStatus::Approved)
            .await,
        ErrorCode::AdminRequired,
    );

    let change = h
        .api
        .set_approval_status(h.admin, user.user_id, ApprovalStatus::Approved)
        .await?;
    assert_eq!(change.previous, ApprovalStatus::Pending);
    assert_eq!(change.user.approval_status, ApprovalStatus::Approved);
    Ok(())
}

#[tokio::test]
async fn approval_of_unknown_user() -> Result<(), AppError> {
    let h = harness().await?;
    assert_code(
        h.api
            .set_approval_status(h.admin, 31_337, ApprovalStatus::Approved)
            .await,
        ErrorCode::UserNotFound,
    );
    Ok(())
}
