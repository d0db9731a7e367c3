// Unit tests for error mapping - pure domain logic without database dependencies
use std::collections::HashSet;

use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, InvalidStateKind, NotFoundKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_conflicts() {
    let mentor = DomainError::conflict(ConflictKind::MentorTaken, "mentor taken");
    let app: AppError = mentor.into();
    assert_eq!(app.code().as_str(), "MENTOR_TAKEN");
    assert!(matches!(app, AppError::Conflict { .. }));

    let unique = DomainError::conflict(ConflictKind::UniqueEmail, "email exists");
    let app: AppError = unique.into();
    assert_eq!(app.code().as_str(), "UNIQUE_EMAIL");

    // Generic conflict fallback
    let other = DomainError::conflict(
        ConflictKind::Other("ForeignKey".to_string()),
        "generic conflict",
    );
    let app: AppError = other.into();
    assert_eq!(app.code().as_str(), "CONFLICT");
    assert_eq!(app.detail(), "generic conflict");
}

#[test]
fn maps_not_found() {
    let nf = DomainError::not_found(NotFoundKind::ActiveStage, "no active stage");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "NO_ACTIVE_STAGE");
    assert!(matches!(app, AppError::NotFound { .. }));
}

#[test]
fn maps_forbidden() {
    let f = DomainError::forbidden(ForbiddenKind::NotInvitee, "not yours");
    let app: AppError = f.into();
    assert_eq!(app.code(), ErrorCode::NotInvitee);
    assert!(!app.is_retryable());
}

#[test]
fn maps_invalid_state() {
    let s = DomainError::invalid_state(InvalidStateKind::LeadMembership, "lead stays");
    let app: AppError = s.into();
    assert_eq!(app.code(), ErrorCode::LeadMembership);
    assert!(matches!(app, AppError::InvalidState { .. }));
}

#[test]
fn maps_infra() {
    let t = DomainError::infra(InfraErrorKind::Timeout, "timeout");
    let app: AppError = t.into();
    assert_eq!(app.code().as_str(), "DB_TIMEOUT");
    assert!(matches!(app, AppError::PersistenceFailure { .. }));

    let corrupt = DomainError::infra(InfraErrorKind::DataCorruption, "two active stages");
    let app: AppError = corrupt.into();
    assert_eq!(app.code(), ErrorCode::DataCorruption);
    assert!(app.is_retryable());
}

#[test]
fn config_and_internal_carry_fixed_codes() {
    assert_eq!(AppError::config("bad").code(), ErrorCode::ConfigError);
    assert_eq!(AppError::internal("oops").code(), ErrorCode::Internal);
}

#[test]
fn error_code_strings_are_unique() {
    let codes = [
        ErrorCode::Forbidden,
        ErrorCode::NotTeamLead,
        ErrorCode::NotInvitee,
        ErrorCode::AdminRequired,
        ErrorCode::UserRoleForbidden,
        ErrorCode::UserNotFound,
        ErrorCode::TeamNotFound,
        ErrorCode::MembershipNotFound,
        ErrorCode::StageNotFound,
        ErrorCode::NoActiveStage,
        ErrorCode::NotFound,
        ErrorCode::MentorTaken,
        ErrorCode::RosterFull,
        ErrorCode::DuplicateInvitation,
        ErrorCode::AlreadyInTeam,
        ErrorCode::RoleMismatch,
        ErrorCode::NonAdjacentStage,
        ErrorCode::AutomaticStage,
        ErrorCode::StageMismatch,
        ErrorCode::UniqueEmail,
        ErrorCode::Conflict,
        ErrorCode::InvitationNotPending,
        ErrorCode::MembershipNotAccepted,
        ErrorCode::LeadMembership,
        ErrorCode::InvalidState,
        ErrorCode::PersistenceFailure,
        ErrorCode::DbUnavailable,
        ErrorCode::DbTimeout,
        ErrorCode::DataCorruption,
        ErrorCode::ConfigError,
        ErrorCode::Internal,
    ];
    let strings: HashSet<&str> = codes.iter().map(|c| c.as_str()).collect();
    assert_eq!(strings.len(), codes.len());
    assert!(strings
        .iter()
        .all(|s| s.chars().all(|c| c.is_ascii_uppercase() || c == '_')));
}
