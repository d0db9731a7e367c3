use thiserror::Error;

use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, InvalidStateKind, NotFoundKind,
};
use crate::errors::ErrorCode;

/// Error surfaced by every public entrypoint of the core.
///
/// The first four variants are local, synchronous and non-retryable.
/// `PersistenceFailure` is the only fatal condition; the transaction that
/// produced it has been rolled back.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Forbidden: {detail}")]
    Forbidden { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Invalid state: {detail}")]
    InvalidState { code: ErrorCode, detail: String },
    #[error("Persistence failure: {detail}")]
    PersistenceFailure { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound { code, .. }
            | AppError::Forbidden { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::InvalidState { code, .. }
            | AppError::PersistenceFailure { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::NotFound { detail, .. }
            | AppError::Forbidden { detail, .. }
            | AppError::Conflict { detail, .. }
            | AppError::InvalidState { detail, .. }
            | AppError::PersistenceFailure { detail, .. }
            | AppError::Config { detail }
            | AppError::Internal { detail } => detail,
        }
    }

    /// Only persistence failures are worth retrying, and only for idempotent reads.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::PersistenceFailure { .. })
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn forbidden(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Forbidden {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn invalid_state(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::InvalidState {
            code,
            detail: detail.into(),
        }
    }

    pub fn persistence(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            code,
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => ErrorCode::UserNotFound,
                    NotFoundKind::Team => ErrorCode::TeamNotFound,
                    NotFoundKind::Membership => ErrorCode::MembershipNotFound,
                    NotFoundKind::Stage => ErrorCode::StageNotFound,
                    NotFoundKind::ActiveStage => ErrorCode::NoActiveStage,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Forbidden(kind, detail) => {
                let code = match kind {
                    ForbiddenKind::NotTeamLead => ErrorCode::NotTeamLead,
                    ForbiddenKind::NotInvitee => ErrorCode::NotInvitee,
                    ForbiddenKind::NotAdmin => ErrorCode::AdminRequired,
                    ForbiddenKind::UserRole => ErrorCode::UserRoleForbidden,
                };
                AppError::forbidden(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::MentorTaken => ErrorCode::MentorTaken,
                    ConflictKind::RosterFull => ErrorCode::RosterFull,
                    ConflictKind::DuplicateInvitation => ErrorCode::DuplicateInvitation,
                    ConflictKind::AlreadyInTeam => ErrorCode::AlreadyInTeam,
                    ConflictKind::RoleMismatch => ErrorCode::RoleMismatch,
                    ConflictKind::NonAdjacentStage => ErrorCode::NonAdjacentStage,
                    ConflictKind::AutomaticStage => ErrorCode::AutomaticStage,
                    ConflictKind::StageMismatch => ErrorCode::StageMismatch,
                    ConflictKind::UniqueEmail => ErrorCode::UniqueEmail,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::InvalidState(kind, detail) => {
                let code = match kind {
                    InvalidStateKind::NotPending => ErrorCode::InvitationNotPending,
                    InvalidStateKind::NotAccepted => ErrorCode::MembershipNotAccepted,
                    InvalidStateKind::LeadMembership => ErrorCode::LeadMembership,
                    _ => ErrorCode::InvalidState,
                };
                AppError::invalid_state(code, detail)
            }
            DomainError::Infra(kind, detail) => {
                let code = match kind {
                    InfraErrorKind::Timeout => ErrorCode::DbTimeout,
                    InfraErrorKind::DbUnavailable => ErrorCode::DbUnavailable,
                    InfraErrorKind::DataCorruption => ErrorCode::DataCorruption,
                    _ => ErrorCode::PersistenceFailure,
                };
                AppError::persistence(code, detail)
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        AppError::from(crate::infra::db_errors::map_db_err(e))
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}
