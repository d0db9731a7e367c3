//! Domain-level error type used across services and adapters.
//!
//! This error type is transport- and DB-agnostic. Public entrypoints return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Entities that can be missing
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    User,
    Team,
    Membership,
    Stage,
    ActiveStage,
    Other(String),
}

/// Why the actor may not perform the operation
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ForbiddenKind {
    /// Operation reserved for the team's leader
    NotTeamLead,
    /// Operation reserved for the invited user
    NotInvitee,
    /// Operation reserved for administrators
    NotAdmin,
    /// Actor's user role cannot perform this operation
    UserRole,
}

/// Invariant violations
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Team already has an accepted mentor
    MentorTaken,
    /// Team already has the full number of regular members
    RosterFull,
    /// A pending or accepted membership exists for the (team, user) pair
    DuplicateInvitation,
    /// User already holds an accepted non-mentor membership
    AlreadyInTeam,
    /// Invitation role does not fit the invitee's user role
    RoleMismatch,
    /// Stage jump is not to an adjacent stage
    NonAdjacentStage,
    /// Stage is only reachable through the automatic transition
    AutomaticStage,
    /// Active stage does not allow the operation
    StageMismatch,
    UniqueEmail,
    Other(String),
}

/// Operation attempted from an ineligible source state
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidStateKind {
    /// Membership is not pending
    NotPending,
    /// Membership is not accepted
    NotAccepted,
    /// The team-lead membership cannot be removed or left
    LeadMembership,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Actor lacks the required role
    Forbidden(ForbiddenKind, String),
    /// Invariant violation
    Conflict(ConflictKind, String),
    /// Ineligible source state
    InvalidState(InvalidStateKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Forbidden(kind, d) => write!(f, "forbidden {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::InvalidState(kind, d) => write!(f, "invalid state {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn forbidden(kind: ForbiddenKind, detail: impl Into<String>) -> Self {
        Self::Forbidden(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn invalid_state(kind: InvalidStateKind, detail: impl Into<String>) -> Self {
        Self::InvalidState(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}
