//! Error codes for the hackathon backend.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All error codes are SCREAMING_SNAKE_CASE and are what the transport
//! layer shows to clients.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authorization
    Forbidden,
    /// Only the team leader may do this
    NotTeamLead,
    /// Only the invited user may do this
    NotInvitee,
    /// Only administrators may do this
    AdminRequired,
    /// The actor's user role cannot do this
    UserRoleForbidden,

    // Resource Not Found
    UserNotFound,
    TeamNotFound,
    MembershipNotFound,
    StageNotFound,
    /// No stage is flagged active
    NoActiveStage,
    NotFound,

    // Invariant Conflicts
    MentorTaken,
    RosterFull,
    DuplicateInvitation,
    AlreadyInTeam,
    RoleMismatch,
    NonAdjacentStage,
    /// Stage can only be entered by the automatic transition
    AutomaticStage,
    StageMismatch,
    UniqueEmail,
    Conflict,

    // Ineligible source state
    InvitationNotPending,
    MembershipNotAccepted,
    LeadMembership,
    InvalidState,

    // System Errors
    PersistenceFailure,
    DbUnavailable,
    DbTimeout,
    DataCorruption,
    ConfigError,
    Internal,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",
            Self::NotTeamLead => "NOT_TEAM_LEAD",
            Self::NotInvitee => "NOT_INVITEE",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::UserRoleForbidden => "USER_ROLE_FORBIDDEN",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::MembershipNotFound => "MEMBERSHIP_NOT_FOUND",
            Self::StageNotFound => "STAGE_NOT_FOUND",
            Self::NoActiveStage => "NO_ACTIVE_STAGE",
            Self::NotFound => "NOT_FOUND",

            Self::MentorTaken => "MENTOR_TAKEN",
            Self::RosterFull => "ROSTER_FULL",
            Self::DuplicateInvitation => "DUPLICATE_INVITATION",
            Self::AlreadyInTeam => "ALREADY_IN_TEAM",
            Self::RoleMismatch => "ROLE_MISMATCH",
            Self::NonAdjacentStage => "NON_ADJACENT_STAGE",
            Self::AutomaticStage => "AUTOMATIC_STAGE",
            Self::StageMismatch => "STAGE_MISMATCH",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::InvitationNotPending => "INVITATION_NOT_PENDING",
            Self::MembershipNotAccepted => "MEMBERSHIP_NOT_ACCEPTED",
            Self::LeadMembership => "LEAD_MEMBERSHIP",
            Self::InvalidState => "INVALID_STATE",

            Self::PersistenceFailure => "PERSISTENCE_FAILURE",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
