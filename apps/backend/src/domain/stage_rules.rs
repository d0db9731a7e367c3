//! Stage progression and stage-gated operations.

use crate::entities::stages::StageType;
use crate::errors::domain::{ConflictKind, DomainError};

/// Operations that may only run while certain stages are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedOperation {
    CreateTeam,
    InviteMember,
    /// Accepting or rejecting an invitation
    RespondToInvitation,
    UploadDocument,
    UploadSolution,
}

impl GatedOperation {
    pub fn allowed_stages(self) -> &'static [StageType] {
        match self {
            GatedOperation::CreateTeam
            | GatedOperation::InviteMember
            | GatedOperation::RespondToInvitation => &[StageType::Registration],
            GatedOperation::UploadDocument => {
                &[StageType::Registration, StageType::RegistrationClosed]
            }
            GatedOperation::UploadSolution => &[StageType::SolutionSubmission],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GatedOperation::CreateTeam => "create_team",
            GatedOperation::InviteMember => "invite_member",
            GatedOperation::RespondToInvitation => "respond_to_invitation",
            GatedOperation::UploadDocument => "upload_document",
            GatedOperation::UploadSolution => "upload_solution",
        }
    }
}

pub fn ensure_allows(operation: GatedOperation, active: StageType) -> Result<(), DomainError> {
    if operation.allowed_stages().contains(&active) {
        return Ok(());
    }
    Err(DomainError::conflict(
        ConflictKind::StageMismatch,
        format!(
            "Operation {} is not available during stage {}",
            operation.as_str(),
            active.display_name()
        ),
    ))
}

pub fn is_adjacent(from_order: i32, to_order: i32) -> bool {
    (from_order - to_order).abs() == 1
}

/// `RegistrationClosed` is entered only by the automatic transition.
pub fn is_manually_reachable(stage_type: StageType) -> bool {
    stage_type != StageType::RegistrationClosed
}

/// Validate an administrator's jump from the current stage to the target.
pub fn check_manual_activation(
    current_order: i32,
    target_type: StageType,
    target_order: i32,
) -> Result<(), DomainError> {
    if !is_adjacent(current_order, target_order) {
        return Err(DomainError::conflict(
            ConflictKind::NonAdjacentStage,
            format!(
                "Cannot move from stage #{current_order} to stage #{target_order}: stages must be adjacent"
            ),
        ));
    }
    if !is_manually_reachable(target_type) {
        return Err(DomainError::conflict(
            ConflictKind::AutomaticStage,
            format!(
                "{} is entered automatically once enough teams are active",
                target_type.display_name()
            ),
        ));
    }
    Ok(())
}
