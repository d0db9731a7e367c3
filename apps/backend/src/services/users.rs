use sea_orm::DatabaseTransaction;
use tracing::{debug, info};

use super::registration_trigger::{RegistrationTrigger, TriggerOutcome};
use super::stages::LockedStages;
use crate::config::competition::CompetitionConfig;
use crate::domain::Actor;
use crate::entities::users::{ApprovalStatus, UserRole};
use crate::error::AppError;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};

#[derive(Debug, Clone, PartialEq)]
pub struct ApprovalChange {
    pub user: User,
    pub previous: ApprovalStatus,
    pub trigger: TriggerOutcome,
}

/// Local mirror of the identity provider's user records.
#[derive(Debug, Clone, Copy)]
pub struct UserService {
    config: CompetitionConfig,
}

impl UserService {
    pub fn new(config: CompetitionConfig) -> Self {
        Self { config }
    }

    /// Mirror a new identity record. Approval starts out pending.
    ///
    /// Emails are compared case-insensitively; a blank display name falls
    /// back to the email's local part.
    pub async fn register_user(
        &self,
        txn: &DatabaseTransaction,
        display_name: &str,
        email: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        LockedStages::acquire(txn).await?;

        let email = email.trim().to_lowercase();
        if users::find_by_email(txn, &email).await?.is_some() {
            debug!(email = %Redacted(&email), "email already registered");
            return Err(DomainError::conflict(
                ConflictKind::UniqueEmail,
                "A user with this email already exists",
            )
            .into());
        }

        let display_name = derive_display_name(display_name, &email);
        let user = users::create_user(txn, &display_name, &email, role).await?;
        info!(
            user_id = user.id,
            email = %Redacted(&email),
            ?role,
            "user registered"
        );
        Ok(user)
    }

    /// Record the identity provider's verdict on a user, then recount active teams.
    pub async fn set_approval_status(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        user_id: i64,
        status: ApprovalStatus,
    ) -> Result<ApprovalChange, AppError> {
        actor.ensure_admin()?;
        let locked = LockedStages::acquire(txn).await?;

        let current = users::require_user(txn, user_id).await?;
        let previous = current.approval_status;
        let user = if previous == status {
            current
        } else {
            users::set_approval_status(txn, user_id, status).await?
        };
        info!(user_id, from = ?previous, to = ?status, "approval status set");

        let trigger = RegistrationTrigger::new(self.config)
            .evaluate(txn, &locked)
            .await?;
        Ok(ApprovalChange {
            user,
            previous,
            trigger,
        })
    }
}

fn derive_display_name(display_name: &str, email: &str) -> String {
    let trimmed = display_name.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local.to_string(),
        _ => email.to_string(),
    }
}
