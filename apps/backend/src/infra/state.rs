use std::sync::Arc;

use crate::config::competition::CompetitionConfig;
use crate::config::db::DbProfile;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::notifications::{Notifier, TracingNotifier};
use crate::state::app_state::AppState;
use crate::state::status_directory::StatusDirectory;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    db_profile: DbProfile,
    notifier: Arc<dyn Notifier>,
    competition: CompetitionConfig,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            db_profile: DbProfile::InMemory,
            notifier: Arc::new(TracingNotifier),
            competition: CompetitionConfig::default(),
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = profile;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_competition(mut self, competition: CompetitionConfig) -> Self {
        self.competition = competition;
        self
    }

    /// Connect, migrate, seed and load the Status Directory.
    pub async fn build(self) -> Result<AppState, AppError> {
        let (conn, stages) = bootstrap_db(&self.db_profile).await?;
        let directory = StatusDirectory::new();
        directory.install(&stages);
        Ok(AppState::new(
            conn,
            directory,
            self.notifier,
            self.competition,
        ))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
