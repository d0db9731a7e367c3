use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::status_directory::StatusDirectory;
use crate::config::competition::CompetitionConfig;
use crate::services::notifications::Notifier;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    directory: StatusDirectory,
    notifier: Arc<dyn Notifier>,
    competition: CompetitionConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        directory: StatusDirectory,
        notifier: Arc<dyn Notifier>,
        competition: CompetitionConfig,
    ) -> Self {
        Self {
            db,
            directory,
            notifier,
            competition,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn directory(&self) -> &StatusDirectory {
        &self.directory
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn competition(&self) -> CompetitionConfig {
        self.competition
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("directory_version", &self.directory.snapshot().version())
            .field("competition", &self.competition)
            .finish_non_exhaustive()
    }
}
