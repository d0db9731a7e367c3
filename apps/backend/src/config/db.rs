use std::env;
use std::path::PathBuf;

use crate::error::AppError;

/// Database profile enum for different environments
#[derive(Debug, Clone, PartialEq)]
pub enum DbProfile {
    /// Production database profile (`DATABASE_URL`)
    Prod,
    /// Test database profile (`TEST_DATABASE_URL`) - enforces safety rules
    Test,
    /// Private in-memory SQLite database, one per connection pool
    InMemory,
    /// SQLite database file, created on first connect
    SqliteFile(PathBuf),
}

impl DbProfile {
    pub fn is_sqlite(&self) -> bool {
        matches!(self, DbProfile::InMemory | DbProfile::SqliteFile(_))
    }
}

/// Resolve the connection URL for a profile.
pub fn db_url(profile: &DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("DATABASE_URL"),
        DbProfile::Test => {
            let url = must_var("TEST_DATABASE_URL")?;
            validate_test_database_url(&url)?;
            Ok(url)
        }
        DbProfile::InMemory => Ok("sqlite::memory:".to_string()),
        DbProfile::SqliteFile(path) => Ok(format!("sqlite://{}?mode=rwc", path.display())),
    }
}

/// Validates that a test database URL targets a database with name ending in "_test"
fn validate_test_database_url(database_url: &str) -> Result<(), AppError> {
    let Some((scheme_and_host, db_name)) = database_url.rsplit_once('/') else {
        return Err(AppError::config(format!(
            "Invalid database URL format: '{database_url}'"
        )));
    };
    if !scheme_and_host.contains("://") || scheme_and_host.ends_with('/') {
        return Err(AppError::config(format!(
            "Invalid database URL format: '{database_url}'"
        )));
    }

    let db_name = db_name.split('?').next().unwrap_or(db_name);
    if !db_name.ends_with("_test") {
        return Err(AppError::config(format!(
            "Test profile requires database name to end with '_test', but got: '{db_name}'"
        )));
    }
    Ok(())
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}
