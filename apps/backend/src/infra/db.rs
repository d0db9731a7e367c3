use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;
use crate::infra::seed;
use crate::repos::stages::Stage;

/// Connect without running migrations.
///
/// SQLite profiles get a single-connection pool: an in-memory database lives
/// only as long as its connection, and SQLite serializes writers anyway.
pub async fn connect_db(profile: &DbProfile) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile)?;

    let mut options = ConnectOptions::new(database_url);
    options
        .acquire_timeout(Duration::from_secs(30))
        .sqlx_logging(false);
    if profile.is_sqlite() {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(16).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Connect, migrate to the latest schema and make sure the stage catalogue exists.
///
/// Returns the seeded catalogue so the caller can build the Status Directory.
pub async fn bootstrap_db(
    profile: &DbProfile,
) -> Result<(DatabaseConnection, Vec<Stage>), AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    let stages = seed::ensure_stages(&conn).await?;
    info!(
        backend = ?conn.get_database_backend(),
        stages = stages.len(),
        "database ready"
    );
    Ok((conn, stages))
}
