use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the catalog and credential stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database configuration: {0}")]
    Config(String),

    #[error("{0}")]
    NotFound(String),

    #[error("actor with the same name, gender, and birth date already exists")]
    DuplicateActor,

    #[error("movie with the same title, description, rating, and release date already exists")]
    DuplicateMovie,

    #[error("username '{0}' is already taken")]
    DuplicateUser(String),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DatabaseError {
    pub fn not_found(message: impl Into<String>) -> Self {
        DatabaseError::NotFound(message.into())
    }

    /// Replace a unique-constraint violation with a domain error; any other
    /// failure is kept as is.
    pub fn on_unique_violation(err: sqlx::Error, replacement: DatabaseError) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => replacement,
            _ => DatabaseError::Sqlx(err),
        }
    }

    /// Same as `on_unique_violation` for an error already lifted into `DatabaseError`.
    pub fn unique_as(self, replacement: DatabaseError) -> Self {
        match self {
            DatabaseError::Sqlx(err) => Self::on_unique_violation(err, replacement),
            other => other,
        }
    }
}

/// Owns pool construction, migrations and liveness checks for the catalog database
pub struct DatabaseManager;

impl DatabaseManager {
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = config
            .connection_string()
            .map_err(|e| DatabaseError::Config(e.to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!(
            "Created database pool for {}:{}/{} (max {} connections)",
            config.host, config.port, config.dbname, config.max_connections
        );
        Ok(pool)
    }

    pub async fn migrate(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::migrate!("./migrations").run(pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
