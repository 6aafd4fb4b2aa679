//! Database connection primitives shared by the server and tests.

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use serde::Deserialize;
use thiserror::Error;

/// Shared connection handle alias.
pub type DbPool = DatabaseConnection;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingUrl,
    #[error(transparent)]
    Connect(#[from] sea_orm::DbErr),
}

pub type DbResult<T> = Result<T, DbError>;

/// Environment-driven database settings.
#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseSettings {
    url: Option<String>,
}

impl DatabaseSettings {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL").ok(),
        }
    }

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    pub fn database_url(&self) -> DbResult<&str> {
        self.url.as_deref().ok_or(DbError::MissingUrl)
    }
}

/// Open a connection pool against the configured database.
///
/// In-memory SQLite is pinned to a single connection; each connection to
/// `sqlite::memory:` would otherwise get its own empty database.
pub async fn connect(settings: &DatabaseSettings) -> DbResult<DbPool> {
    let url = settings.database_url()?;
    let mut options = ConnectOptions::new(url.to_string());
    if url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    }
    let pool = Database::connect(options).await?;
    Ok(pool)
}
