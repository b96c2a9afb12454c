//! Store diagnostics.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::database::Db;

const LIST_TABLES_SQL: &str =
    "SELECT tablename FROM pg_catalog.pg_tables WHERE schemaname = 'public' ORDER BY tablename";

#[derive(Debug, Error)]
pub enum DiagnosticsError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

/// A snapshot of the connected store, for the diagnostic endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStatus {
    pub tables: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PgDiagnosticsService {
    db: Db,
}

impl PgDiagnosticsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DiagnosticsService for PgDiagnosticsService {
    async fn database_status(&self) -> Result<DatabaseStatus, DiagnosticsError> {
        let mut tx = self.db.begin().await?;

        let tables: Vec<(String,)> = sqlx::query_as(LIST_TABLES_SQL).fetch_all(&mut *tx).await?;

        tx.commit().await?;

        Ok(DatabaseStatus {
            tables: tables.into_iter().map(|(name,)| name).collect(),
        })
    }
}

#[automock]
#[async_trait]
pub trait DiagnosticsService: Send + Sync {
    /// Probe the store and report what it can see.
    async fn database_status(&self) -> Result<DatabaseStatus, DiagnosticsError>;
}
