//! Database connection and schema management.

use std::time::Duration;

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database as SeaDatabase, DatabaseConnection, DbErr, Statement,
};
use sea_orm_migration::{MigrationStatus, MigratorTrait};

use crate::config::{Config, DATABASE_CONNECT_TIMEOUT_SECS};

pub mod migrations;

pub use migrations::Migrator;

/// Shared connection pool plus the schema operations the CLI exposes.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

fn connect_options(config: &Config) -> ConnectOptions {
    let mut options = ConnectOptions::new(config.database_url.clone());
    options
        .max_connections(config.database_max_connections)
        .connect_timeout(Duration::from_secs(DATABASE_CONNECT_TIMEOUT_SECS))
        .sqlx_logging(false);
    options
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &Config) -> Result<Self, DbErr> {
        let db = Self::connect_without_migrations(config).await?;

        if let Err(e) = db.run_migrations().await {
            tracing::error!("Failed to run migrations: {}", e);
            return Err(e);
        }

        tracing::info!(
            max_connections = config.database_max_connections,
            "Database connected and schema up to date"
        );
        Ok(db)
    }

    /// Open the pool only. The `migrate` command drives the schema itself.
    pub async fn connect_without_migrations(config: &Config) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(connect_options(config)).await?;
        Ok(Self { connection })
    }

    /// Wrap an already open connection (tests use in-memory SQLite).
    pub fn from_connection(connection: DatabaseConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    /// Owned handle to the pool, for wiring repositories.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    pub async fn run_migrations(&self) -> Result<(), DbErr> {
        Migrator::up(&self.connection, None).await
    }

    /// Undo the most recent migration.
    pub async fn rollback_migration(&self) -> Result<(), DbErr> {
        Migrator::down(&self.connection, Some(1)).await
    }

    /// Every known migration paired with whether it has been applied.
    pub async fn migration_status(&self) -> Result<Vec<(String, bool)>, DbErr> {
        let migrations = Migrator::get_migration_with_status(&self.connection).await?;

        Ok(migrations
            .iter()
            .map(|m| {
                (
                    m.name().to_string(),
                    matches!(m.status(), MigrationStatus::Applied),
                )
            })
            .collect())
    }

    /// Drop every table and re-apply all migrations.
    pub async fn fresh_migrations(&self) -> Result<(), DbErr> {
        Migrator::fresh(&self.connection).await
    }

    /// Round-trip a trivial query; used by the health endpoint.
    pub async fn ping(&self) -> Result<(), DbErr> {
        let backend = self.connection.get_database_backend();
        self.connection
            .execute(Statement::from_string(backend, "SELECT 1"))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn memory() -> Database {
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).sqlx_logging(false);
        let connection = SeaDatabase::connect(options).await.unwrap();
        Database::from_connection(connection)
    }

    #[tokio::test]
    async fn status_tracks_applied_migrations() {
        let db = memory().await;

        let before = db.migration_status().await.unwrap();
        assert_eq!(before.len(), 3);
        assert!(before.iter().all(|(_, applied)| !applied));

        db.run_migrations().await.unwrap();
        let after = db.migration_status().await.unwrap();
        assert!(after.iter().all(|(_, applied)| *applied));

        db.rollback_migration().await.unwrap();
        let rolled_back = db.migration_status().await.unwrap();
        assert!(!rolled_back[2].1);
        assert!(rolled_back[1].1);
    }

    #[tokio::test]
    async fn ping_succeeds_on_a_live_connection() {
        assert!(memory().await.ping().await.is_ok());
    }
}
