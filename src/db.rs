//! SQLite pool and schema migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pragmas applied to every connection handed out by the pool.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub write_ahead_log: bool,
    pub foreign_keys: bool,
    pub busy_timeout: Option<Duration>,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            write_ahead_log: true,
            foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl ConnectionOptions {
    fn pragmas(&self) -> String {
        let mut sql = String::new();
        if self.write_ahead_log {
            sql.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; ");
        }
        if self.foreign_keys {
            sql.push_str("PRAGMA foreign_keys = ON; ");
        }
        if let Some(timeout) = self.busy_timeout {
            sql.push_str(&format!("PRAGMA busy_timeout = {}; ", timeout.as_millis()));
        }
        sql
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        let pragmas = self.pragmas();
        if pragmas.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&pragmas)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the shop database pool.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions::default()))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))
}

/// Brings the schema up to date. Safe to call on every start.
pub fn run_migrations(pool: &DbPool) -> Result<(), String> {
    let mut conn = get_connection(pool).map_err(|e| e.to_string())?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| format!("Failed to run migrations: {e}"))?;
    if !applied.is_empty() {
        log::info!("Applied {} database migration(s)", applied.len());
    }
    Ok(())
}

pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| {
        log::error!("Failed to get connection from pool: {e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pragmas_follow_options() {
        let all = ConnectionOptions::default().pragmas();
        assert!(all.contains("journal_mode = WAL"));
        assert!(all.contains("foreign_keys = ON"));
        assert!(all.contains("busy_timeout = 30000"));

        let none = ConnectionOptions {
            write_ahead_log: false,
            foreign_keys: false,
            busy_timeout: None,
        };
        assert!(none.pragmas().is_empty());
    }
}
