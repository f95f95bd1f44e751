//! In-memory SQLite test database
//!
//! Runs the real schema migrations against a private in-memory SQLite
//! database, so repository code can be exercised without Docker.

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;

use crate::seed;

/// Test database wrapper backed by `sqlite::memory:`
///
/// The pool is pinned to a single connection: every new in-memory
/// connection would otherwise see its own empty database.
pub struct TestDatabase {
    pub connection: DatabaseConnection,
    pub connection_string: String,
}

impl TestDatabase {
    /// Create a fresh database with all migrations applied
    ///
    /// ```no_run
    /// use test_utils::TestDatabase;
    ///
    /// # async fn example() {
    /// let db = TestDatabase::new().await;
    /// let user_id = db.create_test_user("Jane", "jane@example.com").await;
    /// # }
    /// ```
    pub async fn new() -> Self {
        let connection_string = "sqlite::memory:".to_string();

        let mut options = ConnectOptions::new(connection_string.clone());
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(3600))
            .sqlx_logging(false);

        let connection = Database::connect(options)
            .await
            .expect("Failed to open in-memory SQLite database");

        Migrator::up(&connection, None)
            .await
            .expect("Failed to run migrations on SQLite");

        tracing::debug!("SQLite test database ready");

        Self {
            connection,
            connection_string,
        }
    }

    /// Get a cloned connection (useful for passing to repositories)
    pub fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Insert a user row and return its generated id
    pub async fn create_test_user(&self, name: &str, email: &str) -> i32 {
        seed::insert_user(&self.connection, name, email).await
    }
}
