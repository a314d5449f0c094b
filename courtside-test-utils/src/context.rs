//! Test context structure and utilities.
//!
//! The `TestContext` returned by `TestBuilder` wraps an in-memory SQLite
//! database plus fixture helpers for inserting platform records during
//! test execution.

use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::error::TestError;

/// Test context structure returned by `TestBuilder`.
///
/// Most tests should create this via [`TestBuilder`](crate::TestBuilder)
/// rather than constructing it directly.
///
/// ```ignore
/// let test = TestBuilder::new().with_platform_tables().build().await?;
///
/// let event = test.events().insert_event(starts_at, None).await?;
/// let payment = test.finance().insert_payment("pay_1", ...).await?;
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext { db })
    }

    /// Create database tables from schema statements.
    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }
}
