//! Declarative test builder for Phase 1 setup.
//!
//! This module provides the `TestBuilder` API for configuring test environments
//! before execution. Table creation is queued and executed during the final
//! `build()` call; record fixtures are inserted afterwards through the
//! `TestContext` accessor helpers since their primary keys are generated.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_platform_tables: bool,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_platform_tables: false,
        }
    }

    /// Add every platform table to the test database.
    ///
    /// Creates the full registration and settlement schema: Event, Category,
    /// Pairing, PairingSlot, Registration, WaitlistEntry, Payment, LedgerEntry,
    /// Entitlement, OutboxOperation, and AuditRecord.
    pub fn with_platform_tables(mut self) -> Self {
        self.include_platform_tables = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, executed during
    /// `build()`. Chain multiple calls to add multiple tables.
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Build the test setup by creating all configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment ready for use
    /// - `Err(TestError::DbErr)` - Database connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let setup = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_platform_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::Event),
                schema.create_table_from_entity(entity::prelude::Category),
                schema.create_table_from_entity(entity::prelude::Pairing),
                schema.create_table_from_entity(entity::prelude::PairingSlot),
                schema.create_table_from_entity(entity::prelude::Registration),
                schema.create_table_from_entity(entity::prelude::WaitlistEntry),
                schema.create_table_from_entity(entity::prelude::Payment),
                schema.create_table_from_entity(entity::prelude::LedgerEntry),
                schema.create_table_from_entity(entity::prelude::Entitlement),
                schema.create_table_from_entity(entity::prelude::OutboxOperation),
                schema.create_table_from_entity(entity::prelude::AuditRecord),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
