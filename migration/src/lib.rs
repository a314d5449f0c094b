pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_event_table;
mod m20260815_000002_create_category_table;
mod m20260815_000003_create_pairing_table;
mod m20260815_000004_create_pairing_slot_table;
mod m20260815_000005_create_registration_table;
mod m20260815_000006_create_waitlist_entry_table;
mod m20260815_000007_create_payment_table;
mod m20260815_000008_create_ledger_entry_table;
mod m20260815_000009_create_entitlement_table;
mod m20260815_000010_create_outbox_operation_table;
mod m20260815_000011_create_audit_record_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_event_table::Migration),
            Box::new(m20260815_000002_create_category_table::Migration),
            Box::new(m20260815_000003_create_pairing_table::Migration),
            Box::new(m20260815_000004_create_pairing_slot_table::Migration),
            Box::new(m20260815_000005_create_registration_table::Migration),
            Box::new(m20260815_000006_create_waitlist_entry_table::Migration),
            Box::new(m20260815_000007_create_payment_table::Migration),
            Box::new(m20260815_000008_create_ledger_entry_table::Migration),
            Box::new(m20260815_000009_create_entitlement_table::Migration),
            Box::new(m20260815_000010_create_outbox_operation_table::Migration),
            Box::new(m20260815_000011_create_audit_record_table::Migration),
        ]
    }
}
