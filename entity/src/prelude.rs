pub use super::audit_record::Entity as AuditRecord;
pub use super::category::Entity as Category;
pub use super::entitlement::Entity as Entitlement;
pub use super::event::Entity as Event;
pub use super::ledger_entry::Entity as LedgerEntry;
pub use super::outbox_operation::Entity as OutboxOperation;
pub use super::pairing::Entity as Pairing;
pub use super::pairing_slot::Entity as PairingSlot;
pub use super::payment::Entity as Payment;
pub use super::registration::Entity as Registration;
pub use super::waitlist_entry::Entity as WaitlistEntry;
