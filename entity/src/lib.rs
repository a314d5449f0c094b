pub mod prelude;

pub mod audit_record;
pub mod category;
pub mod entitlement;
pub mod event;
pub mod ledger_entry;
pub mod outbox_operation;
pub mod pairing;
pub mod pairing_slot;
pub mod payment;
pub mod registration;
pub mod sea_orm_active_enums;
pub mod waitlist_entry;
