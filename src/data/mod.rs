//! Repositories wrapping the sea-orm entities.
//!
//! Every repository is generic over [`sea_orm::ConnectionTrait`] so the same
//! queries run against a plain connection or inside a transaction. Capacity
//! counts and conditional claims must run on the transaction that gates the
//! write they protect.

pub mod audit;
pub mod category;
pub mod entitlement;
pub mod event;
pub mod ledger;
pub mod outbox;
pub mod pairing;
pub mod payment;
pub mod registration;
pub mod waitlist;
