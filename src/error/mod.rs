//! Error types for the platform core.
//!
//! Expected business rejections (capacity full, empty waitlist, unknown
//! payment) are not errors; operations return them as typed outcome enums.
//! This tree covers configuration, infrastructure, and integrity failures
//! that abort the surrounding transaction.

pub mod config;

use thiserror::Error;

use crate::error::config::ConfigError;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Invariant violation that should never occur absent a bug, such as a
    /// registration status diverging from its derived slot state or a ledger
    /// failing to net out after a full reversal.
    #[error("Integrity violation: {0}")]
    IntegrityError(String),
    /// Payment processor or notification dispatcher failure. Outbox-driven
    /// work hitting this error is retried with backoff.
    #[error("Gateway failure: {0}")]
    GatewayError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Outbox payload serialization error.
    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
}
