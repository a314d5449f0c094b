//! Outbox drain loop.
//!
//! Claims due operations one at a time and runs them through the handler.
//! Failures reschedule with linear backoff until the attempt budget runs
//! out, then the operation parks as FAILED for operator attention.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::{config::Config, data::outbox::OutboxRepository, error::Error, worker::handler::OutboxHandler};

const MAX_OUTBOX_ATTEMPTS: i32 = 10;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub completed: usize,
    pub retried: usize,
    pub failed: usize,
    /// Operations another worker claimed between listing and claiming.
    pub skipped: usize,
}

pub struct OutboxRunner {
    db: DatabaseConnection,
    config: Config,
    handler: OutboxHandler,
}

impl OutboxRunner {
    /// Creates a new instance of [`OutboxRunner`]
    pub fn new(db: DatabaseConnection, config: Config, handler: OutboxHandler) -> Self {
        Self {
            db,
            config,
            handler,
        }
    }

    pub async fn drain(&self) -> Result<DrainReport, Error> {
        let repo = OutboxRepository::new(&self.db);
        let now = Utc::now().naive_utc();

        let due = repo.list_due(now, self.config.outbox_batch_size).await?;

        let mut report = DrainReport::default();

        for operation in due {
            if !repo.claim(&operation).await? {
                report.skipped += 1;
                continue;
            }
            let attempts = operation.attempts + 1;

            match self.handler.handle(&operation).await {
                Ok(()) => {
                    repo.mark_completed(operation.id).await?;
                    report.completed += 1;
                }
                Err(error) => {
                    tracing::error!(
                        operation_id = operation.id,
                        dedupe_key = %operation.dedupe_key,
                        attempts,
                        error = %error,
                        "Outbox operation failed"
                    );

                    if attempts >= MAX_OUTBOX_ATTEMPTS {
                        repo.mark_failed(operation.id, &error.to_string()).await?;
                        report.failed += 1;
                    } else {
                        let run_after = Utc::now().naive_utc()
                            + Duration::seconds(
                                self.config.outbox_retry_backoff_secs * i64::from(attempts),
                            );
                        repo.reschedule(operation.id, &error.to_string(), run_after)
                            .await?;
                        report.retried += 1;
                    }
                }
            }
        }

        if report != DrainReport::default() {
            tracing::debug!(
                completed = report.completed,
                retried = report.retried,
                failed = report.failed,
                skipped = report.skipped,
                "Outbox drain finished"
            );
        }

        Ok(report)
    }
}
