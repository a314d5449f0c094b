//! Cron-driven background processing.
//!
//! Two recurring jobs keep the platform moving without any inbound request:
//! the deadline sweep expires or second-charges overdue SPLIT pairings, and
//! the outbox drain executes deferred side effects. Both jobs are idempotent,
//! so overlapping runs after a slow tick are harmless.

pub mod config;

use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    config::Config,
    error::Error,
    gateway::{NotificationDispatcher, PaymentProcessor},
    service::deadline::DeadlineService,
    worker::{handler::OutboxHandler, runner::OutboxRunner},
};

pub struct Scheduler {
    db: DatabaseConnection,
    config: Config,
    processor: Arc<dyn PaymentProcessor>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`]
    pub async fn new(
        db: DatabaseConnection,
        config: Config,
        processor: Arc<dyn PaymentProcessor>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            db,
            config,
            processor,
            dispatcher,
            sched,
        })
    }

    /// Registers the deadline sweep and outbox drain jobs and starts the
    /// scheduler. Jobs run on their cron expressions until shutdown.
    pub async fn start(self) -> Result<(), Error> {
        let db = self.db.clone();
        let config = self.config.clone();
        let processor = Arc::clone(&self.processor);

        self.sched
            .add(Job::new_async(
                config::deadline::CRON_EXPRESSION,
                move |_, _| {
                    let db = db.clone();
                    let config = config.clone();
                    let processor = Arc::clone(&processor);

                    Box::pin(async move {
                        let service = DeadlineService::new(&db, &config, processor.as_ref());
                        if let Err(e) = service.sweep(Utc::now().naive_utc()).await {
                            tracing::error!("Error running deadline sweep: {:?}", e);
                        }
                    })
                },
            )?)
            .await?;

        let runner = Arc::new(OutboxRunner::new(
            self.db.clone(),
            self.config.clone(),
            OutboxHandler::new(
                self.db.clone(),
                self.config.clone(),
                Arc::clone(&self.processor),
                Arc::clone(&self.dispatcher),
            ),
        ));

        self.sched
            .add(Job::new_async(
                config::outbox::CRON_EXPRESSION,
                move |_, _| {
                    let runner = Arc::clone(&runner);

                    Box::pin(async move {
                        if let Err(e) = runner.drain().await {
                            tracing::error!("Error draining outbox: {:?}", e);
                        }
                    })
                },
            )?)
            .await?;

        self.sched.start().await?;

        Ok(())
    }
}
