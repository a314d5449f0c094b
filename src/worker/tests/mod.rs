
use std::sync::Arc;

use chrono::Utc;
use courtside_test_utils::prelude::*;

use crate::{
    config::Config,
    data::outbox::OutboxRepository,
    model::operation::OutboxJob,
    service::tests::mock::{MockDispatcher, MockProcessor},
    worker::{handler::OutboxHandler, runner::OutboxRunner},
};

fn test_config() -> Config {
    Config {
        database_url: String::new(),
        split_second_charge_lead_hours: 24,
        split_min_grace_hours: 2,
        outbox_batch_size: 25,
        outbox_retry_backoff_secs: 60,
        default_max_per_user: 1,
        default_currency: "EUR".to_string(),
    }
}

fn runner_with(
    test: &TestContext,
    processor: Arc<MockProcessor>,
    dispatcher: Arc<MockDispatcher>,
) -> OutboxRunner {
    let config = test_config();
    let handler = OutboxHandler::new(test.db.clone(), config.clone(), processor, dispatcher);
    OutboxRunner::new(test.db.clone(), config, handler)
}

async fn enqueue_job(
    test: &TestContext,
    job: &OutboxJob,
    dedupe_key: &str,
) -> Result<entity::outbox_operation::Model, TestError> {
    let operation = OutboxRepository::new(&test.db)
        .enqueue(
            job.operation_type(),
            dedupe_key,
            None,
            serde_json::to_value(job)?,
            Utc::now().naive_utc(),
        )
        .await?
        .expect("operation enqueued");

    Ok(operation)
}
