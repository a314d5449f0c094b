
mod payment;
mod registration;
mod waitlist;

use chrono::{Duration, Utc};
use courtside_test_utils::prelude::*;

use crate::config::Config;

use mock::{MockDispatcher, MockProcessor};

fn starts_in_days(days: i64) -> chrono::NaiveDateTime {
    Utc::now().naive_utc() + Duration::days(days)
}

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
