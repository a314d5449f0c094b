use crate::error::config::ConfigError;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Hours before event start at which the partner leg's second charge is
    /// attempted for SPLIT pairings.
    pub split_second_charge_lead_hours: i64,
    /// Minimum grace window granted to a freshly created SPLIT pairing even
    /// when the event is imminent.
    pub split_min_grace_hours: i64,
    pub outbox_batch_size: u64,
    pub outbox_retry_backoff_secs: i64,
    /// Default number of categories a user may hold active registrations in
    /// per event, when the category does not override it.
    pub default_max_per_user: i32,
    /// ISO 4217 currency for registrations created without an explicit one,
    /// such as waitlist promotions.
    pub default_currency: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            split_second_charge_lead_hours: parse_or("SPLIT_SECOND_CHARGE_LEAD_HOURS", 24)?,
            split_min_grace_hours: parse_or("SPLIT_MIN_GRACE_HOURS", 2)?,
            outbox_batch_size: parse_or("OUTBOX_BATCH_SIZE", 25)?,
            outbox_retry_backoff_secs: parse_or("OUTBOX_RETRY_BACKOFF_SECS", 60)?,
            default_max_per_user: parse_or("DEFAULT_MAX_PER_USER", 1)?,
            default_currency: std::env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "EUR".to_string()),
        })
    }
}

fn require(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
}

fn parse_or<T: std::str::FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("could not parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}
