pub mod deadline {
    /// Cron expression for the payment deadline sweep.
    /// Runs every 5 minutes at the top of the minute.
    pub const CRON_EXPRESSION: &str = "0 */5 * * * *";
}

pub mod outbox {
    /// Cron expression for the outbox drain.
    /// Runs every 30 seconds.
    pub const CRON_EXPRESSION: &str = "*/30 * * * * *";
}
