//! Outbox operation definitions for deferred side effects.
//!
//! Cross-aggregate follow-up work (refund execution, waitlist promotion,
//! fulfillment, notification fan-out) is written to the outbox table within
//! the triggering transaction and executed by a separate worker. Payloads are
//! serialized to JSON; dedupe keys are derived from stable business ids so
//! at-least-once delivery stays idempotent.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum OutboxJob {
    /// Execute a refund against the payment processor and record the
    /// reversal. `amount_cents` is `None` for a full refund.
    ExecuteRefund {
        payment_id: String,
        amount_cents: Option<i64>,
        reason: String,
    },
    /// Attempt to promote the oldest pending waitlist entry for a category
    /// after a seat was freed.
    PromoteWaitlist { category_id: i32 },
    /// Convert a succeeded payment into entitlements.
    FulfillPayment { payment_id: String },
    /// Hand a notification to the dispatcher, keyed by the operation's
    /// dedupe string.
    DispatchNotification {
        kind: String,
        user_id: Option<i32>,
        source_type: String,
        source_id: i32,
    },
}

impl OutboxJob {
    pub fn operation_type(&self) -> &'static str {
        match self {
            Self::ExecuteRefund { .. } => "EXECUTE_REFUND",
            Self::PromoteWaitlist { .. } => "PROMOTE_WAITLIST",
            Self::FulfillPayment { .. } => "FULFILL_PAYMENT",
            Self::DispatchNotification { .. } => "DISPATCH_NOTIFICATION",
        }
    }
}

impl fmt::Display for OutboxJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation_type())
    }
}
