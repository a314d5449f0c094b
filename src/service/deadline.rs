//! Payment deadline computation and the overdue sweep.
//!
//! SPLIT pairings carry a payment deadline. The sweep walks overdue
//! registrations, attempts the guaranteed second charge where one is armed,
//! and expires the rest. Processor calls happen outside any transaction;
//! the attempt-numbered idempotency key keeps overlapping sweeps from
//! double-charging.

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::DatabaseConnection;

use entity::sea_orm_active_enums::{
    GuaranteeStatus, PaymentMode, PaymentStatus, SlotPaymentStatus, SlotRole, SlotStatus,
    SourceType,
};

use crate::{
    config::Config,
    data::{
        pairing::PairingRepository, payment::PaymentRepository,
        registration::RegistrationRepository,
    },
    error::Error,
    gateway::{ChargeOutcome, PaymentProcessor},
    service::{
        payment::{CreatePayment, PaymentService},
        registration::{ExpireReason, RegistrationService, TerminalOutcome},
    },
};

/// Deadline for the outstanding SPLIT leg: `lead_hours` before the event
/// starts, but never less than `min_grace_hours` from now, and never after
/// the event start itself.
pub fn compute_payment_deadline(
    now: NaiveDateTime,
    starts_at: NaiveDateTime,
    lead_hours: i64,
    min_grace_hours: i64,
) -> NaiveDateTime {
    let candidate = starts_at - Duration::hours(lead_hours);
    let floor = now + Duration::hours(min_grace_hours);

    candidate.max(floor).min(starts_at)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Registrations moved to EXPIRED.
    pub expired: usize,
    /// Second charges captured, confirming the registration.
    pub confirmed: usize,
    /// Rows another actor settled first, or with no chargeable leg yet.
    pub skipped: usize,
}

pub struct DeadlineService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    processor: &'a dyn PaymentProcessor,
}

impl<'a> DeadlineService<'a> {
    /// Creates a new instance of [`DeadlineService`]
    pub fn new(
        db: &'a DatabaseConnection,
        config: &'a Config,
        processor: &'a dyn PaymentProcessor,
    ) -> Self {
        Self {
            db,
            config,
            processor,
        }
    }

    pub async fn sweep(&self, now: NaiveDateTime) -> Result<SweepReport, Error> {
        let overdue = RegistrationRepository::new(self.db)
            .list_overdue(now, self.config.outbox_batch_size)
            .await?;

        let mut report = SweepReport::default();

        for (registration, pairing) in overdue {
            if self.second_charge_applies(&pairing).await? {
                match self.attempt_second_charge(&registration, &pairing).await? {
                    SecondChargeResult::Captured => report.confirmed += 1,
                    SecondChargeResult::Failed => report.expired += 1,
                    SecondChargeResult::Skipped => report.skipped += 1,
                }
            } else {
                match RegistrationService::new(self.db, self.config)
                    .expire(pairing.id, ExpireReason::GraceExpired)
                    .await?
                {
                    TerminalOutcome::Applied => report.expired += 1,
                    TerminalOutcome::AlreadyTerminal => report.skipped += 1,
                }
            }
        }

        tracing::info!(
            expired = report.expired,
            confirmed = report.confirmed,
            skipped = report.skipped,
            "Deadline sweep finished"
        );

        Ok(report)
    }

    /// An armed SPLIT pairing with a filled, unpaid partner slot gets one
    /// automatic charge against the partner's stored payment method before
    /// expiry.
    async fn second_charge_applies(&self, pairing: &entity::pairing::Model) -> Result<bool, Error> {
        if pairing.payment_mode != PaymentMode::Split
            || pairing.guarantee_status != GuaranteeStatus::Armed
        {
            return Ok(false);
        }

        let slots = PairingRepository::new(self.db).get_slots(pairing.id).await?;

        Ok(slots.iter().any(|s| {
            s.role == SlotRole::Partner
                && s.status == SlotStatus::Filled
                && s.payment_status == SlotPaymentStatus::Unpaid
        }))
    }

    async fn attempt_second_charge(
        &self,
        registration: &entity::registration::Model,
        pairing: &entity::pairing::Model,
    ) -> Result<SecondChargeResult, Error> {
        let pairing_repo = PairingRepository::new(self.db);

        // Claiming the attempt counter makes this sweep the sole owner of
        // attempt N; a concurrent sweep loses the claim and moves on.
        let Some(attempt) = pairing_repo.claim_charge_attempt(pairing).await? else {
            tracing::debug!(pairing_id = pairing.id, "Second charge already claimed");
            return Ok(SecondChargeResult::Skipped);
        };

        let charge_key = format!("pairing:{}:second-charge:{attempt}", pairing.id);

        // Pricing comes from the captured captain leg.
        let payments = PaymentRepository::new(self.db)
            .list_by_source(SourceType::Registration, registration.id)
            .await?;
        let Some(captain_leg) = payments.iter().find(|p| {
            p.slot_role == Some(SlotRole::Captain) && p.status == PaymentStatus::Succeeded
        }) else {
            tracing::debug!(
                pairing_id = pairing.id,
                "Armed pairing has no captured captain leg"
            );
            return Ok(SecondChargeResult::Skipped);
        };

        let partner_user_id = pairing_repo
            .get_slots(pairing.id)
            .await?
            .iter()
            .find(|s| s.role == SlotRole::Partner)
            .and_then(|s| s.occupant_user_id);

        let payment_service = PaymentService::new(self.db);
        let payment = payment_service
            .create_payment(CreatePayment {
                source_type: SourceType::Registration,
                source_id: registration.id,
                payer_user_id: partner_user_id,
                slot_role: Some(SlotRole::Partner),
                gross_cents: captain_leg.gross_cents,
                platform_fee_cents: captain_leg.platform_fee_cents,
                currency: captain_leg.currency.clone(),
                idempotency_key: charge_key.clone(),
            })
            .await?;

        let outcome = self
            .processor
            .charge(&payment.id, payment.gross_cents, &charge_key)
            .await;

        match outcome {
            Ok(ChargeOutcome::Succeeded {
                processor_fee_cents,
            }) => {
                payment_service
                    .mark_succeeded(&payment.id, Some(processor_fee_cents))
                    .await?;
                Ok(SecondChargeResult::Captured)
            }
            Ok(ChargeOutcome::Failed { reason }) => {
                tracing::debug!(
                    pairing_id = pairing.id,
                    reason = %reason,
                    "Second charge declined"
                );
                self.fail_second_charge(&payment.id, pairing.id).await?;
                Ok(SecondChargeResult::Failed)
            }
            Err(error) => {
                tracing::error!(
                    pairing_id = pairing.id,
                    error = %error,
                    "Second charge errored"
                );
                self.fail_second_charge(&payment.id, pairing.id).await?;
                Ok(SecondChargeResult::Failed)
            }
        }
    }

    async fn fail_second_charge(&self, payment_id: &str, pairing_id: i32) -> Result<(), Error> {
        PaymentService::new(self.db).mark_failed(payment_id).await?;
        RegistrationService::new(self.db, self.config)
            .expire(pairing_id, ExpireReason::SecondChargeFailed)
            .await?;

        Ok(())
    }
}

enum SecondChargeResult {
    Captured,
    Failed,
    Skipped,
}
