//! Payment settlement.
//!
//! Processor events (captures, failures, refunds, disputes) arrive at least
//! once and in any order. Every transition here is conditional on the current
//! status, writes its ledger entries under deterministic causation ids, and
//! keeps dependent state (registration slots, entitlements) in the same
//! transaction, so replays settle into the same end state.

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

use entity::sea_orm_active_enums::{LedgerEntryType, PaymentStatus, SlotRole, SourceType};

use crate::{
    data::{
        audit::AuditRepository,
        entitlement::EntitlementRepository,
        ledger::LedgerRepository,
        payment::{NewPayment, PaymentRepository},
        registration::RegistrationRepository,
    },
    error::Error,
    model::operation::OutboxJob,
    service::{
        enqueue_outbox, fulfillment::entitlement_transition, ledger::LedgerService,
        registration::apply_slot_payment,
    },
};

/// Statuses a capture or failure report may still act on.
const SETTLEABLE: [PaymentStatus; 3] = [
    PaymentStatus::Created,
    PaymentStatus::RequiresAction,
    PaymentStatus::Processing,
];

pub struct CreatePayment {
    pub source_type: SourceType,
    pub source_id: i32,
    pub payer_user_id: Option<i32>,
    pub slot_role: Option<SlotRole>,
    pub gross_cents: i64,
    pub platform_fee_cents: i64,
    pub currency: String,
    pub idempotency_key: String,
}

#[derive(Debug)]
pub enum SettlementOutcome {
    Applied { payment: entity::payment::Model },
    /// The payment is already past the requested transition; the event is a
    /// replay or arrived out of order.
    Ignored { status: PaymentStatus },
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargebackOutcome {
    Won,
    Lost,
}

pub struct PaymentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentService<'a> {
    /// Creates a new instance of [`PaymentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a payment intent, idempotent on the caller's key: a repeated
    /// call returns the existing payment instead of minting a second charge.
    pub async fn create_payment(
        &self,
        input: CreatePayment,
    ) -> Result<entity::payment::Model, Error> {
        let txn = self.db.begin().await?;

        let repo = PaymentRepository::new(&txn);

        if let Some(existing) = repo.get_by_idempotency_key(&input.idempotency_key).await? {
            return Ok(existing);
        }

        let payment = repo
            .create(NewPayment {
                id: Uuid::new_v4().to_string(),
                source_type: input.source_type,
                source_id: input.source_id,
                payer_user_id: input.payer_user_id,
                slot_role: input.slot_role,
                gross_cents: input.gross_cents,
                platform_fee_cents: input.platform_fee_cents,
                currency: input.currency,
                idempotency_key: input.idempotency_key,
            })
            .await?;

        txn.commit().await?;

        Ok(payment)
    }

    /// Capture confirmation: settle the ledger, mark the paying slot, queue
    /// fulfillment. Only pre-terminal payments transition; a replayed capture
    /// is ignored.
    pub async fn mark_succeeded(
        &self,
        payment_id: &str,
        processor_fee_cents: Option<i64>,
    ) -> Result<SettlementOutcome, Error> {
        let txn = self.db.begin().await?;

        let repo = PaymentRepository::new(&txn);

        let Some(payment) = repo.get(payment_id).await? else {
            return Ok(SettlementOutcome::NotFound);
        };
        if !SETTLEABLE.contains(&payment.status) {
            return Ok(SettlementOutcome::Ignored {
                status: payment.status,
            });
        }

        let mut payment = repo.update_status(payment, PaymentStatus::Succeeded).await?;

        let ledger = LedgerService::new(&txn);
        ledger.record_settlement(&payment).await?;
        if let Some(fee) = processor_fee_cents {
            payment = repo.set_processor_fee(payment, fee).await?;
            ledger.record_processor_fee(&payment, fee).await?;
        }

        if payment.source_type == SourceType::Registration {
            if let Some(registration) = RegistrationRepository::new(&txn)
                .get(payment.source_id)
                .await?
            {
                // SINGLE payments carry no slot role; the captain's charge
                // covers the pairing.
                let role = payment.slot_role.unwrap_or(SlotRole::Captain);
                apply_slot_payment(&txn, registration.pairing_id, role).await?;
            }
        }

        enqueue_outbox(
            &txn,
            &OutboxJob::FulfillPayment {
                payment_id: payment.id.clone(),
            },
            &format!("payment:{}:fulfill", payment.id),
            Some(format!("payment:{}", payment.id)),
        )
        .await?;

        AuditRepository::new(&txn)
            .record(
                "processor",
                "payment.succeeded",
                "PAYMENT",
                payment.source_id,
                json!({ "payment_id": payment.id, "processor_fee_cents": processor_fee_cents }),
            )
            .await?;

        txn.commit().await?;

        Ok(SettlementOutcome::Applied { payment })
    }

    /// Charge failure. Terminal for the payment; the registration side
    /// decides separately whether to expire the pairing.
    pub async fn mark_failed(&self, payment_id: &str) -> Result<SettlementOutcome, Error> {
        let txn = self.db.begin().await?;

        let repo = PaymentRepository::new(&txn);

        let Some(payment) = repo.get(payment_id).await? else {
            return Ok(SettlementOutcome::NotFound);
        };
        if !SETTLEABLE.contains(&payment.status) {
            return Ok(SettlementOutcome::Ignored {
                status: payment.status,
            });
        }

        let payment = repo.update_status(payment, PaymentStatus::Failed).await?;

        txn.commit().await?;

        Ok(SettlementOutcome::Applied { payment })
    }

    /// Record an executed refund: status, reversal entries, entitlement
    /// revocation. `refund_ref` is the stable reference for this refund and
    /// keeps a replayed report from double-reversing.
    pub async fn record_refund(
        &self,
        payment_id: &str,
        amount_cents: Option<i64>,
        refund_ref: &str,
    ) -> Result<SettlementOutcome, Error> {
        let txn = self.db.begin().await?;

        let repo = PaymentRepository::new(&txn);

        let Some(payment) = repo.get(payment_id).await? else {
            return Ok(SettlementOutcome::NotFound);
        };
        if !matches!(
            payment.status,
            PaymentStatus::Succeeded | PaymentStatus::PartialRefund
        ) {
            return Ok(SettlementOutcome::Ignored {
                status: payment.status,
            });
        }

        let to = match amount_cents {
            Some(_) => PaymentStatus::PartialRefund,
            None => PaymentStatus::Refunded,
        };
        let payment = repo.update_status(payment, to).await?;

        LedgerService::new(&txn)
            .record_refund(&payment, amount_cents, refund_ref)
            .await?;

        if let Some(transition) = entitlement_transition(payment.status) {
            EntitlementRepository::new(&txn)
                .set_status_for_purchase(&payment.id, transition.from, transition.to)
                .await?;
        }

        AuditRepository::new(&txn)
            .record(
                "processor",
                "payment.refund",
                "PAYMENT",
                payment.source_id,
                json!({
                    "payment_id": payment.id,
                    "amount_cents": amount_cents,
                    "refund_ref": refund_ref,
                }),
            )
            .await?;

        txn.commit().await?;

        Ok(SettlementOutcome::Applied { payment })
    }

    /// A dispute was opened: hold the payment, book the dispute fee, suspend
    /// the entitlements until the dispute resolves.
    pub async fn record_dispute(
        &self,
        payment_id: &str,
        dispute_fee_cents: i64,
    ) -> Result<SettlementOutcome, Error> {
        let txn = self.db.begin().await?;

        let repo = PaymentRepository::new(&txn);

        let Some(payment) = repo.get(payment_id).await? else {
            return Ok(SettlementOutcome::NotFound);
        };
        if payment.status != PaymentStatus::Succeeded {
            return Ok(SettlementOutcome::Ignored {
                status: payment.status,
            });
        }

        let payment = repo.update_status(payment, PaymentStatus::Disputed).await?;

        LedgerService::new(&txn)
            .record_dispute_fee(&payment, dispute_fee_cents)
            .await?;

        if let Some(transition) = entitlement_transition(payment.status) {
            EntitlementRepository::new(&txn)
                .set_status_for_purchase(&payment.id, transition.from, transition.to)
                .await?;
        }

        AuditRepository::new(&txn)
            .record(
                "processor",
                "payment.dispute",
                "PAYMENT",
                payment.source_id,
                json!({ "payment_id": payment.id, "dispute_fee_cents": dispute_fee_cents }),
            )
            .await?;

        txn.commit().await?;

        Ok(SettlementOutcome::Applied { payment })
    }

    /// Dispute resolution. A win reinstates suspended entitlements and books
    /// the returned dispute fee; a loss books the chargeback and revokes.
    /// Revoked entitlements never resurrect, in either direction.
    pub async fn record_chargeback(
        &self,
        payment_id: &str,
        outcome: ChargebackOutcome,
    ) -> Result<SettlementOutcome, Error> {
        let txn = self.db.begin().await?;

        let repo = PaymentRepository::new(&txn);

        let Some(payment) = repo.get(payment_id).await? else {
            return Ok(SettlementOutcome::NotFound);
        };
        if payment.status != PaymentStatus::Disputed {
            return Ok(SettlementOutcome::Ignored {
                status: payment.status,
            });
        }

        let ledger = LedgerService::new(&txn);
        let entitlements = EntitlementRepository::new(&txn);

        let payment = match outcome {
            ChargebackOutcome::Won => {
                let payment = repo
                    .update_status(payment, PaymentStatus::ChargebackWon)
                    .await?;

                let dispute_fees: i64 = LedgerRepository::new(&txn)
                    .list_for_payment(&payment.id)
                    .await?
                    .iter()
                    .filter(|e| e.entry_type == LedgerEntryType::DisputeFee)
                    .map(|e| e.amount_cents)
                    .sum();
                ledger
                    .record_dispute_fee_reversal(&payment, -dispute_fees)
                    .await?;

                if let Some(transition) = entitlement_transition(payment.status) {
                    entitlements
                        .set_status_for_purchase(&payment.id, transition.from, transition.to)
                        .await?;
                }

                payment
            }
            ChargebackOutcome::Lost => {
                let payment = repo
                    .update_status(payment, PaymentStatus::ChargebackLost)
                    .await?;

                ledger.record_chargeback(&payment).await?;

                if let Some(transition) = entitlement_transition(payment.status) {
                    entitlements
                        .set_status_for_purchase(&payment.id, transition.from, transition.to)
                        .await?;
                }

                payment
            }
        };

        AuditRepository::new(&txn)
            .record(
                "processor",
                "payment.chargeback",
                "PAYMENT",
                payment.source_id,
                json!({
                    "payment_id": payment.id,
                    "outcome": match outcome {
                        ChargebackOutcome::Won => "WON",
                        ChargebackOutcome::Lost => "LOST",
                    },
                }),
            )
            .await?;

        txn.commit().await?;

        Ok(SettlementOutcome::Applied { payment })
    }
}
