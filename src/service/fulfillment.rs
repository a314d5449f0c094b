//! Entitlement fulfillment.
//!
//! Converts a succeeded payment into entitlements, one per covered line
//! item. The deterministic dedupe key (purchase, line, index, owner, type)
//! makes fulfillment safe to replay: the Nth run finds the rows the first
//! run created. Revoked entitlements are never resurrected by a replay.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde_json::json;

use entity::sea_orm_active_enums::{
    EntitlementStatus, EntitlementType, PaymentStatus, SlotRole, SlotStatus, SourceType,
};

use crate::{
    data::{
        audit::AuditRepository,
        entitlement::{EntitlementKey, EntitlementRepository},
        pairing::PairingRepository,
        payment::PaymentRepository,
        registration::RegistrationRepository,
    },
    error::Error,
};

#[derive(Debug, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    Fulfilled { created: usize, reactivated: usize },
    /// The payment is not in a fulfillable state; stale outbox operations
    /// land here after a refund already revoked the purchase.
    Skipped { status: PaymentStatus },
    NotFound,
}

#[derive(Debug, PartialEq, Eq)]
pub enum StatusApplication {
    Applied {
        affected: u64,
        to: EntitlementStatus,
    },
    /// The payment status has no entitlement consequence.
    NoTransition,
    NotFound,
}

/// Entitlement consequence of a payment status change, applied to the whole
/// purchase in one batch. The `from` guard is what keeps a REVOKED
/// entitlement from ever returning to ACTIVE.
pub struct EntitlementTransition {
    pub from: &'static [EntitlementStatus],
    pub to: EntitlementStatus,
}

pub fn entitlement_transition(status: PaymentStatus) -> Option<EntitlementTransition> {
    match status {
        PaymentStatus::Disputed => Some(EntitlementTransition {
            from: &[EntitlementStatus::Active],
            to: EntitlementStatus::Suspended,
        }),
        PaymentStatus::Refunded | PaymentStatus::PartialRefund | PaymentStatus::ChargebackLost => {
            Some(EntitlementTransition {
                from: &[EntitlementStatus::Active, EntitlementStatus::Suspended],
                to: EntitlementStatus::Revoked,
            })
        }
        PaymentStatus::ChargebackWon => Some(EntitlementTransition {
            from: &[EntitlementStatus::Suspended],
            to: EntitlementStatus::Active,
        }),
        _ => None,
    }
}

pub struct FulfillmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FulfillmentService<'a> {
    /// Creates a new instance of [`FulfillmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn fulfill_payment(&self, payment_id: &str) -> Result<FulfillmentOutcome, Error> {
        let txn = self.db.begin().await?;

        let Some(payment) = PaymentRepository::new(&txn).get(payment_id).await? else {
            return Ok(FulfillmentOutcome::NotFound);
        };
        if payment.status != PaymentStatus::Succeeded {
            return Ok(FulfillmentOutcome::Skipped {
                status: payment.status,
            });
        }

        let lines = self.resolve_lines(&txn, &payment).await?;

        let entitlements = EntitlementRepository::new(&txn);
        let mut created = 0;
        let mut reactivated = 0;

        for line in lines {
            let key = EntitlementKey {
                purchase_id: payment.id.clone(),
                line_id: line.line_id,
                line_item_index: line.line_item_index,
                owner_key: line.owner_key,
                entitlement_type: EntitlementType::TournamentEntry,
            };

            match entitlements.find_by_key(&key).await? {
                None => {
                    entitlements
                        .create(key, line.owner_user_id, line.event_id)
                        .await?;
                    created += 1;
                }
                Some(existing) if existing.status == EntitlementStatus::Suspended => {
                    entitlements
                        .update_status(existing, EntitlementStatus::Active)
                        .await?;
                    reactivated += 1;
                }
                // ACTIVE is already right; REVOKED stays revoked.
                Some(_) => {}
            }
        }

        if created > 0 || reactivated > 0 {
            AuditRepository::new(&txn)
                .record(
                    "system",
                    "fulfillment.fulfill",
                    "PAYMENT",
                    payment.source_id,
                    json!({
                        "payment_id": payment.id,
                        "created": created,
                        "reactivated": reactivated,
                    }),
                )
                .await?;
        }

        txn.commit().await?;

        Ok(FulfillmentOutcome::Fulfilled {
            created,
            reactivated,
        })
    }

    /// Apply a payment status to every entitlement of the purchase in one
    /// batch, so a multi-line purchase never ends up partially suspended.
    /// Statuses without an entitlement consequence are a no-op.
    pub async fn apply_payment_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
    ) -> Result<StatusApplication, Error> {
        let txn = self.db.begin().await?;

        let Some(payment) = PaymentRepository::new(&txn).get(payment_id).await? else {
            return Ok(StatusApplication::NotFound);
        };
        let Some(transition) = entitlement_transition(status) else {
            return Ok(StatusApplication::NoTransition);
        };

        let affected = EntitlementRepository::new(&txn)
            .set_status_for_purchase(&payment.id, transition.from, transition.to)
            .await?;

        txn.commit().await?;

        Ok(StatusApplication::Applied {
            affected,
            to: transition.to,
        })
    }

    /// The line items a payment covers. A SINGLE registration payment covers
    /// both slots; a SPLIT leg covers only its own slot.
    async fn resolve_lines<C: sea_orm::ConnectionTrait>(
        &self,
        db: &C,
        payment: &entity::payment::Model,
    ) -> Result<Vec<FulfillmentLine>, Error> {
        match payment.source_type {
            SourceType::Registration => {
                let registration = RegistrationRepository::new(db)
                    .get(payment.source_id)
                    .await?
                    .ok_or_else(|| {
                        DbErr::RecordNotFound(format!(
                            "Registration {} not found",
                            payment.source_id
                        ))
                    })?;

                let slots = PairingRepository::new(db)
                    .get_slots(registration.pairing_id)
                    .await?;

                Ok(slots
                    .iter()
                    .filter(|slot| slot.status != SlotStatus::Cancelled)
                    .filter(|slot| match payment.slot_role {
                        Some(role) => slot.role == role,
                        None => true,
                    })
                    .enumerate()
                    .map(|(index, slot)| FulfillmentLine {
                        line_id: slot.id,
                        line_item_index: index as i32,
                        owner_key: owner_key(slot.occupant_user_id, slot.invited_contact.as_deref()),
                        owner_user_id: slot.occupant_user_id,
                        event_id: registration.event_id,
                    })
                    .collect())
            }
            // Ticket orders settle through the same ledger but carry no
            // entitlement lines in this core.
            SourceType::TicketOrder => Ok(Vec::new()),
        }
    }
}

struct FulfillmentLine {
    line_id: i32,
    line_item_index: i32,
    owner_key: String,
    owner_user_id: Option<i32>,
    event_id: i32,
}

/// Stable owner component of the dedupe key. A known account wins over an
/// invited contact; an unclaimed slot gets the `unknown` bucket.
fn owner_key(user_id: Option<i32>, invited_contact: Option<&str>) -> String {
    match (user_id, invited_contact) {
        (Some(id), _) => format!("user:{id}"),
        (None, Some(contact)) => format!("contact:{}", contact.trim().to_lowercase()),
        (None, None) => "unknown".to_string(),
    }
}
