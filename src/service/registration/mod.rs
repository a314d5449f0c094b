//! Registration state machine.
//!
//! Owns the lifecycle of a pairing (two player slots) and its derived
//! registration status. Every operation runs in one short transaction scoped
//! to the pairing; cross-aggregate follow-up work (refund execution, waitlist
//! promotion, notification fan-out) is written to the outbox inside that
//! transaction and executed by the worker.

pub mod derive;

use chrono::Utc;
use rand::{distr::Alphanumeric, Rng};
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};
use serde_json::json;

use entity::sea_orm_active_enums::{
    GuaranteeStatus, JoinMode, PaymentMode, PaymentStatus, RegistrationStatus, SlotPaymentStatus,
    SlotRole, SlotStatus, SourceType,
};

use crate::{
    config::Config,
    data::{
        audit::AuditRepository,
        category::CategoryRepository,
        event::EventRepository,
        pairing::{NewPairing, PairingRepository},
        payment::PaymentRepository,
        registration::RegistrationRepository,
    },
    error::Error,
    model::{operation::OutboxJob, outcome::Rejection},
    service::{capacity::CapacityChecker, deadline::compute_payment_deadline, enqueue_outbox},
};

const INVITE_TOKEN_LEN: usize = 32;

pub struct CreateRegistration {
    pub event_id: i32,
    pub category_id: i32,
    pub user_id: i32,
    pub payment_mode: PaymentMode,
    pub join_mode: JoinMode,
    pub invited_contact: Option<String>,
    pub currency: String,
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created {
        pairing: entity::pairing::Model,
        registration: entity::registration::Model,
    },
    Rejected(Rejection),
}

#[derive(Debug)]
pub enum AcceptInviteOutcome {
    Accepted {
        registration: entity::registration::Model,
    },
    InvalidToken,
    AlreadyFilled,
    Terminal,
}

#[derive(Debug)]
pub enum JoinOpenOutcome {
    Joined {
        registration: entity::registration::Model,
    },
    NotOpen,
    AlreadyFilled,
    Terminal,
    Rejected(Rejection),
}

#[derive(Debug)]
pub enum ConfirmOutcome {
    Applied {
        registration: entity::registration::Model,
        newly_confirmed: bool,
    },
    NotFound,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TerminalOutcome {
    Applied,
    AlreadyTerminal,
}

#[derive(Debug)]
pub enum SwapOutcome {
    Swapped,
    Terminal,
    CategoryMismatch,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpireReason {
    SecondChargeFailed,
    GraceExpired,
}

impl ExpireReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecondChargeFailed => "SECOND_CHARGE_FAILED",
            Self::GraceExpired => "GRACE_EXPIRED",
        }
    }
}

pub struct RegistrationService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> RegistrationService<'a> {
    /// Creates a new instance of [`RegistrationService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Create a pairing with both slots and its registration, gated by the
    /// capacity checker inside the same transaction.
    pub async fn create(&self, input: CreateRegistration) -> Result<CreateOutcome, Error> {
        let txn = self.db.begin().await?;

        let event = EventRepository::new(&txn)
            .get(input.event_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Event {} not found", input.event_id)))?;
        let category = CategoryRepository::new(&txn)
            .get_in_event(input.event_id, input.category_id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Category {} not found in event {}",
                    input.category_id, input.event_id
                ))
            })?;

        let checker = CapacityChecker::new(&txn, self.config.default_max_per_user);
        if let Some(rejection) = checker.admit(&event, &category, input.user_id).await? {
            return Ok(CreateOutcome::Rejected(rejection));
        }

        let (pairing, registration) = insert_pairing_graph(
            &txn,
            self.config,
            &event,
            &category,
            input.user_id,
            input.payment_mode,
            input.join_mode,
            input.invited_contact,
            &input.currency,
        )
        .await?;

        AuditRepository::new(&txn)
            .record(
                &format!("user:{}", input.user_id),
                "registration.create",
                "REGISTRATION",
                registration.id,
                json!({ "pairing_id": pairing.id, "status": registration.status.to_value() }),
            )
            .await?;

        txn.commit().await?;

        Ok(CreateOutcome::Created {
            pairing,
            registration,
        })
    }

    /// Fill the partner slot of an INVITE_PARTNER pairing from its token.
    pub async fn accept_invite(
        &self,
        token: &str,
        user_id: i32,
    ) -> Result<AcceptInviteOutcome, Error> {
        let txn = self.db.begin().await?;

        let pairing_repo = PairingRepository::new(&txn);
        let registration_repo = RegistrationRepository::new(&txn);

        let Some(pairing) = pairing_repo.get_by_invite_token(token).await? else {
            return Ok(AcceptInviteOutcome::InvalidToken);
        };

        let registration = registration_repo
            .get_by_pairing(pairing.id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("Registration for pairing {} not found", pairing.id))
            })?;
        if registration.status.is_terminal() {
            return Ok(AcceptInviteOutcome::Terminal);
        }

        let slots = pairing_repo.get_slots(pairing.id).await?;
        let Some(partner) = slots
            .iter()
            .find(|s| s.role == SlotRole::Partner && s.status == SlotStatus::Pending)
        else {
            return Ok(AcceptInviteOutcome::AlreadyFilled);
        };

        pairing_repo.fill_slot(partner.clone(), user_id).await?;

        let slots = pairing_repo.get_slots(pairing.id).await?;
        let status = derive::derive_status(&slots, pairing.payment_mode, pairing.join_mode);
        let registration = registration_repo.update_status(registration, status).await?;

        AuditRepository::new(&txn)
            .record(
                &format!("user:{user_id}"),
                "registration.accept_invite",
                "REGISTRATION",
                registration.id,
                json!({ "pairing_id": pairing.id, "status": registration.status.to_value() }),
            )
            .await?;

        txn.commit().await?;

        Ok(AcceptInviteOutcome::Accepted { registration })
    }

    /// Fill the partner slot of an open (LOOKING_FOR_PARTNER) pairing. The
    /// joiner's per-user rules are re-checked inside the transaction.
    pub async fn join_open_pairing(
        &self,
        pairing_id: i32,
        user_id: i32,
    ) -> Result<JoinOpenOutcome, Error> {
        let txn = self.db.begin().await?;

        let pairing_repo = PairingRepository::new(&txn);
        let registration_repo = RegistrationRepository::new(&txn);

        let pairing = pairing_repo.get(pairing_id).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("Pairing {pairing_id} not found"))
        })?;
        if pairing.join_mode != JoinMode::LookingForPartner {
            return Ok(JoinOpenOutcome::NotOpen);
        }

        let registration = registration_repo
            .get_by_pairing(pairing.id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("Registration for pairing {} not found", pairing.id))
            })?;
        if registration.status.is_terminal() {
            return Ok(JoinOpenOutcome::Terminal);
        }

        let slots = pairing_repo.get_slots(pairing.id).await?;
        let Some(partner) = slots
            .iter()
            .find(|s| s.role == SlotRole::Partner && s.status == SlotStatus::Pending)
        else {
            return Ok(JoinOpenOutcome::AlreadyFilled);
        };

        let event = EventRepository::new(&txn)
            .get(pairing.event_id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Event {} not found", pairing.event_id)))?;
        let category = CategoryRepository::new(&txn)
            .get(pairing.category_id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("Category {} not found", pairing.category_id))
            })?;

        let checker = CapacityChecker::new(&txn, self.config.default_max_per_user);
        if let Some(rejection) = checker.admit_user(&event, &category, user_id).await? {
            return Ok(JoinOpenOutcome::Rejected(rejection));
        }

        pairing_repo.fill_slot(partner.clone(), user_id).await?;

        let slots = pairing_repo.get_slots(pairing.id).await?;
        let status = derive::derive_status(&slots, pairing.payment_mode, pairing.join_mode);
        let registration = registration_repo.update_status(registration, status).await?;

        AuditRepository::new(&txn)
            .record(
                &format!("user:{user_id}"),
                "registration.join_open",
                "REGISTRATION",
                registration.id,
                json!({ "pairing_id": pairing.id, "status": registration.status.to_value() }),
            )
            .await?;

        txn.commit().await?;

        Ok(JoinOpenOutcome::Joined { registration })
    }

    /// Mark a slot's leg PAID and re-derive the registration status.
    pub async fn confirm_slot_payment(
        &self,
        pairing_id: i32,
        role: SlotRole,
    ) -> Result<ConfirmOutcome, Error> {
        let txn = self.db.begin().await?;

        let outcome = apply_slot_payment(&txn, pairing_id, role).await?;

        txn.commit().await?;

        Ok(match outcome {
            Some(applied) => ConfirmOutcome::Applied {
                registration: applied.registration,
                newly_confirmed: applied.newly_confirmed,
            },
            None => ConfirmOutcome::NotFound,
        })
    }

    /// Cancel a registration: terminal status, both slots cancelled, refund
    /// and waitlist-promotion operations enqueued, audit record written.
    pub async fn cancel(
        &self,
        pairing_id: i32,
        actor: &str,
        reason: &str,
    ) -> Result<TerminalOutcome, Error> {
        self.terminate(
            pairing_id,
            actor,
            reason,
            RegistrationStatus::Cancelled,
            &[
                RegistrationStatus::Matchmaking,
                RegistrationStatus::PendingPartner,
                RegistrationStatus::Confirmed,
            ],
            None,
        )
        .await
    }

    /// Deadline-driven termination. Identical side effects to cancel; the
    /// reason distinguishes a failed second charge from plain grace expiry
    /// and selects the guarantee status.
    pub async fn expire(
        &self,
        pairing_id: i32,
        reason: ExpireReason,
    ) -> Result<TerminalOutcome, Error> {
        self.terminate(
            pairing_id,
            "system",
            reason.as_str(),
            RegistrationStatus::Expired,
            &[
                RegistrationStatus::Matchmaking,
                RegistrationStatus::PendingPartner,
            ],
            Some(match reason {
                ExpireReason::SecondChargeFailed => GuaranteeStatus::Failed,
                ExpireReason::GraceExpired => GuaranteeStatus::Expired,
            }),
        )
        .await
    }

    async fn terminate(
        &self,
        pairing_id: i32,
        actor: &str,
        reason: &str,
        to: RegistrationStatus,
        from: &[RegistrationStatus],
        guarantee: Option<GuaranteeStatus>,
    ) -> Result<TerminalOutcome, Error> {
        let txn = self.db.begin().await?;

        let pairing_repo = PairingRepository::new(&txn);
        let registration_repo = RegistrationRepository::new(&txn);

        let pairing = pairing_repo.get(pairing_id).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!("Pairing {pairing_id} not found"))
        })?;
        let registration = registration_repo
            .get_by_pairing(pairing.id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("Registration for pairing {} not found", pairing.id))
            })?;

        // Conditional claim: a row already out of the expected states means a
        // concurrent actor got here first.
        if !registration_repo
            .claim_transition(registration.id, from, to)
            .await?
        {
            return Ok(TerminalOutcome::AlreadyTerminal);
        }

        pairing_repo.cancel_slots(pairing.id).await?;

        if let Some(guarantee) = guarantee {
            if pairing.payment_mode == PaymentMode::Split {
                pairing_repo.set_guarantee(pairing.id, guarantee).await?;
            }
        }

        // Captured legs are refunded through the outbox, never inline.
        let payments = PaymentRepository::new(&txn)
            .list_by_source(SourceType::Registration, registration.id)
            .await?;
        for payment in payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Succeeded)
        {
            enqueue_outbox(
                &txn,
                &OutboxJob::ExecuteRefund {
                    payment_id: payment.id.clone(),
                    amount_cents: None,
                    reason: reason.to_string(),
                },
                &format!("payment:{}:refund", payment.id),
                Some(format!("pairing:{}", pairing.id)),
            )
            .await?;
        }

        enqueue_outbox(
            &txn,
            &OutboxJob::PromoteWaitlist {
                category_id: pairing.category_id,
            },
            &format!(
                "category:{}:promote:pairing:{}",
                pairing.category_id, pairing.id
            ),
            Some(format!("pairing:{}", pairing.id)),
        )
        .await?;

        enqueue_outbox(
            &txn,
            &OutboxJob::DispatchNotification {
                kind: match to {
                    RegistrationStatus::Expired => "registration.expired".to_string(),
                    _ => "registration.cancelled".to_string(),
                },
                user_id: Some(pairing.created_by_user_id),
                source_type: "REGISTRATION".to_string(),
                source_id: registration.id,
            },
            &format!("pairing:{}:{}", pairing.id, to.to_value().to_lowercase()),
            Some(format!("pairing:{}", pairing.id)),
        )
        .await?;

        AuditRepository::new(&txn)
            .record(
                actor,
                match to {
                    RegistrationStatus::Expired => "registration.expire",
                    _ => "registration.cancel",
                },
                "REGISTRATION",
                registration.id,
                json!({ "pairing_id": pairing.id, "reason": reason }),
            )
            .await?;

        txn.commit().await?;

        Ok(TerminalOutcome::Applied)
    }

    /// Administrative exchange of the PARTNER slot occupants between two
    /// pairings of the same event and category.
    pub async fn swap(&self, pairing_a_id: i32, pairing_b_id: i32) -> Result<SwapOutcome, Error> {
        let txn = self.db.begin().await?;

        let pairing_repo = PairingRepository::new(&txn);
        let registration_repo = RegistrationRepository::new(&txn);

        let (Some(pairing_a), Some(pairing_b)) = (
            pairing_repo.get(pairing_a_id).await?,
            pairing_repo.get(pairing_b_id).await?,
        ) else {
            return Ok(SwapOutcome::NotFound);
        };

        if pairing_a.event_id != pairing_b.event_id
            || pairing_a.category_id != pairing_b.category_id
        {
            return Ok(SwapOutcome::CategoryMismatch);
        }

        let registration_a = registration_repo
            .get_by_pairing(pairing_a.id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Registration for pairing {} not found",
                    pairing_a.id
                ))
            })?;
        let registration_b = registration_repo
            .get_by_pairing(pairing_b.id)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Registration for pairing {} not found",
                    pairing_b.id
                ))
            })?;

        if registration_a.status.is_terminal() || registration_b.status.is_terminal() {
            return Ok(SwapOutcome::Terminal);
        }

        let partner_a = partner_slot(&pairing_repo.get_slots(pairing_a.id).await?)?;
        let partner_b = partner_slot(&pairing_repo.get_slots(pairing_b.id).await?)?;

        pairing_repo
            .overwrite_slot_occupancy(
                partner_a.id,
                partner_b.status,
                partner_b.payment_status,
                partner_b.occupant_user_id,
                partner_b.invited_contact.clone(),
            )
            .await?;
        pairing_repo
            .overwrite_slot_occupancy(
                partner_b.id,
                partner_a.status,
                partner_a.payment_status,
                partner_a.occupant_user_id,
                partner_a.invited_contact.clone(),
            )
            .await?;

        let slots_a = pairing_repo.get_slots(pairing_a.id).await?;
        let slots_b = pairing_repo.get_slots(pairing_b.id).await?;
        registration_repo
            .update_status(
                registration_a,
                derive::derive_status(&slots_a, pairing_a.payment_mode, pairing_a.join_mode),
            )
            .await?;
        registration_repo
            .update_status(
                registration_b,
                derive::derive_status(&slots_b, pairing_b.payment_mode, pairing_b.join_mode),
            )
            .await?;

        AuditRepository::new(&txn)
            .record(
                "admin",
                "registration.swap",
                "PAIRING",
                pairing_a.id,
                json!({ "pairing_a": pairing_a.id, "pairing_b": pairing_b.id }),
            )
            .await?;

        txn.commit().await?;

        Ok(SwapOutcome::Swapped)
    }
}

pub struct SlotPaymentApplied {
    pub registration: entity::registration::Model,
    pub newly_confirmed: bool,
}

/// Mark a slot's leg PAID on the given connection and re-derive the
/// registration status. Split-mode captain captures arm the guarantee; a
/// confirmation disarms it and enqueues the confirmation fan-out.
///
/// Shared by [`RegistrationService::confirm_slot_payment`] and the payment
/// settlement path, which runs it inside the settlement transaction.
pub(crate) async fn apply_slot_payment<C: ConnectionTrait>(
    db: &C,
    pairing_id: i32,
    role: SlotRole,
) -> Result<Option<SlotPaymentApplied>, Error> {
    let pairing_repo = PairingRepository::new(db);
    let registration_repo = RegistrationRepository::new(db);

    let Some(pairing) = pairing_repo.get(pairing_id).await? else {
        return Ok(None);
    };
    let Some(registration) = registration_repo.get_by_pairing(pairing.id).await? else {
        return Ok(None);
    };
    if registration.status.is_terminal() {
        return Ok(Some(SlotPaymentApplied {
            registration,
            newly_confirmed: false,
        }));
    }

    let previous_status = registration.status;
    let slots = pairing_repo.get_slots(pairing.id).await?;

    if let Some(slot) = slots
        .iter()
        .find(|s| s.role == role && s.payment_status == SlotPaymentStatus::Unpaid)
    {
        pairing_repo.mark_slot_paid(slot.clone()).await?;
    }

    let slots = pairing_repo.get_slots(pairing.id).await?;
    let status = derive::derive_status(&slots, pairing.payment_mode, pairing.join_mode);
    let registration = registration_repo.update_status(registration, status).await?;

    let newly_confirmed =
        status == RegistrationStatus::Confirmed && previous_status != RegistrationStatus::Confirmed;

    if newly_confirmed {
        pairing_repo
            .set_guarantee(pairing.id, GuaranteeStatus::None)
            .await?;

        enqueue_outbox(
            db,
            &OutboxJob::DispatchNotification {
                kind: "registration.confirmed".to_string(),
                user_id: Some(pairing.created_by_user_id),
                source_type: "REGISTRATION".to_string(),
                source_id: registration.id,
            },
            &format!("pairing:{}:confirmed", pairing.id),
            Some(format!("pairing:{}", pairing.id)),
        )
        .await?;
    } else if pairing.payment_mode == PaymentMode::Split
        && role == SlotRole::Captain
        && pairing.guarantee_status == GuaranteeStatus::None
    {
        // The captured captain leg secures the outstanding partner leg.
        pairing_repo
            .set_guarantee(pairing.id, GuaranteeStatus::Armed)
            .await?;
    }

    Ok(Some(SlotPaymentApplied {
        registration,
        newly_confirmed,
    }))
}

/// Insert the full pairing graph (pairing, both slots, registration) for an
/// admitted entry. The caller has already run the capacity checker on the
/// same connection.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn insert_pairing_graph<C: ConnectionTrait>(
    db: &C,
    config: &Config,
    event: &entity::event::Model,
    category: &entity::category::Model,
    user_id: i32,
    payment_mode: PaymentMode,
    join_mode: JoinMode,
    invited_contact: Option<String>,
    currency: &str,
) -> Result<(entity::pairing::Model, entity::registration::Model), Error> {
    let now = Utc::now().naive_utc();

    let payment_deadline = match payment_mode {
        PaymentMode::Split => Some(compute_payment_deadline(
            now,
            event.starts_at,
            config.split_second_charge_lead_hours,
            config.split_min_grace_hours,
        )),
        PaymentMode::Single => None,
    };

    let invite_token = match join_mode {
        JoinMode::InvitePartner => Some(generate_invite_token()),
        JoinMode::LookingForPartner => None,
    };

    let pairing_repo = PairingRepository::new(db);

    let pairing = pairing_repo
        .create(NewPairing {
            event_id: event.id,
            category_id: category.id,
            created_by_user_id: user_id,
            payment_mode,
            join_mode,
            payment_deadline,
            invite_token,
        })
        .await?;

    pairing_repo
        .create_slot(
            pairing.id,
            SlotRole::Captain,
            SlotStatus::Filled,
            Some(user_id),
            None,
        )
        .await?;
    pairing_repo
        .create_slot(
            pairing.id,
            SlotRole::Partner,
            SlotStatus::Pending,
            None,
            invited_contact,
        )
        .await?;

    let slots = pairing_repo.get_slots(pairing.id).await?;
    let status = derive::derive_status(&slots, payment_mode, join_mode);

    let registration = RegistrationRepository::new(db)
        .create(pairing.id, event.id, category.id, status, currency)
        .await?;

    Ok((pairing, registration))
}

fn generate_invite_token() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(INVITE_TOKEN_LEN)
        .map(char::from)
        .collect()
}

fn partner_slot(
    slots: &[entity::pairing_slot::Model],
) -> Result<entity::pairing_slot::Model, Error> {
    slots
        .iter()
        .find(|s| s.role == SlotRole::Partner)
        .cloned()
        .ok_or_else(|| Error::IntegrityError("pairing has no partner slot".to_string()))
}
