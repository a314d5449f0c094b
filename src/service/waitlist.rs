//! Category waitlist.
//!
//! Entries queue FIFO per category. Promotion runs from the outbox after a
//! seat frees up and re-runs the full admission check, so a promotion can
//! never oversubscribe a category that filled up again in the meantime.

use sea_orm::{DatabaseConnection, DbErr, TransactionTrait};
use serde_json::json;

use entity::sea_orm_active_enums::{JoinMode, PaymentMode};

use crate::{
    config::Config,
    data::{
        audit::AuditRepository, category::CategoryRepository, event::EventRepository,
        pairing::PairingRepository, registration::RegistrationRepository,
        waitlist::WaitlistRepository,
    },
    error::Error,
    model::outcome::Rejection,
    service::{capacity::CapacityChecker, registration::insert_pairing_graph},
};

/// Cap on stale entries skipped in a single promotion run.
const PROMOTE_MAX_ATTEMPTS: usize = 10;

#[derive(Debug)]
pub enum EnqueueOutcome {
    Queued(entity::waitlist_entry::Model),
    AlreadyQueued(entity::waitlist_entry::Model),
}

#[derive(Debug)]
pub enum PromotionOutcome {
    Promoted { entry_id: i32, pairing_id: i32 },
    /// No pending entry remains for the category.
    WaitlistEmpty,
    /// The head entry failed admission; it stays pending for a later seat.
    Rejected(Rejection),
}

pub struct WaitlistService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> WaitlistService<'a> {
    /// Creates a new instance of [`WaitlistService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Queue a user for a full category. Idempotent per user and category:
    /// re-enqueueing returns the existing pending entry.
    pub async fn enqueue(
        &self,
        event_id: i32,
        category_id: i32,
        user_id: i32,
        payment_mode: PaymentMode,
        join_mode: JoinMode,
    ) -> Result<EnqueueOutcome, Error> {
        let txn = self.db.begin().await?;

        let repo = WaitlistRepository::new(&txn);

        if let Some(existing) = repo.find_pending_for_user(category_id, user_id).await? {
            return Ok(EnqueueOutcome::AlreadyQueued(existing));
        }

        let entry = repo
            .create(event_id, category_id, user_id, payment_mode, join_mode)
            .await?;

        AuditRepository::new(&txn)
            .record(
                &format!("user:{user_id}"),
                "waitlist.enqueue",
                "WAITLIST_ENTRY",
                entry.id,
                json!({ "event_id": event_id, "category_id": category_id }),
            )
            .await?;

        txn.commit().await?;

        Ok(EnqueueOutcome::Queued(entry))
    }

    /// Promote the oldest eligible pending entry. Entries whose user already
    /// holds an active pairing in the category are stale and get cancelled
    /// rather than promoted; the run moves on to the next entry.
    pub async fn promote(&self, category_id: i32) -> Result<PromotionOutcome, Error> {
        for _ in 0..PROMOTE_MAX_ATTEMPTS {
            let txn = self.db.begin().await?;

            let waitlist_repo = WaitlistRepository::new(&txn);

            let Some(entry) = waitlist_repo.next_pending(category_id).await? else {
                return Ok(PromotionOutcome::WaitlistEmpty);
            };

            let event = EventRepository::new(&txn)
                .get(entry.event_id)
                .await?
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("Event {} not found", entry.event_id))
                })?;
            let category = CategoryRepository::new(&txn)
                .get(entry.category_id)
                .await?
                .ok_or_else(|| {
                    DbErr::RecordNotFound(format!("Category {} not found", entry.category_id))
                })?;

            if self.is_stale(&txn, &entry).await? {
                waitlist_repo.mark_cancelled(entry).await?;
                txn.commit().await?;
                continue;
            }

            let checker = CapacityChecker::new(&txn, self.config.default_max_per_user);
            if let Some(rejection) = checker.admit(&event, &category, entry.user_id).await? {
                return Ok(PromotionOutcome::Rejected(rejection));
            }

            let (pairing, registration) = insert_pairing_graph(
                &txn,
                self.config,
                &event,
                &category,
                entry.user_id,
                entry.payment_mode,
                entry.join_mode,
                None,
                &self.config.default_currency,
            )
            .await?;

            let entry = waitlist_repo.mark_promoted(entry, pairing.id).await?;

            AuditRepository::new(&txn)
                .record(
                    "system",
                    "waitlist.promote",
                    "WAITLIST_ENTRY",
                    entry.id,
                    json!({ "pairing_id": pairing.id, "registration_id": registration.id }),
                )
                .await?;

            txn.commit().await?;

            return Ok(PromotionOutcome::Promoted {
                entry_id: entry.id,
                pairing_id: pairing.id,
            });
        }

        // Pathological backlog of stale entries; the next freed seat will
        // enqueue another promotion.
        tracing::warn!(category_id, "Promotion gave up after skipping stale entries");
        Ok(PromotionOutcome::WaitlistEmpty)
    }

    async fn is_stale<C: sea_orm::ConnectionTrait>(
        &self,
        db: &C,
        entry: &entity::waitlist_entry::Model,
    ) -> Result<bool, Error> {
        let category_pairings: Vec<i32> = RegistrationRepository::new(db)
            .active_in_category(entry.category_id)
            .await?
            .iter()
            .map(|r| r.pairing_id)
            .collect();

        Ok(PairingRepository::new(db)
            .slots_in_pairings(category_pairings)
            .await?
            .iter()
            .any(|slot| slot.occupant_user_id == Some(entry.user_id)))
    }
}
