//! Admission gating for events and categories.
//!
//! Pure reads against live non-terminal registration counts. Counter rows are
//! never materialized; the checker must run on the same connection as the
//! write it gates, otherwise there is a race window between check and insert.

use sea_orm::ConnectionTrait;

use entity::sea_orm_active_enums::SlotStatus;

use crate::{
    data::{pairing::PairingRepository, registration::RegistrationRepository},
    error::Error,
    model::outcome::Rejection,
};

pub struct CapacityChecker<'a, C: ConnectionTrait> {
    db: &'a C,
    default_max_per_user: i32,
}

impl<'a, C: ConnectionTrait> CapacityChecker<'a, C> {
    pub fn new(db: &'a C, default_max_per_user: i32) -> Self {
        Self {
            db,
            default_max_per_user,
        }
    }

    /// Full admission check for a new pairing. Returns the first failing
    /// rule, or `None` when one more entry can be admitted.
    pub async fn admit(
        &self,
        event: &entity::event::Model,
        category: &entity::category::Model,
        user_id: i32,
    ) -> Result<Option<Rejection>, Error> {
        if let Some(rejection) = self.admit_user(event, category, user_id).await? {
            return Ok(Some(rejection));
        }

        self.admit_entry(event, category).await
    }

    /// Per-user rules only: membership in this category and the per-event
    /// category limit. Used on its own when a user joins an existing pairing
    /// (which occupies no new seat).
    pub async fn admit_user(
        &self,
        event: &entity::event::Model,
        category: &entity::category::Model,
        user_id: i32,
    ) -> Result<Option<Rejection>, Error> {
        let registration_repo = RegistrationRepository::new(self.db);
        let pairing_repo = PairingRepository::new(self.db);

        let category_pairings: Vec<i32> = registration_repo
            .active_in_category(category.id)
            .await?
            .iter()
            .map(|r| r.pairing_id)
            .collect();

        let occupied = pairing_repo
            .slots_in_pairings(category_pairings)
            .await?
            .iter()
            .any(|slot| slot.occupant_user_id == Some(user_id));

        if occupied {
            return Ok(Some(Rejection::AlreadyInCategory));
        }

        let event_registrations = registration_repo.active_in_event(event.id).await?;
        let event_pairings: Vec<i32> = event_registrations.iter().map(|r| r.pairing_id).collect();

        let user_pairings: Vec<i32> = pairing_repo
            .slots_in_pairings(event_pairings)
            .await?
            .iter()
            .filter(|slot| slot.occupant_user_id == Some(user_id))
            .map(|slot| slot.pairing_id)
            .collect();

        let mut user_categories: Vec<i32> = event_registrations
            .iter()
            .filter(|r| user_pairings.contains(&r.pairing_id))
            .map(|r| r.category_id)
            .collect();
        user_categories.sort_unstable();
        user_categories.dedup();

        let limit = category.max_per_user.unwrap_or(self.default_max_per_user);
        if user_categories.len() as i32 >= limit {
            return Ok(Some(Rejection::MaxCategories));
        }

        Ok(None)
    }

    /// Seat-count rules: event max entries, category pairing capacity, and
    /// category max players (filled slots).
    pub async fn admit_entry(
        &self,
        event: &entity::event::Model,
        category: &entity::category::Model,
    ) -> Result<Option<Rejection>, Error> {
        let registration_repo = RegistrationRepository::new(self.db);
        let pairing_repo = PairingRepository::new(self.db);

        if let Some(max_entries) = event.max_entries {
            let active = registration_repo.count_active_by_event(event.id).await?;
            if active >= max_entries as u64 {
                return Ok(Some(Rejection::EventFull));
            }
        }

        let category_pairings: Vec<i32> = registration_repo
            .active_in_category(category.id)
            .await?
            .iter()
            .map(|r| r.pairing_id)
            .collect();

        if let Some(capacity) = category.capacity {
            if category_pairings.len() as i32 >= capacity {
                return Ok(Some(Rejection::CategoryFull));
            }
        }

        if let Some(max_players) = category.max_players {
            let filled = pairing_repo
                .slots_in_pairings(category_pairings)
                .await?
                .iter()
                .filter(|slot| slot.status == SlotStatus::Filled)
                .count();
            if filled as i32 >= max_players {
                return Ok(Some(Rejection::CategoryPlayersFull));
            }
        }

        Ok(None)
    }
}
