//! Pure registration status derivation.
//!
//! The registration status is never toggled ad hoc; it is re-derived from
//! slot state on every slot mutation, which keeps the stored status from
//! drifting out of sync with the pairing.

use entity::sea_orm_active_enums::{
    JoinMode, PaymentMode, RegistrationStatus, SlotPaymentStatus, SlotRole, SlotStatus,
};

pub fn derive_status(
    slots: &[entity::pairing_slot::Model],
    payment_mode: PaymentMode,
    join_mode: JoinMode,
) -> RegistrationStatus {
    if !slots.is_empty() && slots.iter().all(|s| s.status == SlotStatus::Cancelled) {
        return RegistrationStatus::Cancelled;
    }

    let partner_filled = slots
        .iter()
        .any(|s| s.role == SlotRole::Partner && s.status == SlotStatus::Filled);

    if !partner_filled {
        return match join_mode {
            JoinMode::LookingForPartner => RegistrationStatus::Matchmaking,
            JoinMode::InvitePartner => RegistrationStatus::PendingPartner,
        };
    }

    let paid = match payment_mode {
        // The captain's charge covers both slots.
        PaymentMode::Single => slots
            .iter()
            .any(|s| s.role == SlotRole::Captain && s.payment_status == SlotPaymentStatus::Paid),
        // Both independently captured legs must report PAID.
        PaymentMode::Split => slots
            .iter()
            .filter(|s| s.status == SlotStatus::Filled)
            .all(|s| s.payment_status == SlotPaymentStatus::Paid),
    };

    if paid {
        RegistrationStatus::Confirmed
    } else {
        RegistrationStatus::PendingPartner
    }
}
