//! Test fixture modules for database record creation.
//!
//! Each submodule provides fixture helpers for a different slice of the
//! platform, accessed through `TestContext`:
//!
//! - `event` - Events, categories, pairings, slots, registrations, waitlist
//! - `finance` - Payments and in-memory payment model factories

pub mod event;
pub mod finance;
