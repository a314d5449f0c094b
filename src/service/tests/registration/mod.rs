mod accept_invite;
mod cancel;
mod confirm;
mod create;
mod join_open;
mod swap;

use super::*;

use crate::service::registration::RegistrationService;
