mod enqueue;
mod promote;

use super::*;

use crate::service::waitlist::WaitlistService;
