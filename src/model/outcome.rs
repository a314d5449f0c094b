//! Business-rule rejection codes.
//!
//! These are expected outcomes of capacity gating, returned to callers as
//! typed results. They are never logged as errors and never abort a
//! transaction on their own.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    EventFull,
    CategoryFull,
    CategoryPlayersFull,
    MaxCategories,
    AlreadyInCategory,
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EventFull => "EVENT_FULL",
            Self::CategoryFull => "CATEGORY_FULL",
            Self::CategoryPlayersFull => "CATEGORY_PLAYERS_FULL",
            Self::MaxCategories => "MAX_CATEGORIES",
            Self::AlreadyInCategory => "ALREADY_IN_CATEGORY",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
