//! Catalog prices.

use serde::{Deserialize, Serialize};

/// A price in the smallest currency unit.
///
/// The catalog stores prices as plain integers and the chatbot reads them back
/// verbatim, so `Display` renders the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct Price(i32);

impl Price {
    /// Create a price from minor units.
    #[must_use]
    pub const fn new(minor_units: i32) -> Self {
        Self(minor_units)
    }

    /// Get the amount in minor units.
    #[must_use]
    pub const fn minor_units(&self) -> i32 {
        self.0
    }
}

impl From<i32> for Price {
    fn from(minor_units: i32) -> Self {
        Self(minor_units)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
