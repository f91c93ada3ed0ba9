use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing availability lifecycle.
///
/// Created as `Pending` by owner submission; moved to `Available` only by
/// the approval mutation; `Available` and `Rented` swap freely through the
/// status update. `Pending` is accepted by the status update defensively
/// even though the shipped client never sends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    Pending,
    Available,
    Rented,
}

impl BookStatus {
    /// Tag stored in the `availability_status` column
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Pending => "pending",
            BookStatus::Available => "available",
            BookStatus::Rented => "rented",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(BookStatus::Pending),
            "available" => Some(BookStatus::Available),
            "rented" => Some(BookStatus::Rented),
            _ => None,
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
