//! Package lifecycle status.

use super::ParsePackageStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a package.
///
/// A package is created awaiting pickup; every other status is terminal for
/// automated processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageStatus {
    /// Received and waiting on the shelf.
    AvailableForPickup,
    /// Collected by the customer.
    PickedUp,
    /// Returned to the sender.
    SentBack,
    /// Refused by the customer.
    Refused,
}

impl PackageStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::AvailableForPickup,
        Self::PickedUp,
        Self::SentBack,
        Self::Refused,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AvailableForPickup => "AvailableForPickup",
            Self::PickedUp => "PickedUp",
            Self::SentBack => "SentBack",
            Self::Refused => "Refused",
        }
    }

    /// Returns the label shown to staff.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AvailableForPickup => "Available for Pickup",
            Self::PickedUp => "Picked Up",
            Self::SentBack => "Sent Back",
            Self::Refused => "Refused",
        }
    }

    /// Returns `true` for statuses that end the pickup lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::AvailableForPickup)
    }

    /// Returns whether the strict lifecycle allows moving to `next`.
    ///
    /// Only a package awaiting pickup may change status, and never to the
    /// status it already has.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(self, Self::AvailableForPickup) && next.is_terminal()
    }

    /// Parses a status typed by staff, ignoring case, spaces and
    /// underscores, so "sent back" and "SENT_BACK" both match.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePackageStatusError`] when nothing matches.
    pub fn parse_lenient(value: &str) -> Result<Self, ParsePackageStatusError> {
        let folded: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&folded))
            .ok_or_else(|| ParsePackageStatusError(value.to_owned()))
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PackageStatus {
    type Error = ParsePackageStatusError;

    /// Parses the storage representation; matching is case-sensitive.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParsePackageStatusError(value.to_owned()))
    }
}
