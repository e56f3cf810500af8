//! Archive search terms and client-side filters.

use super::{Package, PackageStatus};

/// Which packages an archive query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveScope {
    /// Packages whose lifecycle has concluded.
    Concluded,
    /// Every persisted package.
    All,
}

impl ArchiveScope {
    /// Returns whether a package with `status` belongs to this scope.
    #[must_use]
    pub const fn includes(self, status: PackageStatus) -> bool {
        match self {
            Self::Concluded => status.is_terminal(),
            Self::All => true,
        }
    }
}

/// Case-insensitive substring matched against recipient name, tracking
/// number and phone. Status text is never searched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term; blank input yields `None`.
    #[must_use]
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    /// Returns the lowercased term.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the package matches this term.
    #[must_use]
    pub fn matches(&self, package: &Package) -> bool {
        let recipient = package.recipient();
        contains_folded(recipient.name(), &self.0)
            || contains_folded(package.tracking().as_str(), &self.0)
            || recipient
                .phone()
                .is_some_and(|phone| contains_folded(phone, &self.0))
    }
}

fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

/// Compound filter applied to an already-fetched package list.
///
/// Customer and tracking match as case-insensitive substrings; status matches
/// exactly. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveFilter {
    customer: Option<String>,
    tracking: Option<String>,
    status: Option<PackageStatus>,
}

impl ArchiveFilter {
    /// Creates a filter that matches every package.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to recipient names containing `customer`.
    #[must_use]
    pub fn with_customer(mut self, customer: &str) -> Self {
        self.customer = fold_criterion(customer);
        self
    }

    /// Restricts to tracking numbers containing `tracking`.
    #[must_use]
    pub fn with_tracking(mut self, tracking: &str) -> Self {
        self.tracking = fold_criterion(tracking);
        self
    }

    /// Restricts to a single status.
    #[must_use]
    pub const fn with_status(mut self, status: PackageStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns whether `package` passes every set criterion.
    #[must_use]
    pub fn matches(&self, package: &Package) -> bool {
        let customer_ok = self
            .customer
            .as_deref()
            .is_none_or(|needle| contains_folded(package.recipient().name(), needle));
        let tracking_ok = self
            .tracking
            .as_deref()
            .is_none_or(|needle| contains_folded(package.tracking().as_str(), needle));
        let status_ok = self.status.is_none_or(|status| package.status() == status);
        customer_ok && tracking_ok && status_ok
    }

    /// Returns the matching packages in their original order.
    #[must_use]
    pub fn apply(&self, packages: &[Package]) -> Vec<Package> {
        packages
            .iter()
            .filter(|package| self.matches(package))
            .cloned()
            .collect()
    }
}

fn fold_criterion(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}
