//! Per-customer summary of a finished batch.

use crate::customer::domain::{Customer, CustomerId};
use crate::package::domain::Package;
use serde::Serialize;

/// A package committed in the current session with the customer it was
/// attached to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedPackage {
    /// Persisted package.
    pub package: Package,
    /// Customer the package was resolved to.
    pub customer: Customer,
}

/// Packages of one customer within a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerGroup {
    /// Resolved customer.
    pub customer_id: CustomerId,
    /// Customer name as first recorded.
    pub customer_name: String,
    /// Phone from the first package of the group.
    pub phone: Option<String>,
    /// Number of packages in the group.
    pub count: usize,
    /// Tracking numbers in commit order.
    pub tracking_numbers: Vec<String>,
}

/// Finalize-time summary, one group per customer in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Customer groups.
    pub groups: Vec<CustomerGroup>,
    /// Total packages committed.
    pub total_packages: usize,
}

impl BatchSummary {
    /// Groups committed packages by resolved customer.
    #[must_use]
    pub fn from_committed(committed: &[CommittedPackage]) -> Self {
        let mut groups: Vec<CustomerGroup> = Vec::new();
        for entry in committed {
            let customer_id = entry.customer.id();
            let tracking = entry.package.tracking().as_str().to_owned();
            if let Some(group) = groups
                .iter_mut()
                .find(|group| group.customer_id == customer_id)
            {
                group.count += 1;
                group.tracking_numbers.push(tracking);
                continue;
            }
            groups.push(CustomerGroup {
                customer_id,
                customer_name: entry.customer.name().as_str().to_owned(),
                phone: entry.package.recipient().phone().map(str::to_owned),
                count: 1,
                tracking_numbers: vec![tracking],
            });
        }
        Self {
            groups,
            total_packages: committed.len(),
        }
    }

    /// Returns the number of distinct customers.
    #[must_use]
    pub const fn customer_count(&self) -> usize {
        self.groups.len()
    }
}
