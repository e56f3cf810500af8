//! Domain model for packages.

mod error;
mod ids;
mod package;
mod pickup;
mod search;
mod status;
mod view;

pub use error::{PackageDomainError, ParsePackageIdError, ParsePackageStatusError};
pub use ids::{Courier, PackageId, PickupId, TrackingNumber};
pub use package::{Package, PersistedPackageData, ReceivePackage, Recipient};
pub use pickup::{Collector, PersistedPickupData, Pickup, PickupRequest};
pub use search::{ArchiveFilter, ArchiveScope, SearchTerm};
pub use status::PackageStatus;
pub use view::{PackageView, TrackingView};
