//! Application services for the package lifecycle and archive.

mod archive;
mod lifecycle;

pub use archive::{ArchiveQueryError, ArchiveQueryService, DEFAULT_PICKUP_HISTORY_LIMIT};
pub use lifecycle::{
    BulkUpdateFailure, BulkUpdateReport, PackageLifecycleError, PackageLifecycleService,
    PickupReport,
};
