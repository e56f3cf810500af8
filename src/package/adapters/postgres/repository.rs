//! `PostgreSQL` repository implementation for package storage.

use super::{
    models::{PackageRow, PickupRow},
    schema::{packages, pickups},
};
use crate::customer::domain::CustomerId;
use crate::media::domain::ImageRef;
use crate::package::{
    domain::{
        ArchiveScope, Collector, Courier, Package, PackageId, PackageStatus, PersistedPackageData,
        PersistedPickupData, Pickup, PickupId, Recipient, SearchTerm, TrackingNumber,
    },
    ports::{PackageRepository, PackageRepositoryError, PackageRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by package adapters.
pub type PackagePgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed package repository.
#[derive(Debug, Clone)]
pub struct PostgresPackageRepository {
    pool: PackagePgPool,
}

impl PostgresPackageRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PackagePgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> PackageRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> PackageRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PackageRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(PackageRepositoryError::persistence)?
    }
}

#[async_trait]
impl PackageRepository for PostgresPackageRepository {
    async fn store(&self, package: &Package) -> PackageRepositoryResult<()> {
        let package_id = package.id();
        let row = to_row(package);

        self.run_blocking(move |connection| {
            diesel::insert_into(packages::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PackageRepositoryError::DuplicatePackage(package_id)
                    }
                    _ => PackageRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, package: &Package) -> PackageRepositoryResult<()> {
        let package_id = package.id();
        let row = to_row(package);

        self.run_blocking(move |connection| {
            let affected = diesel::update(packages::table.filter(packages::id.eq(row.id)))
                .set(&row)
                .execute(connection)
                .map_err(PackageRepositoryError::persistence)?;
            if affected == 0 {
                return Err(PackageRepositoryError::NotFound(package_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: PackageId) -> PackageRepositoryResult<Option<Package>> {
        self.run_blocking(move |connection| {
            let row = packages::table
                .filter(packages::id.eq(id.into_inner()))
                .select(PackageRow::as_select())
                .first::<PackageRow>(connection)
                .optional()
                .map_err(PackageRepositoryError::persistence)?;
            row.map(row_to_package).transpose()
        })
        .await
    }

    async fn find_by_tracking(
        &self,
        tracking: &TrackingNumber,
    ) -> PackageRepositoryResult<Option<Package>> {
        let lookup = tracking.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = packages::table
                .filter(packages::tracking.eq(lookup))
                .order(packages::created_at.desc())
                .select(PackageRow::as_select())
                .first::<PackageRow>(connection)
                .optional()
                .map_err(PackageRepositoryError::persistence)?;
            row.map(row_to_package).transpose()
        })
        .await
    }

    async fn list_awaiting_pickup_since(
        &self,
        cutoff: DateTime<Utc>,
    ) -> PackageRepositoryResult<Vec<Package>> {
        self.run_blocking(move |connection| {
            let rows = packages::table
                .filter(packages::status.eq(PackageStatus::AvailableForPickup.as_str()))
                .filter(packages::created_at.le(cutoff))
                .order(packages::created_at.asc())
                .select(PackageRow::as_select())
                .load::<PackageRow>(connection)
                .map_err(PackageRepositoryError::persistence)?;
            rows.into_iter().map(row_to_package).collect()
        })
        .await
    }

    async fn list_archived(
        &self,
        scope: ArchiveScope,
        term: Option<&SearchTerm>,
    ) -> PackageRepositoryResult<Vec<Package>> {
        let pattern = term.map(|needle| like_pattern(needle.as_str()));
        self.run_blocking(move |connection| {
            let mut query = packages::table.into_boxed();
            if scope == ArchiveScope::Concluded {
                query = query
                    .filter(packages::status.ne(PackageStatus::AvailableForPickup.as_str()));
            }
            if let Some(ref needle) = pattern {
                query = query.filter(
                    packages::name
                        .ilike(needle.clone())
                        .or(packages::tracking.ilike(needle.clone()))
                        .or(packages::phone.ilike(needle.clone())),
                );
            }
            let rows = query
                .order(packages::updated_at.desc())
                .select(PackageRow::as_select())
                .load::<PackageRow>(connection)
                .map_err(PackageRepositoryError::persistence)?;
            rows.into_iter().map(row_to_package).collect()
        })
        .await
    }

    async fn list_for_customer(
        &self,
        customer_id: CustomerId,
        status: PackageStatus,
    ) -> PackageRepositoryResult<Vec<Package>> {
        self.run_blocking(move |connection| {
            let rows = packages::table
                .filter(packages::customer_id.eq(customer_id.into_inner()))
                .filter(packages::status.eq(status.as_str()))
                .order(packages::created_at.desc())
                .select(PackageRow::as_select())
                .load::<PackageRow>(connection)
                .map_err(PackageRepositoryError::persistence)?;
            rows.into_iter().map(row_to_package).collect()
        })
        .await
    }

    async fn record_pickup(&self, pickup: &Pickup) -> PackageRepositoryResult<()> {
        let pickup_id = pickup.id();
        let row = to_pickup_row(pickup);

        self.run_blocking(move |connection| {
            diesel::insert_into(pickups::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        PackageRepositoryError::DuplicatePickup(pickup_id)
                    }
                    _ => PackageRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn list_pickups(&self, limit: usize) -> PackageRepositoryResult<Vec<Pickup>> {
        let row_limit = i64::try_from(limit).unwrap_or(i64::MAX);
        self.run_blocking(move |connection| {
            let rows = pickups::table
                .order(pickups::picked_up_at.desc())
                .limit(row_limit)
                .select(PickupRow::as_select())
                .load::<PickupRow>(connection)
                .map_err(PackageRepositoryError::persistence)?;
            rows.into_iter().map(row_to_pickup).collect()
        })
        .await
    }
}

/// Builds an `ILIKE` pattern that matches `term` literally anywhere.
pub(super) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

pub(super) fn to_row(package: &Package) -> PackageRow {
    let recipient = package.recipient();
    PackageRow {
        id: package.id().into_inner(),
        courier: package.courier().as_str().to_owned(),
        tracking: package.tracking().as_str().to_owned(),
        customer_id: package.customer_id().map(CustomerId::into_inner),
        name: recipient.name().to_owned(),
        phone: recipient.phone().map(str::to_owned),
        postal: recipient.postal().to_owned(),
        label_image: package.label_image().map(|image| image.as_str().to_owned()),
        status: package.status().as_str().to_owned(),
        created_by: package.created_by().map(str::to_owned),
        created_at: package.created_at(),
        updated_at: package.updated_at(),
        signed_at: package.signed_at(),
        signature_image: package
            .signature_image()
            .map(|image| image.as_str().to_owned()),
    }
}

pub(super) fn row_to_package(row: PackageRow) -> PackageRepositoryResult<Package> {
    let PackageRow {
        id,
        courier,
        tracking,
        customer_id,
        name,
        phone,
        postal,
        label_image,
        status,
        created_by,
        created_at,
        updated_at,
        signed_at,
        signature_image,
    } = row;

    let parse_image = |value: Option<String>| {
        value
            .map(|raw| ImageRef::parse(&raw))
            .transpose()
            .map_err(PackageRepositoryError::persistence)
    };

    let data = PersistedPackageData {
        id: PackageId::from_uuid(id),
        courier: Courier::new(courier).map_err(PackageRepositoryError::persistence)?,
        tracking: TrackingNumber::new(tracking).map_err(PackageRepositoryError::persistence)?,
        customer_id: customer_id.map(CustomerId::from_uuid),
        recipient: Recipient::new(name, phone, postal)
            .map_err(PackageRepositoryError::persistence)?,
        label_image: parse_image(label_image)?,
        status: PackageStatus::try_from(status.as_str())
            .map_err(PackageRepositoryError::persistence)?,
        created_by,
        created_at,
        updated_at,
        signed_at,
        signature_image: parse_image(signature_image)?,
    };
    Ok(Package::from_persisted(data))
}

pub(super) fn to_pickup_row(pickup: &Pickup) -> PickupRow {
    let collector = pickup.collector();
    PickupRow {
        id: pickup.id().into_inner(),
        customer_id: pickup.customer_id().into_inner(),
        customer_name: pickup.customer_name().to_owned(),
        collector_name: collector.name().to_owned(),
        id_type: collector.id_type().map(str::to_owned),
        id_number: collector.id_number().map(str::to_owned),
        signature_image: pickup.signature().map(|image| image.as_str().to_owned()),
        package_ids: pickup
            .package_ids()
            .iter()
            .copied()
            .map(PackageId::into_inner)
            .collect(),
        picked_up_at: pickup.picked_up_at(),
    }
}

pub(super) fn row_to_pickup(row: PickupRow) -> PackageRepositoryResult<Pickup> {
    let PickupRow {
        id,
        customer_id,
        customer_name,
        collector_name,
        id_type,
        id_number,
        signature_image,
        package_ids,
        picked_up_at,
    } = row;

    let data = PersistedPickupData {
        id: PickupId::from_uuid(id),
        customer_id: CustomerId::from_uuid(customer_id),
        customer_name,
        collector: Collector::new(collector_name, id_type, id_number)
            .map_err(PackageRepositoryError::persistence)?,
        signature: signature_image
            .map(|raw| ImageRef::parse(&raw))
            .transpose()
            .map_err(PackageRepositoryError::persistence)?,
        package_ids: package_ids.into_iter().map(PackageId::from_uuid).collect(),
        picked_up_at,
    };
    Ok(Pickup::from_persisted(data))
}
