//! In-memory integration tests for pickup, return and archive workflows.

use super::helpers::{PickupCounter, label_fields, label_photos};
use chrono::TimeDelta;
use mockable::Clock;
use parcelpoint::{
    intake::domain::CommittedPackage,
    media::{domain::LabelImage, ports::ImageStore},
    package::{
        domain::{
            ArchiveFilter, Collector, Courier, PackageId, PackageStatus, PackageView, PickupRequest,
        },
        services::DEFAULT_PICKUP_HISTORY_LIMIT,
    },
};
use rstest::{fixture, rstest};

#[fixture]
fn counter() -> PickupCounter {
    PickupCounter::default()
}

async fn receive(counter: &PickupCounter, name: &str, tracking: &str) -> CommittedPackage {
    let courier = Courier::new("Purolator").expect("valid courier");
    let mut session = counter.open_session(vec![Ok(label_fields(name, tracking, "705-555-0100", "2T1"))]);
    session.load_images(&courier, &label_photos(1)).await;
    session.commit(0, None).await.expect("commit succeeds")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn aged_packages_are_swept_and_sent_back(counter: PickupCounter) -> eyre::Result<()> {
    let stale = receive(&counter, "Old Parcel", "S-1").await;
    counter.clock.advance_days(2);
    receive(&counter, "New Parcel", "S-2").await;
    counter.clock.advance_days(4);

    let aged = counter.lifecycle.aging_sweep(counter.clock.utc()).await?;
    let ids: Vec<PackageId> = aged.iter().map(|package| package.id()).collect();
    eyre::ensure!(ids == [stale.package.id()], "only the six-day package ages");

    let report = counter
        .lifecycle
        .bulk_mark_sent_back(&[stale.package.id(), PackageId::new()])
        .await;
    eyre::ensure!(report.processed() == 1 && report.failed() == 1, "partial success reported");

    let returned = counter.archive.search("old parcel").await?;
    eyre::ensure!(
        returned.first().map(|package| package.status()) == Some(PackageStatus::SentBack),
        "sent-back package archived"
    );
    let still_waiting = counter.lifecycle.packages_due_for_return().await?;
    eyre::ensure!(still_waiting.is_empty(), "nothing else has aged yet");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn signed_pickup_round_trips_through_archive(counter: PickupCounter) -> eyre::Result<()> {
    let committed = receive(&counter, "Ada Lovelace", "P-1").await;
    counter.clock.advance(TimeDelta::hours(30));
    let signature = counter
        .images
        .put(&LabelImage::new(b"<svg/>".to_vec(), "image/svg+xml"))
        .await?;

    counter
        .lifecycle
        .sign_for_pickup(committed.package.id(), signature.clone())
        .await?;

    let archived = counter.archive.search("P-1").await?;
    let package = archived
        .first()
        .ok_or_else(|| eyre::eyre!("picked-up package not archived"))?;
    eyre::ensure!(package.status() == PackageStatus::PickedUp, "status updated");
    eyre::ensure!(package.signature_image() == Some(&signature), "signature kept");
    let view = PackageView::from_package(package, counter.clock.utc());
    eyre::ensure!(view.days_waiting == 1, "waited one full day");
    eyre::ensure!(view.status_label == "Picked Up", "staff label");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn customer_history_and_client_side_filter(counter: PickupCounter) -> eyre::Result<()> {
    let first = receive(&counter, "Grace Hopper", "G-1").await;
    let second = receive(&counter, "grace hopper", "G-2").await;
    receive(&counter, "Alan Turing", "A-1").await;
    let signature = counter
        .images
        .put(&LabelImage::new(b"<svg/>".to_vec(), "image/svg+xml"))
        .await?;
    let outcome = counter
        .lifecycle
        .bulk_pick_up(
            &[first.package.id()],
            PickupRequest {
                customer_id: first.customer.id(),
                collector: Collector::new(
                    "Vincent Hopper",
                    Some("Driver's licence".to_owned()),
                    Some("H4411-20931".to_owned()),
                )?,
                signature: Some(signature.clone()),
            },
        )
        .await?;
    eyre::ensure!(outcome.packages.is_complete(), "pickup applied");

    let history = counter
        .archive
        .pickup_history(DEFAULT_PICKUP_HISTORY_LIMIT)
        .await?;
    let visit = history
        .first()
        .ok_or_else(|| eyre::eyre!("pickup visit not recorded"))?;
    eyre::ensure!(visit.customer_id() == first.customer.id(), "visit linked to customer");
    eyre::ensure!(visit.collector().name() == "Vincent Hopper", "collector kept");
    eyre::ensure!(
        visit.collector().id_number() == Some("H4411-20931"),
        "identification kept"
    );
    eyre::ensure!(visit.signature() == Some(&signature), "visit signature kept");
    eyre::ensure!(visit.package_ids() == [first.package.id()], "collected package listed");

    let waiting = counter
        .archive
        .packages_for_customer(first.customer.id(), PackageStatus::AvailableForPickup)
        .await?;
    eyre::ensure!(
        waiting.iter().map(|package| package.id()).collect::<Vec<_>>() == [second.package.id()],
        "only the uncollected package waits"
    );

    let everything = counter.archive.list_all().await?;
    let narrowed = parcelpoint::package::services::ArchiveQueryService::<
        parcelpoint::package::adapters::memory::InMemoryPackageRepository,
    >::filter_all(
        &everything,
        &ArchiveFilter::new().with_customer("GRACE").with_tracking("g-"),
    );
    eyre::ensure!(narrowed.len() == 2, "both of Grace's packages match");
    Ok(())
}
