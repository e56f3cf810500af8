//! In-memory integration tests for the intake workflow.

use super::helpers::{PickupCounter, label_fields, label_photos};
use parcelpoint::{
    config::PickupPointConfig,
    customer::ports::CustomerRepository,
    intake::{
        domain::{FieldKind, IntakeDomainError, RequiredField},
        ports::ExtractionError,
        services::IntakeError,
    },
    media::ports::ImageStore,
    package::domain::{Courier, PackageStatus},
};
use rstest::{fixture, rstest};

#[fixture]
fn counter() -> PickupCounter {
    PickupCounter::default()
}

#[fixture]
fn courier() -> Courier {
    Courier::new("Canada Post").expect("valid courier")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_intake_round_produces_grouped_summary(
    counter: PickupCounter,
    courier: Courier,
) -> eyre::Result<()> {
    let mut session = counter.open_session(vec![
        Ok(label_fields("John Smith", "T1", "705-555-0001", "2S9")),
        Err(ExtractionError::Unavailable("blurry".to_owned())),
        Ok(label_fields("john smith", "T2", "", "P5A 2S9")),
        Ok(label_fields("Jane Doe", "T3", "705-555-0003", "p5a1x1")),
    ]);
    session.load_images(&courier, &label_photos(4)).await;

    session.skip(1)?;
    for _ in 0..3 {
        session.commit(0, Some("morning shift")).await?;
    }
    let summary = session.finalize()?;

    eyre::ensure!(summary.total_packages == 3, "three packages committed");
    eyre::ensure!(summary.groups.len() == 2, "two customers in the batch");
    let john = summary
        .groups
        .first()
        .ok_or_else(|| eyre::eyre!("missing first group"))?;
    eyre::ensure!(john.tracking_numbers == ["T1", "T2"], "commit order kept");
    eyre::ensure!(john.phone.as_deref() == Some("705-555-0001"), "phone from first package");
    let stored = counter.customers.all()?;
    eyre::ensure!(stored.len() == 2, "one customer per distinct name");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_package_is_trackable_and_keeps_label_photo(
    counter: PickupCounter,
    courier: Courier,
) -> eyre::Result<()> {
    let mut session = counter.open_session(vec![Ok(label_fields("Ada", "", "", "2T1"))]);
    session.load_images(&courier, &label_photos(1)).await;

    let premature = session.commit(0, None).await;
    eyre::ensure!(
        matches!(
            premature,
            Err(IntakeError::Domain(IntakeDomainError::MissingRequiredField(ref fields)))
                if fields.as_slice() == [RequiredField::Tracking]
        ),
        "commit without tracking must fail, got {premature:?}"
    );
    session.edit(0, FieldKind::Tracking, "7001 2345 6789")?;
    let committed = session.commit(0, None).await?;

    let view = counter
        .archive
        .track("700123456789")
        .await?
        .ok_or_else(|| eyre::eyre!("package not trackable"))?;
    eyre::ensure!(view.status == PackageStatus::AvailableForPickup, "awaiting pickup");
    eyre::ensure!(view.courier == "Canada Post", "courier recorded");
    let photo_ref = committed
        .package
        .label_image()
        .ok_or_else(|| eyre::eyre!("label photo reference missing"))?;
    let photo = counter.images.get(photo_ref).await?;
    eyre::ensure!(photo.is_some(), "label photo stored");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn configured_location_applies_to_new_customers(courier: Courier) -> eyre::Result<()> {
    let config = PickupPointConfig::from_toml_str(
        r#"
        [location]
        city = "Blind River"
        province = "ON"
        postal_prefix = "P0R"
        "#,
    )?;
    let counter = PickupCounter::with_config(config);
    let mut session = counter.open_session(vec![Ok(label_fields("Ada", "T9", "", "1B0"))]);
    session.load_images(&courier, &label_photos(1)).await;

    let committed = session.commit(0, None).await?;

    eyre::ensure!(committed.package.recipient().postal() == "P0R 1B0", "prefix applied");
    let customer = counter
        .customers
        .find_by_id(committed.customer.id())
        .await?
        .ok_or_else(|| eyre::eyre!("customer persisted"))?;
    eyre::ensure!(customer.contact().city() == "Blind River", "city from config");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_sessions_share_one_customer(counter: PickupCounter, courier: Courier) -> eyre::Result<()> {
    let mut morning = counter.open_session(vec![Ok(label_fields("Marie Curie", "M1", "", "2T1"))]);
    let mut evening = counter.open_session(vec![Ok(label_fields("MARIE CURIE", "M2", "", "2T1"))]);
    morning.load_images(&courier, &label_photos(1)).await;
    evening.load_images(&courier, &label_photos(1)).await;

    let first = morning.commit(0, None).await?;
    let second = evening.commit(0, None).await?;

    eyre::ensure!(first.customer.id() == second.customer.id(), "same customer");
    eyre::ensure!(counter.customers.all()?.len() == 1, "no duplicate customer");
    Ok(())
}
