//! Given steps for aging sweep BDD scenarios.

use super::world::{AgingWorld, run_async};
use crate::test_helpers::ManualClock;
use chrono::TimeDelta;
use eyre::WrapErr;
use mockable::Clock;
use parcelpoint::package::{
    domain::{Courier, Package, ReceivePackage, Recipient, TrackingNumber},
    ports::PackageRepository,
};
use rstest_bdd_macros::given;

#[given(r#"a package for "{name}" received {days:i64} days ago"#)]
fn package_received_days_ago(
    world: &mut AgingWorld,
    name: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let received_at = ManualClock::starting_at(world.clock.utc() - TimeDelta::days(days));
    let tracking = format!("AGE-{}", world.received.len() + 1);
    let package = Package::receive(
        ReceivePackage {
            courier: Courier::new("Purolator")?,
            tracking: TrackingNumber::new(tracking)?,
            customer_id: None,
            recipient: Recipient::new(name, None, "P5A 2T1")?,
            label_image: None,
            created_by: None,
        },
        &received_at,
    );
    run_async(world.packages.store(&package)).wrap_err("store scenario package")?;
    world.received.push(package);
    Ok(())
}

#[given("the aging threshold is {days:u32} days")]
fn aging_threshold(world: &mut AgingWorld, days: u32) {
    world.policy.aging_threshold_days = days;
}

#[given("terminal states are enforced")]
fn terminal_states_enforced(world: &mut AgingWorld) {
    world.policy.enforce_terminal_states = true;
}
