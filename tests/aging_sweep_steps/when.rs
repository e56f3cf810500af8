//! When steps for aging sweep BDD scenarios.

use super::world::{AgingWorld, run_async};
use mockable::Clock;
use parcelpoint::package::domain::{Package, PackageId, PackageStatus};
use rstest_bdd_macros::when;

#[when("the aging sweep runs")]
fn aging_sweep_runs(world: &mut AgingWorld) -> Result<(), eyre::Report> {
    let now = world.clock.utc();
    world.swept = run_async(world.lifecycle().aging_sweep(now))?;
    Ok(())
}

#[when("the swept packages and an unknown package are sent back")]
fn send_back_swept(world: &mut AgingWorld) {
    let mut ids: Vec<PackageId> = world.swept.iter().map(Package::id).collect();
    ids.push(PackageId::new());
    let report = run_async(world.lifecycle().bulk_mark_sent_back(&ids));
    world.report = Some(report);
}

#[when(r#"the package for "{name}" is marked "{status}""#)]
fn mark_package(world: &mut AgingWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let target = PackageStatus::try_from(status.as_str())?;
    let id = world.package_named(&name)?.id();
    let result = run_async(world.lifecycle().set_status(id, target));
    world.last_status_change = Some(result);
    Ok(())
}
