//! Then steps for aging sweep BDD scenarios.

use super::world::{AgingWorld, run_async};
use mockable::Clock;
use parcelpoint::package::{
    domain::{PackageDomainError, PackageStatus},
    ports::PackageRepository,
    services::PackageLifecycleError,
};
use rstest_bdd_macros::then;

#[then(r#"the sweep lists "{names}""#)]
fn sweep_lists(world: &AgingWorld, names: String) -> Result<(), eyre::Report> {
    let expected: Vec<&str> = names.split(',').map(str::trim).collect();
    let found: Vec<&str> = world
        .swept
        .iter()
        .map(|package| package.recipient().name())
        .collect();
    eyre::ensure!(found == expected, "expected {expected:?}, found {found:?}");
    Ok(())
}

#[then("the aging sweep lists nothing")]
fn sweep_lists_nothing(world: &AgingWorld) -> Result<(), eyre::Report> {
    let aged = run_async(world.lifecycle().aging_sweep(world.clock.utc()))?;
    eyre::ensure!(aged.is_empty(), "expected no aged packages, found {}", aged.len());
    Ok(())
}

#[then("{processed:usize} packages are reported processed and {failed:usize} failed")]
fn bulk_report_counts(
    world: &AgingWorld,
    processed: usize,
    failed: usize,
) -> Result<(), eyre::Report> {
    let report = world
        .report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing bulk update report"))?;
    eyre::ensure!(
        report.processed() == processed && report.failed() == failed,
        "expected {processed}/{failed}, found {}/{}",
        report.processed(),
        report.failed()
    );
    Ok(())
}

#[then(r#"the archive search for "{term}" finds {count:usize} sent back packages"#)]
fn archive_finds_sent_back(
    world: &AgingWorld,
    term: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let found = run_async(world.archive().search(&term))?;
    let sent_back = found
        .iter()
        .filter(|package| package.status() == PackageStatus::SentBack)
        .count();
    eyre::ensure!(sent_back == count, "expected {count} sent back, found {sent_back}");
    Ok(())
}

#[then("the last status change was rejected")]
fn status_change_rejected(world: &AgingWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_status_change
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing status change result"))?;
    eyre::ensure!(
        matches!(
            result,
            Err(PackageLifecycleError::Domain(
                PackageDomainError::InvalidStatusTransition { .. }
            ))
        ),
        "expected InvalidStatusTransition, got {result:?}"
    );
    Ok(())
}

#[then(r#"the package for "{name}" is "{status}""#)]
fn package_status_is(world: &AgingWorld, name: String, status: String) -> Result<(), eyre::Report> {
    let id = world.package_named(&name)?.id();
    let stored = run_async(world.packages.find_by_id(id))?
        .ok_or_else(|| eyre::eyre!("package {name} missing from repository"))?;
    eyre::ensure!(
        stored.status().as_str() == status,
        "expected {status}, found {}",
        stored.status()
    );
    Ok(())
}
