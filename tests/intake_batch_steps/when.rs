//! When steps for intake batch BDD scenarios.

use super::world::{IntakeWorld, photos, run_async};
use parcelpoint::intake::domain::FieldKind;
use rstest_bdd_macros::when;

#[when("the labels are loaded")]
fn labels_loaded(world: &mut IntakeWorld) -> Result<(), eyre::Report> {
    let courier = world.courier()?;
    let images = photos(world.script.len());
    run_async(world.session().load_images(&courier, &images));
    Ok(())
}

#[when("every pending item is committed")]
fn commit_everything(world: &mut IntakeWorld) -> Result<(), eyre::Report> {
    while !world.session().pending().is_empty() {
        let committed = run_async(world.session().commit(0, Some("scenario")))?;
        world.record_commit(Ok(committed));
    }
    Ok(())
}

#[when("pending item {index:usize} is committed")]
fn commit_item(world: &mut IntakeWorld, index: usize) {
    let result = run_async(world.session().commit(index, Some("scenario")));
    world.record_commit(result);
}

#[when("pending item {index:usize} is skipped")]
fn skip_item(world: &mut IntakeWorld, index: usize) -> Result<(), eyre::Report> {
    world.session().skip(index)?;
    Ok(())
}

#[when(r#"the tracking of pending item {index:usize} is set to "{tracking}""#)]
fn edit_tracking(
    world: &mut IntakeWorld,
    index: usize,
    tracking: String,
) -> Result<(), eyre::Report> {
    world.session().edit(index, FieldKind::Tracking, tracking)?;
    Ok(())
}

#[when("the session is finalized")]
fn finalize_session(world: &mut IntakeWorld) {
    let summary = world.session().finalize();
    world.summary = Some(summary);
}
