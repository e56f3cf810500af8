//! Given steps for intake batch BDD scenarios.

use super::world::IntakeWorld;
use eyre::WrapErr;
use parcelpoint::{
    intake::{domain::ExtractedFields, ports::ExtractionError},
    package::domain::Courier,
};
use rstest_bdd_macros::given;

#[given(r#"an intake session for courier "{courier}""#)]
fn intake_session(world: &mut IntakeWorld, courier: String) -> Result<(), eyre::Report> {
    world.courier = Some(Courier::new(courier).wrap_err("scenario courier")?);
    Ok(())
}

#[given(r#"the extractor proposes "{name}" with tracking "{tracking}" and postal "{postal}""#)]
fn extractor_proposes(world: &mut IntakeWorld, name: String, tracking: String, postal: String) {
    world.script.push(Ok(ExtractedFields {
        name,
        tracking,
        phone: String::new(),
        postal,
    }));
}

#[given(r#"the extractor proposes "{name}" without tracking and postal "{postal}""#)]
fn extractor_proposes_without_tracking(world: &mut IntakeWorld, name: String, postal: String) {
    world.script.push(Ok(ExtractedFields {
        name,
        postal,
        ..ExtractedFields::empty()
    }));
}

#[given("the extractor fails for the next label")]
fn extractor_fails(world: &mut IntakeWorld) {
    world.script.push(Err(ExtractionError::Unavailable(
        "scenario backend failure".to_owned(),
    )));
}
