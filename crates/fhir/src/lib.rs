//! FHIR-shaped wire models for the maternal and child health service.
//!
//! This crate provides **wire models** for the subset of FHIR resources the service emits:
//! - `Patient` and `EpisodeOfCare` (registration)
//! - `CarePlan` (antenatal visit and immunization schedules)
//! - `Observation` (growth measurements)
//! - `Questionnaire` (static form templates)
//!
//! This crate focuses on:
//! - reproducing FHIR key names and nesting verbatim
//! - serialisation/deserialisation
//! - small constructors for the datatypes every resource shares
//!
//! It does NOT perform FHIR profile or terminology validation. Any struct here serialises to a
//! JSON object satisfying the documented key contract; that is the only guarantee.

pub mod care_plan;
pub mod datatypes;
pub mod observation;
pub mod patient;
pub mod questionnaire;

pub use care_plan::{ActivityDetail, CarePlan, CarePlanActivity};
pub use datatypes::{CodeableConcept, Coding, HumanName, Identifier, Period, Quantity, Reference};
pub use observation::Observation;
pub use patient::{EpisodeOfCare, Patient};
pub use questionnaire::{AnswerOption, EnableWhen, Questionnaire, QuestionnaireItem};

/// Errors returned by the `fhir` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum FhirError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`FhirError`].
pub type FhirResult<T> = Result<T, FhirError>;
