//! Patient records built from registration details.
//!
//! Nothing is stored: each registration mints fresh identifiers and returns the record.

use crate::dates::parse_date;
use crate::{new_id, non_empty, ServiceResult};
use api_shared::PersonDetails;
use fhir::{HumanName, Identifier, Patient, Reference};

/// Defaults applied to absent registration fields.
#[derive(Clone, Copy, Debug)]
pub struct RegistrationDefaults {
    pub gender: Option<&'static str>,
    pub identifier_system: &'static str,
}

/// Build a patient record.
///
/// `birth_date`, when given, must be `YYYY-MM-DD`. Missing identifier values are replaced by a
/// fresh id.
pub fn build_patient(
    details: &PersonDetails,
    defaults: RegistrationDefaults,
) -> ServiceResult<Patient> {
    let birth_date = non_empty(&details.birth_date);
    if let Some(value) = birth_date {
        parse_date("birth_date", value)?;
    }

    let name = HumanName {
        use_type: "official".to_string(),
        family: non_empty(&details.family_name).map(str::to_string),
        given: non_empty(&details.given_name)
            .map(|g| vec![g.to_string()])
            .unwrap_or_default(),
    };

    let identifier = Identifier {
        use_type: "official".to_string(),
        system: non_empty(&details.identifier_system)
            .unwrap_or(defaults.identifier_system)
            .to_string(),
        value: non_empty(&details.identifier_value)
            .map(str::to_string)
            .unwrap_or_else(new_id),
    };

    let gender = details
        .gender
        .clone()
        .or_else(|| defaults.gender.map(str::to_string));

    Ok(Patient::new(
        new_id(),
        name,
        birth_date.map(str::to_string),
        gender,
        identifier,
    ))
}

/// `Patient/<id>` with the display name, when the patient has one.
pub fn patient_reference(patient: &Patient) -> Reference {
    let display = patient.name.first().map(|n| {
        n.given
            .iter()
            .map(String::as_str)
            .chain(n.family.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    });
    Reference::to("Patient", &patient.id, display)
}
