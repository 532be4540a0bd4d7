//! FHIR-aligned `Patient` and `EpisodeOfCare` wire models.
//!
//! Notes:
//! - Registrations are never stored; these records exist only for the lifetime of a response.
//! - Absent optional fields are omitted rather than written as `null`.

use crate::datatypes::{CodeableConcept, HumanName, Identifier, Period, Reference};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire representation of a patient resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct Patient {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(rename = "birthDate", default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,
}

impl Patient {
    /// Create a patient with a single official name and a single official identifier.
    pub fn new(
        id: String,
        name: HumanName,
        birth_date: Option<String>,
        gender: Option<String>,
        identifier: Identifier,
    ) -> Self {
        let name = if name.family.is_some() || !name.given.is_empty() {
            vec![name]
        } else {
            vec![]
        };

        Self {
            resource_type: "Patient".to_string(),
            id,
            name,
            birth_date,
            gender,
            identifier: vec![identifier],
        }
    }
}

/// Wire representation of an episode of care.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct EpisodeOfCare {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    pub status: String,

    #[serde(rename = "type")]
    pub episode_type: Vec<CodeableConcept>,

    pub patient: Reference,

    #[serde(rename = "managingOrganization")]
    pub managing_organization: Reference,

    pub period: Period,
}

impl EpisodeOfCare {
    /// Create an `active` episode.
    pub fn active(
        id: String,
        episode_type: CodeableConcept,
        patient: Reference,
        managing_organization: Reference,
        period: Period,
    ) -> Self {
        Self {
            resource_type: "EpisodeOfCare".to_string(),
            id,
            status: "active".to_string(),
            episode_type: vec![episode_type],
            patient,
            managing_organization,
            period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identifier() -> Identifier {
        Identifier {
            use_type: "official".into(),
            system: "urn:oid:example-national-id".into(),
            value: "N-123".into(),
        }
    }

    #[test]
    fn renders_full_patient() {
        let patient = Patient::new(
            "p1".into(),
            HumanName {
                use_type: "official".into(),
                family: Some("Doe".into()),
                given: vec!["Jane".into()],
            },
            Some("1990-01-01".into()),
            Some("female".into()),
            identifier(),
        );

        let value = serde_json::to_value(&patient).expect("serialise");
        assert_eq!(
            value,
            json!({
                "resourceType": "Patient",
                "id": "p1",
                "name": [{"use": "official", "family": "Doe", "given": ["Jane"]}],
                "birthDate": "1990-01-01",
                "gender": "female",
                "identifier": [{"use": "official", "system": "urn:oid:example-national-id", "value": "N-123"}]
            })
        );
    }

    #[test]
    fn omits_empty_name_and_missing_fields() {
        let patient = Patient::new(
            "p2".into(),
            HumanName {
                use_type: "official".into(),
                family: None,
                given: vec![],
            },
            None,
            None,
            identifier(),
        );

        let value = serde_json::to_value(&patient).expect("serialise");
        assert!(value.get("name").is_none());
        assert!(value.get("birthDate").is_none());
        assert!(value.get("gender").is_none());
        assert_eq!(value["identifier"][0]["value"], "N-123");
    }

    #[test]
    fn episode_uses_fhir_key_names() {
        let episode = EpisodeOfCare::active(
            "e1".into(),
            CodeableConcept::single("http://example.org", "hacc", "Home and Community Care", None),
            Reference::to("Patient", "p1", Some("Jane Doe".into())),
            Reference::to("Organization", "org-example", None),
            Period::starting("2024-01-01T00:00:00"),
        );

        let value = serde_json::to_value(&episode).expect("serialise");
        assert_eq!(value["resourceType"], "EpisodeOfCare");
        assert_eq!(value["status"], "active");
        assert_eq!(value["type"][0]["coding"][0]["code"], "hacc");
        assert_eq!(value["patient"]["reference"], "Patient/p1");
        assert_eq!(value["managingOrganization"]["reference"], "Organization/org-example");
        assert_eq!(value["period"], json!({"start": "2024-01-01T00:00:00"}));
    }
}
