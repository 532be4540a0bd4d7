//! FHIR-aligned `Observation` wire model.

use crate::datatypes::{CodeableConcept, Quantity, Reference};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire representation of an observation with one quantity and one interpretation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct Observation {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    pub status: String,

    pub category: Vec<CodeableConcept>,

    pub code: CodeableConcept,

    pub subject: Reference,

    #[serde(rename = "effectiveDateTime")]
    pub effective_date_time: String,

    #[serde(rename = "valueQuantity")]
    pub value_quantity: Quantity,

    pub interpretation: Vec<CodeableConcept>,
}

impl Observation {
    /// Create a `final` observation.
    pub fn final_result(
        id: String,
        category: CodeableConcept,
        code: CodeableConcept,
        subject: Reference,
        effective_date_time: String,
        value_quantity: Quantity,
        interpretation: CodeableConcept,
    ) -> Self {
        Self {
            resource_type: "Observation".to_string(),
            id,
            status: "final".to_string(),
            category: vec![category],
            code,
            subject,
            effective_date_time,
            value_quantity,
            interpretation: vec![interpretation],
        }
    }

    /// Code of the first interpretation.
    pub fn interpretation_code(&self) -> Option<&str> {
        self.interpretation.first().and_then(CodeableConcept::first_code)
    }
}
