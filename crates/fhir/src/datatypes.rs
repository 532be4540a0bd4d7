//! FHIR general-purpose datatypes shared by every resource.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single code from a code system.
///
/// `system` is optional because questionnaire answer options carry only `code` and `display`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Coding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub code: String,
    pub display: String,
}

/// A concept expressed as one coding plus free text.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct CodeableConcept {
    pub coding: Vec<Coding>,
    pub text: String,
}

impl CodeableConcept {
    /// Build a concept with a single coding.
    ///
    /// `text` falls back to `display` when not given.
    pub fn single(system: &str, code: &str, display: &str, text: Option<&str>) -> Self {
        Self {
            coding: vec![Coding {
                system: Some(system.to_string()),
                code: code.to_string(),
                display: display.to_string(),
            }],
            text: text.unwrap_or(display).to_string(),
        }
    }

    /// Code of the first coding, if any.
    pub fn first_code(&self) -> Option<&str> {
        self.coding.first().map(|c| c.code.as_str())
    }
}

/// A literal reference to another resource, `<ResourceType>/<id>`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct Reference {
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    pub fn to(resource_type: &str, id: &str, display: Option<String>) -> Self {
        Self {
            reference: format!("{resource_type}/{id}"),
            display: display.filter(|d| !d.is_empty()),
        }
    }
}

/// A time range. Both bounds are ISO-8601 strings without a zone.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct Period {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Period {
    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: None,
        }
    }
}

/// UCUM system URI used for every measured quantity.
pub const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";

/// A measured amount.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct Quantity {
    pub value: f64,
    pub unit: String,
    pub system: String,
    pub code: String,
}

impl Quantity {
    /// A UCUM quantity whose code equals its unit (`kg`, `cm`).
    pub fn ucum(value: f64, unit: &str) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            system: UCUM_SYSTEM.to_string(),
            code: unit.to_string(),
        }
    }
}

/// A business identifier for a resource.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct Identifier {
    #[serde(rename = "use")]
    pub use_type: String,
    pub system: String,
    pub value: String,
}

/// A human name. Only the `official` use is ever produced.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct HumanName {
    #[serde(rename = "use")]
    pub use_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,
}
