//! Request and shared response bodies.
//!
//! Every request field is optional at the type level. Required-ness is checked by the core
//! operations so a missing field surfaces as a structured `missing_field` error listing every
//! absent name, instead of a generic deserialisation failure on the first one.
//!
//! Measurement and vital-sign readings are kept as raw JSON values: callers send both numbers
//! and numeric strings, and the core decides per field whether a non-numeric value is an error
//! (growth measurements) or silently ignored (blood pressure).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Liveness response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Structured error body for a rejected call.
///
/// `kind` is one of `missing_field`, `input_format`, `invalid_range` or `internal`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
}

/// Demographic details of a person being registered.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct PersonDetails {
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    /// `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub identifier_system: Option<String>,
    pub identifier_value: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct RegisterPregnancyReq {
    pub patient_details: Option<PersonDetails>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct CalculateEddReq {
    /// Last menstrual period, `YYYY-MM-DD`.
    pub lmp_date: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct ScheduleAncVisitsReq {
    /// Last menstrual period, `YYYY-MM-DD`. Takes precedence over `edd_date`.
    pub lmp_date: Option<String>,
    /// Estimated delivery date, `YYYY-MM-DD`.
    pub edd_date: Option<String>,
    pub patient_id: Option<String>,
}

/// Vital signs captured at an antenatal visit.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct Vitals {
    /// mmHg; integer or integer string.
    #[schema(value_type = Option<Object>)]
    pub bp_systolic: Option<Value>,
    /// mmHg; integer or integer string.
    #[schema(value_type = Option<Object>)]
    pub bp_diastolic: Option<Value>,
}

/// Symptoms reported at an antenatal visit.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct Symptoms {
    /// Only the JSON literal `true` counts as reported bleeding.
    #[schema(value_type = Option<Object>)]
    pub bleeding: Option<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct AncVisitDataReq {
    pub vitals: Option<Vitals>,
    pub symptoms: Option<Symptoms>,
    pub patient_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct RegisterChildReq {
    pub child_details: Option<PersonDetails>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct ImmunizationScheduleReq {
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: Option<String>,
    pub patient_id: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(default)]
pub struct GrowthMonitoringReq {
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: Option<String>,
    /// `YYYY-MM-DD`, not before `dob`.
    pub measurement_date: Option<String>,
    /// Number or numeric string.
    #[schema(value_type = Option<Object>)]
    pub weight_kg: Option<Value>,
    /// Number or numeric string.
    #[schema(value_type = Option<Object>)]
    pub height_cm: Option<Value>,
    /// `male` or `female`, case-insensitive.
    pub gender: Option<String>,
    pub patient_id: Option<String>,
}
