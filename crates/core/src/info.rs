//! Static service summary shared by every surface.

use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// `(path, method-prefixed description)` for each ANC endpoint.
pub const ANC_ENDPOINTS: [(&str, &str); 6] = [
    ("/anc/register-pregnancy", "POST: Register a pregnancy"),
    (
        "/anc/questionnaire/patient-registration",
        "GET: Sample patient registration questionnaire",
    ),
    ("/anc/calculate-edd", "POST: Calculate EDD from LMP"),
    ("/anc/schedule-visits", "POST: Calculate ANC visit schedule"),
    ("/anc/visit/questionnaire", "GET: Sample ANC visit questionnaire"),
    ("/anc/visit/analyze", "POST: Analyze ANC visit data for risks (simplified)"),
];

pub const CHILD_HEALTH_ENDPOINTS: [(&str, &str); 4] = [
    ("/child/register", "POST: Register a child"),
    ("/child/immunization-schedule", "POST: Generate immunization schedule"),
    (
        "/child/health-screening/questionnaire",
        "GET: Sample child health screening questionnaire",
    ),
    ("/child/growth-monitoring", "POST: Process growth measurements (simplified)"),
];

/// `(name, description)` of each tool.
pub const TOOLS: [(&str, &str); 7] = [
    (
        "register_pregnancy",
        "Register a new pregnancy and return FHIR Patient and EpisodeOfCare resources.",
    ),
    ("calculate_edd", "Calculate Expected Date of Delivery (EDD) from LMP."),
    (
        "schedule_anc_visits",
        "Calculate a schedule of ANC visits based on LMP or EDD.",
    ),
    (
        "analyze_anc_visit_data",
        "Analyze data collected during an ANC visit to identify risks.",
    ),
    ("register_child", "Register a new child and return a Patient FHIR resource."),
    (
        "get_immunization_schedule",
        "Generate a child's immunization schedule based on DOB.",
    ),
    (
        "growth_monitoring",
        "Process growth measurements and return FHIR Observation resources.",
    ),
];

pub const INFO_RESOURCE_URI: &str = "who://info";

/// `(uri, name, description)` of each resource.
pub const RESOURCES: [(&str, &str, &str); 4] = [
    (
        "anc://questionnaire/patient-registration",
        "patient_registration_questionnaire",
        "Get a sample FHIR Questionnaire for patient registration.",
    ),
    (
        "anc://visit/questionnaire",
        "anc_visit_questionnaire",
        "Get a sample FHIR Questionnaire for a routine ANC visit.",
    ),
    (
        "child://health-screening/questionnaire",
        "child_health_screening_questionnaire",
        "Get a sample FHIR Questionnaire for child health screening (danger signs).",
    ),
    (INFO_RESOURCE_URI, "api_info", "Get API info and available endpoints."),
];

#[derive(Clone, Debug, Serialize, PartialEq, ToSchema)]
pub struct ApiInfo {
    pub message: String,
    pub description: String,
    pub anc_endpoints: BTreeMap<String, String>,
    pub child_health_endpoints: BTreeMap<String, String>,
    pub tools: Vec<String>,
    pub resources: Vec<String>,
}

pub fn api_info() -> ApiInfo {
    fn endpoint_map(rows: &[(&str, &str)]) -> BTreeMap<String, String> {
        rows.iter()
            .map(|(path, what)| (path.to_string(), what.to_string()))
            .collect()
    }

    ApiInfo {
        message: "WHO Guidelines API (Proof of Concept)".to_string(),
        description: "Maternal and child health workflows for antenatal care and child health, \
                      modelled on FHIR resources."
            .to_string(),
        anc_endpoints: endpoint_map(&ANC_ENDPOINTS),
        child_health_endpoints: endpoint_map(&CHILD_HEALTH_ENDPOINTS),
        tools: TOOLS.iter().map(|(name, _)| name.to_string()).collect(),
        resources: RESOURCES.iter().map(|(uri, _, _)| uri.to_string()).collect(),
    }
}
