//! Child health operations.

use crate::config::CoreConfig;
use crate::constants::{
    CHILD_IDENTIFIER_SYSTEM, LOINC_SYSTEM, OBSERVATION_CATEGORY_SYSTEM,
    OBSERVATION_INTERPRETATION_SYSTEM,
};
use crate::dates::{parse_date, start_of_day};
use crate::demographics::{build_patient, RegistrationDefaults};
use crate::growth::{self, Gender, Indicator};
use crate::schedule::{self, IMMUNIZATION_PLAN, IMMUNIZATION_WINDOW_DAYS};
use crate::{new_id, non_empty, ServiceError, ServiceResult};
use api_shared::{GrowthMonitoringReq, ImmunizationScheduleReq, RegisterChildReq};
use fhir::{
    CarePlan, CarePlanActivity, CodeableConcept, Observation, Patient, Period, Quantity, Reference,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

const CHILD_DEFAULTS: RegistrationDefaults = RegistrationDefaults {
    gender: None,
    identifier_system: CHILD_IDENTIFIER_SYSTEM,
};

const GROWTH_NORMAL_NOTE: &str =
    "Child growth appears normal based on provided measurements (simplified assessment).";
const GROWTH_REVIEW_NOTE: &str = "Further assessment needed if any indicators are abnormal.";
const GROWTH_DISCLAIMER: &str = "Z-score calculations and interpretations are highly simplified. \
                                 Use WHO Anthro library or official tools for accurate assessment.";

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RegisterChildRes {
    pub message: String,
    pub patient: Patient,
}

#[derive(Clone, Debug, Serialize, PartialEq, ToSchema)]
pub struct MeasurementsProcessed {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub gender: String,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct GrowthMonitoringRes {
    pub message: String,
    pub age_in_days: i64,
    /// Rounded to two decimal places.
    pub age_in_months: f64,
    pub measurements_processed: MeasurementsProcessed,
    pub fhir_observations: Vec<Observation>,
    pub overall_health_status_note: String,
    pub disclaimer: String,
}

#[derive(Clone, Debug)]
pub struct ChildHealthService {
    cfg: Arc<CoreConfig>,
}

impl ChildHealthService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn register_child(&self, req: &RegisterChildReq) -> ServiceResult<RegisterChildRes> {
        let details = req
            .child_details
            .as_ref()
            .ok_or_else(|| ServiceError::missing(&["child_details"]))?;

        let patient = build_patient(details, CHILD_DEFAULTS)?;
        tracing::info!(patient_id = %patient.id, "child registered");

        Ok(RegisterChildRes {
            message: "Child registration successful.".to_string(),
            patient,
        })
    }

    /// Routine immunization plan anchored on date of birth.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::MissingField`] listing every absent field among `dob` and `patient_id`.
    /// - [`ServiceError::InputFormat`] if `dob` is malformed.
    pub fn immunization_schedule(&self, req: &ImmunizationScheduleReq) -> ServiceResult<CarePlan> {
        let (dob_text, patient_id) = match (non_empty(&req.dob), non_empty(&req.patient_id)) {
            (Some(dob), Some(id)) => (dob, id),
            (dob, id) => {
                let mut missing = Vec::new();
                if dob.is_none() {
                    missing.push("dob");
                }
                if id.is_none() {
                    missing.push("patient_id");
                }
                return Err(ServiceError::missing(&missing));
            }
        };
        let dob = parse_date("dob", dob_text)?;

        let activities = schedule::expand(dob, &IMMUNIZATION_PLAN, IMMUNIZATION_WINDOW_DAYS)?
            .into_iter()
            .map(|entry| {
                let (system, code, display) = entry.row.coding();
                CarePlanActivity::scheduled(
                    "ImmunizationRecommendation",
                    CodeableConcept::single(&system, &code, &display, None),
                    format!("{} - {}", entry.row.vaccine, entry.row.dose),
                    Period::between(start_of_day(entry.target), start_of_day(entry.window_end)),
                )
            })
            .collect::<Vec<_>>();

        tracing::debug!(%patient_id, doses = activities.len(), "immunization schedule built");

        Ok(CarePlan::active(
            new_id(),
            "order",
            "Child Immunization Schedule",
            format!("Recommended immunization schedule for child born on {dob_text}."),
            Reference::to("Patient", patient_id, None),
            self.cfg.guideline_url("immunization/child"),
        )
        .with_activities(activities))
    }

    /// Interpret one set of growth measurements.
    ///
    /// All six fields are required. Measurements may be numbers or numeric strings; gender is
    /// `male` or `female` in any case.
    pub fn growth_monitoring(&self, req: &GrowthMonitoringReq) -> ServiceResult<GrowthMonitoringRes> {
        let missing: Vec<&str> = [
            ("dob", non_empty(&req.dob).is_none()),
            ("measurement_date", non_empty(&req.measurement_date).is_none()),
            ("weight_kg", req.weight_kg.is_none()),
            ("height_cm", req.height_cm.is_none()),
            ("gender", non_empty(&req.gender).is_none()),
            ("patient_id", non_empty(&req.patient_id).is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(ServiceError::missing(&missing));
        }

        // Presence checked above.
        let field = |v: &Option<String>| v.as_deref().unwrap_or_default().to_string();
        let dob = parse_date("dob", &field(&req.dob))?;
        let measured_on = parse_date("measurement_date", &field(&req.measurement_date))?;
        let weight_kg = match &req.weight_kg {
            Some(v) => growth::parse_measurement("weight_kg", v)?,
            None => return Err(ServiceError::missing(&["weight_kg"])),
        };
        let height_cm = match &req.height_cm {
            Some(v) => growth::parse_measurement("height_cm", v)?,
            None => return Err(ServiceError::missing(&["height_cm"])),
        };
        let gender = Gender::parse(&field(&req.gender))?;
        let patient_id = field(&req.patient_id);

        let age_in_days = growth::age_in_days(dob, measured_on)?;
        let age_in_months = growth::age_in_months(age_in_days);
        let assessment = growth::assess(age_in_months, weight_kg, height_cm);

        let subject = Reference::to("Patient", &patient_id, None);
        let effective = start_of_day(measured_on);
        let observe = |code: &str, display: &str, value: Quantity, indicator: &Indicator| {
            Observation::final_result(
                new_id(),
                CodeableConcept::single(OBSERVATION_CATEGORY_SYSTEM, "vital-signs", "Vital Signs", None),
                CodeableConcept::single(LOINC_SYSTEM, code, display, None),
                subject.clone(),
                effective.clone(),
                value,
                CodeableConcept::single(
                    OBSERVATION_INTERPRETATION_SYSTEM,
                    indicator.interpretation.code(),
                    indicator.text,
                    Some(indicator.text),
                ),
            )
        };

        let observations = vec![
            observe(
                "3141-9",
                "Body weight Measured -- Wt/Age",
                Quantity::ucum(weight_kg, "kg"),
                &assessment.weight_for_age,
            ),
            observe(
                "8308-9",
                "Body height Measured -- Ht/Age",
                Quantity::ucum(height_cm, "cm"),
                &assessment.height_for_age,
            ),
            observe(
                "8340-2",
                "Body weight Measured -- Wt/Len",
                Quantity::ucum(weight_kg, "kg"),
                &assessment.weight_for_height,
            ),
        ];

        let note = if assessment.all_normal() {
            GROWTH_NORMAL_NOTE
        } else {
            GROWTH_REVIEW_NOTE
        };

        tracing::info!(
            %patient_id,
            age_in_days,
            wfa = assessment.weight_for_age.interpretation.code(),
            hfa = assessment.height_for_age.interpretation.code(),
            wfh = assessment.weight_for_height.interpretation.code(),
            "growth measurements interpreted"
        );

        Ok(GrowthMonitoringRes {
            message: "Growth monitoring data processed (simplified assessment).".to_string(),
            age_in_days,
            age_in_months: (age_in_months * 100.0).round() / 100.0,
            measurements_processed: MeasurementsProcessed {
                weight_kg,
                height_cm,
                gender: gender.as_str().to_string(),
            },
            fhir_observations: observations,
            overall_health_status_note: note.to_string(),
            disclaimer: GROWTH_DISCLAIMER.to_string(),
        })
    }
}
