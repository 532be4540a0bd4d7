//! Antenatal care operations.

use crate::config::CoreConfig;
use crate::constants::{
    DEFAULT_PATIENT_ID, EPISODE_OF_CARE_TYPE_SYSTEM, MANAGING_ORGANIZATION_ID,
    MANAGING_ORGANIZATION_NAME, PREGNANCY_IDENTIFIER_SYSTEM, SNOMED_SYSTEM,
};
use crate::dates::{format_date, now_timestamp, parse_date, start_of_day};
use crate::demographics::{build_patient, patient_reference, RegistrationDefaults};
use crate::risk::{self, RiskFlag};
use crate::schedule::{self, ANC_CONTACTS, ANC_WINDOW_DAYS};
use crate::{new_id, non_empty, ServiceError, ServiceResult};
use api_shared::{AncVisitDataReq, CalculateEddReq, RegisterPregnancyReq, ScheduleAncVisitsReq};
use fhir::{
    CarePlan, CarePlanActivity, CodeableConcept, EpisodeOfCare, Patient, Period, Reference,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

const PREGNANCY_DEFAULTS: RegistrationDefaults = RegistrationDefaults {
    gender: Some("female"),
    identifier_system: PREGNANCY_IDENTIFIER_SYSTEM,
};

#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct RegisterPregnancyRes {
    pub message: String,
    pub patient: Patient,
    #[serde(rename = "episodeOfCare")]
    pub episode_of_care: EpisodeOfCare,
    pub next_steps: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, ToSchema)]
pub struct CalculateEddRes {
    pub lmp_date: String,
    pub estimated_delivery_date: String,
    pub calculation_method: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, ToSchema)]
pub struct AncVisitAnalysisRes {
    pub analysis_summary: String,
    pub risks_identified: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
    pub guideline_reference: String,
}

/// Antenatal care operations.
#[derive(Clone, Debug)]
pub struct AncService {
    cfg: Arc<CoreConfig>,
}

impl AncService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Register a pregnancy: a new patient plus an active episode of care starting now.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::MissingField`] if `patient_details` is absent.
    /// - [`ServiceError::InputFormat`] if `birth_date` is given but malformed.
    pub fn register_pregnancy(&self, req: &RegisterPregnancyReq) -> ServiceResult<RegisterPregnancyRes> {
        let details = req
            .patient_details
            .as_ref()
            .ok_or_else(|| ServiceError::missing(&["patient_details"]))?;

        let patient = build_patient(details, PREGNANCY_DEFAULTS)?;
        let episode = EpisodeOfCare::active(
            new_id(),
            CodeableConcept::single(
                EPISODE_OF_CARE_TYPE_SYSTEM,
                "hacc",
                "Home and Community Care",
                None,
            ),
            patient_reference(&patient),
            Reference::to(
                "Organization",
                MANAGING_ORGANIZATION_ID,
                Some(MANAGING_ORGANIZATION_NAME.to_string()),
            ),
            Period::starting(now_timestamp()),
        );

        tracing::info!(patient_id = %patient.id, episode_id = %episode.id, "pregnancy registered");

        Ok(RegisterPregnancyRes {
            message: "Pregnancy registration initiated.".to_string(),
            patient,
            episode_of_care: episode,
            next_steps: "Consider providing a patient registration questionnaire.".to_string(),
        })
    }

    /// Estimated delivery date by Naegele's rule.
    pub fn calculate_edd(&self, req: &CalculateEddReq) -> ServiceResult<CalculateEddRes> {
        let lmp_text = non_empty(&req.lmp_date).ok_or_else(|| ServiceError::missing(&["lmp_date"]))?;
        let lmp = parse_date("lmp_date", lmp_text)?;
        let edd = schedule::edd_from_lmp(lmp)?;

        Ok(CalculateEddRes {
            lmp_date: lmp_text.to_string(),
            estimated_delivery_date: format_date(edd),
            calculation_method: "Naegele's Rule (LMP + 280 days)".to_string(),
        })
    }

    /// Eight-contact visit plan anchored on LMP.
    ///
    /// `lmp_date` takes precedence; otherwise LMP is derived from `edd_date`. Empty strings
    /// count as absent.
    pub fn schedule_anc_visits(&self, req: &ScheduleAncVisitsReq) -> ServiceResult<CarePlan> {
        let (lmp, edd) = match (non_empty(&req.lmp_date), non_empty(&req.edd_date)) {
            (Some(lmp), _) => {
                let lmp = parse_date("lmp_date", lmp)?;
                (lmp, schedule::edd_from_lmp(lmp)?)
            }
            (None, Some(edd)) => {
                let edd = parse_date("edd_date", edd)?;
                (schedule::lmp_from_edd(edd)?, edd)
            }
            (None, None) => return Err(ServiceError::missing(&["lmp_date", "edd_date"])),
        };
        let patient_id = non_empty(&req.patient_id).unwrap_or(DEFAULT_PATIENT_ID);

        let code = CodeableConcept::single(SNOMED_SYSTEM, "390807002", "Antenatal care (procedure)", None);
        let activities = schedule::expand(lmp, &ANC_CONTACTS, ANC_WINDOW_DAYS)?
            .into_iter()
            .map(|entry| {
                CarePlanActivity::scheduled(
                    "Appointment",
                    code.clone(),
                    entry.row.label.to_string(),
                    Period::between(start_of_day(entry.target), start_of_day(entry.window_end)),
                )
            })
            .collect::<Vec<_>>();

        tracing::debug!(%patient_id, lmp = %lmp, contacts = activities.len(), "anc schedule built");

        Ok(CarePlan::active(
            new_id(),
            "plan",
            "Antenatal Care Visit Schedule",
            format!("Proposed schedule of 8 ANC contacts based on LMP: {}", format_date(lmp)),
            Reference::to("Patient", patient_id, None),
            self.cfg.guideline_url("anc/schedule"),
        )
        .with_period(Period::between(start_of_day(lmp), start_of_day(edd)))
        .with_activities(activities))
    }

    /// Risk flags for the vitals and symptoms captured at a visit. Never fails.
    pub fn analyze_anc_visit_data(&self, req: &AncVisitDataReq) -> AncVisitAnalysisRes {
        let assessment = risk::evaluate(req.vitals.as_ref(), req.symptoms.as_ref());

        tracing::info!(
            patient_id = non_empty(&req.patient_id).unwrap_or("-"),
            flags = assessment.flags.len(),
            "anc visit analyzed"
        );

        AncVisitAnalysisRes {
            analysis_summary: "ANC visit data analyzed.".to_string(),
            risks_identified: assessment.flags,
            recommendations: assessment.recommendations,
            guideline_reference: self.cfg.guideline_url("anc/risk-assessment"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_shared::{PersonDetails, Vitals};
    use serde_json::json;

    fn service() -> AncService {
        AncService::new(Arc::new(CoreConfig::default()))
    }

    fn schedule_req(lmp: Option<&str>, edd: Option<&str>) -> ScheduleAncVisitsReq {
        ScheduleAncVisitsReq {
            lmp_date: lmp.map(str::to_string),
            edd_date: edd.map(str::to_string),
            patient_id: None,
        }
    }

    #[test]
    fn register_pregnancy_builds_patient_and_episode() {
        let req = RegisterPregnancyReq {
            patient_details: Some(PersonDetails {
                given_name: Some("Amina".into()),
                family_name: Some("Okafor".into()),
                ..Default::default()
            }),
        };
        let res = service().register_pregnancy(&req).unwrap();

        assert_eq!(res.patient.gender.as_deref(), Some("female"));
        assert_eq!(res.episode_of_care.status, "active");
        assert_eq!(res.episode_of_care.patient.reference, format!("Patient/{}", res.patient.id));
        assert_eq!(res.episode_of_care.patient.display.as_deref(), Some("Amina Okafor"));
        assert_eq!(res.episode_of_care.managing_organization.reference, "Organization/org-example");
        assert!(res.episode_of_care.period.start.is_some());
        assert_ne!(res.patient.id, res.episode_of_care.id);

        let value = serde_json::to_value(&res).unwrap();
        assert_eq!(value["episodeOfCare"]["type"][0]["coding"][0]["code"], "hacc");
    }

    #[test]
    fn register_pregnancy_requires_details() {
        let err = service().register_pregnancy(&RegisterPregnancyReq::default()).unwrap_err();
        assert!(matches!(err, ServiceError::MissingField(ref f) if f.len() == 1 && f[0] == "patient_details"));
    }

    #[test]
    fn edd_is_lmp_plus_280_days() {
        let res = service()
            .calculate_edd(&CalculateEddReq { lmp_date: Some("2024-01-01".into()) })
            .unwrap();
        assert_eq!(res.lmp_date, "2024-01-01");
        assert_eq!(res.estimated_delivery_date, "2024-10-07");
        assert_eq!(res.calculation_method, "Naegele's Rule (LMP + 280 days)");
    }

    #[test]
    fn edd_errors() {
        let missing = service().calculate_edd(&CalculateEddReq { lmp_date: Some(String::new()) });
        assert!(matches!(missing, Err(ServiceError::MissingField(_))));

        let bad = service().calculate_edd(&CalculateEddReq { lmp_date: Some("2024/01/01".into()) });
        assert!(matches!(bad, Err(ServiceError::InputFormat { .. })));
    }

    #[test]
    fn schedule_from_lmp() {
        let plan = service().schedule_anc_visits(&schedule_req(Some("2024-01-01"), None)).unwrap();

        assert_eq!(plan.intent, "plan");
        assert_eq!(plan.subject.reference, "Patient/patient-example");
        assert_eq!(plan.activity.len(), 8);
        assert_eq!(
            plan.description,
            "Proposed schedule of 8 ANC contacts based on LMP: 2024-01-01"
        );
        let period = plan.period.as_ref().unwrap();
        assert_eq!(period.start.as_deref(), Some("2024-01-01T00:00:00"));
        assert_eq!(period.end.as_deref(), Some("2024-10-07T00:00:00"));

        let first = &plan.activity[0].detail;
        assert_eq!(first.kind, "Appointment");
        assert_eq!(first.description, "First contact: Up to 12 weeks");
        assert_eq!(first.scheduled_period.start.as_deref(), Some("2024-03-25T00:00:00"));
        assert_eq!(first.scheduled_period.end.as_deref(), Some("2024-03-26T00:00:00"));
        assert_eq!(
            plan.instantiates_canonical,
            vec!["http://who.int/smart-guidelines/anc/schedule".to_string()]
        );
    }

    #[test]
    fn schedule_from_edd_matches_schedule_from_derived_lmp() {
        let from_edd = service().schedule_anc_visits(&schedule_req(None, Some("2024-10-07"))).unwrap();
        let from_lmp = service().schedule_anc_visits(&schedule_req(Some("2024-01-01"), None)).unwrap();

        assert_eq!(from_edd.period, from_lmp.period);
        assert_eq!(from_edd.activity, from_lmp.activity);
        assert_eq!(from_edd.description, from_lmp.description);
    }

    #[test]
    fn lmp_wins_over_edd_and_empty_counts_as_absent() {
        let plan = service()
            .schedule_anc_visits(&schedule_req(Some("2024-01-01"), Some("2030-01-01")))
            .unwrap();
        assert_eq!(plan.period.unwrap().end.as_deref(), Some("2024-10-07T00:00:00"));

        let plan = service()
            .schedule_anc_visits(&schedule_req(Some(""), Some("2024-10-07")))
            .unwrap();
        assert_eq!(plan.period.unwrap().start.as_deref(), Some("2024-01-01T00:00:00"));
    }

    #[test]
    fn schedule_requires_an_anchor() {
        let err = service().schedule_anc_visits(&schedule_req(None, None)).unwrap_err();
        assert_eq!(err.kind(), "missing_field");

        let err = service().schedule_anc_visits(&schedule_req(None, Some("bad"))).unwrap_err();
        assert!(matches!(err, ServiceError::InputFormat { ref field, .. } if field == "edd_date"));
    }

    #[test]
    fn analyze_reports_guideline_and_flags() {
        let req = AncVisitDataReq {
            vitals: Some(Vitals {
                bp_systolic: Some(json!(150)),
                bp_diastolic: Some(json!(80)),
            }),
            ..Default::default()
        };
        let res = service().analyze_anc_visit_data(&req);
        assert_eq!(res.risks_identified.len(), 1);
        assert_eq!(res.risks_identified[0].risk_code.as_deref(), Some("ANC_HIGH_BP"));
        assert_eq!(
            res.guideline_reference,
            "http://who.int/smart-guidelines/anc/risk-assessment"
        );

        let empty = service().analyze_anc_visit_data(&AncVisitDataReq::default());
        assert_eq!(empty.risks_identified.len(), 1);
        assert!(empty.risks_identified[0].risk_code.is_none());
    }
}
