//! Static questionnaire templates.
//!
//! Templates are YAML documents compiled into the binary. Each request parses its template and
//! stamps it with the current time and the canonical URL it is served from.

use crate::config::CoreConfig;
use crate::dates::now_timestamp;
use crate::ServiceResult;
use fhir::Questionnaire;
use std::sync::Arc;

const PATIENT_REGISTRATION_YAML: &str =
    include_str!("../templates/questionnaires/anc_patient_registration.yaml");
const ANC_VISIT_YAML: &str = include_str!("../templates/questionnaires/anc_visit.yaml");
const CHILD_HEALTH_SCREENING_YAML: &str =
    include_str!("../templates/questionnaires/child_health_screening.yaml");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionnaireKind {
    PatientRegistration,
    AncVisit,
    ChildHealthScreening,
}

impl QuestionnaireKind {
    pub const ALL: [QuestionnaireKind; 3] = [
        QuestionnaireKind::PatientRegistration,
        QuestionnaireKind::AncVisit,
        QuestionnaireKind::ChildHealthScreening,
    ];

    fn template(self) -> &'static str {
        match self {
            QuestionnaireKind::PatientRegistration => PATIENT_REGISTRATION_YAML,
            QuestionnaireKind::AncVisit => ANC_VISIT_YAML,
            QuestionnaireKind::ChildHealthScreening => CHILD_HEALTH_SCREENING_YAML,
        }
    }

    /// HTTP path the questionnaire is served from.
    pub fn path(self) -> &'static str {
        match self {
            QuestionnaireKind::PatientRegistration => "/anc/questionnaire/patient-registration",
            QuestionnaireKind::AncVisit => "/anc/visit/questionnaire",
            QuestionnaireKind::ChildHealthScreening => "/child/health-screening/questionnaire",
        }
    }

    /// Resource URI on the tool surface.
    pub fn resource_uri(self) -> &'static str {
        match self {
            QuestionnaireKind::PatientRegistration => "anc://questionnaire/patient-registration",
            QuestionnaireKind::AncVisit => "anc://visit/questionnaire",
            QuestionnaireKind::ChildHealthScreening => "child://health-screening/questionnaire",
        }
    }

    pub fn from_resource_uri(uri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.resource_uri() == uri)
    }
}

#[derive(Clone, Debug)]
pub struct QuestionnaireService {
    cfg: Arc<CoreConfig>,
}

impl QuestionnaireService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    /// Parse and stamp the questionnaire of the given kind.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ServiceError::Template`] if the embedded template is malformed.
    pub fn get(&self, kind: QuestionnaireKind) -> ServiceResult<Questionnaire> {
        let questionnaire = Questionnaire::parse(kind.template())?;
        tracing::debug!(id = %questionnaire.id, items = questionnaire.item_count(), "serving questionnaire");
        Ok(questionnaire.stamped(now_timestamp(), self.cfg.server_url(kind.path())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> QuestionnaireService {
        QuestionnaireService::new(Arc::new(CoreConfig::default()))
    }

    #[test]
    fn every_template_parses() {
        for kind in QuestionnaireKind::ALL {
            let q = service().get(kind).expect("template parses");
            assert_eq!(q.resource_type, "Questionnaire");
            assert_eq!(q.status, "draft");
            assert!(q.date.is_some());
        }
    }

    #[test]
    fn patient_registration_content() {
        let q = service().get(QuestionnaireKind::PatientRegistration).unwrap();
        assert_eq!(q.id, "anc-patient-reg-q1");
        assert_eq!(
            q.url.as_deref(),
            Some("http://localhost:5001/anc/questionnaire/patient-registration")
        );
        assert_eq!(q.item.len(), 3);
        assert_eq!(q.item_count(), 3 + 4 + 2 + 3);
        assert_eq!(q.item[0].item[0].required, Some(true));
        assert_eq!(q.item[1].item[1].text, "Address (Street, City)");
    }

    #[test]
    fn anc_visit_content() {
        let q = service().get(QuestionnaireKind::AncVisit).unwrap();
        assert_eq!(q.id, "anc-visit-q1");
        assert_eq!(q.item[0].item[0].unit.as_deref(), Some("mmHg"));

        let movements = &q.item[1].item[1];
        assert_eq!(movements.item_type, "choice");
        let codes: Vec<_> = movements
            .answer_option
            .iter()
            .map(|o| o.value_coding.code.as_str())
            .collect();
        assert_eq!(codes, vec!["Y", "N", "U"]);
    }

    #[test]
    fn child_screening_content() {
        let q = service().get(QuestionnaireKind::ChildHealthScreening).unwrap();
        assert_eq!(q.id, "child-health-screening-q1");
        assert_eq!(q.item.len(), 4);

        let duration = &q.item[1].item[1];
        assert_eq!(duration.link_id, "2.2");
        assert_eq!(duration.enable_when[0].question, "2.1");
        assert!(duration.enable_when[0].answer_boolean);
        assert!(q.item[3].item[0].text.contains("37.5°C"));
    }

    #[test]
    fn resource_uris_round_trip() {
        for kind in QuestionnaireKind::ALL {
            assert_eq!(QuestionnaireKind::from_resource_uri(kind.resource_uri()), Some(kind));
        }
        assert_eq!(QuestionnaireKind::from_resource_uri("anc://nope"), None);
    }
}
