//! FHIR-aligned `CarePlan` wire model.
//!
//! A care plan here is always a schedule: an ordered list of activities, each with a
//! scheduled window. Activity order is significant and is preserved on serialisation.

use crate::datatypes::{CodeableConcept, Period, Reference};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire representation of a care plan.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct CarePlan {
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    pub id: String,

    pub status: String,

    pub intent: String,

    pub title: String,

    pub description: String,

    pub subject: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    pub activity: Vec<CarePlanActivity>,

    #[serde(rename = "instantiatesCanonical")]
    pub instantiates_canonical: Vec<String>,
}

impl CarePlan {
    /// Create an `active` plan with no activities yet.
    pub fn active(
        id: String,
        intent: &str,
        title: &str,
        description: String,
        subject: Reference,
        instantiates: String,
    ) -> Self {
        Self {
            resource_type: "CarePlan".to_string(),
            id,
            status: "active".to_string(),
            intent: intent.to_string(),
            title: title.to_string(),
            description,
            subject,
            period: None,
            activity: Vec::new(),
            instantiates_canonical: vec![instantiates],
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_activities(mut self, activity: Vec<CarePlanActivity>) -> Self {
        self.activity = activity;
        self
    }
}

/// One planned activity.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct CarePlanActivity {
    pub detail: ActivityDetail,
}

/// Inline definition of a planned activity.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, ToSchema)]
pub struct ActivityDetail {
    /// Resource kind the activity would become (`Appointment`, `ImmunizationRecommendation`).
    pub kind: String,

    pub code: CodeableConcept,

    pub status: String,

    pub description: String,

    #[serde(rename = "scheduledPeriod")]
    pub scheduled_period: Period,
}

impl CarePlanActivity {
    /// A `scheduled` activity.
    pub fn scheduled(
        kind: &str,
        code: CodeableConcept,
        description: String,
        scheduled_period: Period,
    ) -> Self {
        Self {
            detail: ActivityDetail {
                kind: kind.to_string(),
                code,
                status: "scheduled".to_string(),
                description,
                scheduled_period,
            },
        }
    }
}
