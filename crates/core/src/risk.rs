//! Antenatal visit risk flags.
//!
//! Checks run in a fixed order and each contributes at most one flag and one recommendation.
//! When nothing fires, a single low-severity flag without a code is returned instead.

use api_shared::{Symptoms, Vitals};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

const SYSTOLIC_LIMIT: i64 = 140;
const DIASTOLIC_LIMIT: i64 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Low,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RiskFlag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_code: Option<String>,
    pub description: String,
    pub severity: Severity,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RiskAssessment {
    pub flags: Vec<RiskFlag>,
    pub recommendations: Vec<String>,
}

impl RiskAssessment {
    fn push(&mut self, code: Option<&str>, description: &str, severity: Severity, recommendation: &str) {
        self.flags.push(RiskFlag {
            risk_code: code.map(str::to_string),
            description: description.to_string(),
            severity,
        });
        self.recommendations.push(recommendation.to_string());
    }
}

pub fn evaluate(vitals: Option<&Vitals>, symptoms: Option<&Symptoms>) -> RiskAssessment {
    let mut out = RiskAssessment::default();

    if let Some((systolic, diastolic)) = vitals.and_then(blood_pressure) {
        tracing::debug!(systolic, diastolic, "evaluating blood pressure");
        if systolic >= SYSTOLIC_LIMIT || diastolic >= DIASTOLIC_LIMIT {
            out.push(
                Some("ANC_HIGH_BP"),
                "Elevated blood pressure, potential for pre-eclampsia.",
                Severity::High,
                "Immediate follow-up with a clinician for blood pressure assessment.",
            );
        }
    }

    let bleeding = symptoms
        .and_then(|s| s.bleeding.as_ref())
        .is_some_and(|v| *v == Value::Bool(true));
    if bleeding {
        out.push(
            Some("ANC_BLEEDING"),
            "Patient reports bleeding.",
            Severity::High,
            "Urgent assessment for cause of bleeding.",
        );
    }

    if out.flags.is_empty() {
        out.push(
            None,
            "No immediate high-risk factors identified based on this limited data.",
            Severity::Low,
            "Continue routine ANC care as per schedule. Reinforce education on danger signs.",
        );
    }

    out
}

/// Both readings, when both are present and numeric. Anything else skips the check.
fn blood_pressure(vitals: &Vitals) -> Option<(i64, i64)> {
    let systolic = reading(vitals.bp_systolic.as_ref()?)?;
    let diastolic = reading(vitals.bp_diastolic.as_ref()?)?;
    Some((systolic, diastolic))
}

/// JSON numbers are truncated toward zero; strings must hold an integer.
fn reading(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
