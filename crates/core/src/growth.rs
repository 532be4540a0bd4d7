//! Simplified anthropometric interpretation.
//!
//! These are single-line threshold checks against crude linear references, not WHO z-scores.
//! Every result carries a disclaimer saying so.

use crate::constants::AVERAGE_DAYS_PER_MONTH;
use crate::{ServiceError, ServiceResult};
use chrono::NaiveDate;
use serde_json::Value;

/// Age limit, in months, of the weight-for-age and height-for-age checks.
const UNDER_FIVE_MONTHS: f64 = 60.0;

/// Observation interpretation code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interpretation {
    Normal,
    Low,
    High,
    InsufficientEvidence,
}

impl Interpretation {
    pub fn code(self) -> &'static str {
        match self {
            Interpretation::Normal => "N",
            Interpretation::Low => "L",
            Interpretation::High => "H",
            Interpretation::InsufficientEvidence => "IE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Case-insensitive `male` / `female`.
    pub fn parse(value: &str) -> ServiceResult<Self> {
        match value.to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ServiceError::InvalidRange(
                "Gender must be 'male' or 'female'".into(),
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

/// Whole days from birth to measurement.
pub fn age_in_days(dob: NaiveDate, measured_on: NaiveDate) -> ServiceResult<i64> {
    let days = (measured_on - dob).num_days();
    if days < 0 {
        return Err(ServiceError::InvalidRange(
            "Measurement date cannot be before date of birth.".into(),
        ));
    }
    Ok(days)
}

pub fn age_in_months(age_in_days: i64) -> f64 {
    age_in_days as f64 / AVERAGE_DAYS_PER_MONTH
}

/// Read a measurement given as a JSON number or a numeric string.
pub fn parse_measurement(field: &str, value: &Value) -> ServiceResult<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ServiceError::input_format(field, "Use a number for measurements."))
}

/// One interpreted indicator.
#[derive(Clone, Debug, PartialEq)]
pub struct Indicator {
    pub interpretation: Interpretation,
    pub text: &'static str,
}

impl Indicator {
    fn new(interpretation: Interpretation, text: &'static str) -> Self {
        Self { interpretation, text }
    }
}

/// Weight-for-age, height-for-age and weight-for-height.
#[derive(Clone, Debug, PartialEq)]
pub struct GrowthAssessment {
    pub weight_for_age: Indicator,
    pub height_for_age: Indicator,
    pub weight_for_height: Indicator,
}

impl GrowthAssessment {
    pub fn all_normal(&self) -> bool {
        [
            &self.weight_for_age,
            &self.height_for_age,
            &self.weight_for_height,
        ]
        .iter()
        .all(|i| i.interpretation == Interpretation::Normal)
    }
}

pub fn assess(age_months: f64, weight_kg: f64, height_cm: f64) -> GrowthAssessment {
    let weight_for_age = if age_months < UNDER_FIVE_MONTHS && weight_kg < 2.0 + 0.5 * age_months {
        Indicator::new(Interpretation::Low, "Underweight (potential)")
    } else {
        Indicator::new(Interpretation::Normal, "Normal weight-for-age")
    };

    let height_for_age = if age_months < UNDER_FIVE_MONTHS && height_cm < 50.0 + age_months {
        Indicator::new(Interpretation::Low, "Stunted (potential)")
    } else {
        Indicator::new(Interpretation::Normal, "Normal height-for-age")
    };

    let weight_for_height = if height_cm <= 0.0 {
        Indicator::new(
            Interpretation::InsufficientEvidence,
            "Cannot calculate weight-for-height due to invalid height",
        )
    } else {
        let ratio = weight_kg / (height_cm / 100.0).powi(2);
        if ratio < 15.0 && age_months > 6.0 {
            Indicator::new(Interpretation::Low, "Wasting (potential)")
        } else if ratio > 25.0 && age_months > 24.0 {
            Indicator::new(Interpretation::High, "Overweight (potential)")
        } else {
            Indicator::new(Interpretation::Normal, "Normal weight-for-height")
        }
    };

    GrowthAssessment {
        weight_for_age,
        height_for_age,
        weight_for_height,
    }
}
