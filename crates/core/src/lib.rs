//! # MCH Core
//!
//! Shared logic layer for the maternal and child health service.
//!
//! This crate holds every operation the service exposes:
//! - Antenatal care: pregnancy registration, EDD, visit scheduling, visit risk analysis
//! - Child health: registration, immunization schedule, growth interpretation
//! - Static questionnaires and the service summary
//!
//! **No API concerns**: HTTP routing and the JSON-RPC tool protocol live in `api-rest` and
//! `api-mcp`. Both surfaces call the same services with the same request types, so their
//! behaviour cannot drift.
//!
//! All operations are stateless. The only shared value is the [`CoreConfig`] resolved at
//! startup and held in an `Arc`.

pub mod anc;
pub mod child;
pub mod config;
pub mod constants;
pub mod dates;
pub mod demographics;
pub mod error;
pub mod growth;
pub mod info;
pub mod questionnaire;
pub mod request;
pub mod risk;
pub mod schedule;

pub use anc::{AncService, AncVisitAnalysisRes, CalculateEddRes, RegisterPregnancyRes};
pub use child::{ChildHealthService, GrowthMonitoringRes, MeasurementsProcessed, RegisterChildRes};
pub use config::{config_from_env_values, CoreConfig};
pub use error::{ServiceError, ServiceResult};
pub use info::{api_info, ApiInfo};
pub use questionnaire::{QuestionnaireKind, QuestionnaireService};
pub use request::decode as decode_request;
pub use risk::{RiskFlag, Severity};

// Shared request and response bodies.
pub use api_shared::pb;

/// Fresh resource id, canonical hyphenated UUID v4.
pub fn new_id() -> String {
    mch_uuid::ResourceId::new().to_string()
}

/// Treat `None` and `""` alike.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
