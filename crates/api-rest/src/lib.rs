//! # API REST
//!
//! REST API implementation for the maternal and child health service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON extraction, status codes, CORS, request tracing)
//!
//! Every handler is a thin adapter over `mch-core`; validation failures map to `400` with the
//! structured [`pb::ErrorRes`] body.

#![warn(rust_2018_idioms)]

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{pb, HealthService};
use mch_core::{
    anc, child, decode_request, info, risk, AncService, ChildHealthService, CoreConfig,
    QuestionnaireKind, QuestionnaireService, ServiceError,
};

/// Application state for the REST API server
///
/// Holds the core services, each sharing the configuration resolved at startup.
#[derive(Clone)]
struct AppState {
    anc: AncService,
    child: ChildHealthService,
    questionnaires: QuestionnaireService,
}

impl AppState {
    fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            anc: AncService::new(cfg.clone()),
            child: ChildHealthService::new(cfg.clone()),
            questionnaires: QuestionnaireService::new(cfg),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api_info,
        health,
        register_pregnancy,
        patient_registration_questionnaire,
        calculate_edd,
        schedule_anc_visits,
        anc_visit_questionnaire,
        analyze_anc_visit,
        register_child,
        immunization_schedule,
        child_health_screening_questionnaire,
        growth_monitoring,
    ),
    components(schemas(
        pb::HealthRes,
        pb::ErrorRes,
        pb::PersonDetails,
        pb::RegisterPregnancyReq,
        pb::CalculateEddReq,
        pb::ScheduleAncVisitsReq,
        pb::Vitals,
        pb::Symptoms,
        pb::AncVisitDataReq,
        pb::RegisterChildReq,
        pb::ImmunizationScheduleReq,
        pb::GrowthMonitoringReq,
        anc::RegisterPregnancyRes,
        anc::CalculateEddRes,
        anc::AncVisitAnalysisRes,
        child::RegisterChildRes,
        child::GrowthMonitoringRes,
        child::MeasurementsProcessed,
        risk::RiskFlag,
        risk::Severity,
        info::ApiInfo,
        fhir::Patient,
        fhir::EpisodeOfCare,
        fhir::CarePlan,
        fhir::CarePlanActivity,
        fhir::ActivityDetail,
        fhir::Observation,
        fhir::Questionnaire,
        fhir::QuestionnaireItem,
        fhir::EnableWhen,
        fhir::AnswerOption,
        fhir::Coding,
        fhir::CodeableConcept,
        fhir::Reference,
        fhir::Period,
        fhir::Quantity,
        fhir::Identifier,
        fhir::HumanName,
    ))
)]
pub struct ApiDoc;

type ApiError = (StatusCode, Json<pb::ErrorRes>);
type ApiResult<T> = Result<Json<T>, ApiError>;
type Created<T> = Result<(StatusCode, Json<T>), ApiError>;

/// Build the REST router with OpenAPI docs, CORS and request tracing.
pub fn router(cfg: Arc<CoreConfig>) -> Router {
    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health))
        .route("/anc/register-pregnancy", post(register_pregnancy))
        .route(
            "/anc/questionnaire/patient-registration",
            get(patient_registration_questionnaire),
        )
        .route("/anc/calculate-edd", post(calculate_edd))
        .route("/anc/schedule-visits", post(schedule_anc_visits))
        .route("/anc/visit/questionnaire", get(anc_visit_questionnaire))
        .route("/anc/visit/analyze", post(analyze_anc_visit))
        .route("/child/register", post(register_child))
        .route("/child/immunization-schedule", post(immunization_schedule))
        .route(
            "/child/health-screening/questionnaire",
            get(child_health_screening_questionnaire),
        )
        .route("/child/growth-monitoring", post(growth_monitoring))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(AppState::new(cfg))
}

/// Map a core failure to a status code and structured body.
///
/// Caller errors are logged at `warn`; anything else is an internal error.
fn reject(op: &str, err: ServiceError) -> ApiError {
    if err.is_client_error() {
        tracing::warn!("{op} rejected: {err}");
        (StatusCode::BAD_REQUEST, Json(err.to_response()))
    } else {
        tracing::error!("{op} error: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(err.to_response()))
    }
}

/// Unwrap a JSON body into `T`.
///
/// Any body that does not decode becomes an `input_format` error naming the offending field.
fn body<T: DeserializeOwned>(
    op: &str,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let value = match payload {
        Ok(Json(value)) => value,
        Err(rejection) => {
            let err = ServiceError::input_format("body", rejection.body_text());
            return Err(reject(op, err));
        }
    };
    decode_request("body", value).map_err(|e| reject(op, e))
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service summary", body = info::ApiInfo)
    )
)]
/// Service summary: endpoints, tools and resources.
#[axum::debug_handler]
async fn api_info() -> Json<info::ApiInfo> {
    Json(info::api_info())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = pb::HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancer checks.
#[axum::debug_handler]
async fn health() -> Json<pb::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/anc/register-pregnancy",
    request_body = pb::RegisterPregnancyReq,
    responses(
        (status = 201, description = "Pregnancy registered", body = anc::RegisterPregnancyRes),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
/// Register a pregnancy
///
/// Returns a new Patient and an active EpisodeOfCare. Nothing is persisted.
#[axum::debug_handler]
async fn register_pregnancy(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Created<anc::RegisterPregnancyRes> {
    let req: pb::RegisterPregnancyReq = body("Register pregnancy", payload)?;
    match state.anc.register_pregnancy(&req) {
        Ok(res) => Ok((StatusCode::CREATED, Json(res))),
        Err(e) => Err(reject("Register pregnancy", e)),
    }
}

#[utoipa::path(
    get,
    path = "/anc/questionnaire/patient-registration",
    responses(
        (status = 200, description = "Patient registration questionnaire", body = fhir::Questionnaire),
        (status = 500, description = "Internal server error", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn patient_registration_questionnaire(
    State(state): State<AppState>,
) -> ApiResult<fhir::Questionnaire> {
    questionnaire(&state, QuestionnaireKind::PatientRegistration)
}

#[utoipa::path(
    post,
    path = "/anc/calculate-edd",
    request_body = pb::CalculateEddReq,
    responses(
        (status = 200, description = "Estimated delivery date", body = anc::CalculateEddRes),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
/// Calculate the estimated delivery date from the last menstrual period.
#[axum::debug_handler]
async fn calculate_edd(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<anc::CalculateEddRes> {
    let req: pb::CalculateEddReq = body("Calculate EDD", payload)?;
    state
        .anc
        .calculate_edd(&req)
        .map(Json)
        .map_err(|e| reject("Calculate EDD", e))
}

#[utoipa::path(
    post,
    path = "/anc/schedule-visits",
    request_body = pb::ScheduleAncVisitsReq,
    responses(
        (status = 200, description = "ANC visit schedule", body = fhir::CarePlan),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
/// Schedule the eight antenatal contacts from LMP or EDD.
#[axum::debug_handler]
async fn schedule_anc_visits(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<fhir::CarePlan> {
    let req: pb::ScheduleAncVisitsReq = body("Schedule ANC visits", payload)?;
    state
        .anc
        .schedule_anc_visits(&req)
        .map(Json)
        .map_err(|e| reject("Schedule ANC visits", e))
}

#[utoipa::path(
    get,
    path = "/anc/visit/questionnaire",
    responses(
        (status = 200, description = "ANC visit questionnaire", body = fhir::Questionnaire),
        (status = 500, description = "Internal server error", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn anc_visit_questionnaire(State(state): State<AppState>) -> ApiResult<fhir::Questionnaire> {
    questionnaire(&state, QuestionnaireKind::AncVisit)
}

#[utoipa::path(
    post,
    path = "/anc/visit/analyze",
    request_body = pb::AncVisitDataReq,
    responses(
        (status = 200, description = "Risk analysis", body = anc::AncVisitAnalysisRes),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
/// Analyze ANC visit data for risks (simplified).
#[axum::debug_handler]
async fn analyze_anc_visit(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<anc::AncVisitAnalysisRes> {
    let req: pb::AncVisitDataReq = body("Analyze ANC visit", payload)?;
    Ok(Json(state.anc.analyze_anc_visit_data(&req)))
}

#[utoipa::path(
    post,
    path = "/child/register",
    request_body = pb::RegisterChildReq,
    responses(
        (status = 201, description = "Child registered", body = child::RegisterChildRes),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn register_child(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Created<child::RegisterChildRes> {
    let req: pb::RegisterChildReq = body("Register child", payload)?;
    match state.child.register_child(&req) {
        Ok(res) => Ok((StatusCode::CREATED, Json(res))),
        Err(e) => Err(reject("Register child", e)),
    }
}

#[utoipa::path(
    post,
    path = "/child/immunization-schedule",
    request_body = pb::ImmunizationScheduleReq,
    responses(
        (status = 200, description = "Immunization schedule", body = fhir::CarePlan),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn immunization_schedule(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<fhir::CarePlan> {
    let req: pb::ImmunizationScheduleReq = body("Immunization schedule", payload)?;
    state
        .child
        .immunization_schedule(&req)
        .map(Json)
        .map_err(|e| reject("Immunization schedule", e))
}

#[utoipa::path(
    get,
    path = "/child/health-screening/questionnaire",
    responses(
        (status = 200, description = "Child health screening questionnaire", body = fhir::Questionnaire),
        (status = 500, description = "Internal server error", body = pb::ErrorRes)
    )
)]
#[axum::debug_handler]
async fn child_health_screening_questionnaire(
    State(state): State<AppState>,
) -> ApiResult<fhir::Questionnaire> {
    questionnaire(&state, QuestionnaireKind::ChildHealthScreening)
}

#[utoipa::path(
    post,
    path = "/child/growth-monitoring",
    request_body = pb::GrowthMonitoringReq,
    responses(
        (status = 200, description = "Growth interpretation", body = child::GrowthMonitoringRes),
        (status = 400, description = "Bad request", body = pb::ErrorRes)
    )
)]
/// Process growth measurements (simplified).
#[axum::debug_handler]
async fn growth_monitoring(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<child::GrowthMonitoringRes> {
    let req: pb::GrowthMonitoringReq = body("Growth monitoring", payload)?;
    state
        .child
        .growth_monitoring(&req)
        .map(Json)
        .map_err(|e| reject("Growth monitoring", e))
}

fn questionnaire(state: &AppState, kind: QuestionnaireKind) -> ApiResult<fhir::Questionnaire> {
    state
        .questionnaires
        .get(kind)
        .map(Json)
        .map_err(|e| reject("Questionnaire", e))
}
