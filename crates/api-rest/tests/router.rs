use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mch_core::CoreConfig;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    api_rest::router(Arc::new(CoreConfig::default()))
}

async fn send(method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(Method::POST, uri, Some(body)).await
}

async fn get(uri: &str) -> (StatusCode, Value) {
    send(Method::GET, uri, None).await
}

#[tokio::test]
async fn health_and_info() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);

    let (status, body) = get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["anc_endpoints"]["/anc/calculate-edd"]
        .as_str()
        .unwrap()
        .starts_with("POST:"));
    assert_eq!(body["tools"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn register_pregnancy_returns_created() {
    let (status, body) = post(
        "/anc/register-pregnancy",
        json!({"patient_details": {"given_name": "Jane", "family_name": "Doe", "birth_date": "1990-01-01"}}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Pregnancy registration initiated.");
    assert_eq!(body["patient"]["resourceType"], "Patient");
    assert_eq!(body["patient"]["birthDate"], "1990-01-01");
    assert_eq!(body["patient"]["gender"], "female");
    assert_eq!(body["episodeOfCare"]["managingOrganization"]["display"], "WHO Affiliated Clinic");
    assert_eq!(body["episodeOfCare"]["patient"]["display"], "Jane Doe");
}

#[tokio::test]
async fn register_pregnancy_without_details_is_bad_request() {
    let (status, body) = post("/anc/register-pregnancy", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "missing_field");
    assert_eq!(body["missing_fields"], json!(["patient_details"]));
}

#[tokio::test]
async fn calculate_edd() {
    let (status, body) = post("/anc/calculate-edd", json!({"lmp_date": "2024-01-01"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["estimated_delivery_date"], "2024-10-07");

    let (status, body) = post("/anc/calculate-edd", json!({"lmp_date": "07/10/2024"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "input_format");
    assert!(body["error"].as_str().unwrap().contains("lmp_date"));
}

#[tokio::test]
async fn schedule_visits_renders_care_plan_keys() {
    let (status, body) = post(
        "/anc/schedule-visits",
        json!({"edd_date": "2024-10-07", "patient_id": "p-77"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["resourceType"], "CarePlan");
    assert_eq!(body["subject"]["reference"], "Patient/p-77");
    assert_eq!(body["period"]["start"], "2024-01-01T00:00:00");
    let activities = body["activity"].as_array().unwrap();
    assert_eq!(activities.len(), 8);
    assert_eq!(
        activities[7]["detail"]["scheduledPeriod"]["start"],
        "2024-10-07T00:00:00"
    );
    assert_eq!(
        body["instantiatesCanonical"][0],
        "http://who.int/smart-guidelines/anc/schedule"
    );
}

#[tokio::test]
async fn schedule_visits_needs_an_anchor() {
    let (status, body) = post("/anc/schedule-visits", json!({"patient_id": "p"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing_fields"], json!(["lmp_date", "edd_date"]));
}

#[tokio::test]
async fn analyze_visit_flags_high_bp() {
    let (status, body) = post(
        "/anc/visit/analyze",
        json!({"vitals": {"bp_systolic": 150, "bp_diastolic": 80}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let risks = body["risks_identified"].as_array().unwrap();
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0]["risk_code"], "ANC_HIGH_BP");
    assert_eq!(risks[0]["severity"], "high");

    let (_, body) = post("/anc/visit/analyze", json!({})).await;
    let risks = body["risks_identified"].as_array().unwrap();
    assert_eq!(risks.len(), 1);
    assert_eq!(risks[0]["severity"], "low");
    assert!(risks[0].get("risk_code").is_none());
}

#[tokio::test]
async fn questionnaires_are_stamped() {
    for (path, id) in [
        ("/anc/questionnaire/patient-registration", "anc-patient-reg-q1"),
        ("/anc/visit/questionnaire", "anc-visit-q1"),
        ("/child/health-screening/questionnaire", "child-health-screening-q1"),
    ] {
        let (status, body) = get(path).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        assert_eq!(body["id"], id);
        assert_eq!(body["url"], format!("http://localhost:5001{path}"));
        assert!(body["date"].is_string());
        assert!(body["item"][0]["linkId"].is_string());
    }
}

#[tokio::test]
async fn register_child_and_schedule() {
    let (status, body) = post(
        "/child/register",
        json!({"child_details": {"given_name": "Ada", "gender": "female"}}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["patient"]["identifier"][0]["system"], "urn:oid:example-child-health-id");

    let (status, body) = post(
        "/child/immunization-schedule",
        json!({"dob": "2024-01-31", "patient_id": "c-1"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"], "order");
    assert_eq!(body["activity"].as_array().unwrap().len(), 20);
    assert!(body.get("period").is_none());

    let (status, body) = post("/child/immunization-schedule", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["missing_fields"], json!(["dob", "patient_id"]));
}

#[tokio::test]
async fn growth_monitoring() {
    let (status, body) = post(
        "/child/growth-monitoring",
        json!({
            "dob": "2024-01-01",
            "measurement_date": "2024-01-01",
            "weight_kg": 3.0,
            "height_cm": "50",
            "gender": "MALE",
            "patient_id": "c-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["measurements_processed"]["gender"], "male");
    let observations = body["fhir_observations"].as_array().unwrap();
    assert_eq!(observations.len(), 3);
    assert_eq!(observations[0]["valueQuantity"]["system"], "http://unitsofmeasure.org");
    assert_eq!(observations[0]["interpretation"][0]["coding"][0]["code"], "N");
    assert!(body["overall_health_status_note"]
        .as_str()
        .unwrap()
        .starts_with("Child growth appears normal"));

    let (status, body) = post(
        "/child/growth-monitoring",
        json!({
            "dob": "2024-02-01",
            "measurement_date": "2024-01-01",
            "weight_kg": 3.0,
            "height_cm": 50,
            "gender": "female",
            "patient_id": "c-1"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_range");
}

#[tokio::test]
async fn non_object_body_is_input_format_error() {
    let (status, body) = post("/anc/calculate-edd", json!(["2024-01-01"])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "input_format");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/child/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_field_type_names_the_field() {
    let (status, body) = post("/anc/calculate-edd", json!({"lmp_date": 20240101})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "input_format");
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("'lmp_date'"), "{error}");
    assert!(!error.contains("must be a JSON object"), "{error}");

    let (status, body) = post("/anc/register-pregnancy", json!({"patient_details": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("'patient_details'"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (status, body) = get("/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/anc/schedule-visits"]["post"].is_object());
    assert!(body["paths"]["/child/growth-monitoring"]["post"].is_object());
}
