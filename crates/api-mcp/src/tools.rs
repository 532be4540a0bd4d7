//! Tool catalogue and dispatch.
//!
//! Tool arguments use the same field names as the HTTP request bodies and are deserialised into
//! the same request types, so both surfaces validate identically.

use crate::error::{McpError, McpResult};
use crate::server::McpServer;
use api_shared::pb;
use mch_core::{decode_request, info::TOOLS, ServiceResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// `tools/list` entry.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

fn date_field(description: &str) -> Value {
    json!({"type": "string", "format": "date", "description": description})
}

fn person_details_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "given_name": {"type": "string"},
            "family_name": {"type": "string"},
            "birth_date": date_field("YYYY-MM-DD"),
            "gender": {"type": "string"},
            "identifier_system": {"type": "string"},
            "identifier_value": {"type": "string"}
        }
    })
}

fn input_schema(name: &str) -> Value {
    match name {
        "register_pregnancy" => json!({
            "type": "object",
            "properties": {"patient_details": person_details_schema()},
            "required": ["patient_details"]
        }),
        "calculate_edd" => json!({
            "type": "object",
            "properties": {"lmp_date": date_field("Last menstrual period, YYYY-MM-DD")},
            "required": ["lmp_date"]
        }),
        "schedule_anc_visits" => json!({
            "type": "object",
            "properties": {
                "lmp_date": date_field("Last menstrual period, YYYY-MM-DD"),
                "edd_date": date_field("Estimated delivery date, YYYY-MM-DD"),
                "patient_id": {"type": "string"}
            }
        }),
        "analyze_anc_visit_data" => json!({
            "type": "object",
            "properties": {
                "vitals": {
                    "type": "object",
                    "properties": {
                        "bp_systolic": {"type": ["number", "string"]},
                        "bp_diastolic": {"type": ["number", "string"]}
                    }
                },
                "symptoms": {
                    "type": "object",
                    "properties": {"bleeding": {"type": "boolean"}}
                },
                "patient_id": {"type": "string"}
            }
        }),
        "register_child" => json!({
            "type": "object",
            "properties": {"child_details": person_details_schema()},
            "required": ["child_details"]
        }),
        "get_immunization_schedule" => json!({
            "type": "object",
            "properties": {
                "dob": date_field("Date of birth, YYYY-MM-DD"),
                "patient_id": {"type": "string"}
            },
            "required": ["dob", "patient_id"]
        }),
        "growth_monitoring" => json!({
            "type": "object",
            "properties": {
                "dob": date_field("Date of birth, YYYY-MM-DD"),
                "measurement_date": date_field("YYYY-MM-DD, not before dob"),
                "weight_kg": {"type": ["number", "string"]},
                "height_cm": {"type": ["number", "string"]},
                "gender": {"type": "string", "enum": ["male", "female"]},
                "patient_id": {"type": "string"}
            },
            "required": ["dob", "measurement_date", "weight_kg", "height_cm", "gender", "patient_id"]
        }),
        _ => json!({"type": "object"}),
    }
}

pub fn list_tools() -> Vec<ToolDescriptor> {
    TOOLS
        .iter()
        .map(|&(name, description)| ToolDescriptor {
            name,
            description,
            input_schema: input_schema(name),
        })
        .collect()
}

/// `tools/call` result body.
fn tool_result(value: Value, is_error: bool) -> Value {
    let text = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
    json!({
        "content": [{"type": "text", "text": text}],
        "structuredContent": value,
        "isError": is_error,
    })
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> ServiceResult<T> {
    decode_request("arguments", arguments)
}

fn render<T: Serialize>(outcome: ServiceResult<T>) -> ServiceResult<Value> {
    Ok(serde_json::to_value(outcome?)?)
}

/// Run a tool.
///
/// # Errors
///
/// [`McpError::UnknownTool`] for a name not in the catalogue, and [`McpError::Internal`] for
/// internal failures. Caller mistakes are returned as `Ok` with `isError: true`.
pub fn call_tool(server: &McpServer, name: &str, arguments: Option<Value>) -> McpResult<Value> {
    let arguments = match arguments {
        None | Some(Value::Null) => Value::Object(Map::new()),
        Some(args) => args,
    };

    let outcome = match name {
        "register_pregnancy" => parse_args::<pb::RegisterPregnancyReq>(arguments)
            .and_then(|req| render(server.anc.register_pregnancy(&req))),
        "calculate_edd" => parse_args::<pb::CalculateEddReq>(arguments)
            .and_then(|req| render(server.anc.calculate_edd(&req))),
        "schedule_anc_visits" => parse_args::<pb::ScheduleAncVisitsReq>(arguments)
            .and_then(|req| render(server.anc.schedule_anc_visits(&req))),
        "analyze_anc_visit_data" => parse_args::<pb::AncVisitDataReq>(arguments)
            .and_then(|req| render(Ok(server.anc.analyze_anc_visit_data(&req)))),
        "register_child" => parse_args::<pb::RegisterChildReq>(arguments)
            .and_then(|req| render(server.child.register_child(&req))),
        "get_immunization_schedule" => parse_args::<pb::ImmunizationScheduleReq>(arguments)
            .and_then(|req| render(server.child.immunization_schedule(&req))),
        "growth_monitoring" => parse_args::<pb::GrowthMonitoringReq>(arguments)
            .and_then(|req| render(server.child.growth_monitoring(&req))),
        other => return Err(McpError::UnknownTool(other.to_string())),
    };

    match outcome {
        Ok(value) => Ok(tool_result(value, false)),
        Err(err) if err.is_client_error() => {
            tracing::warn!(tool = name, "tool call rejected: {err}");
            let body = serde_json::to_value(err.to_response()).unwrap_or(Value::Null);
            Ok(tool_result(body, true))
        }
        Err(err) => {
            tracing::error!(tool = name, "tool call failed: {:?}", err);
            Err(McpError::Internal(err))
        }
    }
}
