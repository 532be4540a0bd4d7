//! Read-only resources: the three questionnaires and the service summary.

use crate::error::{McpError, McpResult};
use crate::server::McpServer;
use mch_core::info::{api_info, INFO_RESOURCE_URI, RESOURCES};
use mch_core::{QuestionnaireKind, ServiceError};
use serde::Serialize;
use serde_json::{json, Value};

const MIME_JSON: &str = "application/json";

/// `resources/list` entry.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "mimeType")]
    pub mime_type: &'static str,
}

pub fn list_resources() -> Vec<ResourceDescriptor> {
    RESOURCES
        .iter()
        .map(|&(uri, name, description)| ResourceDescriptor {
            uri,
            name,
            description,
            mime_type: MIME_JSON,
        })
        .collect()
}

/// `resources/read` result for `uri`.
pub fn read_resource(server: &McpServer, uri: &str) -> McpResult<Value> {
    let body = if uri == INFO_RESOURCE_URI {
        serde_json::to_value(api_info())
    } else {
        let kind = QuestionnaireKind::from_resource_uri(uri)
            .ok_or_else(|| McpError::UnknownResource(uri.to_string()))?;
        serde_json::to_value(server.questionnaires.get(kind)?)
    }
    .map_err(ServiceError::from)?;

    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    Ok(json!({
        "contents": [{"uri": uri, "mimeType": MIME_JSON, "text": text}]
    }))
}
