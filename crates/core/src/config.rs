//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services. Core
//! code never reads environment variables during request handling; binaries read them and call
//! [`config_from_env_values`].

use crate::constants::{DEFAULT_GUIDELINE_BASE_URL, DEFAULT_SERVER_BASE_URL};
use crate::{ServiceError, ServiceResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    server_base_url: String,
    guideline_base_url: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            server_base_url: DEFAULT_SERVER_BASE_URL.to_string(),
            guideline_base_url: DEFAULT_GUIDELINE_BASE_URL.to_string(),
        }
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The server base URL is stored without a trailing `/`; the guideline base URL is stored
    /// with exactly one, so both can be joined with a relative suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::InvalidConfig`] if either URL is empty or is not `http(s)`.
    pub fn new(server_base_url: String, guideline_base_url: String) -> ServiceResult<Self> {
        let server_base_url = validate_base_url("server base URL", &server_base_url)?;
        let guideline_base_url = validate_base_url("guideline base URL", &guideline_base_url)?;

        Ok(Self {
            server_base_url: server_base_url.trim_end_matches('/').to_string(),
            guideline_base_url: format!("{}/", guideline_base_url.trim_end_matches('/')),
        })
    }

    pub fn server_base_url(&self) -> &str {
        &self.server_base_url
    }

    pub fn guideline_base_url(&self) -> &str {
        &self.guideline_base_url
    }

    /// Absolute URL for a server path such as `/anc/visit/questionnaire`.
    pub fn server_url(&self, path: &str) -> String {
        format!("{}/{}", self.server_base_url, path.trim_start_matches('/'))
    }

    /// Guideline URL for a relative suffix such as `anc/schedule`.
    pub fn guideline_url(&self, suffix: &str) -> String {
        format!("{}{}", self.guideline_base_url, suffix.trim_start_matches('/'))
    }
}

fn validate_base_url<'a>(name: &str, value: &'a str) -> ServiceResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ServiceError::InvalidConfig(format!("{name} cannot be empty")));
    }
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ServiceError::InvalidConfig(format!(
            "{name} must start with http:// or https://, got '{value}'"
        )));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ServiceError::InvalidConfig(format!(
            "{name} must not contain whitespace"
        )));
    }
    Ok(value)
}

/// Build the configuration from optional string values (typically environment variables).
///
/// `None` or blank values fall back to the defaults.
pub fn config_from_env_values(
    server_base_url: Option<String>,
    guideline_base_url: Option<String>,
) -> ServiceResult<CoreConfig> {
    fn or_default(value: Option<String>, default: &str) -> String {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    CoreConfig::new(
        or_default(server_base_url, DEFAULT_SERVER_BASE_URL),
        or_default(guideline_base_url, DEFAULT_GUIDELINE_BASE_URL),
    )
}
