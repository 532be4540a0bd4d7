use api_shared::ErrorRes;

/// Failure of a single service call.
///
/// The first three variants are caller errors and map to a 400-equivalent on every surface.
/// They are never fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Missing required field(s): {}", .0.join(", "))]
    MissingField(Vec<String>),

    #[error("Invalid format for '{field}'. {hint}")]
    InputFormat { field: String, hint: String },

    #[error("{0}")]
    InvalidRange(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("questionnaire template error: {0}")]
    Template(#[from] fhir::FhirError),

    #[error("unserialisable result: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    pub fn missing(fields: &[&str]) -> Self {
        ServiceError::MissingField(fields.iter().map(|f| f.to_string()).collect())
    }

    pub fn input_format(field: &str, hint: impl Into<String>) -> Self {
        ServiceError::InputFormat {
            field: field.to_string(),
            hint: hint.into(),
        }
    }

    /// Stable machine-readable category.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::MissingField(_) => "missing_field",
            ServiceError::InputFormat { .. } => "input_format",
            ServiceError::InvalidRange(_) => "invalid_range",
            ServiceError::InvalidConfig(_)
            | ServiceError::Template(_)
            | ServiceError::Serialization(_) => "internal",
        }
    }

    /// True when the caller can fix the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::MissingField(_)
                | ServiceError::InputFormat { .. }
                | ServiceError::InvalidRange(_)
        )
    }

    /// Structured body reported back to the caller.
    pub fn to_response(&self) -> ErrorRes {
        let error = if self.is_client_error() {
            self.to_string()
        } else {
            "Internal error".to_string()
        };

        ErrorRes {
            error,
            kind: self.kind().to_string(),
            missing_fields: match self {
                ServiceError::MissingField(fields) => fields.clone(),
                _ => Vec::new(),
            },
        }
    }
}
