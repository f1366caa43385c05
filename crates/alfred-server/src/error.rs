use alfred::errors::ChatError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {env_var}")]
    MissingEnvVar { env_var: String },

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

/// Name the environment variable that would have supplied a missing field
///
/// Serde only reports the leaf field name, and the provider section is the only
/// one with required fields, so bare names are resolved against it.
pub fn to_env_var(field: &str) -> String {
    match field {
        "provider" => "ALFRED_PROVIDER__TYPE".to_string(),
        field if field.contains('.') => {
            format!("ALFRED_{}", field.replace('.', "__").to_uppercase())
        }
        field => format!("ALFRED_PROVIDER__{}", field.to_uppercase()),
    }
}

/// An error response in the `{"detail": ...}` shape openai clients expect
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new<S: Into<String>>(status: StatusCode, detail: S) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found<S: Into<String>>(detail: S) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self::new(status, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alfred::errors::FetchError;

    #[test]
    fn test_to_env_var() {
        assert_eq!(to_env_var("api_key"), "ALFRED_PROVIDER__API_KEY");
        assert_eq!(to_env_var("type"), "ALFRED_PROVIDER__TYPE");
        assert_eq!(to_env_var("provider"), "ALFRED_PROVIDER__TYPE");
        assert_eq!(to_env_var("server.port"), "ALFRED_SERVER__PORT");
    }

    #[test]
    fn test_chat_error_status_mapping() {
        let err = ApiError::from(ChatError::ClientInput("No user message found".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "No user message found");

        let err = ApiError::from(ChatError::UpstreamFetch(FetchError::Status(403)));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), "Unable to fetch image from URL: 403");

        let err = ApiError::from(ChatError::RuntimeInvocation("boom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.detail(), "Error processing request: boom");
    }
}
