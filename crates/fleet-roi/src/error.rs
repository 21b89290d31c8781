use crate::analysis::{BatchError, ValidationError};
use crate::config::ConfigError;
use crate::narrative::GatewayError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Narrative(GatewayError),
    Validation(ValidationError),
    Batch(BatchError),
    Serialization(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Narrative(err) => write!(f, "narrative client error: {}", err),
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Batch(err) => write!(f, "batch error: {}", err),
            AppError::Serialization(err) => write!(f, "serialization error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Narrative(err) => Some(err),
            AppError::Validation(err) => Some(err),
            AppError::Batch(err) => Some(err),
            AppError::Serialization(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(ValidationError::EmptyPayload) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": ValidationError::EmptyPayload.to_string() }),
            ),
            AppError::Validation(ValidationError::Invalid { details }) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Validasi data gagal", "details": details }),
            ),
            other => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Analisis gagal: {}", other) }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<GatewayError> for AppError {
    fn from(value: GatewayError) -> Self {
        Self::Narrative(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<BatchError> for AppError {
    fn from(value: BatchError) -> Self {
        Self::Batch(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn validation_details_map_to_bad_request() {
        let response = AppError::from(ValidationError::Invalid {
            details: vec!["tco is required".to_string()],
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_of(response).await;
        assert_eq!(body["error"], "Validasi data gagal");
        assert_eq!(body["details"][0], "tco is required");
    }

    #[tokio::test]
    async fn empty_payload_maps_to_bad_request() {
        let response = AppError::from(ValidationError::EmptyPayload).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_of(response).await,
            json!({ "error": "Tidak ada data yang diberikan" })
        );
    }

    #[tokio::test]
    async fn other_failures_map_to_internal_error() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
        let response = AppError::from(io).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_of(response).await["error"],
            "Analisis gagal: io error: disk gone"
        );
    }

    #[test]
    fn listener_failures_surface_as_io_with_source() {
        let bind = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = AppError::from(bind);
        assert!(matches!(err, AppError::Io(_)));

        let source = std::error::Error::source(&err).expect("io source kept");
        assert_eq!(source.to_string(), "address in use");
    }
}
