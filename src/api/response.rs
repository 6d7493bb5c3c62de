//! Response types for the buyout engine API.
//!
//! This module defines the success envelopes and the error structures for
//! the HTTP API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{ColaConfig, ConfigMetadata};
use crate::error::EngineError;
use crate::models::CalculationResult;

/// Request-level facts reported alongside a result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Correlation id, also written to the logs.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version that produced the figures.
    pub engine_version: String,
    /// Data year of the config version used.
    pub data_year: i32,
    /// Time spent in the engine, in microseconds.
    pub duration_us: u64,
}

/// Body of a successful `POST /api/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The engine result, flattened into the top level.
    #[serde(flatten)]
    pub result: CalculationResult,
    /// Request metadata.
    pub meta: ResponseMeta,
}

/// Body of a successful `POST /api/newsletter/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    /// Always true on a 200.
    pub success: bool,
    /// Message to show the subscriber.
    pub message: String,
}

/// Body of `GET /api/config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    /// Rule set name, review date and references.
    pub metadata: ConfigMetadata,
    /// Data year of the selected version.
    pub data_year: i32,
    /// Every data year on offer.
    pub available_years: Vec<i32>,
    /// COLA figures for the selected version.
    pub cola: ColaConfig,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Wire name of the offending field, for validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error tied to a request field.
    pub fn for_field(
        code: impl Into<String>,
        message: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            field: Some(field.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                }
            }
            EngineError::ConfigVersionNotFound { .. } => {
                ApiErrorResponse::bad_request(ApiError::for_field(
                    "CONFIG_VERSION_NOT_FOUND",
                    message,
                    "year",
                ))
            }
            EngineError::MissingRequiredField { field } => {
                ApiErrorResponse::bad_request(ApiError::for_field("MISSING_FIELD", message, field))
            }
            EngineError::OutOfRange { field, .. } => {
                ApiErrorResponse::bad_request(ApiError::for_field("OUT_OF_RANGE", message, field))
            }
            EngineError::InvalidEnum { field, .. } => {
                ApiErrorResponse::bad_request(ApiError::for_field("INVALID_ENUM", message, field))
            }
            EngineError::InvalidFormat { field, message } => {
                // The format message is already phrased for end users.
                ApiErrorResponse::bad_request(ApiError::for_field(
                    "INVALID_FORMAT",
                    message,
                    field,
                ))
            }
        }
    }
}
