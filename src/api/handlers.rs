//! HTTP request handlers for the buyout engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::evaluate;
use crate::models::CalculationInput;
use crate::ENGINE_VERSION;

use super::request::{CalculationRequest, SignupRequest, YearQuery};
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, ConfigResponse, ResponseMeta, SignupResponse,
};
use super::state::AppState;
use super::subscribers::SignupOutcome;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route("/api/newsletter/signup", post(signup_handler))
        .route("/api/config", get(config_handler))
        .with_state(state)
}

/// Handler for POST /api/calculate.
///
/// Validates the request, evaluates it against the config version for the
/// requested data year, and returns the result with request metadata.
async fn calculate_handler(
    State(state): State<AppState>,
    query: Result<Query<YearQuery>, QueryRejection>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let year = match query {
        Ok(Query(query)) => query.year,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let input = match CalculationInput::try_from(&request) {
        Ok(input) => input,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                field = err.field().unwrap_or_default(),
                error = %err,
                "Validation failed"
            );
            return error_response(err.into());
        }
    };

    let config = match state.config().resolve(year) {
        Ok(config) => config,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Config version not found");
            return error_response(err.into());
        }
    };

    let start_time = Instant::now();
    let result = evaluate(&input, config);
    let duration = start_time.elapsed();

    info!(
        correlation_id = %correlation_id,
        data_year = config.data_year,
        retirement_system = input.retirement_system.label(),
        buyout_mode = input.buyout_mode.token(),
        break_even_years = %result.comparison.break_even_years,
        duration_us = duration.as_micros(),
        "Calculation completed successfully"
    );

    if let Some(email) = request.newsletter_email() {
        let outcome = state.subscribers().subscribe(email);
        info!(
            correlation_id = %correlation_id,
            outcome = ?outcome,
            "Newsletter opt-in recorded"
        );
    }

    let response = CalculationResponse {
        result,
        meta: ResponseMeta {
            calculation_id: correlation_id,
            timestamp: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            data_year: config.data_year,
            duration_us: u64::try_from(duration.as_micros()).unwrap_or(u64::MAX),
        },
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(response),
    )
        .into_response()
}

/// Handler for POST /api/newsletter/signup.
async fn signup_handler(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };

    let email = match request.validated_email() {
        Ok(email) => email,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Signup rejected");
            return error_response(err.into());
        }
    };

    let outcome = state.subscribers().subscribe(email);
    if outcome == SignupOutcome::Subscribed {
        info!(
            correlation_id = %correlation_id,
            subscribers = state.subscribers().count(),
            "New subscriber"
        );
    }

    (
        StatusCode::OK,
        Json(SignupResponse {
            success: true,
            message: outcome.message().to_string(),
        }),
    )
        .into_response()
}

/// Handler for GET /api/config.
///
/// Reports where the constants come from for the selected data year.
async fn config_handler(
    State(state): State<AppState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let year = match query {
        Ok(Query(query)) => query.year,
        Err(rejection) => return query_rejection(correlation_id, rejection),
    };

    let loader = state.config();
    match loader.resolve(year) {
        Ok(config) => (
            StatusCode::OK,
            Json(ConfigResponse {
                metadata: loader.metadata().clone(),
                data_year: config.data_year,
                available_years: loader
                    .catalog()
                    .versions()
                    .iter()
                    .map(|version| version.data_year)
                    .collect(),
                cola: config.cola.clone(),
            }),
        )
            .into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Config version not found");
            error_response(err.into())
        }
    }
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::new("VALIDATION_ERROR", body_text)
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

fn query_rejection(correlation_id: Uuid, rejection: QueryRejection) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %rejection.body_text(),
        "Query string rejected"
    );
    error_response(ApiErrorResponse::bad_request(ApiError::for_field(
        "INVALID_FORMAT",
        "year must be a four-digit data year",
        "year",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/federal").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_json(uri: &str, body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = json!({
            "currentSalary": 85000,
            "yearsOfService": 15,
            "age": 50,
            "stateTaxRate": 5
        });

        let response = router
            .oneshot(post_json("/api/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let json = body_json(response).await;
        assert_eq!(json["pension"]["annualGross"], json!(12750.0));
        assert_eq!(json["buyout"]["net"], json!(37031.67));
        assert_eq!(json["meta"]["dataYear"], json!(2026));
        assert_eq!(json["meta"]["engineVersion"], json!(ENGINE_VERSION));
        assert!(json["meta"]["calculationId"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/api/calculate", "{invalid json".to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_wrong_json_type_returns_400() {
        let router = create_router(create_test_state());
        let body = json!({ "currentSalary": 85000, "yearsOfService": 15, "age": 50, "isEarlyRetirement": "yes" });

        let response = router
            .oneshot(post_json("/api/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_salary_names_field() {
        let router = create_router(create_test_state());
        let body = json!({ "yearsOfService": 15, "age": 50 });

        let response = router
            .oneshot(post_json("/api/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "MISSING_FIELD");
        assert_eq!(json["field"], "currentSalary");
    }

    #[tokio::test]
    async fn test_year_query_selects_version() {
        let router = create_router(create_test_state());
        let body = json!({ "currentSalary": 85000, "yearsOfService": 15, "age": 50 });

        let response = router
            .oneshot(post_json("/api/calculate?year=2025", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["meta"]["dataYear"], json!(2025));
    }

    #[tokio::test]
    async fn test_unparseable_year_returns_400() {
        let router = create_router(create_test_state());
        let body = json!({ "currentSalary": 85000, "yearsOfService": 15, "age": 50 });

        let response = router
            .oneshot(post_json("/api/calculate?year=next", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["field"], "year");
    }

    #[tokio::test]
    async fn test_opt_in_subscribes_email() {
        let state = create_test_state();
        let router = create_router(state.clone());
        let body = json!({
            "currentSalary": 85000,
            "yearsOfService": 15,
            "age": 50,
            "email": "pat@agency.gov",
            "subscribeToNewsletter": true
        });

        let response = router
            .oneshot(post_json("/api/calculate", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(state.subscribers().count(), 1);
    }

    #[tokio::test]
    async fn test_signup_then_duplicate() {
        let state = create_test_state();
        let body = json!({ "email": "pat@agency.gov" }).to_string();

        let first = create_router(state.clone())
            .oneshot(post_json("/api/newsletter/signup", body.clone()))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let json = body_json(first).await;
        assert_eq!(json["success"], json!(true));
        assert!(json["message"].as_str().unwrap().starts_with("Thanks"));

        let second = create_router(state.clone())
            .oneshot(post_json("/api/newsletter/signup", body))
            .await
            .unwrap();
        let json = body_json(second).await;
        assert!(json["message"]
            .as_str()
            .unwrap()
            .contains("already subscribed"));
        assert_eq!(state.subscribers().count(), 1);
    }

    #[tokio::test]
    async fn test_signup_rejects_bad_email() {
        let router = create_router(create_test_state());
        let body = json!({ "email": "pat@agency" }).to_string();

        let response = router
            .oneshot(post_json("/api/newsletter/signup", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["field"], "email");
    }

    #[tokio::test]
    async fn test_config_endpoint_reports_sources() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/config")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["dataYear"], json!(2026));
        assert_eq!(json["availableYears"], json!([2025, 2026]));
        assert!(!json["metadata"]["sources"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_endpoint_unknown_year() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/config?year=2019")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "CONFIG_VERSION_NOT_FOUND");
    }
}
