// HTTP API
// Routes, handlers and error mapping for the loan service

use crate::decision::decide;
use crate::error::LoanError;
use crate::lookup::{ClientDirectory, FinancialSnapshot, PersonalSnapshot, PropertySnapshot};
use crate::rules::{check_solvency, evaluate_property};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<ClientDirectory>,
}

impl AppState {
    pub fn new(directory: ClientDirectory) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }
}

// ============================================================================
// Error mapping
// ============================================================================

impl IntoResponse for LoanError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LoanError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            LoanError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            LoanError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            LoanError::Database(_) | LoanError::Io { .. } => {
                tracing::error!(error = %self, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error": message,
            "code": self.code(),
        });

        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = Result<T, LoanError>;

// ============================================================================
// Handlers
// ============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    clients: usize,
}

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::VERSION,
        clients: state.directory.len(),
    })
}

/// GET /get_personal_data/:client_id
async fn get_personal_data(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<PersonalSnapshot>> {
    Ok(Json(state.directory.get_personal(&client_id)?))
}

/// GET /get_financial_data/:client_id
async fn get_financial_data(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<FinancialSnapshot>> {
    Ok(Json(state.directory.get_financial(&client_id)?))
}

/// GET /get_property_data/:client_id
async fn get_property_data(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> ApiResult<Json<PropertySnapshot>> {
    Ok(Json(state.directory.get_property(&client_id)?))
}

/// POST /check_solvency - verdict for the posted financial data
async fn post_check_solvency(Json(financial): Json<FinancialSnapshot>) -> ApiResult<Json<String>> {
    let verdict = check_solvency(&financial)?;
    Ok(Json(verdict.to_string()))
}

/// POST /evaluate_property - verdict for the posted property data
async fn post_evaluate_property(Json(property): Json<PropertySnapshot>) -> Json<String> {
    Json(evaluate_property(&property).to_string())
}

#[derive(Deserialize)]
struct DecisionQuery {
    client_id: String,
}

/// POST /make_decision?client_id=...
async fn make_decision(
    State(state): State<AppState>,
    Query(query): Query<DecisionQuery>,
) -> ApiResult<Json<String>> {
    let decision = decide(&state.directory, &query.client_id)?;
    Ok(Json(decision.to_string()))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/get_personal_data/:client_id", get(get_personal_data))
        .route("/get_financial_data/:client_id", get(get_financial_data))
        .route("/get_property_data/:client_id", get(get_property_data))
        .route("/check_solvency", post(post_check_solvency))
        .route("/evaluate_property", post(post_evaluate_property))
        .route("/make_decision", post(make_decision))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Router with permissive CORS for browser front-ends on other origins
pub fn router_with_cors(state: AppState) -> Router {
    router(state).layer(CorsLayer::permissive())
}
