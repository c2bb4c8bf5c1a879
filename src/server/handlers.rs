use super::AppState;
use crate::env::api;
use crate::task::{AnalyzeError, AnalyzeRequest, Clock, Cycle, FieldErrors, Strategy};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// Request/Response types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// API index listing.
#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
    pub strategies: Vec<&'static str>,
}

/// One canned suggestion returned by the suggest endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct Suggestion {
    pub task: &'static str,
    pub reason: &'static str,
    pub priority: &'static str,
    pub estimated_hours: u32,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<Suggestion>,
    /// Today's date as `YYYY-MM-DD`
    pub date: String,
}

/// Error payload for rejected requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<Vec<Cycle>>,
}

impl ErrorResponse {
    fn malformed(message: String) -> Self {
        Self {
            error: message,
            kind: "malformed_request",
            index: None,
            fields: None,
            cycles: None,
        }
    }
}

impl From<AnalyzeError> for ErrorResponse {
    fn from(error: AnalyzeError) -> Self {
        let message = error.to_string();
        let kind = error.kind();
        match error {
            AnalyzeError::EmptyTaskList => Self {
                error: message,
                kind,
                index: None,
                fields: None,
                cycles: None,
            },
            AnalyzeError::InvalidTaskSchema { index, errors } => Self {
                error: message,
                kind,
                index: Some(index),
                fields: Some(errors),
                cycles: None,
            },
            AnalyzeError::CircularDependency { cycles } => Self {
                error: message,
                kind,
                index: None,
                fields: None,
                cycles: Some(cycles),
            },
        }
    }
}

/// Rejected analysis request
pub struct ApiError(ErrorResponse);

impl From<AnalyzeError> for ApiError {
    fn from(error: AnalyzeError) -> Self {
        ApiError(error.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(ErrorResponse::malformed(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(self.0)).into_response()
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check handler.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// API index handler.
pub async fn index_handler() -> Json<IndexResponse> {
    let endpoints = BTreeMap::from([
        (api::ANALYZE_ENDPOINT, "Analyze and prioritize tasks"),
        (api::SUGGEST_ENDPOINT, "Get task suggestions"),
    ]);

    Json(IndexResponse {
        message: "Smart Task Analyzer API",
        endpoints,
        strategies: Strategy::ALL.iter().map(Strategy::name).collect(),
    })
}

/// Analyze handler - validates, checks for dependency loops and ranks tasks.
pub async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = payload.inspect_err(|rejection| {
        warn!("Malformed analyze request: {}", rejection.body_text());
    })?;

    info!("Received {} task(s) for analysis", request.tasks.len());

    let response = state.analyzer.analyze(&request)?;
    Ok(Json(response))
}

/// Static suggestions handler.
pub async fn suggest_handler(State(state): State<Arc<AppState>>) -> Json<SuggestResponse> {
    let today = state.analyzer.scorer().clock().today();

    Json(SuggestResponse {
        suggestions: default_suggestions(),
        date: today.format("%Y-%m-%d").to_string(),
    })
}

/// Redirects the slash-less API root to its canonical path.
pub async fn api_root_redirect() -> Redirect {
    Redirect::permanent(api::ROOT)
}

pub fn default_suggestions() -> Vec<Suggestion> {
    vec![
        Suggestion {
            task: "Complete urgent project proposal",
            reason: "High importance (8/10) and due tomorrow",
            priority: "High",
            estimated_hours: 4,
        },
        Suggestion {
            task: "Fix login bug",
            reason: "Blocks other team members, quick win (2 hours)",
            priority: "Medium",
            estimated_hours: 2,
        },
        Suggestion {
            task: "Update documentation",
            reason: "Low effort (1 hour) and improves team productivity",
            priority: "Medium",
            estimated_hours: 1,
        },
    ]
}
