// 🌐 HTTP API - Axum routes over the receipt processor
// POST /receipts/process, GET /receipts/:id/points

use crate::error::ReceiptError;
use crate::processor::ReceiptProcessor;
use crate::receipt::Receipt;
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<ReceiptProcessor>,

    /// Legacy lookup behavior: unknown ids score 0 instead of 404
    pub unknown_id_as_zero: bool,
}

impl AppState {
    pub fn new(processor: ReceiptProcessor, unknown_id_as_zero: bool) -> Self {
        AppState {
            processor: Arc::new(processor),
            unknown_id_as_zero,
        }
    }
}

// ============================================================================
// RESPONSES
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    InvalidReceipt,
    NotFound,
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidReceipt => (StatusCode::BAD_REQUEST, "The receipt is invalid"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "No receipt found for that id"),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (
            status,
            Json(ErrorResponse {
                error: message.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<ReceiptError> for ApiError {
    fn from(err: ReceiptError) -> Self {
        match err {
            ReceiptError::NotFound(_) => ApiError::NotFound,
            other => {
                error!(error = %other, "receipt processing failed");
                ApiError::Internal
            }
        }
    }
}

// ============================================================================
// HANDLERS
// ============================================================================

/// POST /receipts/process - Score and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    // Content-Type is not checked; only the body's JSON shape matters
    let receipt: Receipt = serde_json::from_slice(&body).map_err(|e| {
        warn!(reason = %e, "rejected receipt");
        ApiError::InvalidReceipt
    })?;

    let id = state.processor.submit(receipt)?;
    Ok(Json(ProcessResponse { id }))
}

/// GET /receipts/:id/points - Points for a previously processed receipt
async fn get_points(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    match state.processor.lookup(&id) {
        Ok(points) => Ok(Json(PointsResponse { points })),
        Err(ReceiptError::NotFound(_)) if state.unknown_id_as_zero => {
            warn!(receipt_id = %id, "unknown receipt id, answering 0 points");
            Ok(Json(PointsResponse { points: 0 }))
        }
        Err(err) => Err(err.into()),
    }
}

/// Router with both receipt endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================
