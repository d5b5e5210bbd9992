//! Liveness endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::loan_service::LoanService;

pub async fn root() -> &'static str {
    "LoanDesk API Server"
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health_check(
    State(loan_service): State<Arc<LoanService>>,
) -> (StatusCode, Json<HealthResponse>) {
    let healthy = loan_service.is_healthy().await;

    let (status_code, status, store) = if healthy {
        (StatusCode::OK, "healthy", "connected")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "unreachable")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            store,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
