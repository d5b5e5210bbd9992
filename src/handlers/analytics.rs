//! Portfolio statistics handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::error::ApiError;
use crate::loan_service::LoanService;
use crate::middleware::ReviewerUser;
use crate::models::ApiResponse;
use crate::services::{DashboardSummary, LoanStats};

/// GET /api/stats
pub async fn get_stats(
    State(loan_service): State<Arc<LoanService>>,
    _reviewer: ReviewerUser,
) -> Result<Json<ApiResponse<LoanStats>>, ApiError> {
    let stats = loan_service.stats().await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(loan_service): State<Arc<LoanService>>,
    _reviewer: ReviewerUser,
) -> Result<Json<ApiResponse<DashboardSummary>>, ApiError> {
    let summary = loan_service.dashboard().await?;
    Ok(Json(ApiResponse::ok(summary)))
}
