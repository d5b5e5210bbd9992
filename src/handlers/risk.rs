//! Risk assessment API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::loan_service::{ApplicationReview, LoanService};
use crate::middleware::ReviewerUser;
use crate::models::ApiResponse;

/// GET /api/applications/:id/risk - Application with its risk assessment
pub async fn get_application_risk(
    State(loan_service): State<Arc<LoanService>>,
    _reviewer: ReviewerUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<ApplicationReview>>, ApiError> {
    let review = loan_service.review(id).await?;
    Ok(Json(ApiResponse::ok(review)))
}
