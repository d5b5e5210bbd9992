//! Loan application API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::loan::{
    CreateLoanApplicationRequest, ListApplicationsQuery, LoanApplication, UpdateStatusRequest,
};
use crate::loan_service::LoanService;
use crate::middleware::{OptionalUser, ReviewerUser};
use crate::models::{ApiResponse, PaginatedResponse};

/// POST /api/applications - Submit a new application
pub async fn submit_application(
    State(loan_service): State<Arc<LoanService>>,
    OptionalUser(user): OptionalUser,
    WithRejection(Json(request), _): WithRejection<Json<CreateLoanApplicationRequest>, ApiError>,
) -> Result<(StatusCode, Json<ApiResponse<LoanApplication>>), ApiError> {
    let application = loan_service
        .submit_application(request, user.map(|u| u.user_id))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(application))))
}

/// GET /api/applications - List applications, newest first
pub async fn list_applications(
    State(loan_service): State<Arc<LoanService>>,
    _reviewer: ReviewerUser,
    Query(query): Query<ListApplicationsQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<LoanApplication>>>, ApiError> {
    let page = loan_service.list_applications(query).await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/applications/:id - Get a single application
pub async fn get_application(
    State(loan_service): State<Arc<LoanService>>,
    _reviewer: ReviewerUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<LoanApplication>>, ApiError> {
    let application = loan_service.get_application(id).await?;
    Ok(Json(ApiResponse::ok(application)))
}

/// PUT /api/applications/:id/status - Approve or reject a pending application
pub async fn update_application_status(
    State(loan_service): State<Arc<LoanService>>,
    ReviewerUser(reviewer): ReviewerUser,
    Path(id): Path<Uuid>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateStatusRequest>, ApiError>,
) -> Result<Json<ApiResponse<LoanApplication>>, ApiError> {
    let application = loan_service
        .update_status(id, request.status, Some(reviewer.user_id))
        .await?;
    Ok(Json(ApiResponse::ok(application)))
}
