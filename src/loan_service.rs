//! Loan service layer - intake, review and reporting for loan applications

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ApiError, ApiResult};
use crate::loan::{
    CreateLoanApplicationRequest, ListApplicationsQuery, LoanApplication, LoanStatus,
};
use crate::models::PaginatedResponse;
use crate::services::{analytics, risk_engine, DashboardSummary, LoanStats, RiskAssessment};
use crate::store::{ApplicationFilter, LoanApplicationStore, StatusUpdate};

/// Default page size for listings
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request
pub const MAX_PAGE_SIZE: u32 = 100;

/// An application together with its risk assessment
#[derive(Debug, Serialize, Clone)]
pub struct ApplicationReview {
    pub application: LoanApplication,
    pub assessment: RiskAssessment,
}

/// Loan service for managing the application lifecycle
#[derive(Clone)]
pub struct LoanService {
    store: Arc<dyn LoanApplicationStore>,
}

impl LoanService {
    /// Create a new loan service over a record store
    pub fn new(store: Arc<dyn LoanApplicationStore>) -> Self {
        Self { store }
    }

    /// Validate and persist a new application. Status is always pending.
    pub async fn submit_application(
        &self,
        request: CreateLoanApplicationRequest,
        submitted_by: Option<Uuid>,
    ) -> ApiResult<LoanApplication> {
        let request = request.normalized();
        request.validate()?;

        let application = self
            .store
            .insert(request.into_new_application(submitted_by))
            .await?;

        tracing::info!(
            application_id = %application.id,
            loan_amount = %application.loan_amount,
            submitted_by = ?submitted_by,
            "Loan application submitted"
        );

        Ok(application)
    }

    /// Get an application by id
    pub async fn get_application(&self, id: Uuid) -> ApiResult<LoanApplication> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Loan application {} not found", id)))
    }

    /// List applications newest first, optionally filtered by status
    pub async fn list_applications(
        &self,
        query: ListApplicationsQuery,
    ) -> ApiResult<PaginatedResponse<LoanApplication>> {
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = query.page.unwrap_or(1).max(1);
        let offset = (page - 1).saturating_mul(limit);

        let result = self
            .store
            .list(ApplicationFilter {
                status: query.status,
                limit,
                offset,
            })
            .await?;

        Ok(PaginatedResponse {
            data: result.items,
            total: result.total,
            page,
            limit,
        })
    }

    /// Approve or reject a pending application.
    ///
    /// Decided applications are never changed again; a second decision, or a
    /// decision that loses a race with another reviewer, is a conflict.
    pub async fn update_status(
        &self,
        id: Uuid,
        target: LoanStatus,
        reviewed_by: Option<Uuid>,
    ) -> ApiResult<LoanApplication> {
        let current = self.get_application(id).await?;
        let target = current.status.transition_to(target)?;

        let updated = self
            .store
            .update_status(StatusUpdate {
                id,
                expected: current.status,
                target,
                reviewed_by,
                reviewed_at: Utc::now(),
            })
            .await?
            .ok_or_else(|| {
                tracing::warn!(application_id = %id, "Concurrent status change detected");
                ApiError::Conflict(format!(
                    "Loan application {} was decided by another reviewer",
                    id
                ))
            })?;

        tracing::info!(
            application_id = %id,
            status = updated.status.as_str(),
            reviewed_by = ?reviewed_by,
            "Loan application decided"
        );

        Ok(updated)
    }

    /// Recompute portfolio statistics from a fresh snapshot
    pub async fn stats(&self) -> ApiResult<LoanStats> {
        let snapshot = self.store.snapshot().await?;
        Ok(analytics::compute_stats(&snapshot))
    }

    /// Stats, approval rate and submission trend from one snapshot
    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let snapshot = self.store.snapshot().await?;
        Ok(analytics::summarize(&snapshot, Utc::now()))
    }

    /// Fetch an application and score it
    pub async fn review(&self, id: Uuid) -> ApiResult<ApplicationReview> {
        let application = self.get_application(id).await?;
        let assessment = risk_engine::assess_risk(&application);

        tracing::debug!(
            application_id = %id,
            level = assessment.level.as_str(),
            "Risk assessed"
        );

        Ok(ApplicationReview {
            application,
            assessment,
        })
    }

    /// Whether the record store is reachable
    pub async fn is_healthy(&self) -> bool {
        match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "Record store health check failed");
                false
            }
        }
    }
}
