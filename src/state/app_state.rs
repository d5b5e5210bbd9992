//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::TokenVerifier;
use crate::loan_service::LoanService;
use crate::middleware::SubmissionThrottle;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loan_service: Arc<LoanService>,
    pub token_verifier: Arc<TokenVerifier>,
    pub submission_throttle: SubmissionThrottle,
}

impl AppState {
    pub fn new(
        loan_service: Arc<LoanService>,
        token_verifier: Arc<TokenVerifier>,
        submission_throttle: SubmissionThrottle,
    ) -> Self {
        Self {
            loan_service,
            token_verifier,
            submission_throttle,
        }
    }
}

impl FromRef<AppState> for Arc<LoanService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.loan_service.clone()
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.token_verifier.clone()
    }
}

impl FromRef<AppState> for SubmissionThrottle {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.submission_throttle.clone()
    }
}
