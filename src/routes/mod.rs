//! Route definitions for the LoanDesk API

mod analytics;
mod loan;
mod risk;

use axum::{routing::get, Router};

use crate::handlers::{health_check, root};
use crate::middleware::request_tracing;
use crate::state::AppState;

pub use analytics::analytics_routes;
pub use loan::loan_routes;
pub use risk::risk_routes;

/// Assemble the full API router
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(loan_routes(state.submission_throttle.clone()))
        .merge(risk_routes())
        .merge(analytics_routes())
        .layer(axum::middleware::from_fn(request_tracing))
        .with_state(state)
}
