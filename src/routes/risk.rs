//! Risk assessment route definitions

use axum::{routing::get, Router};

use crate::handlers::get_application_risk;
use crate::state::AppState;

pub fn risk_routes() -> Router<AppState> {
    Router::new().route("/api/applications/:id/risk", get(get_application_risk))
}
