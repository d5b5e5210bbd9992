//! Portfolio statistics route definitions

use axum::{routing::get, Router};

use crate::handlers::{get_dashboard, get_stats};
use crate::state::AppState;

pub fn analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/api/stats", get(get_stats))
        .route("/api/dashboard", get(get_dashboard))
}
