//! Loan application route definitions

use axum::{
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{get, put},
    Router,
};

use crate::handlers::{
    get_application, list_applications, submit_application, update_application_status,
};
use crate::middleware::{throttle_submissions, SubmissionThrottle};
use crate::state::AppState;

pub fn loan_routes(throttle: SubmissionThrottle) -> Router<AppState> {
    let throttled_submit =
        submit_application.layer(from_fn_with_state(throttle, throttle_submissions));

    Router::new()
        .route(
            "/api/applications",
            get(list_applications).post(throttled_submit),
        )
        .route("/api/applications/:id", get(get_application))
        .route(
            "/api/applications/:id/status",
            put(update_application_status),
        )
}
