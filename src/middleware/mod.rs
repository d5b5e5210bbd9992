//! Middleware and extractors for the LoanDesk API

pub mod auth;
mod rate_limiter;
mod request_log;

pub use auth::{AuthenticatedUser, OptionalUser, ReviewerUser};
pub use rate_limiter::{client_ip, throttle_submissions, SubmissionThrottle};
pub use request_log::request_tracing;
