//! API handlers for the LoanDesk backend

pub mod analytics;
pub mod health;
pub mod loan;
pub mod risk;

pub use analytics::{get_dashboard, get_stats};
pub use health::{health_check, root};
pub use loan::{get_application, list_applications, submit_application, update_application_status};
pub use risk::get_application_risk;
