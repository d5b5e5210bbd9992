//! Pure computation over loan applications: portfolio statistics and risk scoring

pub mod analytics;
pub mod risk_engine;

pub use analytics::{compute_stats, summarize, DashboardSummary, LoanStats};
pub use risk_engine::{assess_risk, RiskAssessment, RiskLevel};
