//! Loan application models for LoanDesk

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Smallest loan amount accepted at intake
pub const MIN_LOAN_AMOUNT: i64 = 1_000;

/// Largest loan amount accepted at intake
pub const MAX_LOAN_AMOUNT: i64 = 100_000;

/// Smallest monthly income accepted at intake
pub const MIN_MONTHLY_INCOME: i64 = 1;

/// Largest monthly income accepted at intake; fits NUMERIC(14, 2)
pub const MAX_MONTHLY_INCOME: i64 = 999_999_999_999;

/// Money is stored in whole cents
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Loan application status
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq, Hash)]
#[sqlx(type_name = "loan_application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
}

/// Refused status change
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTransitionError {
    #[error("Application is already {0:?} and can no longer change status")]
    AlreadyDecided(LoanStatus),

    #[error("Status can only be set to approved or rejected")]
    NotADecision,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "pending",
            LoanStatus::Approved => "approved",
            LoanStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected are terminal
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LoanStatus::Pending)
    }

    /// Validate a move from `self` to `target`, returning the new status.
    ///
    /// Only `pending -> approved` and `pending -> rejected` are allowed.
    pub fn transition_to(self, target: LoanStatus) -> Result<LoanStatus, StatusTransitionError> {
        if target == LoanStatus::Pending {
            return Err(StatusTransitionError::NotADecision);
        }
        if self.is_terminal() {
            return Err(StatusTransitionError::AlreadyDecided(self));
        }
        Ok(target)
    }
}

/// Loan application record
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone, PartialEq)]
pub struct LoanApplication {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub loan_amount: Decimal,
    pub purpose: String,
    pub credit_score: i32,
    pub employment_status: String,
    pub monthly_income: Decimal,
    pub status: LoanStatus,
    pub submitted_at: DateTime<Utc>,
    pub submitted_by: Option<Uuid>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// Request body for submitting a loan application
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct CreateLoanApplicationRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub full_name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 10, message = "Please enter a valid phone number"))]
    pub phone_number: String,
    #[validate(custom = "validate_loan_amount")]
    pub loan_amount: Decimal,
    #[validate(length(min = 1, message = "Please select a loan purpose"))]
    pub purpose: String,
    #[validate(range(min = 300, max = 850, message = "Credit score must be between 300 and 850"))]
    pub credit_score: i32,
    #[validate(length(min = 1, message = "Please select your employment status"))]
    pub employment_status: String,
    #[validate(custom = "validate_monthly_income")]
    pub monthly_income: Decimal,
}

impl CreateLoanApplicationRequest {
    /// Trim free-text fields before validation
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            purpose: self.purpose.trim().to_string(),
            employment_status: self.employment_status.trim().to_string(),
            ..self
        }
    }

    pub fn into_new_application(self, submitted_by: Option<Uuid>) -> NewLoanApplication {
        NewLoanApplication {
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            loan_amount: self.loan_amount,
            purpose: self.purpose,
            credit_score: self.credit_score,
            employment_status: self.employment_status,
            monthly_income: self.monthly_income,
            submitted_by,
        }
    }
}

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn has_sub_cent_precision(value: &Decimal) -> bool {
    value.normalize().scale() > MONEY_DECIMAL_PLACES
}

fn validate_loan_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if has_sub_cent_precision(amount) {
        return Err(validation_error(
            "loan_amount_precision",
            "Loan amount cannot have more than 2 decimal places",
        ));
    }
    if *amount < Decimal::from(MIN_LOAN_AMOUNT) {
        return Err(validation_error(
            "loan_amount_min",
            "Loan amount must be at least $1,000",
        ));
    }
    if *amount > Decimal::from(MAX_LOAN_AMOUNT) {
        return Err(validation_error(
            "loan_amount_max",
            "Loan amount cannot exceed $100,000",
        ));
    }
    Ok(())
}

fn validate_monthly_income(income: &Decimal) -> Result<(), ValidationError> {
    if *income < Decimal::from(MIN_MONTHLY_INCOME) {
        return Err(validation_error(
            "monthly_income_min",
            "Monthly income is required",
        ));
    }
    if *income > Decimal::from(MAX_MONTHLY_INCOME) {
        return Err(validation_error(
            "monthly_income_max",
            "Monthly income is out of range",
        ));
    }
    if has_sub_cent_precision(income) {
        return Err(validation_error(
            "monthly_income_precision",
            "Monthly income cannot have more than 2 decimal places",
        ));
    }
    Ok(())
}

/// Validated intake data handed to the record store.
///
/// The store assigns `id`, `submitted_at` and forces `status` to pending.
#[derive(Debug, Clone)]
pub struct NewLoanApplication {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub loan_amount: Decimal,
    pub purpose: String,
    pub credit_score: i32,
    pub employment_status: String,
    pub monthly_income: Decimal,
    pub submitted_by: Option<Uuid>,
}

impl NewLoanApplication {
    pub fn into_application(self, id: Uuid, submitted_at: DateTime<Utc>) -> LoanApplication {
        LoanApplication {
            id,
            full_name: self.full_name,
            email: self.email,
            phone_number: self.phone_number,
            loan_amount: self.loan_amount,
            purpose: self.purpose,
            credit_score: self.credit_score,
            employment_status: self.employment_status,
            monthly_income: self.monthly_income,
            status: LoanStatus::Pending,
            submitted_at,
            submitted_by: self.submitted_by,
            reviewed_by: None,
            reviewed_at: None,
        }
    }
}

/// Request body for deciding an application
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: LoanStatus,
}

/// Query for listing applications
#[derive(Debug, Deserialize, Default)]
pub struct ListApplicationsQuery {
    pub status: Option<LoanStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateLoanApplicationRequest {
        CreateLoanApplicationRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_number: "5551234567".to_string(),
            loan_amount: Decimal::from(25_000),
            purpose: "Education".to_string(),
            credit_score: 720,
            employment_status: "Employed".to_string(),
            monthly_income: Decimal::from(6_000),
        }
    }

    #[test]
    fn test_pending_can_be_decided() {
        assert_eq!(
            LoanStatus::Pending.transition_to(LoanStatus::Approved),
            Ok(LoanStatus::Approved)
        );
        assert_eq!(
            LoanStatus::Pending.transition_to(LoanStatus::Rejected),
            Ok(LoanStatus::Rejected)
        );
    }

    #[test]
    fn test_terminal_states_refuse_transitions() {
        assert_eq!(
            LoanStatus::Approved.transition_to(LoanStatus::Rejected),
            Err(StatusTransitionError::AlreadyDecided(LoanStatus::Approved))
        );
        assert_eq!(
            LoanStatus::Rejected.transition_to(LoanStatus::Approved),
            Err(StatusTransitionError::AlreadyDecided(LoanStatus::Rejected))
        );
        assert!(LoanStatus::Approved
            .transition_to(LoanStatus::Approved)
            .is_err());
    }

    #[test]
    fn test_pending_is_not_a_target() {
        assert_eq!(
            LoanStatus::Pending.transition_to(LoanStatus::Pending),
            Err(StatusTransitionError::NotADecision)
        );
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_loan_amount_bounds() {
        let mut request = valid_request();
        request.loan_amount = Decimal::from(999);
        assert!(request.validate().is_err());

        request.loan_amount = Decimal::from(100_001);
        assert!(request.validate().is_err());

        request.loan_amount = Decimal::from(1_000);
        assert!(request.validate().is_ok());

        request.loan_amount = Decimal::from(100_000);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_credit_score_bounds() {
        let mut request = valid_request();
        request.credit_score = 299;
        assert!(request.validate().is_err());

        request.credit_score = 851;
        assert!(request.validate().is_err());

        request.credit_score = 300;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_negative_or_zero_income_rejected() {
        let mut request = valid_request();
        request.monthly_income = Decimal::ZERO;
        assert!(request.validate().is_err());

        request.monthly_income = Decimal::from(-10);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_money_must_be_whole_cents() {
        let mut request = valid_request();
        request.loan_amount = Decimal::new(10_000_049, 4); // 1000.0049
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["loan_amount"][0].code,
            "loan_amount_precision"
        );

        request.loan_amount = Decimal::new(100_050, 2); // 1000.50
        assert!(request.validate().is_ok());

        // Trailing zeros are not extra precision
        request.loan_amount = Decimal::new(10_005_000, 4); // 1000.5000
        assert!(request.validate().is_ok());

        request.monthly_income = Decimal::new(4_250_125, 3); // 4250.125
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["monthly_income"][0].code,
            "monthly_income_precision"
        );
    }

    #[test]
    fn test_monthly_income_upper_bound() {
        let mut request = valid_request();
        request.monthly_income = Decimal::from(5_000_000_000_000_000_i64);
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["monthly_income"][0].code,
            "monthly_income_max"
        );

        request.monthly_income = Decimal::from(MAX_MONTHLY_INCOME);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_identity_fields_checked() {
        let mut request = valid_request();
        request.email = "not-an-email".to_string();
        request.full_name = "A".to_string();
        request.phone_number = "123".to_string();

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("phone_number"));
    }

    #[test]
    fn test_normalized_trims_before_validation() {
        let mut request = valid_request();
        request.purpose = "   ".to_string();
        let request = request.normalized();
        assert_eq!(request.purpose, "");
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_new_application_starts_pending() {
        let submitter = Uuid::new_v4();
        let app = valid_request()
            .into_new_application(Some(submitter))
            .into_application(Uuid::new_v4(), Utc::now());
        assert_eq!(app.status, LoanStatus::Pending);
        assert_eq!(app.submitted_by, Some(submitter));
        assert!(app.reviewed_by.is_none());
        assert!(app.reviewed_at.is_none());
    }
}
