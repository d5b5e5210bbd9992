//! Risk Scoring Engine for LoanDesk
//!
//! Classifies a single loan application from its credit score and its
//! debt-to-income ratio. The assessment is advisory: reviewers make the
//! final approve/reject decision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::loan::LoanApplication;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Months used to annualize monthly income
const MONTHS_PER_YEAR: i64 = 12;

/// Decimal places kept on the reported debt-to-income ratio
const RATIO_REPORT_DECIMAL_PLACES: u32 = 4;

/// 0.30
const LOW_RISK_MAX_RATIO: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// 0.40
const MODERATE_RISK_MAX_RATIO: Decimal = Decimal::from_parts(40, 0, 0, false, 2);

/// 0.50
const MEDIUM_RISK_MAX_RATIO: Decimal = Decimal::from_parts(50, 0, 0, false, 2);

// ============================================================================
// Data Models
// ============================================================================

/// Risk level, ordered from safest to riskiest
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

/// Reviewer recommendation attached to a risk level.
///
/// The code is stable across releases; the message is what reviewers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    ExcellentCandidate,
    StandardTerms,
    HigherInterestRates,
    VerifyIncome,
    AdditionalVerification,
    ConsiderRejection,
}

impl Recommendation {
    pub fn code(&self) -> &'static str {
        match self {
            Recommendation::ExcellentCandidate => "excellent_candidate",
            Recommendation::StandardTerms => "standard_terms",
            Recommendation::HigherInterestRates => "higher_interest_rates",
            Recommendation::VerifyIncome => "verify_income",
            Recommendation::AdditionalVerification => "additional_verification",
            Recommendation::ConsiderRejection => "consider_rejection",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::ExcellentCandidate => "Excellent candidate for approval",
            Recommendation::StandardTerms => "Consider approval with standard terms",
            Recommendation::HigherInterestRates => "Consider approval with higher interest rates",
            Recommendation::VerifyIncome => "Verify income documentation",
            Recommendation::AdditionalVerification => "Recommend additional verification",
            Recommendation::ConsiderRejection => "Consider rejection based on risk profile",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        [
            Recommendation::ExcellentCandidate,
            Recommendation::StandardTerms,
            Recommendation::HigherInterestRates,
            Recommendation::VerifyIncome,
            Recommendation::AdditionalVerification,
            Recommendation::ConsiderRejection,
        ]
        .into_iter()
        .find(|r| r.code() == code)
    }
}

#[derive(Serialize, Deserialize)]
struct RecommendationBody {
    code: String,
    message: String,
}

impl Serialize for Recommendation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RecommendationBody {
            code: self.code().to_string(),
            message: self.message().to_string(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Recommendation {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let body = RecommendationBody::deserialize(deserializer)?;
        Recommendation::from_code(&body.code).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown recommendation code: {}", body.code))
        })
    }
}

/// Outcome of scoring one application
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    /// Loan amount over annual income, rounded to 4 places.
    /// `None` when the applicant reports no income.
    pub debt_to_income_ratio: Option<Decimal>,
    pub recommendations: Vec<Recommendation>,
}

/// One row of the decision table
struct RiskRule {
    min_credit_score: i32,
    /// Exclusive upper bound on the ratio
    max_ratio: Decimal,
    level: RiskLevel,
    recommendations: &'static [Recommendation],
}

/// Evaluated top to bottom; the first matching row wins.
const RISK_RULES: [RiskRule; 3] = [
    RiskRule {
        min_credit_score: 750,
        max_ratio: LOW_RISK_MAX_RATIO,
        level: RiskLevel::Low,
        recommendations: &[Recommendation::ExcellentCandidate],
    },
    RiskRule {
        min_credit_score: 650,
        max_ratio: MODERATE_RISK_MAX_RATIO,
        level: RiskLevel::Moderate,
        recommendations: &[Recommendation::StandardTerms],
    },
    RiskRule {
        min_credit_score: 600,
        max_ratio: MEDIUM_RISK_MAX_RATIO,
        level: RiskLevel::Medium,
        recommendations: &[
            Recommendation::HigherInterestRates,
            Recommendation::VerifyIncome,
        ],
    },
];

/// Used when no rule matches
const FALLBACK_RECOMMENDATIONS: &[Recommendation] = &[
    Recommendation::AdditionalVerification,
    Recommendation::ConsiderRejection,
];

impl RiskRule {
    fn matches(&self, credit_score: i32, ratio: Option<Decimal>) -> bool {
        credit_score >= self.min_credit_score && ratio.is_some_and(|r| r < self.max_ratio)
    }
}

// ============================================================================
// Scoring
// ============================================================================

/// Loan amount expressed as a fraction of annual income.
///
/// Returns `None` when monthly income is zero or negative.
pub fn debt_to_income_ratio(loan_amount: Decimal, monthly_income: Decimal) -> Option<Decimal> {
    if monthly_income <= Decimal::ZERO {
        return None;
    }
    let annual_income = monthly_income.checked_mul(Decimal::from(MONTHS_PER_YEAR))?;
    loan_amount.checked_div(annual_income)
}

/// Classify an application.
///
/// The exact ratio drives classification; only the reported value is rounded.
pub fn assess_risk(application: &LoanApplication) -> RiskAssessment {
    let ratio = debt_to_income_ratio(application.loan_amount, application.monthly_income);

    let (level, recommendations) = RISK_RULES
        .iter()
        .find(|rule| rule.matches(application.credit_score, ratio))
        .map(|rule| (rule.level, rule.recommendations))
        .unwrap_or((RiskLevel::High, FALLBACK_RECOMMENDATIONS));

    RiskAssessment {
        level,
        debt_to_income_ratio: ratio.map(|r| {
            r.round_dp_with_strategy(
                RATIO_REPORT_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            )
        }),
        recommendations: recommendations.to_vec(),
    }
}
