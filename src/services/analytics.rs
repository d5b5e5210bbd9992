//! Portfolio aggregation for the review dashboard
//!
//! Everything here is a pure fold over a snapshot of loan applications.
//! Nothing is cached between calls; callers recompute whenever the
//! underlying record set may have changed.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::loan::{LoanApplication, LoanStatus};

/// Days covered by the dashboard submission trend
pub const DEFAULT_TREND_WINDOW_DAYS: i64 = 30;

/// Decimal places kept on the average loan amount
const AVG_AMOUNT_DECIMAL_PLACES: u32 = 2;

/// Summary statistics over a set of loan applications
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct LoanStats {
    pub total_applications: u64,
    pub approved_applications: u64,
    pub pending_applications: u64,
    pub rejected_applications: u64,
    pub total_amount: Decimal,
    pub approved_amount: Decimal,
    /// Rounded to cents, midpoint away from zero
    pub avg_loan_amount: Decimal,
}

impl LoanStats {
    /// Share of approved applications as a whole percentage
    pub fn approval_rate_percent(&self) -> u32 {
        if self.total_applications == 0 {
            return 0;
        }
        let rate = Decimal::from(self.approved_applications) * Decimal::ONE_HUNDRED
            / Decimal::from(self.total_applications);
        rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    }
}

/// Number of submissions on a single UTC calendar day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DailySubmissions {
    pub date: NaiveDate,
    pub applications: u64,
}

/// Everything the dashboard renders, computed from one snapshot
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub stats: LoanStats,
    pub approval_rate_percent: u32,
    pub submission_trend: Vec<DailySubmissions>,
}

/// Fold a set of applications into summary statistics.
///
/// Order of the input does not matter: sums are exact decimals and the
/// average is rounded once at the end. An empty input yields all zeros.
pub fn compute_stats(applications: &[LoanApplication]) -> LoanStats {
    let mut stats = applications
        .iter()
        .fold(LoanStats::default(), |mut stats, app| {
            stats.total_applications += 1;
            stats.total_amount += app.loan_amount;
            match app.status {
                LoanStatus::Approved => {
                    stats.approved_applications += 1;
                    stats.approved_amount += app.loan_amount;
                }
                LoanStatus::Pending => stats.pending_applications += 1,
                LoanStatus::Rejected => stats.rejected_applications += 1,
            }
            stats
        });

    if stats.total_applications > 0 {
        stats.avg_loan_amount = (stats.total_amount / Decimal::from(stats.total_applications))
            .round_dp_with_strategy(
                AVG_AMOUNT_DECIMAL_PLACES,
                RoundingStrategy::MidpointAwayFromZero,
            );
    }

    stats
}

/// Count submissions per day over the last `window_days` days, oldest first.
///
/// Days without submissions are left out.
pub fn submission_trend(
    applications: &[LoanApplication],
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<DailySubmissions> {
    let window_start = now - Duration::days(window_days);

    let mut by_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for app in applications
        .iter()
        .filter(|app| app.submitted_at >= window_start)
    {
        *by_day.entry(app.submitted_at.date_naive()).or_default() += 1;
    }

    by_day
        .into_iter()
        .map(|(date, applications)| DailySubmissions { date, applications })
        .collect()
}

/// Build the dashboard summary from a single snapshot
pub fn summarize(applications: &[LoanApplication], now: DateTime<Utc>) -> DashboardSummary {
    let stats = compute_stats(applications);
    DashboardSummary {
        approval_rate_percent: stats.approval_rate_percent(),
        submission_trend: submission_trend(applications, now, DEFAULT_TREND_WINDOW_DAYS),
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn app(amount: i64, status: LoanStatus, submitted_at: DateTime<Utc>) -> LoanApplication {
        LoanApplication {
            id: Uuid::new_v4(),
            full_name: "Test Applicant".to_string(),
            email: "test@example.com".to_string(),
            phone_number: "5550000000".to_string(),
            loan_amount: Decimal::from(amount),
            purpose: "Education".to_string(),
            credit_score: 700,
            employment_status: "Employed".to_string(),
            monthly_income: Decimal::from(5_000),
            status,
            submitted_at,
            submitted_by: None,
            reviewed_by: None,
            reviewed_at: None,
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        assert_eq!(compute_stats(&[]), LoanStats::default());
        assert_eq!(compute_stats(&[]).avg_loan_amount, Decimal::ZERO);
    }

    #[test]
    fn test_average_rounds_to_cents() {
        let now = Utc::now();
        let apps = vec![
            app(1_000, LoanStatus::Pending, now),
            app(1_000, LoanStatus::Pending, now),
            app(1_001, LoanStatus::Pending, now),
        ];
        // 3001 / 3 = 1000.333...
        assert_eq!(
            compute_stats(&apps).avg_loan_amount,
            Decimal::new(100_033, 2)
        );
    }

    #[test]
    fn test_average_midpoint_rounds_away_from_zero() {
        let now = Utc::now();
        let mut a = app(1_000, LoanStatus::Pending, now);
        a.loan_amount = Decimal::new(100_001, 2); // 1000.01
        let b = app(1_000, LoanStatus::Pending, now);
        // 2000.01 / 2 = 1000.005
        assert_eq!(
            compute_stats(&[a, b]).avg_loan_amount,
            Decimal::new(100_001, 2)
        );
    }

    #[test]
    fn test_approval_rate() {
        let stats = LoanStats {
            total_applications: 3,
            approved_applications: 2,
            ..LoanStats::default()
        };
        // 66.67 -> 67
        assert_eq!(stats.approval_rate_percent(), 67);

        let stats = LoanStats {
            total_applications: 8,
            approved_applications: 1,
            ..LoanStats::default()
        };
        // 12.5 -> 13
        assert_eq!(stats.approval_rate_percent(), 13);

        assert_eq!(LoanStats::default().approval_rate_percent(), 0);
    }

    #[test]
    fn test_trend_groups_by_day_within_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
        let apps = vec![
            app(5_000, LoanStatus::Pending, now),
            app(5_000, LoanStatus::Pending, now - Duration::hours(2)),
            app(5_000, LoanStatus::Pending, now - Duration::days(3)),
            app(5_000, LoanStatus::Pending, now - Duration::days(45)),
        ];

        let trend = submission_trend(&apps, now, DEFAULT_TREND_WINDOW_DAYS);
        assert_eq!(
            trend,
            vec![
                DailySubmissions {
                    date: NaiveDate::from_ymd_opt(2024, 3, 28).unwrap(),
                    applications: 1,
                },
                DailySubmissions {
                    date: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
                    applications: 2,
                },
            ]
        );
    }
}
