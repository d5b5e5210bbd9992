//! Portfolio Aggregation Tests
//!
//! Invariants of the stats fold over realistic application sets.

use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use loandesk_server::loan::{LoanApplication, LoanStatus};
use loandesk_server::services::analytics::{compute_stats, summarize, LoanStats};

fn application(amount: i64, status: LoanStatus) -> LoanApplication {
    LoanApplication {
        id: Uuid::new_v4(),
        full_name: "Sam Okafor".to_string(),
        email: "sam@example.com".to_string(),
        phone_number: "5559876543".to_string(),
        loan_amount: Decimal::from(amount),
        purpose: "Debt Consolidation".to_string(),
        credit_score: 690,
        employment_status: "Self-Employed".to_string(),
        monthly_income: Decimal::from(7_500),
        status,
        submitted_at: Utc::now(),
        submitted_by: None,
        reviewed_by: None,
        reviewed_at: None,
    }
}

fn portfolio() -> Vec<LoanApplication> {
    vec![
        application(10_000, LoanStatus::Approved),
        application(25_500, LoanStatus::Pending),
        application(4_000, LoanStatus::Rejected),
        application(80_000, LoanStatus::Approved),
        application(1_000, LoanStatus::Pending),
        application(99_999, LoanStatus::Rejected),
        application(35_250, LoanStatus::Pending),
    ]
}

fn assert_invariants(stats: &LoanStats) {
    assert_eq!(
        stats.approved_applications + stats.pending_applications + stats.rejected_applications,
        stats.total_applications
    );
    assert!(stats.approved_amount <= stats.total_amount);
}

#[test]
fn test_counts_and_amounts() {
    let stats = compute_stats(&portfolio());

    assert_eq!(stats.total_applications, 7);
    assert_eq!(stats.approved_applications, 2);
    assert_eq!(stats.pending_applications, 3);
    assert_eq!(stats.rejected_applications, 2);
    assert_eq!(stats.total_amount, Decimal::from(255_749));
    assert_eq!(stats.approved_amount, Decimal::from(90_000));
    // 255749 / 7 = 36535.571428...
    assert_eq!(stats.avg_loan_amount, Decimal::new(3_653_557, 2));
    assert_invariants(&stats);
}

#[test]
fn test_empty_collection() {
    let stats = compute_stats(&[]);

    assert_eq!(stats.total_applications, 0);
    assert_eq!(stats.approved_applications, 0);
    assert_eq!(stats.pending_applications, 0);
    assert_eq!(stats.rejected_applications, 0);
    assert_eq!(stats.total_amount, Decimal::ZERO);
    assert_eq!(stats.approved_amount, Decimal::ZERO);
    assert_eq!(stats.avg_loan_amount, Decimal::ZERO);
}

#[test]
fn test_invariants_hold_for_every_prefix() {
    let apps = portfolio();
    for len in 0..=apps.len() {
        assert_invariants(&compute_stats(&apps[..len]));
    }
}

#[test]
fn test_order_independent() {
    let apps = portfolio();
    let expected = compute_stats(&apps);

    let mut reversed = apps.clone();
    reversed.reverse();
    assert_eq!(compute_stats(&reversed), expected);

    for shift in 1..apps.len() {
        let mut rotated = apps.clone();
        rotated.rotate_left(shift);
        assert_eq!(compute_stats(&rotated), expected);
    }
}

#[test]
fn test_idempotent() {
    let apps = portfolio();
    assert_eq!(compute_stats(&apps), compute_stats(&apps));
}

#[test]
fn test_fractional_amounts_sum_exactly() {
    let mut apps = Vec::new();
    for _ in 0..10 {
        let mut app = application(1_000, LoanStatus::Approved);
        app.loan_amount = Decimal::new(100_010, 2); // 1000.10
        apps.push(app);
    }

    let stats = compute_stats(&apps);
    assert_eq!(stats.total_amount, Decimal::new(1_000_100, 2));
    assert_eq!(stats.approved_amount, stats.total_amount);
    assert_eq!(stats.avg_loan_amount, Decimal::new(100_010, 2));
}

#[test]
fn test_dashboard_summary_uses_one_snapshot() {
    let now = Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap();
    let mut apps = portfolio();
    for (i, app) in apps.iter_mut().enumerate() {
        app.submitted_at = now - Duration::days(i as i64 * 10);
    }

    let summary = summarize(&apps, now);

    assert_eq!(summary.stats, compute_stats(&apps));
    // 2 of 7 approved = 28.57%
    assert_eq!(summary.approval_rate_percent, 29);
    // Days 0, 10, 20 and 30 are inside the 30 day window
    assert_eq!(summary.submission_trend.len(), 4);
    assert!(summary
        .submission_trend
        .windows(2)
        .all(|w| w[0].date < w[1].date));
    assert_eq!(
        summary
            .submission_trend
            .iter()
            .map(|d| d.applications)
            .sum::<u64>(),
        4
    );
}
