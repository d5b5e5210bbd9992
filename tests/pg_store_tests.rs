//! Record store tests against a live PostgreSQL database

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::PgPool;
    use uuid::Uuid;

    use loandesk_server::db::run_migrations;
    use loandesk_server::loan::{CreateLoanApplicationRequest, LoanStatus};
    use loandesk_server::loan_service::LoanService;
    use loandesk_server::store::{LoanApplicationStore, PgLoanStore, StatusUpdate};

    /// Helper to create a migrated test database pool
    async fn setup_test_db() -> PgPool {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/loandesk_test".to_string());

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(2)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        run_migrations(&pool)
            .await
            .expect("Failed to migrate test database");
        pool
    }

    fn create_test_request(loan_amount: i64) -> CreateLoanApplicationRequest {
        CreateLoanApplicationRequest {
            full_name: "Marcus Feld".to_string(),
            email: "marcus@example.com".to_string(),
            phone_number: "5550109988".to_string(),
            loan_amount: Decimal::from(loan_amount),
            purpose: "Business".to_string(),
            credit_score: 705,
            employment_status: "Self-employed".to_string(),
            monthly_income: Decimal::new(725050, 2),
        }
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_insert_preserves_exact_amounts() {
        let store = PgLoanStore::new(setup_test_db().await);

        let created = store
            .insert(create_test_request(42_000).into_new_application(None))
            .await
            .unwrap();
        assert_eq!(created.status, LoanStatus::Pending);

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.loan_amount, Decimal::from(42_000));
        assert_eq!(fetched.monthly_income, Decimal::new(725050, 2));
        assert!(fetched.reviewed_at.is_none());
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_status_update_is_compare_and_set() {
        let store = PgLoanStore::new(setup_test_db().await);
        let created = store
            .insert(create_test_request(15_000).into_new_application(None))
            .await
            .unwrap();

        let reviewer = Uuid::new_v4();
        let approve = StatusUpdate {
            id: created.id,
            expected: LoanStatus::Pending,
            target: LoanStatus::Approved,
            reviewed_by: Some(reviewer),
            reviewed_at: Utc::now(),
        };
        let decided = store.update_status(approve).await.unwrap().unwrap();
        assert_eq!(decided.status, LoanStatus::Approved);
        assert_eq!(decided.reviewed_by, Some(reviewer));

        // A second writer still expecting pending loses
        let reject = StatusUpdate {
            target: LoanStatus::Rejected,
            ..approve
        };
        assert!(store.update_status(reject).await.unwrap().is_none());

        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, LoanStatus::Approved);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_stats_include_new_submissions() {
        let pool = setup_test_db().await;
        let service = LoanService::new(Arc::new(PgLoanStore::new(pool)));

        let before = service.stats().await.unwrap();
        service
            .submit_application(create_test_request(10_000), None)
            .await
            .unwrap();
        let after = service.stats().await.unwrap();

        assert_eq!(after.total_applications, before.total_applications + 1);
        assert_eq!(after.pending_applications, before.pending_applications + 1);
        assert_eq!(after.total_amount, before.total_amount + Decimal::from(10_000));
        assert_eq!(after.approved_amount, before.approved_amount);
    }
}
