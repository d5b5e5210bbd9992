//! PostgreSQL record store

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    ApplicationFilter, ApplicationPage, LoanApplicationStore, StatusUpdate, StoreError,
};
use crate::loan::{LoanApplication, LoanStatus, NewLoanApplication};

#[derive(Clone)]
pub struct PgLoanStore {
    db_pool: PgPool,
}

impl PgLoanStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl LoanApplicationStore for PgLoanStore {
    async fn insert(
        &self,
        application: NewLoanApplication,
    ) -> Result<LoanApplication, StoreError> {
        let created = sqlx::query_as::<_, LoanApplication>(
            r#"
            INSERT INTO loan_applications (
                id, full_name, email, phone_number, loan_amount, purpose,
                credit_score, employment_status, monthly_income, status,
                submitted_at, submitted_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&application.full_name)
        .bind(&application.email)
        .bind(&application.phone_number)
        .bind(application.loan_amount)
        .bind(&application.purpose)
        .bind(application.credit_score)
        .bind(&application.employment_status)
        .bind(application.monthly_income)
        .bind(LoanStatus::Pending)
        .bind(Utc::now())
        .bind(application.submitted_by)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<LoanApplication>, StoreError> {
        let application =
            sqlx::query_as::<_, LoanApplication>("SELECT * FROM loan_applications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.db_pool)
                .await?;
        Ok(application)
    }

    async fn list(&self, filter: ApplicationFilter) -> Result<ApplicationPage, StoreError> {
        let items = sqlx::query_as::<_, LoanApplication>(
            r#"
            SELECT * FROM loan_applications
            WHERE ($1::loan_application_status IS NULL OR status = $1)
            ORDER BY submitted_at DESC, id
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(filter.status)
        .bind(i64::from(filter.limit))
        .bind(i64::from(filter.offset))
        .fetch_all(&self.db_pool)
        .await?;

        let (total,) = sqlx::query_as::<_, (i64,)>(
            r#"
            SELECT COUNT(*) FROM loan_applications
            WHERE ($1::loan_application_status IS NULL OR status = $1)
            "#,
        )
        .bind(filter.status)
        .fetch_one(&self.db_pool)
        .await?;

        Ok(ApplicationPage {
            items,
            total: total.max(0) as u64,
        })
    }

    async fn snapshot(&self) -> Result<Vec<LoanApplication>, StoreError> {
        let applications = sqlx::query_as::<_, LoanApplication>("SELECT * FROM loan_applications")
            .fetch_all(&self.db_pool)
            .await?;
        Ok(applications)
    }

    async fn update_status(
        &self,
        update: StatusUpdate,
    ) -> Result<Option<LoanApplication>, StoreError> {
        let updated = sqlx::query_as::<_, LoanApplication>(
            r#"
            UPDATE loan_applications
            SET status = $1, reviewed_by = $2, reviewed_at = $3
            WHERE id = $4 AND status = $5
            RETURNING *
            "#,
        )
        .bind(update.target)
        .bind(update.reviewed_by)
        .bind(update.reviewed_at)
        .bind(update.id)
        .bind(update.expected)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(updated)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
