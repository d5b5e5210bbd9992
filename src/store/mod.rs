//! Record store for loan applications
//!
//! The store owns persistence only. Status rules live in
//! [`LoanStatus::transition_to`](crate::loan::LoanStatus::transition_to); the
//! store just applies a compare-and-set on the current status.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::loan::{LoanApplication, LoanStatus, NewLoanApplication};

mod memory;
mod postgres;

pub use memory::InMemoryLoanStore;
pub use postgres::PgLoanStore;

/// Record store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Filter and window for listing applications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub status: Option<LoanStatus>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for ApplicationFilter {
    fn default() -> Self {
        Self {
            status: None,
            limit: 20,
            offset: 0,
        }
    }
}

/// One page of applications, newest first
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationPage {
    pub items: Vec<LoanApplication>,
    /// Matches across all pages
    pub total: u64,
}

/// Status change applied only if the record still has `expected` status
#[derive(Debug, Clone, Copy)]
pub struct StatusUpdate {
    pub id: Uuid,
    pub expected: LoanStatus,
    pub target: LoanStatus,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: DateTime<Utc>,
}

#[async_trait]
pub trait LoanApplicationStore: Send + Sync {
    /// Persist a new application with a fresh id, the current time and
    /// pending status
    async fn insert(&self, application: NewLoanApplication)
        -> Result<LoanApplication, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<LoanApplication>, StoreError>;

    /// Ordered by `submitted_at` descending, then by id
    async fn list(&self, filter: ApplicationFilter) -> Result<ApplicationPage, StoreError>;

    /// Every application currently stored
    async fn snapshot(&self) -> Result<Vec<LoanApplication>, StoreError>;

    /// Returns `None` when no record with that id has the expected status
    async fn update_status(
        &self,
        update: StatusUpdate,
    ) -> Result<Option<LoanApplication>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
