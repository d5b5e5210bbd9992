//! In-process record store, used when no database is configured

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    ApplicationFilter, ApplicationPage, LoanApplicationStore, StatusUpdate, StoreError,
};
use crate::loan::{LoanApplication, NewLoanApplication};

#[derive(Clone, Default)]
pub struct InMemoryLoanStore {
    applications: Arc<RwLock<HashMap<Uuid, LoanApplication>>>,
}

impl InMemoryLoanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_applications(applications: impl IntoIterator<Item = LoanApplication>) -> Self {
        let map = applications.into_iter().map(|app| (app.id, app)).collect();
        Self {
            applications: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl LoanApplicationStore for InMemoryLoanStore {
    async fn insert(
        &self,
        application: NewLoanApplication,
    ) -> Result<LoanApplication, StoreError> {
        let mut applications = self.applications.write().await;

        let mut id = Uuid::new_v4();
        while applications.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let created = application.into_application(id, Utc::now());
        applications.insert(id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<LoanApplication>, StoreError> {
        Ok(self.applications.read().await.get(&id).cloned())
    }

    async fn list(&self, filter: ApplicationFilter) -> Result<ApplicationPage, StoreError> {
        let applications = self.applications.read().await;

        let mut matching: Vec<&LoanApplication> = applications
            .values()
            .filter(|app| filter.status.map_or(true, |s| app.status == s))
            .collect();
        matching.sort_by_key(|app| (Reverse(app.submitted_at), app.id));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect();

        Ok(ApplicationPage { items, total })
    }

    async fn snapshot(&self) -> Result<Vec<LoanApplication>, StoreError> {
        Ok(self.applications.read().await.values().cloned().collect())
    }

    async fn update_status(
        &self,
        update: StatusUpdate,
    ) -> Result<Option<LoanApplication>, StoreError> {
        let mut applications = self.applications.write().await;

        let Some(app) = applications.get_mut(&update.id) else {
            return Ok(None);
        };
        if app.status != update.expected {
            return Ok(None);
        }

        app.status = update.target;
        app.reviewed_by = update.reviewed_by;
        app.reviewed_at = Some(update.reviewed_at);
        Ok(Some(app.clone()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
