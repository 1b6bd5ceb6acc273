// Catalog service - KPI browsing and simulated access requests
use crate::application::errors::CatalogError;
use crate::application::kpi_repository::KpiRepository;
use crate::domain::kpi::{Kpi, KpiId};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessRequestStatus {
    AlreadyGranted,
    Pending,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn KpiRepository>,
    approval_delay: Duration,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn KpiRepository>, approval_delay: Duration) -> Self {
        Self {
            repository,
            approval_delay,
        }
    }

    pub fn list_kpis(&self, category: Option<&str>, search: Option<&str>) -> Vec<Kpi> {
        self.repository
            .list_kpis()
            .into_iter()
            .filter(|k| k.matches(category, search))
            .collect()
    }

    /// Distinct categories in catalog order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for kpi in self.repository.list_kpis() {
            if !categories.contains(&kpi.category) {
                categories.push(kpi.category);
            }
        }
        categories
    }

    pub fn get_kpi(&self, id: &KpiId) -> Result<Kpi, CatalogError> {
        self.repository
            .find_kpi(id)
            .ok_or_else(|| CatalogError::KpiNotFound(id.clone()))
    }

    /// Approval is simulated: access is granted by a detached task after the configured delay.
    pub fn request_access(&self, id: &KpiId, reason: &str) -> Result<AccessRequestStatus, CatalogError> {
        let kpi = self.get_kpi(id)?;
        if kpi.has_access {
            return Ok(AccessRequestStatus::AlreadyGranted);
        }

        tracing::info!("Access requested for KPI {} with reason: {}", id, reason);

        let repository = self.repository.clone();
        let delay = self.approval_delay;
        let id = id.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if repository.grant_access(&id) {
                tracing::info!("Access granted for KPI {}", id);
            }
        });

        Ok(AccessRequestStatus::Pending)
    }
}
