// In-Memory TenantDirectory Implementation

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use queueflow_core::domain::{CompanyId, ServiceId};
use queueflow_core::error::{AppError, Result};
use queueflow_core::port::TenantDirectory;

/// Whether the platform currently serves a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyStatus {
    Active,
    Suspended,
}

/// One onboarded company/business - the unit of data isolation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub status: CompanyStatus,
}

/// One entry of a tenant's service catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: ServiceId,
    pub company_id: CompanyId,
    pub name: String,
    pub price_cents: i64,
    pub duration_min: u32,
    pub active: bool,
}

#[derive(Default)]
struct DirectoryInner {
    companies: HashMap<CompanyId, Company>,
    services: HashMap<ServiceId, ServiceOffering>,
}

/// Static reference data the queue engine validates against.
///
/// A suspended company, like an inactive service, stops existing for queue
/// purposes: new joins are rejected while tickets already in the line stay
/// readable and advanceable, so staff can drain it.
#[derive(Default)]
pub struct InMemoryTenantDirectory {
    inner: RwLock<DirectoryInner>,
}

impl InMemoryTenantDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register_company(&self, id: CompanyId, name: impl Into<String>) {
        let company = Company {
            id,
            name: name.into(),
            status: CompanyStatus::Active,
        };
        info!(company_id = id, name = %company.name, "company registered");
        self.inner.write().await.companies.insert(id, company);
    }

    pub async fn register_service(
        &self,
        id: ServiceId,
        company_id: CompanyId,
        name: impl Into<String>,
        price_cents: i64,
        duration_min: u32,
    ) -> Result<()> {
        let mut inner = self.inner.write().await;
        if !inner.companies.contains_key(&company_id) {
            return Err(AppError::Validation(format!(
                "service registered for unknown company {company_id}"
            )));
        }
        inner.services.insert(
            id,
            ServiceOffering {
                id,
                company_id,
                name: name.into(),
                price_cents,
                duration_min,
                active: true,
            },
        );
        Ok(())
    }

    /// Platform-admin operation: toggle a company in or out of service.
    pub async fn set_company_status(&self, id: CompanyId, status: CompanyStatus) -> Result<()> {
        let mut inner = self.inner.write().await;
        let company = inner
            .companies
            .get_mut(&id)
            .ok_or_else(|| AppError::Validation(format!("unknown company {id}")))?;
        info!(company_id = id, status = ?status, "company status changed");
        company.status = status;
        Ok(())
    }

    /// Retire or restore a catalog entry.
    pub async fn set_service_active(&self, id: ServiceId, active: bool) -> Result<()> {
        let mut inner = self.inner.write().await;
        let service = inner
            .services
            .get_mut(&id)
            .ok_or_else(|| AppError::Validation(format!("unknown service {id}")))?;
        service.active = active;
        Ok(())
    }

    pub async fn company(&self, id: CompanyId) -> Option<Company> {
        self.inner.read().await.companies.get(&id).cloned()
    }

    pub async fn services_of(&self, company: CompanyId) -> Vec<ServiceOffering> {
        let mut services: Vec<ServiceOffering> = self
            .inner
            .read()
            .await
            .services
            .values()
            .filter(|s| s.company_id == company)
            .cloned()
            .collect();
        services.sort_by_key(|s| s.id);
        services
    }

    /// Catalog price for a tenant's service, active or not.
    ///
    /// Used by the sales log when pricing a completion; a service retired
    /// mid-visit still finishes and records.
    pub async fn service_price(&self, company: CompanyId, service: ServiceId) -> Option<i64> {
        self.inner
            .read()
            .await
            .services
            .get(&service)
            .filter(|s| s.company_id == company)
            .map(|s| s.price_cents)
    }
}

#[async_trait]
impl TenantDirectory for InMemoryTenantDirectory {
    async fn tenant_exists(&self, company: CompanyId) -> Result<bool> {
        Ok(self
            .inner
            .read()
            .await
            .companies
            .get(&company)
            .map(|c| c.status == CompanyStatus::Active)
            .unwrap_or(false))
    }

    async fn service_exists(&self, company: CompanyId, service: ServiceId) -> Result<bool> {
        Ok(self
            .inner
            .read()
            .await
            .services
            .get(&service)
            .map(|s| s.company_id == company && s.active)
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn directory() -> InMemoryTenantDirectory {
        let dir = InMemoryTenantDirectory::new();
        dir.register_company(1, "Barbearia Viking").await;
        dir.register_service(1, 1, "Corte de Cabelo", 5_000, 30)
            .await
            .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_existence_checks() {
        let dir = directory().await;

        assert!(dir.tenant_exists(1).await.unwrap());
        assert!(!dir.tenant_exists(9).await.unwrap());
        assert!(dir.service_exists(1, 1).await.unwrap());
        // Right service id, wrong tenant
        assert!(!dir.service_exists(2, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_suspension_hides_tenant() {
        let dir = directory().await;

        dir.set_company_status(1, CompanyStatus::Suspended)
            .await
            .unwrap();
        assert!(!dir.tenant_exists(1).await.unwrap());

        dir.set_company_status(1, CompanyStatus::Active)
            .await
            .unwrap();
        assert!(dir.tenant_exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_inactive_service_hidden_but_still_priced() {
        let dir = directory().await;

        dir.set_service_active(1, false).await.unwrap();
        assert!(!dir.service_exists(1, 1).await.unwrap());
        assert_eq!(dir.service_price(1, 1).await, Some(5_000));
    }

    #[tokio::test]
    async fn test_service_requires_known_company() {
        let dir = InMemoryTenantDirectory::new();
        assert!(dir.register_service(1, 7, "Manicure", 4_000, 45).await.is_err());
    }
}
