// Tenant Directory Port (Interface)

use crate::domain::{CompanyId, ServiceId};
use crate::error::Result;
use async_trait::async_trait;

/// Lookup interface into the platform's tenant/catalog directory.
///
/// The engine consumes the directory only to validate that a referenced
/// company and service exist at ticket creation; references are not
/// re-validated later. "Exists" means present, active, and owned by that
/// tenant.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn tenant_exists(&self, company: CompanyId) -> Result<bool>;

    async fn service_exists(&self, company: CompanyId, service: ServiceId) -> Result<bool>;
}

/// Mock implementations for tests
pub mod mocks {
    use super::*;
    use std::collections::HashSet;

    /// Fixed directory: a set of companies and (company, service) pairs.
    pub struct MockTenantDirectory {
        companies: HashSet<CompanyId>,
        services: HashSet<(CompanyId, ServiceId)>,
    }

    impl MockTenantDirectory {
        pub fn new(
            companies: impl IntoIterator<Item = CompanyId>,
            services: impl IntoIterator<Item = (CompanyId, ServiceId)>,
        ) -> Self {
            Self {
                companies: companies.into_iter().collect(),
                services: services.into_iter().collect(),
            }
        }
    }

    #[async_trait]
    impl TenantDirectory for MockTenantDirectory {
        async fn tenant_exists(&self, company: CompanyId) -> Result<bool> {
            Ok(self.companies.contains(&company))
        }

        async fn service_exists(&self, company: CompanyId, service: ServiceId) -> Result<bool> {
            Ok(self.services.contains(&(company, service)))
        }
    }
}
