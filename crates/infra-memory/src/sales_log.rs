// In-Memory SalesRecorder Implementation

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use queueflow_core::domain::{ClientId, CompanyId, ServiceId};
use queueflow_core::error::Result;
use queueflow_core::port::{SalesRecorder, TimeProvider};

use crate::tenant_directory::InMemoryTenantDirectory;

/// One revenue record, appended per finished service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: u64,
    pub company_id: CompanyId,
    pub client_id: ClientId,
    pub service_id: ServiceId,
    pub total_cents: i64,
    pub recorded_at: i64,
}

/// Sales/history collaborator, fed by the engine's completion notifications.
///
/// Prices each completion from the tenant's catalog at recording time. A
/// completion whose service has vanished from the catalog is still recorded,
/// at zero - the notification contract is best-effort and losing the record
/// would be worse than losing the price.
pub struct InMemorySalesLog {
    directory: Arc<InMemoryTenantDirectory>,
    clock: Arc<dyn TimeProvider>,
    entries: RwLock<Vec<Sale>>,
    next_id: AtomicU64,
}

impl InMemorySalesLog {
    pub fn new(directory: Arc<InMemoryTenantDirectory>, clock: Arc<dyn TimeProvider>) -> Self {
        Self {
            directory,
            clock,
            entries: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// All sales of one tenant, oldest first.
    pub async fn sales_for(&self, company: CompanyId) -> Vec<Sale> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|s| s.company_id == company)
            .cloned()
            .collect()
    }

    /// The dashboard's "total sales" figure.
    pub async fn total_revenue(&self, company: CompanyId) -> i64 {
        self.entries
            .read()
            .await
            .iter()
            .filter(|s| s.company_id == company)
            .map(|s| s.total_cents)
            .sum()
    }
}

#[async_trait]
impl SalesRecorder for InMemorySalesLog {
    async fn record_completion(
        &self,
        company: CompanyId,
        client: ClientId,
        service: ServiceId,
    ) -> Result<()> {
        let total_cents = match self.directory.service_price(company, service).await {
            Some(price) => price,
            None => {
                warn!(
                    company_id = company,
                    service_id = service,
                    "completed service missing from catalog, recording at zero"
                );
                0
            }
        };

        let sale = Sale {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            company_id: company,
            client_id: client,
            service_id: service,
            total_cents,
            recorded_at: self.clock.now_millis(),
        };

        info!(
            sale_id = sale.id,
            company_id = company,
            total_cents,
            "completion recorded"
        );
        self.entries.write().await.push(sale);
        Ok(())
    }
}
