// In-Memory TicketRepository Implementation

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use queueflow_core::domain::{
    ClientId, CompanyId, DomainError, Ticket, TicketId, TicketStatus,
};
use queueflow_core::error::Result;
use queueflow_core::port::TicketRepository;

/// The single owner of every ticket across all tenants.
///
/// Tickets live in one flat map keyed by id; tenant scoping is a filter on
/// read, which is the isolation *contract*, not an optimization concern, at
/// queue sizes of tens per tenant. All mutations take the write lock, so the
/// duplicate-active check and the status transition run in the same critical
/// section as the write they guard, and readers never observe a half-written
/// ticket.
#[derive(Default)]
pub struct InMemoryTicketStore {
    tickets: RwLock<BTreeMap<TicketId, Ticket>>,
}

impl InMemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of tickets ever created, across all tenants.
    pub async fn len(&self) -> usize {
        self.tickets.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.tickets.read().await.is_empty()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketStore {
    async fn insert(&self, ticket: &Ticket) -> Result<()> {
        let mut tickets = self.tickets.write().await;

        let duplicate = tickets.values().any(|t| {
            t.company_id == ticket.company_id
                && t.client_id == ticket.client_id
                && t.is_active()
        });
        if duplicate {
            return Err(DomainError::DuplicateActiveTicket {
                company: ticket.company_id,
                client: ticket.client_id,
            }
            .into());
        }

        debug!(
            ticket_id = ticket.id,
            company_id = ticket.company_id,
            "ticket appended to store"
        );
        tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
        Ok(self.tickets.read().await.get(&id).cloned())
    }

    async fn list_by_company(&self, company: CompanyId) -> Result<Vec<Ticket>> {
        Ok(self
            .tickets
            .read()
            .await
            .values()
            .filter(|t| t.company_id == company)
            .cloned()
            .collect())
    }

    async fn find_active(&self, client: ClientId, company: CompanyId) -> Result<Option<Ticket>> {
        Ok(self
            .tickets
            .read()
            .await
            .values()
            .find(|t| t.client_id == client && t.company_id == company && t.is_active())
            .cloned())
    }

    async fn advance(
        &self,
        id: TicketId,
        target: TicketStatus,
        now_millis: i64,
    ) -> Result<Ticket> {
        let mut tickets = self.tickets.write().await;
        let ticket = tickets
            .get_mut(&id)
            .ok_or(DomainError::TicketNotFound(id))?;
        ticket.advance(target, now_millis)?;
        Ok(ticket.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queueflow_core::domain::TicketPriority;

    fn ticket(id: TicketId, company: CompanyId, client: ClientId) -> Ticket {
        Ticket::new(id, id as i64 * 100, company, client, 1, TicketPriority::Normal)
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let store = InMemoryTicketStore::new();
        store.insert(&ticket(101, 1, 901)).await.unwrap();

        assert_eq!(store.len().await, 1);
        let found = store.find_by_id(101).await.unwrap().unwrap();
        assert_eq!(found.company_id, 1);
        assert!(store.find_by_id(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_active_rejected_same_company_only() {
        let store = InMemoryTicketStore::new();
        store.insert(&ticket(101, 1, 901)).await.unwrap();

        let err = store.insert(&ticket(102, 1, 901)).await.unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::DuplicateActiveTicket {
                company: 1,
                client: 901,
            })
        );

        // Same client, different tenant is allowed
        store.insert(&ticket(103, 2, 901)).await.unwrap();
    }

    #[tokio::test]
    async fn test_finished_ticket_frees_the_client() {
        let store = InMemoryTicketStore::new();
        store.insert(&ticket(101, 1, 901)).await.unwrap();
        store.advance(101, TicketStatus::InService, 500).await.unwrap();
        store.advance(101, TicketStatus::Done, 600).await.unwrap();

        // Terminal ticket no longer blocks a new join
        store.insert(&ticket(102, 1, 901)).await.unwrap();

        let active = store.find_active(901, 1).await.unwrap().unwrap();
        assert_eq!(active.id, 102);
    }

    #[tokio::test]
    async fn test_advance_is_store_side_and_atomic() {
        let store = InMemoryTicketStore::new();
        store.insert(&ticket(101, 1, 901)).await.unwrap();

        let updated = store.advance(101, TicketStatus::Called, 500).await.unwrap();
        assert_eq!(updated.status, TicketStatus::Called);

        // Illegal transition leaves the stored ticket untouched
        assert!(store.advance(101, TicketStatus::Done, 600).await.is_err());
        let stored = store.find_by_id(101).await.unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::Called);
    }

    #[tokio::test]
    async fn test_list_by_company_filters() {
        let store = InMemoryTicketStore::new();
        store.insert(&ticket(101, 1, 901)).await.unwrap();
        store.insert(&ticket(201, 2, 902)).await.unwrap();
        store.insert(&ticket(102, 1, 903)).await.unwrap();

        let tenant1 = store.list_by_company(1).await.unwrap();
        assert_eq!(tenant1.len(), 2);
        assert!(tenant1.iter().all(|t| t.company_id == 1));
    }
}
