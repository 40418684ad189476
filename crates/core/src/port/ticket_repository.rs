// Ticket Repository Port (Interface)

use crate::domain::{ClientId, CompanyId, Ticket, TicketId, TicketStatus};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for the ticket store.
///
/// The store is the single owner of all tickets across all tenants. The two
/// mutating operations carry their precondition checks with them: the check
/// and the mutation happen inside one critical section of the store, never
/// as a read followed by a separate write. A rejected operation leaves the
/// store unchanged.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Append a new Waiting ticket.
    ///
    /// Fails with `DuplicateActiveTicket` if the client already holds a
    /// non-terminal ticket at the same company.
    async fn insert(&self, ticket: &Ticket) -> Result<()>;

    /// Find ticket by ID
    async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>>;

    /// Every ticket of one tenant, in no particular order.
    ///
    /// Ordering is the engine's responsibility, not the store's.
    async fn list_by_company(&self, company: CompanyId) -> Result<Vec<Ticket>>;

    /// The client's non-terminal ticket at `company`, if any.
    async fn find_active(&self, client: ClientId, company: CompanyId) -> Result<Option<Ticket>>;

    /// Atomically advance a ticket's status.
    ///
    /// The state-machine check runs against the stored ticket inside the
    /// store's critical section. Fails with `TicketNotFound` or
    /// `InvalidStatusTransition`. Returns the updated ticket.
    async fn advance(
        &self,
        id: TicketId,
        target: TicketStatus,
        now_millis: i64,
    ) -> Result<Ticket>;
}

/// Mock implementations for tests
pub mod mocks {
    use super::*;
    use crate::domain::DomainError;
    use tokio::sync::Mutex;

    /// Minimal in-core store for application-layer tests.
    ///
    /// Same contract as the production store, flat vector inside a mutex.
    #[derive(Default)]
    pub struct MockTicketStore {
        tickets: Mutex<Vec<Ticket>>,
    }

    impl MockTicketStore {
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl TicketRepository for MockTicketStore {
        async fn insert(&self, ticket: &Ticket) -> Result<()> {
            let mut tickets = self.tickets.lock().await;
            if tickets
                .iter()
                .any(|t| {
                    t.client_id == ticket.client_id
                        && t.company_id == ticket.company_id
                        && t.is_active()
                })
            {
                return Err(DomainError::DuplicateActiveTicket {
                    company: ticket.company_id,
                    client: ticket.client_id,
                }
                .into());
            }
            tickets.push(ticket.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: TicketId) -> Result<Option<Ticket>> {
            let tickets = self.tickets.lock().await;
            Ok(tickets.iter().find(|t| t.id == id).cloned())
        }

        async fn list_by_company(&self, company: CompanyId) -> Result<Vec<Ticket>> {
            let tickets = self.tickets.lock().await;
            Ok(tickets
                .iter()
                .filter(|t| t.company_id == company)
                .cloned()
                .collect())
        }

        async fn find_active(
            &self,
            client: ClientId,
            company: CompanyId,
        ) -> Result<Option<Ticket>> {
            let tickets = self.tickets.lock().await;
            Ok(tickets
                .iter()
                .find(|t| t.client_id == client && t.company_id == company && t.is_active())
                .cloned())
        }

        async fn advance(
            &self,
            id: TicketId,
            target: TicketStatus,
            now_millis: i64,
        ) -> Result<Ticket> {
            let mut tickets = self.tickets.lock().await;
            let ticket = tickets
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or(DomainError::TicketNotFound(id))?;
            ticket.advance(target, now_millis)?;
            Ok(ticket.clone())
        }
    }
}
