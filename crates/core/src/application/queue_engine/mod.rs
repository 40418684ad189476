// Queue Engine - Core use cases for ticket lifecycle and tenant-scoped views

pub mod advance;
pub mod join;
pub mod views;

pub use join::JoinRequest;
pub use views::QueueSnapshot;

use std::sync::Arc;

use crate::domain::{
    ClientId, CompanyId, QueueStanding, Ticket, TicketId, TicketStatus,
};
use crate::error::Result;
use crate::port::{SalesRecorder, TenantDirectory, TicketIdProvider, TicketRepository, TimeProvider};

/// Queue Engine service.
///
/// Owns the ticket lifecycle: creation, status transitions, and every
/// tenant-scoped read. Presentation relays intents here and renders the
/// returned values; the engine never reaches back into presentation.
pub struct QueueEngine {
    tickets: Arc<dyn TicketRepository>,
    directory: Arc<dyn TenantDirectory>,
    sales: Arc<dyn SalesRecorder>,
    ids: Arc<dyn TicketIdProvider>,
    clock: Arc<dyn TimeProvider>,
}

impl QueueEngine {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        directory: Arc<dyn TenantDirectory>,
        sales: Arc<dyn SalesRecorder>,
        ids: Arc<dyn TicketIdProvider>,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            tickets,
            directory,
            sales,
            ids,
            clock,
        }
    }

    /// Client self-service: take a number remotely.
    pub async fn join_queue(&self, req: JoinRequest) -> Result<Ticket> {
        join::execute(
            self.tickets.as_ref(),
            self.directory.as_ref(),
            self.ids.as_ref(),
            self.clock.as_ref(),
            req,
        )
        .await
    }

    /// Staff intent: enqueue a physically present client.
    ///
    /// Same lifecycle as a remote join; the distinction only matters to the
    /// caller's audit trail.
    pub async fn walk_in(&self, req: JoinRequest) -> Result<Ticket> {
        tracing::info!(
            company_id = req.company_id,
            client_id = req.client_id,
            "walk-in ticket requested by staff"
        );
        self.join_queue(req).await
    }

    /// Staff intent: move a ticket along the status state machine.
    pub async fn advance_ticket(&self, id: TicketId, target: TicketStatus) -> Result<Ticket> {
        advance::execute(
            self.tickets.as_ref(),
            self.sales.as_ref(),
            self.clock.as_ref(),
            id,
            target,
        )
        .await
    }

    /// The tenant's waiting line, in serving order.
    pub async fn waiting_list(&self, company: CompanyId) -> Result<Vec<Ticket>> {
        views::waiting_list(self.tickets.as_ref(), company).await
    }

    /// Tickets currently being served at the tenant.
    pub async fn in_service_list(&self, company: CompanyId) -> Result<Vec<Ticket>> {
        views::in_service_list(self.tickets.as_ref(), company).await
    }

    /// Most-recent-first terminal tickets, at most `limit`.
    pub async fn history(&self, company: CompanyId, limit: usize) -> Result<Vec<Ticket>> {
        views::history(self.tickets.as_ref(), company, limit).await
    }

    /// The caller's own active ticket at the tenant, or none.
    pub async fn ticket_for(
        &self,
        client: ClientId,
        company: CompanyId,
    ) -> Result<Option<Ticket>> {
        views::ticket_for(self.tickets.as_ref(), client, company).await
    }

    /// Where a ticket stands in its tenant's line right now.
    pub async fn standing_of(&self, id: TicketId) -> Result<QueueStanding> {
        views::standing_of(self.tickets.as_ref(), id).await
    }

    /// The staff dashboard read model: ordered waiting line, in-service
    /// list, and counts, in one consistent snapshot.
    pub async fn queue_view(&self, company: CompanyId) -> Result<QueueSnapshot> {
        views::queue_view(self.tickets.as_ref(), company).await
    }
}
