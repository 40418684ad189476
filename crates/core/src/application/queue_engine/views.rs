// Tenant-Scoped Query API

//! Read models over the ticket store.
//!
//! Every query filters strictly by tenant; leaking another tenant's tickets
//! through any of these is a correctness violation, because position
//! computation is meaningless across tenants. Positions are recomputed from
//! current state on every call.

use serde::{Deserialize, Serialize};

use crate::domain::{
    self, ClientId, CompanyId, DomainError, QueueStanding, Ticket, TicketId, TicketStatus,
};
use crate::error::Result;
use crate::port::TicketRepository;

/// One consistent snapshot of a tenant's queue, for the staff dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    /// Waiting tickets in serving order.
    pub waiting: Vec<Ticket>,
    /// Tickets currently at the counter (Called or InService).
    pub in_service: Vec<Ticket>,
    pub waiting_count: usize,
    pub in_service_count: usize,
}

pub async fn waiting_list(tickets: &dyn TicketRepository, company: CompanyId) -> Result<Vec<Ticket>> {
    let all = tickets.list_by_company(company).await?;
    Ok(domain::serving_order(&all))
}

pub async fn in_service_list(
    tickets: &dyn TicketRepository,
    company: CompanyId,
) -> Result<Vec<Ticket>> {
    let mut in_service: Vec<Ticket> = tickets
        .list_by_company(company)
        .await?
        .into_iter()
        .filter(|t| t.status == TicketStatus::InService)
        .collect();
    in_service.sort_by_key(|t| t.id);
    Ok(in_service)
}

/// Most-recent-first terminal tickets, at most `limit`.
pub async fn history(
    tickets: &dyn TicketRepository,
    company: CompanyId,
    limit: usize,
) -> Result<Vec<Ticket>> {
    let mut done: Vec<Ticket> = tickets
        .list_by_company(company)
        .await?
        .into_iter()
        .filter(|t| t.status == TicketStatus::Done)
        .collect();
    // Two tickets can finish in the same millisecond; id breaks the tie
    done.sort_by_key(|t| (std::cmp::Reverse(t.finished_at), std::cmp::Reverse(t.id)));
    done.truncate(limit);
    Ok(done)
}

pub async fn ticket_for(
    tickets: &dyn TicketRepository,
    client: ClientId,
    company: CompanyId,
) -> Result<Option<Ticket>> {
    tickets.find_active(client, company).await
}

/// Where the ticket stands in its tenant's line right now.
pub async fn standing_of(tickets: &dyn TicketRepository, id: TicketId) -> Result<QueueStanding> {
    let ticket = tickets
        .find_by_id(id)
        .await?
        .ok_or(DomainError::TicketNotFound(id))?;
    let line = tickets.list_by_company(ticket.company_id).await?;
    // Judge the ticket as it appears in the same listing, so standing and
    // line come from one snapshot
    let current = line.iter().find(|t| t.id == id).unwrap_or(&ticket);
    Ok(QueueStanding::of(&line, current))
}

pub async fn queue_view(
    tickets: &dyn TicketRepository,
    company: CompanyId,
) -> Result<QueueSnapshot> {
    // One store read; both lists come from the same consistent snapshot
    let all = tickets.list_by_company(company).await?;
    let waiting = domain::serving_order(&all);
    let mut in_service: Vec<Ticket> = all
        .into_iter()
        .filter(|t| matches!(t.status, TicketStatus::Called | TicketStatus::InService))
        .collect();
    in_service.sort_by_key(|t| t.id);

    Ok(QueueSnapshot {
        waiting_count: waiting.len(),
        in_service_count: in_service.len(),
        waiting,
        in_service,
    })
}
