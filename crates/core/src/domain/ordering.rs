// Serving Order & Position

//! Ordering over a tenant's waiting line.
//!
//! The serving order is defined purely over tickets currently in `Waiting`:
//! preferential tickets before normal ones, arrival order (ticket id) within
//! each class. Positions are recomputed from current state on every query -
//! never cached - so any concurrent insert or status change earlier in the
//! line is reflected immediately.

use serde::{Deserialize, Serialize};

use super::ticket::{Ticket, TicketId, TicketStatus};

/// Sort key under the priority-then-arrival order.
fn queue_key(ticket: &Ticket) -> (u8, TicketId) {
    (ticket.priority.rank(), ticket.id)
}

/// The tenant's waiting line in serving order.
///
/// Input may contain tickets in any status; only `Waiting` tickets take part.
pub fn serving_order(tickets: &[Ticket]) -> Vec<Ticket> {
    let mut waiting: Vec<Ticket> = tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Waiting)
        .cloned()
        .collect();
    waiting.sort_by_key(queue_key);
    waiting
}

/// Count of waiting tickets that must be served before `ticket`.
///
/// Only meaningful for a `Waiting` ticket; callers report non-waiting
/// statuses through [`QueueStanding`] instead.
pub fn position_ahead(tickets: &[Ticket], ticket: &Ticket) -> usize {
    let key = queue_key(ticket);
    tickets
        .iter()
        .filter(|t| t.status == TicketStatus::Waiting && queue_key(t) < key)
        .count()
}

/// What a client sees when asking "where am I in line?"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "standing")]
pub enum QueueStanding {
    /// Still waiting; `ahead` tickets are served first.
    InLine { ahead: usize },
    /// Called or in service: position zero, head to the counter.
    YourTurn,
    /// Terminal ticket; excluded from all position queries.
    Completed,
}

impl QueueStanding {
    /// Standing of `ticket` relative to its tenant's line.
    ///
    /// `tickets` must already be scoped to the ticket's own tenant; position
    /// computation is meaningless across tenants.
    pub fn of(tickets: &[Ticket], ticket: &Ticket) -> Self {
        match ticket.status {
            TicketStatus::Waiting => QueueStanding::InLine {
                ahead: position_ahead(tickets, ticket),
            },
            TicketStatus::Called | TicketStatus::InService => QueueStanding::YourTurn,
            TicketStatus::Done => QueueStanding::Completed,
        }
    }
}
