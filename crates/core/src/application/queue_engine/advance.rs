// Advance Ticket Use Case

use tracing::{info, warn};

use crate::domain::{Ticket, TicketId, TicketStatus};
use crate::error::Result;
use crate::port::{SalesRecorder, TicketRepository, TimeProvider};

/// Execute the advance use case.
///
/// The transition itself is a single atomic store operation; the sales
/// collaborator is notified afterwards, outside the store's critical
/// section, and only when the ticket reached Done. A recorder failure is
/// logged and swallowed - the completed status stands.
pub async fn execute(
    tickets: &dyn TicketRepository,
    sales: &dyn SalesRecorder,
    clock: &dyn TimeProvider,
    id: TicketId,
    target: TicketStatus,
) -> Result<Ticket> {
    let ticket = tickets.advance(id, target, clock.now_millis()).await?;

    info!(
        ticket_id = ticket.id,
        company_id = ticket.company_id,
        status = %ticket.status,
        "ticket advanced"
    );

    if ticket.status == TicketStatus::Done {
        if let Err(e) = sales
            .record_completion(ticket.company_id, ticket.client_id, ticket.service_id)
            .await
        {
            warn!(
                ticket_id = ticket.id,
                company_id = ticket.company_id,
                error = %e,
                "completion not recorded by sales collaborator"
            );
        }
    }

    Ok(ticket)
}
