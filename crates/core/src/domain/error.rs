// Domain Error Types

use thiserror::Error;

use super::ticket::{ClientId, CompanyId, ServiceId, TicketId};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid ticket status transition: {from} -> {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Ticket not found: {0}")]
    TicketNotFound(TicketId),

    #[error("Unknown tenant: {0}")]
    UnknownTenant(CompanyId),

    #[error("Unknown service {service} for tenant {company}")]
    UnknownService {
        company: CompanyId,
        service: ServiceId,
    },

    #[error("Client {client} already holds an active ticket at tenant {company}")]
    DuplicateActiveTicket {
        company: CompanyId,
        client: ClientId,
    },
}

pub type Result<T> = std::result::Result<T, DomainError>;
