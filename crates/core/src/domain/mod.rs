// Domain Layer - Pure business logic and entities

pub mod error;
pub mod ordering;
pub mod ticket;

// Re-exports
pub use error::DomainError;
pub use ordering::{position_ahead, serving_order, QueueStanding};
pub use ticket::{
    ClientId, CompanyId, ServiceId, Ticket, TicketId, TicketPriority, TicketStatus,
};
