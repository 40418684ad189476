// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod sales_recorder;
pub mod tenant_directory;
pub mod ticket_repository;
pub mod time_provider;

// Re-exports
pub use id_provider::{SequentialIdProvider, TicketIdProvider};
pub use sales_recorder::SalesRecorder;
pub use tenant_directory::TenantDirectory;
pub use ticket_repository::TicketRepository;
pub use time_provider::{SystemTimeProvider, TimeProvider};
