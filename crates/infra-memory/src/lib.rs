// QueueFlow Infrastructure - In-Memory Adapters
// Implements: TicketRepository, TenantDirectory, SalesRecorder

mod sales_log;
mod tenant_directory;
mod ticket_store;

pub use sales_log::{InMemorySalesLog, Sale};
pub use tenant_directory::{Company, CompanyStatus, InMemoryTenantDirectory, ServiceOffering};
pub use ticket_store::InMemoryTicketStore;
