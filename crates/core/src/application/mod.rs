// Application Layer - Use Cases and Business Logic

pub mod queue_engine;

// Re-exports
pub use queue_engine::{JoinRequest, QueueEngine, QueueSnapshot};
