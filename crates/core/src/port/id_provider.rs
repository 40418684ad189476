// Ticket ID Provider Port

use crate::domain::TicketId;

/// Ticket id allocator.
///
/// Ids must be monotonically increasing per engine instance: the ordering
/// algorithm uses the id as its arrival-order key, so ids form a total,
/// collision-free order. Random ids would break that.
pub trait TicketIdProvider: Send + Sync {
    /// Allocate the next ticket id. Never returns the same id twice.
    fn next_id(&self) -> TicketId;
}

/// Monotonic counter provider (production)
pub struct SequentialIdProvider {
    next: std::sync::atomic::AtomicU64,
}

impl SequentialIdProvider {
    /// Start allocating at `first` (useful to continue a known sequence).
    pub fn starting_at(first: TicketId) -> Self {
        Self {
            next: std::sync::atomic::AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdProvider {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl TicketIdProvider for SequentialIdProvider {
    fn next_id(&self) -> TicketId {
        self.next.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_monotonic() {
        let provider = SequentialIdProvider::starting_at(100);
        let ids: Vec<_> = (0..5).map(|_| provider.next_id()).collect();
        assert_eq!(ids, vec![100, 101, 102, 103, 104]);
    }
}
