// Ticket Domain Model

use serde::{Deserialize, Serialize};

use super::error::{DomainError, Result};

/// Ticket ID. Allocated from a monotonic counter, so the numeric order of
/// ids is the arrival order. Never reused.
pub type TicketId = u64;

/// Owning tenant (company) identifier
pub type CompanyId = u64;

/// Requesting client identifier
pub type ClientId = u64;

/// Reference into a tenant's service catalog
pub type ServiceId = u64;

/// Ticket status state machine:
/// Waiting -> Called -> InService -> Done, with Waiting -> InService as the
/// staff "call now" shortcut. Done is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Waiting,
    Called,
    InService,
    Done,
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Waiting => write!(f, "WAITING"),
            TicketStatus::Called => write!(f, "CALLED"),
            TicketStatus::InService => write!(f, "IN_SERVICE"),
            TicketStatus::Done => write!(f, "DONE"),
        }
    }
}

/// Queue priority. Preferential tickets are served before normal ones
/// regardless of arrival time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketPriority {
    #[default]
    Normal,
    Preferential,
}

impl TicketPriority {
    /// Sort rank within a tenant's waiting line (lower serves first).
    pub fn rank(self) -> u8 {
        match self {
            TicketPriority::Preferential => 0,
            TicketPriority::Normal => 1,
        }
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketPriority::Normal => write!(f, "NORMAL"),
            TicketPriority::Preferential => write!(f, "PREFERENTIAL"),
        }
    }
}

/// Ticket Entity - one client's position in a tenant's service queue.
///
/// Everything except `status` and the lifecycle timestamps is immutable
/// after creation. Terminal tickets are never deleted; they remain as
/// append-only history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub company_id: CompanyId,
    pub client_id: ClientId,
    pub service_id: ServiceId,

    pub status: TicketStatus,
    pub priority: TicketPriority,

    pub created_at: i64, // epoch ms
    pub called_at: Option<i64>,
    pub started_at: Option<i64>,
    pub finished_at: Option<i64>,
}

impl Ticket {
    /// Create a new Waiting ticket.
    ///
    /// # Arguments
    ///
    /// * `id` - Unique ticket ID (injected, not generated)
    /// * `created_at` - Creation timestamp in epoch ms (injected, not system time)
    pub fn new(
        id: TicketId,
        created_at: i64,
        company_id: CompanyId,
        client_id: ClientId,
        service_id: ServiceId,
        priority: TicketPriority,
    ) -> Self {
        Self {
            id,
            company_id,
            client_id,
            service_id,
            status: TicketStatus::Waiting,
            priority,
            created_at,
            called_at: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Whether the ticket still occupies a place in the live queue.
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Done is the only terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status == TicketStatus::Done
    }

    /// Advance the ticket to `target` with explicit timestamp.
    ///
    /// Legal edges: Waiting -> Called, Waiting -> InService (shortcut),
    /// Called -> InService, InService -> Done. Everything else, including
    /// self-transitions, is rejected and leaves the ticket untouched.
    pub fn advance(&mut self, target: TicketStatus, now_millis: i64) -> Result<()> {
        use TicketStatus::*;

        match (self.status, target) {
            (Waiting, Called) => {
                self.status = Called;
                self.called_at = Some(now_millis);
            }
            (Waiting, InService) | (Called, InService) => {
                self.status = InService;
                self.started_at = Some(now_millis);
            }
            (InService, Done) => {
                self.status = Done;
                self.finished_at = Some(now_millis);
            }
            (from, to) => {
                return Err(DomainError::InvalidStatusTransition {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: TicketId) -> Ticket {
        Ticket::new(id, 1_000, 1, 901, 1, TicketPriority::Normal)
    }

    #[test]
    fn test_new_ticket_is_waiting() {
        let t = ticket(1);
        assert_eq!(t.status, TicketStatus::Waiting);
        assert!(t.is_active());
        assert!(t.called_at.is_none());
        assert!(t.started_at.is_none());
        assert!(t.finished_at.is_none());
    }

    #[test]
    fn test_granular_lifecycle() {
        let mut t = ticket(1);

        assert!(t.advance(TicketStatus::Called, 2_000).is_ok());
        assert_eq!(t.status, TicketStatus::Called);
        assert_eq!(t.called_at, Some(2_000));

        assert!(t.advance(TicketStatus::InService, 3_000).is_ok());
        assert_eq!(t.status, TicketStatus::InService);
        assert_eq!(t.started_at, Some(3_000));

        assert!(t.advance(TicketStatus::Done, 4_000).is_ok());
        assert_eq!(t.status, TicketStatus::Done);
        assert_eq!(t.finished_at, Some(4_000));
        assert!(t.is_terminal());
    }

    #[test]
    fn test_call_now_shortcut() {
        let mut t = ticket(1);

        // Waiting -> InService skips Called entirely
        assert!(t.advance(TicketStatus::InService, 2_000).is_ok());
        assert_eq!(t.status, TicketStatus::InService);
        assert!(t.called_at.is_none());
        assert_eq!(t.started_at, Some(2_000));
    }

    #[test]
    fn test_waiting_to_done_rejected() {
        let mut t = ticket(1);

        let err = t.advance(TicketStatus::Done, 2_000).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidStatusTransition {
                from: "WAITING".to_string(),
                to: "DONE".to_string(),
            }
        );
        // Rejected transition leaves the ticket untouched
        assert_eq!(t.status, TicketStatus::Waiting);
        assert!(t.finished_at.is_none());
    }

    #[test]
    fn test_self_transition_rejected() {
        let mut t = ticket(1);
        assert!(t.advance(TicketStatus::Waiting, 2_000).is_err());

        t.advance(TicketStatus::InService, 3_000).unwrap();
        assert!(t.advance(TicketStatus::InService, 4_000).is_err());
    }

    #[test]
    fn test_no_backward_transitions() {
        let mut t = ticket(1);
        t.advance(TicketStatus::Called, 2_000).unwrap();

        assert!(t.advance(TicketStatus::Waiting, 3_000).is_err());

        t.advance(TicketStatus::InService, 3_000).unwrap();
        assert!(t.advance(TicketStatus::Called, 4_000).is_err());
    }

    #[test]
    fn test_done_is_terminal() {
        let mut t = ticket(1);
        t.advance(TicketStatus::InService, 2_000).unwrap();
        t.advance(TicketStatus::Done, 3_000).unwrap();

        for target in [
            TicketStatus::Waiting,
            TicketStatus::Called,
            TicketStatus::InService,
            TicketStatus::Done,
        ] {
            assert!(t.advance(target, 4_000).is_err());
        }
        assert_eq!(t.finished_at, Some(3_000));
    }

    #[test]
    fn test_ticket_serialization() {
        let t = ticket(42);
        let json = serde_json::to_string(&t).expect("serialize");
        assert!(json.contains("\"WAITING\""));

        let back: Ticket = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.id, t.id);
        assert_eq!(back.status, t.status);
        assert_eq!(back.priority, t.priority);
    }
}
