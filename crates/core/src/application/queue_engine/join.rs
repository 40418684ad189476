// Join Queue Use Case

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::{ClientId, CompanyId, DomainError, ServiceId, Ticket, TicketPriority};
use crate::error::Result;
use crate::port::{TenantDirectory, TicketIdProvider, TicketRepository, TimeProvider};

/// Join request, shared by remote joins and staff walk-ins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRequest {
    pub company_id: CompanyId,
    pub client_id: ClientId,
    pub service_id: ServiceId,

    #[serde(default)]
    pub priority: TicketPriority,
}

/// Execute the join use case.
///
/// Validates the tenant and service against the directory, then appends a
/// Waiting ticket with a freshly allocated id. The duplicate-active check is
/// the store's, made atomically with the insert.
pub async fn execute(
    tickets: &dyn TicketRepository,
    directory: &dyn TenantDirectory,
    ids: &dyn TicketIdProvider,
    clock: &dyn TimeProvider,
    req: JoinRequest,
) -> Result<Ticket> {
    if !directory.tenant_exists(req.company_id).await? {
        debug!(company_id = req.company_id, "join rejected: unknown tenant");
        return Err(DomainError::UnknownTenant(req.company_id).into());
    }

    if !directory.service_exists(req.company_id, req.service_id).await? {
        debug!(
            company_id = req.company_id,
            service_id = req.service_id,
            "join rejected: unknown service"
        );
        return Err(DomainError::UnknownService {
            company: req.company_id,
            service: req.service_id,
        }
        .into());
    }

    let ticket = Ticket::new(
        ids.next_id(),
        clock.now_millis(),
        req.company_id,
        req.client_id,
        req.service_id,
        req.priority,
    );

    tickets.insert(&ticket).await?;

    info!(
        ticket_id = ticket.id,
        company_id = ticket.company_id,
        client_id = ticket.client_id,
        priority = %ticket.priority,
        "ticket joined the queue"
    );

    Ok(ticket)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TicketStatus;
    use crate::port::id_provider::SequentialIdProvider;
    use crate::port::tenant_directory::mocks::MockTenantDirectory;
    use crate::port::ticket_repository::mocks::MockTicketStore;
    use crate::port::time_provider::mocks::MockTimeProvider;

    fn deps() -> (MockTicketStore, MockTenantDirectory, SequentialIdProvider, MockTimeProvider)
    {
        (
            MockTicketStore::new(),
            MockTenantDirectory::new([1, 2], [(1, 1), (1, 2), (2, 99)]),
            SequentialIdProvider::starting_at(101),
            MockTimeProvider::new(1_000, 1_000),
        )
    }

    fn request(company: CompanyId, client: ClientId, service: ServiceId) -> JoinRequest {
        JoinRequest {
            company_id: company,
            client_id: client,
            service_id: service,
            priority: TicketPriority::Normal,
        }
    }

    #[tokio::test]
    async fn test_join_creates_waiting_ticket() {
        let (store, directory, ids, clock) = deps();

        let ticket = execute(&store, &directory, &ids, &clock, request(1, 901, 1))
            .await
            .unwrap();

        assert_eq!(ticket.id, 101);
        assert_eq!(ticket.status, TicketStatus::Waiting);
        assert_eq!(ticket.created_at, 1_000);

        let stored = store.find_by_id(101).await.unwrap().unwrap();
        assert_eq!(stored.company_id, 1);
        assert_eq!(stored.client_id, 901);
    }

    #[tokio::test]
    async fn test_unknown_tenant_rejected() {
        let (store, directory, ids, clock) = deps();

        let err = execute(&store, &directory, &ids, &clock, request(7, 901, 1))
            .await
            .unwrap_err();
        assert_eq!(err.as_domain(), Some(&DomainError::UnknownTenant(7)));

        // Nothing was appended
        assert!(store.list_by_company(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_of_other_tenant_rejected() {
        let (store, directory, ids, clock) = deps();

        // Service 99 exists, but belongs to company 2
        let err = execute(&store, &directory, &ids, &clock, request(1, 905, 99))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::UnknownService {
                company: 1,
                service: 99,
            })
        );
    }

    #[tokio::test]
    async fn test_duplicate_active_ticket_rejected() {
        let (store, directory, ids, clock) = deps();

        execute(&store, &directory, &ids, &clock, request(1, 901, 1))
            .await
            .unwrap();

        let err = execute(&store, &directory, &ids, &clock, request(1, 901, 2))
            .await
            .unwrap_err();
        assert_eq!(
            err.as_domain(),
            Some(&DomainError::DuplicateActiveTicket {
                company: 1,
                client: 901,
            })
        );

        // A ticket at a different company is fine
        execute(&store, &directory, &ids, &clock, request(2, 901, 99))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ids_follow_arrival_order() {
        let (store, directory, ids, clock) = deps();

        let a = execute(&store, &directory, &ids, &clock, request(1, 901, 1))
            .await
            .unwrap();
        let b = execute(&store, &directory, &ids, &clock, request(1, 902, 1))
            .await
            .unwrap();
        assert!(a.id < b.id);
        assert!(a.created_at <= b.created_at);
    }
}
