//! QueueFlow Demo - Main Entry Point
//!
//! Stands in for the session/presentation layer: wires the in-memory
//! adapters into the queue engine, seeds two tenants with their catalogs,
//! and walks both queues through a short service day.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use queueflow_core::application::{JoinRequest, QueueEngine};
use queueflow_core::domain::{QueueStanding, TicketPriority, TicketStatus};
use queueflow_core::port::{
    SequentialIdProvider, SystemTimeProvider, TicketIdProvider, TimeProvider,
};
use queueflow_infra_memory::{InMemorySalesLog, InMemoryTenantDirectory, InMemoryTicketStore};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const VIKING: u64 = 1;
const BELLA: u64 = 2;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let log_format = std::env::var("QUEUEFLOW_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("queueflow=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    info!("QueueFlow v{} starting...", VERSION);

    // 2. Setup dependencies (DI wiring)
    let clock: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);
    let ids: Arc<dyn TicketIdProvider> = Arc::new(SequentialIdProvider::starting_at(101));
    let store = Arc::new(InMemoryTicketStore::new());
    let directory = Arc::new(InMemoryTenantDirectory::new());
    let sales = Arc::new(InMemorySalesLog::new(directory.clone(), clock.clone()));

    seed_directory(&directory).await?;

    let engine = QueueEngine::new(store.clone(), directory.clone(), sales.clone(), ids, clock);

    // 3. A short service day across both tenants
    run_service_day(&engine).await?;

    // 4. Close-of-day reporting
    for company in [VIKING, BELLA] {
        let name = directory
            .company(company)
            .await
            .map(|c| c.name)
            .unwrap_or_default();
        let history = engine.history(company, 5).await?;
        let revenue = sales.total_revenue(company).await;
        info!(
            company_id = company,
            company = %name,
            served = history.len(),
            revenue_cents = revenue,
            "close of day"
        );
    }

    Ok(())
}

/// Two demo tenants and their catalogs.
async fn seed_directory(directory: &InMemoryTenantDirectory) -> Result<()> {
    directory.register_company(VIKING, "Barbearia Viking").await;
    directory
        .register_service(1, VIKING, "Corte de Cabelo", 5_000, 30)
        .await?;
    directory
        .register_service(2, VIKING, "Barba Completa", 3_500, 20)
        .await?;

    directory.register_company(BELLA, "Studio Bella").await;
    directory
        .register_service(3, BELLA, "Manicure", 4_000, 45)
        .await?;
    directory
        .register_service(4, BELLA, "Pedicure", 4_500, 50)
        .await?;
    directory
        .register_service(5, BELLA, "Corte Feminino", 12_000, 60)
        .await?;

    Ok(())
}

async fn run_service_day(engine: &QueueEngine) -> Result<()> {
    // Morning: three clients line up at the barbershop, one at the studio.
    // Client 902 has preferential priority and jumps the line.
    let carlos = engine
        .join_queue(JoinRequest {
            company_id: VIKING,
            client_id: 901,
            service_id: 1,
            priority: TicketPriority::Normal,
        })
        .await?;
    let joao = engine
        .join_queue(JoinRequest {
            company_id: VIKING,
            client_id: 902,
            service_id: 2,
            priority: TicketPriority::Preferential,
        })
        .await?;
    let pedro = engine
        .walk_in(JoinRequest {
            company_id: VIKING,
            client_id: 903,
            service_id: 1,
            priority: TicketPriority::Normal,
        })
        .await?;
    let maria = engine
        .join_queue(JoinRequest {
            company_id: BELLA,
            client_id: 904,
            service_id: 3,
            priority: TicketPriority::Normal,
        })
        .await?;

    for ticket in [&carlos, &joao, &pedro, &maria] {
        let standing = engine.standing_of(ticket.id).await?;
        info!(ticket_id = ticket.id, standing = ?standing, "standing after morning rush");
    }

    // A second join from a client already in line is rejected
    match engine
        .join_queue(JoinRequest {
            company_id: VIKING,
            client_id: 901,
            service_id: 2,
            priority: TicketPriority::Normal,
        })
        .await
    {
        Err(e) => info!(rejected = %e, "duplicate join attempt"),
        Ok(t) => info!(ticket_id = t.id, "second ticket unexpectedly accepted"),
    }

    // Staff pulls the line: preferential first, granular path for one,
    // the "call now" shortcut for the rest.
    engine.advance_ticket(joao.id, TicketStatus::Called).await?;
    engine.advance_ticket(joao.id, TicketStatus::InService).await?;
    engine.advance_ticket(joao.id, TicketStatus::Done).await?;

    engine.advance_ticket(carlos.id, TicketStatus::InService).await?;
    engine.advance_ticket(carlos.id, TicketStatus::Done).await?;

    if let QueueStanding::InLine { ahead } = engine.standing_of(pedro.id).await? {
        info!(ticket_id = pedro.id, ahead, "line drained ahead of last client");
    }

    engine.advance_ticket(pedro.id, TicketStatus::InService).await?;
    engine.advance_ticket(pedro.id, TicketStatus::Done).await?;

    engine.advance_ticket(maria.id, TicketStatus::InService).await?;
    engine.advance_ticket(maria.id, TicketStatus::Done).await?;

    let snapshot = engine.queue_view(VIKING).await?;
    info!(
        waiting = snapshot.waiting_count,
        in_service = snapshot.in_service_count,
        "barbershop queue after the day"
    );

    Ok(())
}
