// Sales Recorder Port (Interface)

use crate::domain::{ClientId, CompanyId, ServiceId};
use crate::error::Result;
use async_trait::async_trait;

/// Outbound notification to the sales/history collaborator.
///
/// Fired exactly once per ticket, on the InService -> Done transition.
/// Best-effort: the engine logs a recorder failure and keeps the completed
/// status; revenue recording never rolls back a finished service.
#[async_trait]
pub trait SalesRecorder: Send + Sync {
    async fn record_completion(
        &self,
        company: CompanyId,
        client: ClientId,
        service: ServiceId,
    ) -> Result<()>;
}

/// Mock implementations for tests
pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use tokio::sync::Mutex;

    /// Records every completion call; can be switched to always fail.
    pub struct MockSalesRecorder {
        pub calls: Mutex<Vec<(CompanyId, ClientId, ServiceId)>>,
        fail: bool,
    }

    impl MockSalesRecorder {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        /// A recorder whose every call errors, for best-effort tests.
        pub fn new_failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }
    }

    impl Default for MockSalesRecorder {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl SalesRecorder for MockSalesRecorder {
        async fn record_completion(
            &self,
            company: CompanyId,
            client: ClientId,
            service: ServiceId,
        ) -> Result<()> {
            self.calls.lock().await.push((company, client, service));
            if self.fail {
                return Err(AppError::Internal("sales collaborator unavailable".into()));
            }
            Ok(())
        }
    }
}
