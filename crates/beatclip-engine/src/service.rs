//! Assembly service: bounded, off-thread request execution.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::info;

use beatclip_models::AssemblyRequest;

use crate::assembler::Assembler;
use crate::config::EngineConfig;
use crate::error::{AssemblyError, AssemblyResult};

/// Runs assembly requests on the runtime without blocking the caller.
///
/// A semaphore bounds concurrent requests; permits are held for the whole
/// request so an interactive front end can keep servicing other traffic
/// while a montage renders. Requests share no mutable state.
pub struct AssemblyService {
    assembler: Arc<Assembler>,
    semaphore: Arc<Semaphore>,
}

impl AssemblyService {
    /// Create a service from engine configuration.
    pub fn new(config: EngineConfig) -> Self {
        let max = config.max_concurrent_requests.max(1);
        Self {
            assembler: Arc::new(Assembler::new(config)),
            semaphore: Arc::new(Semaphore::new(max)),
        }
    }

    /// Create a service around an existing assembler.
    pub fn with_assembler(assembler: Assembler) -> Self {
        let max = assembler.config().max_concurrent_requests.max(1);
        Self {
            assembler: Arc::new(assembler),
            semaphore: Arc::new(Semaphore::new(max)),
        }
    }

    /// The engine configuration the service runs with.
    pub fn config(&self) -> &EngineConfig {
        self.assembler.config()
    }

    /// Execute one assembly request to completion.
    ///
    /// The work is spawned onto the runtime and awaited, so a caller
    /// holding other concurrent conversations stays responsive. Once a
    /// request is launched it runs to success or terminal failure; there
    /// is no mid-run cancellation.
    pub async fn request_assembly(&self, request: AssemblyRequest) -> AssemblyResult<PathBuf> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AssemblyError::internal("service shut down"))?;

        info!(request_id = %request.id, "Assembly request accepted");

        let assembler = Arc::clone(&self.assembler);
        let handle = tokio::spawn(async move {
            let _permit = permit;
            assembler.assemble(&request).await
        });

        handle
            .await
            .map_err(|e| AssemblyError::internal(format!("assembly task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beatclip_models::VideoPool;

    #[tokio::test]
    async fn test_service_reports_no_usable_clips() {
        let service = AssemblyService::new(EngineConfig::default());
        let request =
            AssemblyRequest::new("missing.mp3", "Video", VideoPool::default(), 15.0);
        let err = service.request_assembly(request).await.unwrap_err();
        assert!(err.is_no_usable_clips());
    }

    #[tokio::test]
    async fn test_service_concurrency_floor() {
        // A zero from the environment must not wedge the semaphore
        let config = EngineConfig {
            max_concurrent_requests: 0,
            ..Default::default()
        };
        let service = AssemblyService::new(config);
        let request =
            AssemblyRequest::new("missing.mp3", "Video", VideoPool::default(), 15.0);
        // Still serviced (and still fails on the empty pool, not a hang)
        assert!(service.request_assembly(request).await.is_err());
    }
}
