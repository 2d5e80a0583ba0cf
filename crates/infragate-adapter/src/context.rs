//! Per-request execution context.

use std::time::Duration;

use infragate_core::error::{InfraError, InfraResult};
use tokio::time::{Instant, timeout_at};
use uuid::Uuid;

/// Tenant and deadline carried by every request.
///
/// Cancellation is dropping the request future; an expired deadline
/// abandons the outstanding backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant_id: Uuid,
    pub deadline: Option<Instant>,
}

impl RequestContext {
    pub fn new(tenant_id: Uuid) -> Self {
        Self {
            tenant_id,
            deadline: None,
        }
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Run one backend call under the request deadline, or under
    /// `fallback` from now when the request has none.
    pub async fn call<T, F>(
        &self,
        operation: &'static str,
        fallback: Duration,
        call: F,
    ) -> InfraResult<T>
    where
        F: Future<Output = InfraResult<T>>,
    {
        let deadline = self.deadline.unwrap_or_else(|| Instant::now() + fallback);
        timeout_at(deadline, call).await.map_err(|_| {
            InfraError::Backend(format!("deadline exceeded while waiting for {operation}"))
        })?
    }
}
