use std::future::Future;
use std::time::Duration;

use tokio::time::{timeout_at, Instant};

use crate::store::{StoreError, StoreResult};

/// Per-call execution context carrying an optional deadline.
///
/// Every gateway operation runs its store round-trip through [`OperationContext::run`].
/// When the deadline passes the in-flight store future is dropped, which aborts
/// the driver operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperationContext {
    deadline: Option<Instant>,
}

impl OperationContext {
    /// Context without a deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| d <= Instant::now())
    }

    /// Start `operation` unless the deadline already passed, then bound it by the
    /// remaining time.
    pub async fn run<F, Fut, T>(&self, operation: F) -> StoreResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = StoreResult<T>>,
    {
        if self.is_expired() {
            return Err(StoreError::DeadlineExceeded);
        }
        let operation = operation();

        match self.deadline {
            Some(deadline) => timeout_at(deadline, operation)
                .await
                .map_err(|_| StoreError::DeadlineExceeded)?,
            None => operation.await,
        }
    }
}
