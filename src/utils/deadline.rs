use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{PayrollError, PayrollResult};

/// Runs `operation` under `limit`. On expiry the operation is dropped, which
/// rolls back any unit of work it holds, and `Timeout` is returned.
pub async fn with_deadline<T, F>(limit: Duration, operation: F) -> PayrollResult<T>
where
    F: Future<Output = PayrollResult<T>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_ms = limit.as_millis() as u64, "request deadline exceeded");
            Err(PayrollError::Timeout)
        }
    }
}
