//! Timeout enforcement for store calls.
//!
//! The pool's own acquire timeout only covers waiting for a connection; a
//! query that hangs on a half-open socket would otherwise block its request
//! until the HTTP layer gives up.

use std::future::Future;
use std::time::Duration;

use crate::storage::{StoreError, StoreResult};

/// Run a store call under `deadline`, mapping expiry to [`StoreError::Timeout`].
pub async fn with_deadline<F, T, E>(deadline: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = Result<T, E>>,
    StoreError: From<E>,
{
    match tokio::time::timeout(deadline, call).await {
        Ok(result) => result.map_err(StoreError::from),
        Err(_) => Err(StoreError::Timeout(deadline)),
    }
}
