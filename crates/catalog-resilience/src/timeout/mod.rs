//! Timeout wrapper for async operations.

use catalog_core::CatalogError;
use std::future::Future;
use std::time::Duration;

/// Wraps an async operation with a timeout.
pub async fn with_timeout<F, Fut, T>(duration: Duration, f: F) -> Result<T, CatalogError>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    tokio::time::timeout(duration, f())
        .await
        .map_err(|_| CatalogError::Timeout(format!("Operation timed out after {duration:?}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_success() {
        let result =
            with_timeout(Duration::from_secs(1), || async { Ok::<_, CatalogError>(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_timeout_exceeded() {
        let result = with_timeout(Duration::from_millis(10), || async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<_, CatalogError>(42)
        })
        .await;

        assert!(matches!(result, Err(CatalogError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(1), || async {
            Err(CatalogError::cache("connection reset"))
        })
        .await;

        assert!(matches!(result, Err(CatalogError::Cache(_))));
    }
}
