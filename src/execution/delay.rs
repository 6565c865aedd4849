//! Suspend-and-resume primitive used by the polling loops

use std::time::Duration;

/// Sleep for `duration`, then hand back `value`
pub async fn delay<T>(duration: Duration, value: T) -> T {
    tokio::time::sleep(duration).await;
    value
}
