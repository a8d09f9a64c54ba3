use std::time::Duration;

use tokio::time;
use tracing::info;

use crate::session::Sessions;

/// Periodically drops sessions nobody has touched for `inactive_timeout`.
pub async fn start_cleanup_task(
    sessions: Sessions,
    cleanup_interval: Duration,
    inactive_timeout: Duration,
) {
    let mut interval = time::interval(cleanup_interval);

    info!(
        "Started session cleanup task: checking every {}s, inactive timeout: {}s",
        cleanup_interval.as_secs(),
        inactive_timeout.as_secs()
    );

    loop {
        interval.tick().await;
        sessions.evict_idle(inactive_timeout);
    }
}
