//! Background task loops: idle session sweeping.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::app::SharedState;

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

async fn sleep_or_cancel(token: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        _ = token.cancelled() => true,
        _ = sleep(duration) => false,
    }
}

/// Periodically discard sessions that have been idle for too long.
pub async fn session_sweep_loop(state: SharedState) {
    let shutdown_token = state.shutdown_token().clone();
    let max_idle =
        TimeDelta::from_std(state.config().session_idle()).unwrap_or_else(|_| TimeDelta::weeks(1));

    loop {
        if sleep_or_cancel(&shutdown_token, SWEEP_INTERVAL).await {
            tracing::info!("Session sweep loop stopped (shutdown)");
            return;
        }

        sweep_idle_sessions(&state, max_idle, Utc::now()).await;
    }
}

/// One sweep pass. Evicted sessions get their running exports cancelled.
async fn sweep_idle_sessions(state: &SharedState, max_idle: TimeDelta, now: DateTime<Utc>) -> usize {
    let (evicted, remaining) = {
        let mut sessions = state.sessions().write().await;
        let evicted = sessions.evict_idle(max_idle, now);
        (evicted, sessions.len())
    };
    if !evicted.is_empty() {
        let cancelled = state.cancel_exports_of(&evicted).await;
        tracing::info!(evicted = evicted.len(), remaining, cancelled, "Swept idle sessions");
    }
    evicted.len()
}

#[cfg(test)]
mod tests {
    use qr_generator::{ExportRequest, StartupQuery, Theme, start_export};

    use super::*;

    #[tokio::test]
    async fn sleep_or_cancel_returns_true_when_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(sleep_or_cancel(&token, Duration::from_secs(3600)).await);
    }

    #[tokio::test]
    async fn sweep_loop_exits_on_shutdown() {
        let state = SharedState::new(crate::config::AppConfig::default());
        state.shutdown_token().cancel();
        tokio::time::timeout(Duration::from_secs(1), session_sweep_loop(state))
            .await
            .expect("loop should stop once shutdown is requested");
    }

    #[tokio::test]
    async fn sweep_cancels_exports_of_idle_sessions() {
        let state = SharedState::new(crate::config::AppConfig::default());
        let (id, _) = state.open_session(StartupQuery::default()).await;
        let handle = start_export(
            ExportRequest::new(None, "x.png", Theme::Light),
            Duration::from_secs(10),
        );
        let control = handle.control();
        state.exports().write().await.register(id, control.clone());

        let later = Utc::now() + TimeDelta::hours(2);
        let evicted = sweep_idle_sessions(&state, TimeDelta::minutes(60), later).await;

        assert_eq!(evicted, 1);
        assert!(state.session(id).await.is_none());
        assert!(control.is_cancelled());
        let _ = handle.wait().await;
    }
}
