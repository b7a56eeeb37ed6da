use std::sync::Arc;

use chrono::Utc;
use qr_generator::{SessionState, StartupQuery};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::services::exports::ExportRegistry;
use crate::services::sessions::SessionStore;

/// Application shared state accessible from every axum handler.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Application configuration
    config: AppConfig,
    /// Live generator sessions
    sessions: RwLock<SessionStore>,
    /// Exports currently running
    exports: RwLock<ExportRegistry>,
    /// Cancelled once on shutdown
    shutdown_token: CancellationToken,
}

impl SharedState {
    pub fn new(config: AppConfig) -> Self {
        let sessions = SessionStore::new(config.max_sessions);
        Self {
            inner: Arc::new(SharedStateInner {
                config,
                sessions: RwLock::new(sessions),
                exports: RwLock::new(ExportRegistry::default()),
                shutdown_token: CancellationToken::new(),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        self.inner.config.server_port
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown_token
    }

    pub fn exports(&self) -> &RwLock<ExportRegistry> {
        &self.inner.exports
    }

    pub fn sessions(&self) -> &RwLock<SessionStore> {
        &self.inner.sessions
    }

    /// Open a session seeded from startup query parameters.
    pub async fn open_session(&self, query: StartupQuery) -> (Uuid, SessionState) {
        let state = SessionState::seeded(&self.inner.config.session_defaults(), query);
        let (id, evicted) = self
            .inner
            .sessions
            .write()
            .await
            .insert(state.clone(), Utc::now());
        self.cancel_exports_of(&evicted).await;
        tracing::info!(session = %id, has_content = state.has_content(), "Session opened");
        (id, state)
    }

    pub async fn session(&self, id: Uuid) -> Option<SessionState> {
        self.inner.sessions.write().await.get(id, Utc::now())
    }

    /// Apply `f` to a session and return the updated snapshot.
    pub async fn update_session<F>(&self, id: Uuid, f: F) -> Option<SessionState>
    where
        F: FnOnce(&mut SessionState),
    {
        self.inner.sessions.write().await.update(id, Utc::now(), f)
    }

    /// Cancel running exports of sessions the store has dropped.
    pub async fn cancel_exports_of(&self, sessions: &[Uuid]) -> usize {
        if sessions.is_empty() {
            return 0;
        }
        let exports = self.inner.exports.read().await;
        let cancelled: usize = sessions.iter().map(|id| exports.cancel_session(*id)).sum();
        if cancelled > 0 {
            tracing::info!(sessions = sessions.len(), cancelled, "Cancelled exports of evicted sessions");
        }
        cancelled
    }

    /// Close a session and cancel its running exports.
    pub async fn close_session(&self, id: Uuid) -> bool {
        let removed = self.inner.sessions.write().await.remove(id);
        if removed {
            let cancelled = self.inner.exports.read().await.cancel_session(id);
            tracing::info!(session = %id, cancelled, "Session closed");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use qr_generator::{ExportRequest, Theme, start_export};

    use super::*;

    #[tokio::test]
    async fn open_session_uses_configured_defaults() {
        let config = AppConfig {
            default_file_name: "badge".into(),
            ..AppConfig::default()
        };
        let state = SharedState::new(config);
        let (id, session) = state.open_session(StartupQuery::default()).await;
        assert_eq!(session.file_base_name(), "badge");
        assert_eq!(state.session(id).await, Some(session));
    }

    #[tokio::test]
    async fn closed_sessions_are_gone() {
        let state = SharedState::new(AppConfig::default());
        let (id, _) = state.open_session(StartupQuery::default()).await;
        assert!(state.close_session(id).await);
        assert!(state.session(id).await.is_none());
        assert!(!state.close_session(id).await);
    }

    #[tokio::test]
    async fn capacity_eviction_cancels_exports_of_dropped_session() {
        let config = AppConfig {
            max_sessions: 1,
            ..AppConfig::default()
        };
        let state = SharedState::new(config);
        let (first, _) = state.open_session(StartupQuery::default()).await;

        let handle = start_export(
            ExportRequest::new(None, "x.png", Theme::Light),
            Duration::from_secs(10),
        );
        let control = handle.control();
        state.exports().write().await.register(first, control.clone());

        state.open_session(StartupQuery::default()).await;
        assert!(state.session(first).await.is_none());
        assert!(control.is_cancelled());
        let _ = handle.wait().await;
    }
}
