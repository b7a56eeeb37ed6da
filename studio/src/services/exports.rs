//! Registry of in-flight exports, addressable by id for listing and cancel.

use std::collections::HashMap;

use qr_generator::{ExportControl, ExportPhase};
use serde::Serialize;
use uuid::Uuid;

/// Public view of a running export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSummary {
    pub id: Uuid,
    pub session_id: Uuid,
    pub file_name: String,
    pub phase: ExportPhase,
}

#[derive(Debug, Default)]
pub struct ExportRegistry {
    running: HashMap<Uuid, (Uuid, ExportControl)>,
}

impl ExportRegistry {
    pub fn register(&mut self, session_id: Uuid, control: ExportControl) {
        self.running.insert(control.id(), (session_id, control));
    }

    pub fn finish(&mut self, id: Uuid) {
        self.running.remove(&id);
    }

    /// Request cancellation. Returns `false` for unknown ids.
    pub fn cancel(&self, id: Uuid) -> bool {
        match self.running.get(&id) {
            Some((_, control)) => {
                control.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every export started from `session_id`.
    pub fn cancel_session(&self, session_id: Uuid) -> usize {
        let mut cancelled = 0;
        for (sid, control) in self.running.values() {
            if *sid == session_id {
                control.cancel();
                cancelled += 1;
            }
        }
        cancelled
    }

    pub fn cancel_all(&self) {
        for (_, control) in self.running.values() {
            control.cancel();
        }
    }

    pub fn list(&self) -> Vec<ExportSummary> {
        let mut out: Vec<_> = self
            .running
            .values()
            .map(|(session_id, control)| ExportSummary {
                id: control.id(),
                session_id: *session_id,
                file_name: control.file_name().to_string(),
                phase: control.phase(),
            })
            .collect();
        out.sort_by_key(|s| s.id);
        out
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use qr_generator::{ExportRequest, Theme, render_graphic, start_export};

    use super::*;

    fn handle() -> qr_generator::ExportHandle {
        let graphic = render_graphic("registry", Theme::Light).unwrap();
        start_export(
            ExportRequest::new(graphic, "r.png", Theme::Light),
            Duration::from_secs(10),
        )
    }

    #[tokio::test]
    async fn registered_exports_are_listed_until_finished() {
        let mut registry = ExportRegistry::default();
        let session = Uuid::new_v4();
        let h = handle();
        registry.register(session, h.control());

        let listed = registry.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].session_id, session);
        assert_eq!(listed[0].file_name, "r.png");

        registry.finish(h.id());
        assert!(registry.list().is_empty());
        let _ = h.wait().await;
    }

    #[tokio::test]
    async fn cancel_reaches_the_running_export() {
        let mut registry = ExportRegistry::default();
        let h = handle();
        let control = h.control();
        registry.register(Uuid::new_v4(), h.control());

        assert!(registry.cancel(h.id()));
        assert!(control.is_cancelled());
        assert!(!registry.cancel(Uuid::new_v4()));
        let _ = h.wait().await;
    }

    #[tokio::test]
    async fn cancel_session_only_touches_that_session() {
        let mut registry = ExportRegistry::default();
        let (mine, other) = (Uuid::new_v4(), Uuid::new_v4());
        let (a, b) = (handle(), handle());
        registry.register(mine, a.control());
        registry.register(other, b.control());

        assert_eq!(registry.cancel_session(mine), 1);
        assert!(a.control().is_cancelled());
        assert!(!b.control().is_cancelled());
        let _ = (a.wait().await, b.wait().await);
    }
}
