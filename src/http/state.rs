use crate::call::CallOrchestrator;
use crate::catalog::UseCaseCatalog;
use crate::session::OperatorSession;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::info;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Open operator sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<OperatorSession>>>>,

    /// Use cases loaded at startup
    pub catalog: Arc<UseCaseCatalog>,

    /// Upstream call placement and transcript retrieval
    pub orchestrator: Arc<CallOrchestrator>,
}

impl AppState {
    pub fn new(catalog: UseCaseCatalog, orchestrator: CallOrchestrator) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            catalog: Arc::new(catalog),
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Look up an operator session and mark it active
    pub async fn session(&self, session_id: &str) -> Option<Arc<OperatorSession>> {
        let session = self.sessions.read().await.get(session_id).cloned()?;
        session.touch().await;
        Some(session)
    }

    /// Drop sessions idle for longer than `idle_timeout`; returns how many
    pub async fn evict_idle(&self, idle_timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().await;

        let mut expired = Vec::new();
        for (id, session) in sessions.iter() {
            if session.is_idle(idle_timeout).await {
                expired.push(id.clone());
            }
        }

        for id in &expired {
            sessions.remove(id);
            info!("Expired idle operator session: {}", id);
        }

        expired.len()
    }

    /// Sweep idle sessions every `every` until `true` is sent on the
    /// returned channel
    pub fn start_cleanup_task(&self, idle_timeout: Duration, every: Duration) -> watch::Sender<bool> {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let state = self.clone();

        tokio::spawn(async move {
            let mut timer = tokio::time::interval(every);
            timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = timer.tick() => {
                        let removed = state.evict_idle(idle_timeout).await;
                        if removed > 0 {
                            let remaining = state.sessions.read().await.len();
                            info!("Session cleanup: removed {} idle sessions ({} remaining)", removed, remaining);
                        }
                    }
                    _ = shutdown_rx.changed() => {
                        if *shutdown_rx.borrow() {
                            info!("Session cleanup task shutting down");
                            break;
                        }
                    }
                }
            }
        });

        shutdown_tx
    }
}
