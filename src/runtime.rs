//! Runtime for executing sessions
//!
//! Sessions live in process memory, each behind its own `Mutex`. The lock
//! is held only while an event is applied, never across the provider call,
//! so readers see `AwaitingReply` while the model is thinking. A session
//! that is waiting rejects further events through the state machine.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::{DispatchOutcome, RecordedTurn, SessionRuntime};
pub use traits::*;

use crate::state_machine::{ConvContext, Event, Session, TransitionError};
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

/// How often idle sessions are looked for
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runtime over a type-erased completion client, as used by the server
pub type ProductionRuntime = SessionRuntime<Arc<dyn CompletionClient>>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("Session task failed: {0}")]
    Task(String),
}

/// A session plus the time it was last touched
struct SessionSlot {
    session: Session,
    last_activity: Instant,
}

impl SessionSlot {
    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

type SessionHandle = Arc<Mutex<SessionSlot>>;

/// Manager for all live sessions
pub struct SessionManager {
    runtime: Arc<ProductionRuntime>,
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionManager {
    pub fn new(
        context: ConvContext,
        client: Arc<dyn CompletionClient>,
        completion_timeout: Duration,
    ) -> Self {
        Self {
            runtime: Arc::new(SessionRuntime::new(context, client, completion_timeout)),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn model_id(&self) -> &str {
        self.runtime.client().model_id()
    }

    /// Create a fresh session and return a snapshot of it
    pub async fn create(&self) -> Session {
        let session = Session::new(uuid::Uuid::new_v4().to_string());
        let snapshot = session.clone();
        let slot = SessionSlot {
            session,
            last_activity: Instant::now(),
        };
        let active = {
            let mut sessions = self.sessions.write().await;
            sessions.insert(snapshot.id.clone(), Arc::new(Mutex::new(slot)));
            sessions.len()
        };
        tracing::info!(session_id = %snapshot.id, active, "Session created");
        snapshot
    }

    async fn handle(&self, id: &str) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    /// Current copy of a session
    pub async fn snapshot(&self, id: &str) -> Result<Session, SessionError> {
        let handle = self.handle(id).await?;
        let slot = handle.lock().await;
        Ok(slot.session.clone())
    }

    /// Dispatch an event and return its outcome with the updated session.
    ///
    /// When the event starts a provider call the lock is released for the
    /// duration of the call and taken again to record the reply. The work
    /// runs on its own task so a dropped request cannot strand the session
    /// in `AwaitingReply`.
    pub async fn dispatch(
        &self,
        id: &str,
        event: Event,
    ) -> Result<(DispatchOutcome, Session), SessionError> {
        let handle = self.handle(id).await?;
        let runtime = Arc::clone(&self.runtime);

        let task = tokio::spawn(async move {
            let mut outcome = DispatchOutcome::default();

            let (session_id, prompt) = {
                let mut slot = handle.lock().await;
                slot.touch();
                let prompt = runtime.step(&mut slot.session, event, &mut outcome)?;
                match prompt {
                    Some(prompt) => (slot.session.id.clone(), prompt),
                    None => return Ok((outcome, slot.session.clone())),
                }
            };

            let reply = runtime.request_completion(&session_id, &prompt).await;

            let mut slot = handle.lock().await;
            slot.touch();
            runtime.step(&mut slot.session, reply, &mut outcome)?;
            Ok::<_, TransitionError>((outcome, slot.session.clone()))
        });

        task.await
            .map_err(|e| SessionError::Task(e.to_string()))?
            .map_err(SessionError::from)
    }

    /// Drop a session. Returns whether it existed.
    pub async fn close(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session closed");
        }
        removed
    }

    #[allow(dead_code)] // Used by tests
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Remove sessions untouched for longer than `idle_timeout`.
    ///
    /// Sessions that are locked or waiting on the provider are kept.
    /// Returns how many were removed.
    pub async fn evict_idle(&self, idle_timeout: Duration) -> usize {
        let now = Instant::now();
        let mut to_remove = Vec::new();

        // Find idle sessions
        {
            let sessions = self.sessions.read().await;
            for (id, handle) in sessions.iter() {
                if let Ok(slot) = handle.try_lock() {
                    if !slot.session.state.is_busy()
                        && now.duration_since(slot.last_activity) > idle_timeout
                    {
                        to_remove.push(id.clone());
                    }
                }
            }
        }

        // Remove idle sessions
        if !to_remove.is_empty() {
            let mut sessions = self.sessions.write().await;
            for id in &to_remove {
                tracing::info!(session_id = %id, "Evicting idle session");
                sessions.remove(id);
            }
        }
        to_remove.len()
    }

    /// Start a background task that evicts idle sessions every minute.
    ///
    /// The task holds a weak reference and exits once the manager is dropped.
    pub fn spawn_idle_sweeper(self: &Arc<Self>, idle_timeout: Duration) {
        let manager = Arc::downgrade(self);
        tokio::spawn(sweep_idle(manager, idle_timeout, SWEEP_INTERVAL));
    }
}

async fn sweep_idle(manager: Weak<SessionManager>, idle_timeout: Duration, every: Duration) {
    loop {
        tokio::time::sleep(every).await;
        let Some(manager) = manager.upgrade() else {
            tracing::debug!("SessionManager dropped, idle sweeper exiting");
            break;
        };
        manager.evict_idle(idle_timeout).await;
    }
}
