use std::fmt;
use tokio::sync::RwLock;

/// Where the network session is in its startup sequence.
///
/// Jobs are only processed in `Ready`. `AwaitingSession` means we have
/// logged on but the web session that trading requires is not yet
/// established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Offline,
    AwaitingSession,
    Ready,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionState::Offline => "offline",
            SessionState::AwaitingSession => "awaiting-session",
            SessionState::Ready => "ready",
        };
        write!(f, "{}", s)
    }
}

/// Shared view of the session state for anything that needs to gate on
/// readiness.
#[derive(Debug)]
pub struct SessionTracker {
    state: RwLock<SessionState>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::Offline),
        }
    }

    /// A tracker that starts out ready. Handy for tests and tools that
    /// bring their own session management.
    pub fn ready() -> Self {
        Self {
            state: RwLock::new(SessionState::Ready),
        }
    }

    pub async fn state(&self) -> SessionState {
        *self.state.read().await
    }

    pub async fn set_state(&self, state: SessionState) {
        let mut current = self.state.write().await;
        if *current != state {
            tracing::info!(from = %current, to = %state, "Session state changed");
        }
        *current = state;
    }

    pub async fn is_ready(&self) -> bool {
        self.state().await == SessionState::Ready
    }
}

impl Default for SessionTracker {
    fn default() -> Self {
        Self::new()
    }
}
