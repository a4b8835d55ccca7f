use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, Instant};
use authgate_lib::guard::AttemptGuard;

/// Unlocked guards older than this are dropped at the next prune
const PRUNE_AGE: Duration = Duration::from_secs(3600);

struct GuardEntry {
    guard: AttemptGuard,
    created: Instant,
}

/// The actual data of the registry that is shared by Arc<RwLock<SessionGuardsData>>
struct SessionGuardsData {
    guards: HashMap<String, GuardEntry>,
    max_attempts: u32,
    window: Duration,
}

/// One AttemptGuard per login form session
///
/// The guard lives from the first failed attempt of a form session until the
/// session logs in successfully, the login page is rendered anew, or the
/// abandoned entry is pruned. Guard state is in-memory only.
#[derive(Clone)]
pub struct SessionGuards(Arc<RwLock<SessionGuardsData>>);

impl SessionGuards {

    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self(Arc::new(RwLock::new(SessionGuardsData {
            guards: HashMap::new(),
            max_attempts,
            window,
        })))
    }

    /// Get the guard of a form session (created on first use)
    pub async fn guard_for(&self, session_token: &str) -> AttemptGuard {
        let mut data = self.0.write().await;
        let max_attempts = data.max_attempts;
        let window = data.window;
        let entry = data.guards.entry(session_token.to_string()).or_insert_with(|| {
            log::debug!("creating attempt guard for session '{}'", session_token);
            GuardEntry {
                guard: AttemptGuard::new(max_attempts, window),
                created: Instant::now(),
            }
        });
        entry.guard.clone()
    }

    /// Tear down the guard of a form session (cancels a pending unlock timer)
    pub async fn remove(&self, session_token: &str) {
        let mut data = self.0.write().await;
        if data.guards.remove(session_token).is_some() {
            log::debug!("removed attempt guard for session '{}'", session_token);
        }
    }

    /// Drop abandoned entries
    /// Locked guards are kept, a lock cannot be shed by abandoning the session.
    pub async fn prune(&self) {
        let mut data = self.0.write().await;
        let mut stale: Vec<String> = Vec::new();
        for (token, entry) in data.guards.iter() {
            if entry.created.elapsed() >= PRUNE_AGE && !entry.guard.is_locked().await {
                stale.push(token.clone());
            }
        }
        if !stale.is_empty() {
            log::debug!("pruning {} abandoned attempt guards", stale.len());
        }
        for token in stale {
            data.guards.remove(&token);
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.0.read().await.guards.len()
    }
}
