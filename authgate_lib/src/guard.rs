use std::sync::{Arc, Weak};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// The actual data of a guard that is shared by Arc<RwLock<GuardData>>
struct GuardData {
    attempt_count: u32,
    locked: bool,

    /// pending unlock task, only set while locked
    unlock_task: Option<JoinHandle<()>>,
}

impl Drop for GuardData {
    fn drop(&mut self) {
        // a pending unlock task must not outlive the guard
        if let Some(task) = self.unlock_task.take() {
            task.abort();
        }
    }
}

/// Counts failed login attempts within a form session and latches into a
/// locked state once too many failures were recorded.
///
/// While locked, further attempts shall not be forwarded to the
/// authentication backend. The lock releases automatically after the
/// configured window, which also resets the attempt counter.
#[derive(Clone)]
pub struct AttemptGuard {
    data: Arc<RwLock<GuardData>>,
    max_attempts: u32,
    window: Duration,
}

impl AttemptGuard {

    pub fn new(max_attempts: u32, window: Duration) -> Self {
        Self {
            data: Arc::new(RwLock::new(GuardData {
                attempt_count: 0,
                locked: false,
                unlock_task: None,
            })),
            max_attempts,
            window,
        }
    }

    /// Record one failed login attempt
    /// When the configured maximum is reached, the guard locks and arms an
    /// unlock timer for the configured window.
    /// Increments while locked are ignored.
    pub async fn increment_attempt(&self) {
        let mut data = self.data.write().await;

        if data.locked {
            log::warn!("ignoring attempt increment while guard is locked");
            return;
        }

        data.attempt_count += 1;
        log::debug!("failed login attempt recorded ({}/{})", data.attempt_count, self.max_attempts);

        if data.attempt_count >= self.max_attempts {
            data.locked = true;
            log::info!("locking login attempts for {}ms after {} failures",
                       self.window.as_millis(), data.attempt_count);

            // arm unlock timer
            // the task only holds a weak pointer, so a dropped guard is never revived
            let weak: Weak<RwLock<GuardData>> = Arc::downgrade(&self.data);
            let window = self.window;
            data.unlock_task = Some(tokio::spawn(async move {
                tokio::time::sleep(window).await;
                if let Some(data) = weak.upgrade() {
                    let mut data = data.write().await;
                    data.attempt_count = 0;
                    data.locked = false;
                    data.unlock_task = None;
                    log::info!("login attempt guard unlocked, attempt counter reset");
                }
            }));
        }
    }

    /// true while the guard denies further login attempts
    pub async fn is_locked(&self) -> bool {
        self.data.read().await.locked
    }

    /// failed attempts recorded since the last reset
    pub async fn attempt_count(&self) -> u32 {
        self.data.read().await.attempt_count
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const WINDOW: Duration = Duration::from_millis(60_000);

    #[test(tokio::test(start_paused = true))]
    async fn locks_exactly_at_max_attempts() {
        let guard = AttemptGuard::new(5, WINDOW);

        // four failures keep the guard open
        for _ in 0..4 {
            guard.increment_attempt().await;
            assert!(!guard.is_locked().await);
        }

        // the fifth locks it
        guard.increment_attempt().await;
        assert!(guard.is_locked().await);
        assert_eq!(guard.attempt_count().await, 5);
    }

    #[test(tokio::test(start_paused = true))]
    async fn unlocks_after_window() {
        let guard = AttemptGuard::new(5, WINDOW);
        for _ in 0..5 {
            guard.increment_attempt().await;
        }
        assert!(guard.is_locked().await);

        // still locked just before the window elapses
        tokio::time::sleep(Duration::from_millis(59_999)).await;
        assert!(guard.is_locked().await);

        // unlocked afterwards, counter reset
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(!guard.is_locked().await);
        assert_eq!(guard.attempt_count().await, 0);
    }

    #[test(tokio::test(start_paused = true))]
    async fn relock_needs_full_attempt_count() {
        let guard = AttemptGuard::new(2, WINDOW);
        guard.increment_attempt().await;
        guard.increment_attempt().await;
        assert!(guard.is_locked().await);

        tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
        assert!(!guard.is_locked().await);

        // one failure is not enough to re-lock
        guard.increment_attempt().await;
        assert!(!guard.is_locked().await);
        guard.increment_attempt().await;
        assert!(guard.is_locked().await);
    }

    #[test(tokio::test(start_paused = true))]
    async fn is_locked_is_idempotent() {
        let guard = AttemptGuard::new(2, WINDOW);
        guard.increment_attempt().await;
        for _ in 0..10 {
            assert!(!guard.is_locked().await);
        }
        assert_eq!(guard.attempt_count().await, 1);
    }

    #[test(tokio::test(start_paused = true))]
    async fn increments_while_locked_are_ignored() {
        let guard = AttemptGuard::new(3, WINDOW);
        for _ in 0..3 {
            guard.increment_attempt().await;
        }
        assert!(guard.is_locked().await);

        // further increments must not pile up
        guard.increment_attempt().await;
        guard.increment_attempt().await;
        assert_eq!(guard.attempt_count().await, 3);

        // and the reset still yields a clean counter
        tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
        assert_eq!(guard.attempt_count().await, 0);
    }

    #[test(tokio::test(start_paused = true))]
    async fn teardown_cancels_pending_unlock() {
        let guard = AttemptGuard::new(1, WINDOW);
        guard.increment_attempt().await;
        assert!(guard.is_locked().await);

        // drop the guard while the unlock timer is pending
        let weak = Arc::downgrade(&guard.data);
        drop(guard);
        assert!(weak.upgrade().is_none());

        // waiting past the window must not panic nor revive anything
        tokio::time::sleep(WINDOW + WINDOW).await;
        assert!(weak.upgrade().is_none());
    }

    #[test(tokio::test(start_paused = true))]
    async fn clones_share_state() {
        let guard = AttemptGuard::new(2, WINDOW);
        let clone = guard.clone();

        guard.increment_attempt().await;
        clone.increment_attempt().await;
        assert!(guard.is_locked().await);
        assert!(clone.is_locked().await);

        // dropping one handle must not cancel the unlock timer of the other
        drop(clone);
        tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
        assert!(!guard.is_locked().await);
    }
}
